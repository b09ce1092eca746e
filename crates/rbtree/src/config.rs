/// Construction options for [`RbTree::with_config`](crate::RbTree::with_config).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RbTreeConfig {
    /// Node slots reserved up front, not counting the sentinel.
    pub initial_capacity: usize,
    /// Upper bound on live nodes. Inserting past it fails with
    /// [`RbError::AllocationFailure`](crate::RbError::AllocationFailure).
    pub max_nodes: Option<usize>,
}

impl RbTreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let config = RbTreeConfig::new()
            .with_initial_capacity(64)
            .with_max_nodes(128);
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.max_nodes, Some(128));
        assert_eq!(RbTreeConfig::default().max_nodes, None);
    }
}
