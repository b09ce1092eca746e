use thiserror::Error;

/// Errors returned by [`RbTree`](crate::RbTree) operations.
///
/// Every error is raised before the tree is touched, so a failed call leaves
/// the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbError {
    #[error("node allocation failed")]
    AllocationFailure,
    #[error("key not found")]
    NotFound,
    #[error("tree is empty")]
    EmptyTree,
    #[error("node reference does not belong to this tree or was already erased")]
    InvalidNodeReference,
    #[error("export buffer holds {capacity} keys but the tree has {len}")]
    BufferTooSmall { capacity: usize, len: usize },
}
