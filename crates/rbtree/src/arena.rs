//! Slot arena owning every node of one tree.
//!
//! Slot 0 is the sentinel and is never handed out. Released slots go on an
//! intrusive free list and get their generation bumped, so a handle minted
//! for the previous occupant no longer matches. A slot whose generation has
//! reached `u32::MAX` is retired on release and never reused.

use log::warn;

use crate::error::RbError;
use crate::types::NIL;

#[derive(Debug)]
enum Slot<N> {
    Sentinel,
    Occupied(N),
    Vacant { next_free: u32 },
    Retired,
}

#[derive(Debug)]
struct Entry<N> {
    generation: u32,
    slot: Slot<N>,
}

#[derive(Debug)]
pub struct Arena<N> {
    entries: Vec<Entry<N>>,
    free_head: u32,
    len: usize,
    max_nodes: Option<usize>,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                generation: 0,
                slot: Slot::Sentinel,
            }],
            free_head: NIL,
            len: 0,
            max_nodes: None,
        }
    }

    /// Reserves room for `capacity` nodes plus the sentinel without aborting
    /// on allocation failure.
    pub fn with_capacity(capacity: usize, max_nodes: Option<usize>) -> Result<Self, RbError> {
        let mut entries = Vec::new();
        entries
            .try_reserve(capacity.saturating_add(1))
            .map_err(|_| {
                warn!("could not reserve {capacity} arena slots");
                RbError::AllocationFailure
            })?;
        entries.push(Entry {
            generation: 0,
            slot: Slot::Sentinel,
        });
        Ok(Self {
            entries,
            free_head: NIL,
            len: 0,
            max_nodes,
        })
    }

    /// Number of live nodes (the sentinel is not counted).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots currently allocated, sentinel included.
    pub fn slots(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn node(&self, idx: u32) -> Option<&N> {
        match self.entries.get(idx as usize) {
            Some(Entry {
                slot: Slot::Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn node_mut(&mut self, idx: u32) -> Option<&mut N> {
        match self.entries.get_mut(idx as usize) {
            Some(Entry {
                slot: Slot::Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    /// Generation of an occupied slot; `None` for the sentinel, vacant slots
    /// and out-of-range indices.
    pub fn generation(&self, idx: u32) -> Option<u32> {
        match self.entries.get(idx as usize) {
            Some(Entry {
                generation,
                slot: Slot::Occupied(_),
            }) => Some(*generation),
            _ => None,
        }
    }

    /// Stores `node` in a free slot and returns its index.
    pub fn alloc(&mut self, node: N) -> Result<u32, RbError> {
        if let Some(max) = self.max_nodes {
            if self.len >= max {
                warn!("node limit of {max} reached");
                return Err(RbError::AllocationFailure);
            }
        }

        let idx = if self.free_head != NIL {
            let idx = self.free_head;
            let entry = &mut self.entries[idx as usize];
            let next_free = match entry.slot {
                Slot::Vacant { next_free } => next_free,
                _ => NIL,
            };
            entry.slot = Slot::Occupied(node);
            self.free_head = next_free;
            idx
        } else {
            let idx = u32::try_from(self.entries.len()).map_err(|_| {
                warn!("arena index space exhausted");
                RbError::AllocationFailure
            })?;
            self.entries.try_reserve(1).map_err(|_| {
                warn!("could not grow arena past {idx} slots");
                RbError::AllocationFailure
            })?;
            self.entries.push(Entry {
                generation: 0,
                slot: Slot::Occupied(node),
            });
            idx
        };

        self.len += 1;
        Ok(idx)
    }

    /// Vacates an occupied slot and hands back its node.
    pub fn release(&mut self, idx: u32) -> Option<N> {
        let entry = self.entries.get_mut(idx as usize)?;
        if !matches!(entry.slot, Slot::Occupied(_)) {
            return None;
        }
        let slot = match entry.generation.checked_add(1) {
            Some(generation) => {
                entry.generation = generation;
                let vacant = Slot::Vacant {
                    next_free: self.free_head,
                };
                self.free_head = idx;
                std::mem::replace(&mut entry.slot, vacant)
            }
            None => {
                warn!("slot {idx} exhausted its generations, retiring it");
                std::mem::replace(&mut entry.slot, Slot::Retired)
            }
        };
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => Some(node),
            _ => None,
        }
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}
