//! Memory blocks: the fixed partitions the ledger allocates from.
//!
//! Blocks are created once at ledger construction and never resized,
//! reordered, or destroyed. All mutation goes through the ledger's
//! `allocate`/`release`; this module only exposes the per-block record and
//! its conservation invariant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a memory block: positive, 1-based, assigned in creation
/// order and stable for the block's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl BlockId {
    /// Create a new block ID.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-capacity memory partition.
///
/// Invariant: `free + sum(occupants.values()) == capacity` at all times.
///
/// Occupants are kept in a `BTreeMap` so iteration order (and therefore
/// snapshots, reports, and serialized output) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    capacity: u32,
    free: u32,
    occupants: BTreeMap<String, u32>,
}

impl Block {
    /// Create an empty block with the given id and capacity in KB.
    pub(crate) fn new(id: BlockId, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            free: capacity,
            occupants: BTreeMap::new(),
        }
    }

    /// Block identifier.
    pub const fn id(&self) -> BlockId {
        self.id
    }

    /// Total size in KB, immutable for the block's lifetime.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Unallocated KB remaining.
    pub const fn free(&self) -> u32 {
        self.free
    }

    /// Allocated KB (`capacity - free`).
    pub const fn used(&self) -> u32 {
        self.capacity - self.free
    }

    /// Whether a job of `size` KB fits here. Exact fits count: a block
    /// with `free == size` is a valid target.
    pub const fn fits(&self, size: u32) -> bool {
        self.free >= size
    }

    /// Jobs currently occupying this block, with their allocated sizes.
    pub const fn occupants(&self) -> &BTreeMap<String, u32> {
        &self.occupants
    }

    /// Whether the given job occupies this block.
    pub fn holds(&self, job_id: &str) -> bool {
        self.occupants.contains_key(job_id)
    }

    /// Place a job in this block. Caller has already checked `fits` and
    /// ledger-wide id uniqueness.
    pub(crate) fn place(&mut self, job_id: String, size: u32) {
        debug_assert!(self.fits(size));
        self.free -= size;
        self.occupants.insert(job_id, size);
    }

    /// Remove a job from this block, returning its size, or `None` if the
    /// job is not here.
    pub(crate) fn evict(&mut self, job_id: &str) -> Option<u32> {
        let size = self.occupants.remove(job_id)?;
        self.free += size;
        Some(size)
    }

    /// Check the conservation invariant. Used by tests and debug paths.
    pub fn is_conserved(&self) -> bool {
        let occupied: u32 = self.occupants.values().sum();
        self.free + occupied == self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id() {
        let id = BlockId::new(3);
        assert_eq!(id.value(), 3);
        assert_eq!(id, BlockId(3));
        assert_eq!(format!("{id}"), "3");
    }

    #[test]
    fn test_new_block_starts_empty() {
        let block = Block::new(BlockId::new(1), 20);
        assert_eq!(block.capacity(), 20);
        assert_eq!(block.free(), 20);
        assert_eq!(block.used(), 0);
        assert!(block.occupants().is_empty());
        assert!(block.is_conserved());
    }

    #[test]
    fn test_fits_uses_greater_or_equal() {
        let block = Block::new(BlockId::new(1), 10);
        assert!(block.fits(10));
        assert!(block.fits(1));
        assert!(!block.fits(11));
    }

    #[test]
    fn test_place_and_evict() {
        let mut block = Block::new(BlockId::new(1), 20);
        block.place("A".to_string(), 5);

        assert_eq!(block.free(), 15);
        assert_eq!(block.used(), 5);
        assert!(block.holds("A"));
        assert!(block.is_conserved());

        assert_eq!(block.evict("A"), Some(5));
        assert_eq!(block.free(), 20);
        assert!(!block.holds("A"));
        assert!(block.is_conserved());

        assert_eq!(block.evict("A"), None);
    }

    #[test]
    fn test_exact_fit_drains_block() {
        let mut block = Block::new(BlockId::new(2), 10);
        block.place("J".to_string(), 10);
        assert_eq!(block.free(), 0);
        assert!(!block.fits(1));
        assert!(block.fits(0));
        assert!(block.is_conserved());
    }
}
