//! Read-only views of the ledger for display layers.
//!
//! A snapshot is a plain value: taking one never mutates the ledger, and
//! two snapshots with no mutation in between compare equal. Display layers
//! render from these views instead of reaching into the ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};

/// One block's row in the status view.
///
/// Always satisfies `free + used == capacity` and
/// `used == sum(occupants.values())`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    /// Block identifier, 1-based.
    pub block_id: BlockId,
    /// Total size in KB.
    pub capacity: u32,
    /// Unallocated KB.
    pub free: u32,
    /// Allocated KB (`capacity - free`).
    pub used: u32,
    /// Active jobs in this block with their sizes, in deterministic order.
    pub occupants: BTreeMap<String, u32>,
}

impl BlockView {
    /// Capture a block's current state.
    pub(crate) fn of(block: &Block) -> Self {
        Self {
            block_id: block.id(),
            capacity: block.capacity(),
            free: block.free(),
            used: block.used(),
            occupants: block.occupants().clone(),
        }
    }
}

/// Full ledger view: every block in id order, plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Per-block rows, ordered by block id.
    pub blocks: Vec<BlockView>,
    /// Sum of all capacities in KB.
    pub total_capacity: u32,
    /// Sum of all free space in KB.
    pub total_free: u32,
    /// Sum of all used space in KB.
    pub total_used: u32,
}

impl LedgerSnapshot {
    pub(crate) fn new(blocks: Vec<BlockView>) -> Self {
        let total_capacity = blocks.iter().map(|b| b.capacity).sum();
        let total_free = blocks.iter().map(|b| b.free).sum();
        let total_used = blocks.iter().map(|b| b.used).sum();

        Self {
            blocks,
            total_capacity,
            total_free,
            total_used,
        }
    }

    /// Number of blocks in the view.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Number of active jobs across all blocks.
    pub fn active_jobs(&self) -> usize {
        self.blocks.iter().map(|b| b.occupants.len()).sum()
    }

    /// Find the row for a block id.
    pub fn block(&self, id: BlockId) -> Option<&BlockView> {
        self.blocks.iter().find(|b| b.block_id == id)
    }
}
