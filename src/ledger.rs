//! The allocation ledger: Next-Fit scanning over a fixed block list.
//!
//! One [`AllocationLedger`] owns the ordered blocks and the rotating cursor
//! that makes the strategy "next" fit: every scan starts at the block the
//! previous scan stopped on, inclusive, and wraps around the list at most
//! once. The cursor advances exactly once per probed block, fit or no fit,
//! so a fully failed rotation is a net no-op on the cursor.
//!
//! The ledger is an explicitly constructed value with no hidden global
//! state; tests and hosts can hold as many independent ledgers as they
//! like. It is single-threaded by design: callers that share one across
//! threads must wrap it in a lock, since `allocate` reads and writes the
//! cursor and block state non-atomically across its scan.
//!
//! # Examples
//!
//! ```rust
//! use nextfit::ledger::{AllocationLedger, LedgerConfig};
//!
//! let config = LedgerConfig::with_capacities([20, 10, 30, 50, 15]);
//! let mut ledger = AllocationLedger::new(config).unwrap();
//!
//! // Jobs get minted ids "1", "2", ... when the caller supplies none.
//! let a = ledger.allocate(15).unwrap();
//! assert_eq!(a.job_id, "1");
//! assert_eq!(a.block_id.value(), 1);
//!
//! // Exact fits are valid: block 2 has exactly 10 KB free.
//! let b = ledger.allocate(10).unwrap();
//! assert_eq!(b.block_id.value(), 2);
//!
//! let freed = ledger.release(&a.job_id).unwrap();
//! assert_eq!(freed.size, 15);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};
use crate::snapshot::{BlockView, LedgerSnapshot};
use crate::{Error, Result, DEFAULT_CAPACITIES};

/// Configuration for an allocation ledger: the ordered block capacities in
/// KB, fixed for the ledger's lifetime.
///
/// # Examples
///
/// ```rust
/// use nextfit::ledger::LedgerConfig;
///
/// let config = LedgerConfig::default();
/// assert_eq!(config.capacities, vec![20, 10, 30, 50, 15]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Block capacities in KB, one block per entry, in block-id order.
    pub capacities: Vec<u32>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacities: DEFAULT_CAPACITIES.to_vec(),
        }
    }
}

impl LedgerConfig {
    /// Create a config from an ordered capacity list.
    pub fn with_capacities(capacities: impl Into<Vec<u32>>) -> Self {
        Self {
            capacities: capacities.into(),
        }
    }

    /// Total KB across all blocks.
    pub fn total_capacity(&self) -> u32 {
        self.capacities.iter().sum()
    }

    fn validate(&self) -> Result<()> {
        if self.capacities.is_empty() {
            return Err(Error::invalid_config("capacity list is empty"));
        }
        if let Some(pos) = self.capacities.iter().position(|&c| c == 0) {
            return Err(Error::invalid_config(format!(
                "block {} has zero capacity",
                pos + 1
            )));
        }
        Ok(())
    }
}

/// Outcome of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The job's identifier, caller-supplied or minted.
    pub job_id: String,
    /// The block the job was placed in.
    pub block_id: BlockId,
    /// Allocated size in KB.
    pub size: u32,
}

/// Outcome of a successful release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// The completed job's identifier.
    pub job_id: String,
    /// The block the job was evicted from.
    pub block_id: BlockId,
    /// Freed size in KB.
    pub size: u32,
}

/// Next-Fit allocation ledger over a fixed set of memory blocks.
///
/// Two fallible operations mutate it, [`allocate`](Self::allocate) and
/// [`release`](Self::release); [`snapshot`](Self::snapshot) is the
/// read-only view for display layers. Operations apply sequentially, each
/// seeing the result of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationLedger {
    config: LedgerConfig,
    blocks: Vec<Block>,
    cursor: usize,
    job_counter: u64,
    /// Cross-block index of active jobs. Derived from the blocks' occupant
    /// maps and kept in lockstep; enforces ledger-wide id uniqueness and
    /// gives O(1) release lookup.
    occupancy: HashMap<String, BlockId>,
}

impl AllocationLedger {
    /// Create a ledger with one empty block per configured capacity, in
    /// order, block ids 1-based. The cursor starts at the first block and
    /// minted job ids start at "1".
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;

        let blocks = config
            .capacities
            .iter()
            .enumerate()
            .map(|(i, &capacity)| Block::new(BlockId::new(i as u32 + 1), capacity))
            .collect();

        Ok(Self {
            config,
            blocks,
            cursor: 0,
            job_counter: 1,
            occupancy: HashMap::new(),
        })
    }

    /// The configuration this ledger was built from.
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Number of blocks. Fixed for the ledger's lifetime.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// The blocks in id order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Index of the block the next scan starts at.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of jobs currently holding space.
    pub fn active_jobs(&self) -> usize {
        self.occupancy.len()
    }

    /// Whether the given job currently occupies a block.
    pub fn contains_job(&self, job_id: &str) -> bool {
        self.occupancy.contains_key(job_id)
    }

    /// Total unallocated KB across all blocks.
    pub fn total_free(&self) -> u32 {
        self.blocks.iter().map(Block::free).sum()
    }

    /// Total allocated KB across all blocks.
    pub fn total_used(&self) -> u32 {
        self.blocks.iter().map(Block::used).sum()
    }

    /// Submit a job with a minted identifier.
    ///
    /// Mints the decimal string of the internal job counter and increments
    /// the counter, then allocates as [`allocate_as`](Self::allocate_as).
    /// The counter advances even when the allocation then fails, so job
    /// numbering keeps counting across rejected submissions — the same
    /// numbering the reference simulator produces.
    pub fn allocate(&mut self, size: u32) -> Result<Allocation> {
        if size == 0 {
            return Err(Error::invalid_request("job size must be positive"));
        }
        let job_id = self.job_counter.to_string();
        self.job_counter += 1;
        self.place(job_id, size)
    }

    /// Submit a job under a caller-chosen identifier.
    ///
    /// Fails with [`Error::DuplicateJob`] if the id is already an active
    /// occupant anywhere in the ledger, with [`Error::InvalidRequest`] if
    /// `size` is zero, and with [`Error::NoFit`] if no block has enough
    /// free space.
    pub fn allocate_as(&mut self, size: u32, job_id: impl Into<String>) -> Result<Allocation> {
        if size == 0 {
            return Err(Error::invalid_request("job size must be positive"));
        }
        self.place(job_id.into(), size)
    }

    /// Next-Fit scan: probe up to `n` blocks starting at the cursor block
    /// inclusive, wrapping modulo `n`. First block with enough free space
    /// wins; no best-fit search. The cursor moves one step per probe, so a
    /// failed full rotation lands it back where it started.
    fn place(&mut self, job_id: String, size: u32) -> Result<Allocation> {
        if self.occupancy.contains_key(&job_id) {
            return Err(Error::duplicate_job(format!("job '{job_id}' is active")));
        }

        let n = self.blocks.len();
        let start = self.cursor;

        for _ in 0..n {
            let probe = self.cursor;
            self.cursor = (self.cursor + 1) % n;

            if self.blocks[probe].fits(size) {
                let block_id = self.blocks[probe].id();
                self.blocks[probe].place(job_id.clone(), size);
                self.occupancy.insert(job_id.clone(), block_id);

                return Ok(Allocation {
                    job_id,
                    block_id,
                    size,
                });
            }
        }

        debug_assert_eq!(self.cursor, start);
        Err(Error::no_fit(format!(
            "job '{job_id}' of size {size} KB does not fit in any block"
        )))
    }

    /// Complete a job: remove its occupancy entry and return its size to
    /// the owning block's free space. Does not touch the cursor.
    pub fn release(&mut self, job_id: &str) -> Result<Release> {
        let block_id = self
            .occupancy
            .remove(job_id)
            .ok_or_else(|| Error::job_not_found(format!("job '{job_id}'")))?;

        let block = &mut self.blocks[block_id.value() as usize - 1];
        let size = block
            .evict(job_id)
            .ok_or_else(|| Error::job_not_found(format!("job '{job_id}'")))?;

        Ok(Release {
            job_id: job_id.to_string(),
            block_id,
            size,
        })
    }

    /// Read-only view of every block, in id order, for display.
    ///
    /// Idempotent: two snapshots with no intervening mutation are equal.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let blocks: Vec<BlockView> = self.blocks.iter().map(BlockView::of).collect();
        LedgerSnapshot::new(blocks)
    }

    /// Check both ledger invariants: per-block conservation and agreement
    /// between the occupancy index and the blocks' occupant maps (which
    /// implies ledger-wide disjointness). Test and debug support.
    pub fn check_invariants(&self) -> bool {
        if !self.blocks.iter().all(Block::is_conserved) {
            return false;
        }

        let per_block: usize = self.blocks.iter().map(|b| b.occupants().len()).sum();
        if per_block != self.occupancy.len() {
            return false;
        }

        self.occupancy.iter().all(|(job_id, block_id)| {
            self.blocks
                .get(block_id.value() as usize - 1)
                .is_some_and(|b| b.holds(job_id))
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A random but valid operation script: sizes for submits, indices
    /// into previously submitted ids for completes.
    fn op_strategy() -> impl Strategy<Value = Vec<(bool, u32)>> {
        prop::collection::vec((any::<bool>(), 1u32..60), 1..40)
    }

    proptest! {
        #[test]
        fn prop_conservation_and_disjointness(ops in op_strategy()) {
            let mut ledger =
                AllocationLedger::new(LedgerConfig::default()).unwrap();
            let mut live: Vec<String> = Vec::new();

            for (is_alloc, size) in ops {
                if is_alloc {
                    if let Ok(a) = ledger.allocate(size) {
                        live.push(a.job_id);
                    }
                } else if let Some(id) = live.pop() {
                    ledger.release(&id).unwrap();
                }
                prop_assert!(ledger.check_invariants());
            }
        }

        #[test]
        fn prop_failed_scan_is_cursor_noop(
            sizes in prop::collection::vec(1u32..20, 0..8),
            oversized in 200u32..5000,
        ) {
            let mut ledger =
                AllocationLedger::new(LedgerConfig::default()).unwrap();
            for size in sizes {
                let _ = ledger.allocate(size);
            }

            let cursor = ledger.cursor();
            let free = ledger.total_free();
            prop_assert!(ledger.allocate(oversized).is_err());
            prop_assert_eq!(ledger.cursor(), cursor);
            prop_assert_eq!(ledger.total_free(), free);
        }

        #[test]
        fn prop_release_undoes_allocate(size in 1u32..50) {
            let mut ledger =
                AllocationLedger::new(LedgerConfig::default()).unwrap();
            let empty = ledger.snapshot();

            let a = ledger.allocate(size).unwrap();
            prop_assert_eq!(ledger.total_used(), size);

            let r = ledger.release(&a.job_id).unwrap();
            prop_assert_eq!(r.size, size);
            prop_assert_eq!(r.block_id, a.block_id);
            prop_assert_eq!(ledger.snapshot(), empty);
        }

        #[test]
        fn prop_deterministic_replay(ops in op_strategy()) {
            let run = |ops: &[(bool, u32)]| {
                let mut ledger =
                    AllocationLedger::new(LedgerConfig::default()).unwrap();
                let mut live: Vec<String> = Vec::new();
                for &(is_alloc, size) in ops {
                    if is_alloc {
                        if let Ok(a) = ledger.allocate(size) {
                            live.push(a.job_id);
                        }
                    } else if let Some(id) = live.pop() {
                        let _ = ledger.release(&id);
                    }
                }
                ledger
            };

            prop_assert_eq!(run(&ops), run(&ops));
        }
    }
}
