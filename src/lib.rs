//! Next-Fit Memory Allocation Ledger
//!
//! A faithful, deterministic simulation of the Next-Fit allocation strategy
//! over a fixed set of memory partitions, as taught in operating-systems
//! coursework: jobs are submitted with a size in KB, the ledger scans its
//! blocks starting wherever the previous scan left off, and the first block
//! with enough free space wins.
//!
//! # Overview
//!
//! The crate is organized around one mutable component:
//!
//! - **Ledger**: [`ledger::AllocationLedger`] owns the fixed ordered block
//!   list and the rotating cursor, and exposes `allocate` / `release`
//! - **Blocks**: [`block::Block`] tracks capacity, free space, and the jobs
//!   occupying it
//! - **Snapshot**: [`snapshot::LedgerSnapshot`] is the read-only view a
//!   display layer consumes
//! - **Report**: [`report`] renders a snapshot as the classic block-status
//!   table
//! - **Requests**: [`request`] wraps the whole surface in a serde-friendly
//!   request/response envelope
//!
//! # Next Fit vs. First Fit
//!
//! First Fit restarts every scan at block 1. Next Fit remembers where the
//! previous search ended (the *cursor*) and resumes there, spreading
//! allocations across the block list instead of piling them into the early
//! blocks. The scan here starts **at** the cursor block, inclusive, and the
//! cursor advances once per probed block whether or not the probe fits, so
//! a full failed rotation leaves the cursor exactly where it started.
//!
//! # Examples
//!
//! ```rust
//! use nextfit::ledger::{AllocationLedger, LedgerConfig};
//!
//! // The reference configuration: five partitions, sizes in KB.
//! let mut ledger = AllocationLedger::new(LedgerConfig::default()).unwrap();
//!
//! let job = ledger.allocate(15).unwrap();
//! assert_eq!(job.block_id.value(), 1);
//!
//! ledger.release(&job.job_id).unwrap();
//! assert_eq!(ledger.total_used(), 0);
//! ```
//!
//! # Quality Standards
//!
//! - Deterministic: identical request sequences produce identical states
//! - Property-based tests for every ledger invariant
//! - Benchmarks for the scan loop

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_const_for_fn)]

pub mod block;
pub mod error;
pub mod ledger;
pub mod report;
pub mod request;
pub mod snapshot;

pub use error::{Error, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference block capacities in KB, matching the classic five-partition
/// coursework configuration.
pub const DEFAULT_CAPACITIES: [u32; 5] = [20, 10, 30, 50, 15];
