//! Next-Fit Walkthrough
//!
//! Drives the reference five-block configuration through the classic
//! coursework sequence and prints the block table after each step, showing
//! the cursor rotating instead of restarting at block 1.
//!
//! # Run
//!
//! ```bash
//! cargo run --example next_fit
//! ```

use nextfit::ledger::{AllocationLedger, LedgerConfig};
use nextfit::report;

fn main() {
    println!("=== Next-Fit Memory Allocation Demo ===\n");

    let config = LedgerConfig::default();
    println!("Block capacities (KB): {:?}\n", config.capacities);

    let mut ledger = AllocationLedger::new(config).expect("valid config");
    println!("{}", report::render_table(&ledger.snapshot()));

    for size in [15, 10, 10, 25, 40] {
        match ledger.allocate(size) {
            Ok(a) => println!(
                "allocate {size:>3} KB -> job '{}' in block {} (cursor now {})",
                a.job_id,
                a.block_id,
                ledger.cursor() + 1
            ),
            Err(err) => println!("allocate {size:>3} KB -> {err}"),
        }
    }
    println!("\n{}", report::render_table(&ledger.snapshot()));

    println!("release job '2' (the exact-fit 10 KB job in block 2)");
    let freed = ledger.release("2").expect("job 2 is active");
    println!("freed {} KB from block {}\n", freed.size, freed.block_id);

    // An oversized job fails after a full rotation; the cursor is back
    // where it started.
    let cursor = ledger.cursor();
    let err = ledger.allocate(1000).expect_err("cannot fit 1000 KB");
    println!("allocate 1000 KB -> {err}");
    println!(
        "cursor before {} / after {} (failed rotation is a no-op)\n",
        cursor + 1,
        ledger.cursor() + 1
    );

    println!("{}", report::render_table(&ledger.snapshot()));
}
