//! Text rendering of ledger snapshots.
//!
//! Produces the classic block-status table of the coursework simulator:
//! block number, total size, free, used, and the occupant list (`"None"`
//! for an empty block). Pure string building, no I/O; hosts decide where
//! the text goes.
//!
//! # Examples
//!
//! ```rust
//! use nextfit::ledger::{AllocationLedger, LedgerConfig};
//! use nextfit::report;
//!
//! let mut ledger = AllocationLedger::new(LedgerConfig::default()).unwrap();
//! ledger.allocate_as(15, "A").unwrap();
//!
//! let table = report::render_table(&ledger.snapshot());
//! assert!(table.contains("A (15KB)"));
//! assert!(table.contains("None"));
//! ```

use std::fmt::Write;

use crate::snapshot::{BlockView, LedgerSnapshot};

const HEADERS: [&str; 5] = ["Block No", "Size", "Free", "Used", "Process"];

/// Format a block's occupant list the way the reference simulator did:
/// `"A (5KB), B (3KB)"`, or `"None"` when the block is empty.
pub fn occupant_summary(view: &BlockView) -> String {
    if view.occupants.is_empty() {
        return "None".to_string();
    }

    view.occupants
        .iter()
        .map(|(job, size)| format!("{job} ({size}KB)"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a snapshot as an aligned plain-text table, one row per block,
/// followed by a totals line.
pub fn render_table(snapshot: &LedgerSnapshot) -> String {
    let rows: Vec<[String; 5]> = snapshot
        .blocks
        .iter()
        .map(|view| {
            [
                view.block_id.to_string(),
                view.capacity.to_string(),
                view.free.to_string(),
                view.used.to_string(),
                occupant_summary(view),
            ]
        })
        .collect();

    // Column widths: widest of header and any cell.
    let mut widths: [usize; 5] = [0; 5];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.len();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS.map(String::from), &widths);
    write_rule(&mut out, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }

    let _ = writeln!(
        out,
        "Total: {} KB, free {} KB, used {} KB",
        snapshot.total_capacity, snapshot.total_free, snapshot.total_used
    );
    out
}

fn write_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

fn write_rule(out: &mut String, widths: &[usize; 5]) {
    let line = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{line}");
}
