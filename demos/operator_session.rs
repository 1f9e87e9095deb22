//! Operator Session
//!
//! Replays an interactive session through the request/response envelope:
//! the same submit-job / complete-job stream a GUI front end would issue,
//! with notices rendered as one-line messages instead of pop-ups.
//!
//! # Run
//!
//! ```bash
//! cargo run --example operator_session
//! ```

use nextfit::ledger::{AllocationLedger, LedgerConfig};
use nextfit::report;
use nextfit::request::{apply, LedgerRequest, LedgerResponse, Notice, Severity};

fn main() {
    println!("=== Operator Session Demo ===\n");

    let mut ledger = AllocationLedger::new(LedgerConfig::default()).expect("valid config");

    let session = [
        LedgerRequest::SubmitJob {
            size_kb: 15,
            job_id: None,
        },
        LedgerRequest::SubmitJob {
            size_kb: 10,
            job_id: None,
        },
        LedgerRequest::SubmitJob {
            size_kb: 7,
            job_id: Some("editor".to_string()),
        },
        LedgerRequest::SubmitJob {
            size_kb: 1000,
            job_id: None,
        },
        LedgerRequest::CompleteJob {
            job_id: "1".to_string(),
        },
        LedgerRequest::CompleteJob {
            job_id: "ghost".to_string(),
        },
        LedgerRequest::Status,
    ];

    for request in session {
        let label = match &request {
            LedgerRequest::SubmitJob { size_kb, job_id } => match job_id {
                Some(id) => format!("submit '{id}' ({size_kb} KB)"),
                None => format!("submit ({size_kb} KB)"),
            },
            LedgerRequest::CompleteJob { job_id } => format!("complete '{job_id}'"),
            LedgerRequest::Status => "status".to_string(),
        };

        let outcome = apply(&mut ledger, request);

        if let Some(notice) = Notice::of(&outcome) {
            let tag = match notice.severity {
                Severity::Info => "ok ",
                Severity::Error => "err",
            };
            println!("[{tag}] {label}: {}", notice.text);
        }

        if let Ok(LedgerResponse::Status(snapshot)) = outcome {
            println!("\n{}", report::render_table(&snapshot));
        }
    }
}
