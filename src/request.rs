//! Request/response envelope for presentation layers.
//!
//! The ledger's whole surface as serde-friendly values: a host (GUI, CLI,
//! test harness) builds a [`LedgerRequest`], calls [`apply`], and renders
//! the [`LedgerResponse`] or the error. Notices are plain values too — the
//! reference simulator's auto-expiring message pop-ups become a
//! [`Notice`] with text and severity, and any expiry timer belongs to the
//! host.
//!
//! # Examples
//!
//! ```rust
//! use nextfit::ledger::{AllocationLedger, LedgerConfig};
//! use nextfit::request::{apply, LedgerRequest, LedgerResponse};
//!
//! let mut ledger = AllocationLedger::new(LedgerConfig::default()).unwrap();
//!
//! let response = apply(
//!     &mut ledger,
//!     LedgerRequest::SubmitJob { size_kb: 15, job_id: None },
//! )
//! .unwrap();
//!
//! assert!(matches!(response, LedgerResponse::Allocated(_)));
//! ```

use serde::{Deserialize, Serialize};

use crate::ledger::{Allocation, AllocationLedger, Release};
use crate::snapshot::LedgerSnapshot;
use crate::{Error, Result};

/// One operator request against the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerRequest {
    /// Submit a job of `size_kb`; the ledger mints an id when `job_id` is
    /// omitted.
    SubmitJob {
        /// Requested size in KB.
        size_kb: u32,
        /// Caller-chosen job identifier, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        job_id: Option<String>,
    },
    /// Complete a job, returning its space to its block.
    CompleteJob {
        /// The job to complete.
        job_id: String,
    },
    /// Read the current block table.
    Status,
}

/// Successful outcome of a [`LedgerRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LedgerResponse {
    /// A job was placed.
    Allocated(Allocation),
    /// A job completed and its space was freed.
    Released(Release),
    /// Current ledger view.
    Status(LedgerSnapshot),
}

/// Dispatch one request against a ledger.
///
/// Job names in `CompleteJob` are trimmed of surrounding whitespace, and a
/// blank name is rejected before touching the ledger — the same gate the
/// reference simulator put on its entry field.
pub fn apply(ledger: &mut AllocationLedger, request: LedgerRequest) -> Result<LedgerResponse> {
    match request {
        LedgerRequest::SubmitJob { size_kb, job_id } => {
            let allocation = match job_id {
                Some(id) => ledger.allocate_as(size_kb, id)?,
                None => ledger.allocate(size_kb)?,
            };
            Ok(LedgerResponse::Allocated(allocation))
        }
        LedgerRequest::CompleteJob { job_id } => {
            let job_id = job_id.trim();
            if job_id.is_empty() {
                return Err(Error::invalid_request("job name is empty"));
            }
            Ok(LedgerResponse::Released(ledger.release(job_id)?))
        }
        LedgerRequest::Status => Ok(LedgerResponse::Status(ledger.snapshot())),
    }
}

/// How a host should style a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Operation succeeded.
    Info,
    /// Operation was rejected or failed.
    Error,
}

/// A human-readable, transient notice about one operation. A value only:
/// the core models no time, so showing and expiring it is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Display text.
    pub text: String,
    /// Styling hint.
    pub severity: Severity,
}

impl Notice {
    /// Notice for a successful allocation.
    pub fn allocated(allocation: &Allocation) -> Self {
        Self {
            text: format!(
                "Job '{}' of size {} KB allocated successfully!",
                allocation.job_id, allocation.size
            ),
            severity: Severity::Info,
        }
    }

    /// Notice for a successful release.
    pub fn released(release: &Release) -> Self {
        Self {
            text: format!("Job '{}' completed successfully!", release.job_id),
            severity: Severity::Info,
        }
    }

    /// Notice for a failed operation.
    pub fn failure(err: &Error) -> Self {
        Self {
            text: err.to_string(),
            severity: Severity::Error,
        }
    }

    /// Notice for any request outcome.
    pub fn of(outcome: &Result<LedgerResponse>) -> Option<Self> {
        match outcome {
            Ok(LedgerResponse::Allocated(a)) => Some(Self::allocated(a)),
            Ok(LedgerResponse::Released(r)) => Some(Self::released(r)),
            Ok(LedgerResponse::Status(_)) => None,
            Err(err) => Some(Self::failure(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;
    use crate::ledger::LedgerConfig;

    fn ledger() -> AllocationLedger {
        AllocationLedger::new(LedgerConfig::default()).unwrap()
    }

    #[test]
    fn test_submit_with_minted_id() {
        let mut ledger = ledger();
        let response = apply(
            &mut ledger,
            LedgerRequest::SubmitJob {
                size_kb: 15,
                job_id: None,
            },
        )
        .unwrap();

        match response {
            LedgerResponse::Allocated(a) => {
                assert_eq!(a.job_id, "1");
                assert_eq!(a.block_id, BlockId::new(1));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_submit_with_caller_id_then_complete() {
        let mut ledger = ledger();
        apply(
            &mut ledger,
            LedgerRequest::SubmitJob {
                size_kb: 5,
                job_id: Some("A".to_string()),
            },
        )
        .unwrap();

        let response = apply(
            &mut ledger,
            LedgerRequest::CompleteJob {
                job_id: "A".to_string(),
            },
        )
        .unwrap();

        assert!(matches!(
            response,
            LedgerResponse::Released(Release { ref job_id, size: 5, .. }) if job_id == "A"
        ));
    }

    #[test]
    fn test_complete_trims_job_name() {
        let mut ledger = ledger();
        ledger.allocate_as(5, "A").unwrap();

        let response = apply(
            &mut ledger,
            LedgerRequest::CompleteJob {
                job_id: "  A ".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(response, LedgerResponse::Released(_)));
    }

    #[test]
    fn test_complete_blank_name_rejected() {
        let mut ledger = ledger();
        let err = apply(
            &mut ledger,
            LedgerRequest::CompleteJob {
                job_id: "   ".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_status_reads_without_mutating() {
        let mut ledger = ledger();
        ledger.allocate_as(5, "A").unwrap();
        let before = ledger.clone();

        let response = apply(&mut ledger, LedgerRequest::Status).unwrap();
        assert_eq!(ledger, before);

        match response {
            LedgerResponse::Status(snapshot) => {
                assert_eq!(snapshot.total_used, 5);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_request_serde_round_trip() {
        let requests = vec![
            LedgerRequest::SubmitJob {
                size_kb: 12,
                job_id: None,
            },
            LedgerRequest::SubmitJob {
                size_kb: 7,
                job_id: Some("A".to_string()),
            },
            LedgerRequest::CompleteJob {
                job_id: "A".to_string(),
            },
            LedgerRequest::Status,
        ];

        for request in requests {
            let json = serde_json::to_string(&request).unwrap();
            let back: LedgerRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(back, request);
        }
    }

    #[test]
    fn test_notice_texts() {
        let mut ledger = ledger();

        let outcome = apply(
            &mut ledger,
            LedgerRequest::SubmitJob {
                size_kb: 15,
                job_id: None,
            },
        );
        let notice = Notice::of(&outcome).unwrap();
        assert_eq!(notice.severity, Severity::Info);
        assert_eq!(notice.text, "Job '1' of size 15 KB allocated successfully!");

        let outcome = apply(
            &mut ledger,
            LedgerRequest::CompleteJob {
                job_id: "1".to_string(),
            },
        );
        let notice = Notice::of(&outcome).unwrap();
        assert_eq!(notice.text, "Job '1' completed successfully!");

        let outcome = apply(
            &mut ledger,
            LedgerRequest::CompleteJob {
                job_id: "ghost".to_string(),
            },
        );
        let notice = Notice::of(&outcome).unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.text, "job not found: job 'ghost'");
    }

    #[test]
    fn test_status_produces_no_notice() {
        let mut ledger = ledger();
        let outcome = apply(&mut ledger, LedgerRequest::Status);
        assert!(Notice::of(&outcome).is_none());
    }
}
