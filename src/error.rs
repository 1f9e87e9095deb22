//! Error types for the allocation ledger.
//!
//! Every ledger operation returns a success-or-failure outcome; nothing in
//! the core panics, logs, or retries. Two of the variants — [`Error::NoFit`]
//! and [`Error::JobNotFound`] — are *expected* outcomes a presentation layer
//! surfaces as a notice, not faults.
//!
//! # Examples
//!
//! ```rust
//! use nextfit::{Error, Result};
//!
//! fn check_size(size_kb: u32) -> Result<()> {
//!     if size_kb == 0 {
//!         return Err(Error::invalid_request("job size must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_size(0).is_err());
//! ```

use std::fmt;

/// Main error type for ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Construction rejected: empty capacity list or a zero capacity.
    InvalidConfig(String),

    /// Allocation request rejected before scanning: zero size.
    InvalidRequest(String),

    /// Requested job id is already an active occupant somewhere in the
    /// ledger.
    DuplicateJob(String),

    /// No block currently has enough free space. A legitimate outcome of a
    /// full ledger, not a fault; the ledger state is unchanged.
    NoFit(String),

    /// Release requested for a job no block holds (unknown or already
    /// completed).
    JobNotFound(String),
}

impl Error {
    /// Create an invalid-config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid-request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a duplicate-job error.
    pub fn duplicate_job(msg: impl Into<String>) -> Self {
        Self::DuplicateJob(msg.into())
    }

    /// Create a no-fit error.
    pub fn no_fit(msg: impl Into<String>) -> Self {
        Self::NoFit(msg.into())
    }

    /// Create a job-not-found error.
    pub fn job_not_found(msg: impl Into<String>) -> Self {
        Self::JobNotFound(msg.into())
    }

    /// Check whether this is an expected operational outcome rather than a
    /// malformed request: a full ledger or a job that already completed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nextfit::Error;
    ///
    /// assert!(Error::no_fit("ledger full").is_expected());
    /// assert!(!Error::invalid_request("zero size").is_expected());
    /// ```
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::NoFit(_) | Self::JobNotFound(_))
    }

    /// Check whether the caller sent something malformed (bad size, bad
    /// config, reused job id).
    pub const fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvalidRequest(_) | Self::DuplicateJob(_)
        )
    }

    /// Get a stable error code for presentation layers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nextfit::Error;
    ///
    /// assert_eq!(Error::no_fit("full").code(), "NO_FIT");
    /// ```
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::DuplicateJob(_) => "DUPLICATE_JOB",
            Self::NoFit(_) => "NO_FIT",
            Self::JobNotFound(_) => "JOB_NOT_FOUND",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            Self::DuplicateJob(msg) => write!(f, "duplicate job: {msg}"),
            Self::NoFit(msg) => write!(f, "no fit: {msg}"),
            Self::JobNotFound(msg) => write!(f, "job not found: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;
