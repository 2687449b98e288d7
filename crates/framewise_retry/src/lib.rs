//! Retry policy and resilient request execution.
//!
//! A single inference call is wrapped in an explicit retry loop: failures are
//! classified through [`framewise_error::RetryableError`], throttling is
//! retried with exponential backoff up to the attempt budget, and everything
//! else is surfaced immediately.
//!
//! ```rust,ignore
//! use framewise_retry::{ResilientRequestExecutor, RetryPolicy};
//!
//! let executor = ResilientRequestExecutor::new(driver, RetryPolicy::default());
//! let narration = executor.execute(&request).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod executor;
mod policy;

pub use executor::ResilientRequestExecutor;
pub use policy::{RetryPolicy, RetryPolicyBuilder};
