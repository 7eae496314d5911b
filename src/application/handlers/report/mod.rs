//! Final report delivery.
//!
//! The dispatcher sends a confirmed session's report to the external
//! evaluator with bounded retries and commits `callback_sent` exactly once.

mod callback_dispatcher;
mod retry_policy;

pub use callback_dispatcher::{
    CallbackDispatcher, DispatchOutcome, DEFAULT_MAX_CONCURRENT_DELIVERIES,
};
pub use retry_policy::RetryPolicy;
