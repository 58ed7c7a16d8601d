//! Retry controller with backoff
//!
//! This module wraps the item processor with bounded attempts. Pool-exhaustion
//! failures back off exponentially, every other failure linearly.

mod backoff;
mod controller;
mod sleeper;

pub use backoff::BackoffPolicy;
pub use controller::RetryController;
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
