//! Error handling utilities
//!
//! Run-level failures (`DispatchError`) abort or degrade the whole run, while
//! per-identifier failures (`ItemError`) are retried and finally recorded as
//! failed outcomes without ever escaping the retry controller.

mod helpers;
mod item;
mod types;

pub use item::ItemError;
pub use types::{DispatchError, Result};
