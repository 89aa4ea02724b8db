//! Scaling-activity report engine.
//!
//! Takes the raw feed of fleet-scaling events, normalizes each record,
//! classifies it (scale-out / scale-in, success / failure / in-progress),
//! and folds a same-day summary. Pure and synchronous: the caller
//! supplies the records and the reference day, and identical inputs
//! always produce identical reports.

mod builder;
mod classify;
mod models;
mod normalize;
mod summary;

pub use builder::*;
pub use classify::*;
pub use models::*;
pub use normalize::*;
pub use summary::*;
