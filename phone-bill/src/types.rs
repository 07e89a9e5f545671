/// Monetary amounts.
pub mod money;

pub(crate) mod number;

/// Timestamps, call durations and billable minutes.
pub mod time;
