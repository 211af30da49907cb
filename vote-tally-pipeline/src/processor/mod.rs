//! Pure computations behind every counter update: translating a vote
//! transition into counter deltas and scoring the resulting counts.
mod delta;
mod scoring;

pub use delta::{resolve_delta, resolve_delta_str};
pub use scoring::{NEUTRAL_SUCCESS_RATE, WILSON_Z, success_rate, success_rate_for};
