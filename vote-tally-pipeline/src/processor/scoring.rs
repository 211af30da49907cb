//! Confidence-weighted ranking score.
//!
//! The score is the lower bound of the Wilson score interval for the share of
//! upvotes at ~95% confidence. Few votes pull the bound down, so a listing
//! with 100 upvotes ranks above one with 2, which ranks above a 1/1 split.
//! See https://www.evanmiller.org/how-not-to-sort-by-average-rating.html
use vote_tally_shared::types::VoteCounters;

/// Standard normal quantile for a two-sided 95% confidence interval.
pub const WILSON_Z: f64 = 1.959963985;

/// Score of a target without votes.
pub const NEUTRAL_SUCCESS_RATE: f64 = 0.5;

/// Computes the Wilson lower bound for `upvotes` out of `upvotes + downvotes`.
///
/// Returns exactly [`NEUTRAL_SUCCESS_RATE`] when there are no votes. The
/// result is clamped to `[0, 1]` and never rounded.
pub fn success_rate(upvotes: u64, downvotes: u64) -> f64 {
    if upvotes == 0 && downvotes == 0 {
        return NEUTRAL_SUCCESS_RATE;
    }

    let n = upvotes as f64 + downvotes as f64;
    let p = upvotes as f64 / n;
    let z2 = WILSON_Z * WILSON_Z;

    let center = p + z2 / (2.0 * n);
    let margin = WILSON_Z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    let bound = (center - margin) / (1.0 + z2 / n);

    bound.clamp(0.0, 1.0)
}

/// Scores a counters snapshot. Negative counts are treated as zero.
pub fn success_rate_for(counters: &VoteCounters) -> f64 {
    success_rate(
        u64::try_from(counters.upvote_count).unwrap_or(0),
        u64::try_from(counters.downvote_count).unwrap_or(0),
    )
}
