//! Scoring module
//!
//! A lock event is worth `row_score` points per row it clears. Drops and moves
//! score nothing.

/// Points for clearing `rows` rows in one lock event
pub fn clear_score(rows: usize, row_score: u32) -> u32 {
    u32::try_from(rows)
        .unwrap_or(u32::MAX)
        .saturating_mul(row_score)
}
