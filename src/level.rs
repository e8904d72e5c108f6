//! Score thresholds, speed multipliers and tick cadence.

use std::time::Duration;

use crate::config::{LEVEL_2_THRESHOLD, LEVEL_3_THRESHOLD, MAX_LEVEL, WIN_SCORE};

/// Speed multiplier for `level`: 1, 2 or 3.
#[must_use]
pub fn speed_multiplier(level: u8) -> u32 {
    u32::from(level.clamp(1, MAX_LEVEL))
}

/// Score needed to enter `level`, or `None` for the starting level.
#[must_use]
pub fn threshold_for(level: u8) -> Option<u32> {
    match level {
        2 => Some(LEVEL_2_THRESHOLD),
        3 => Some(LEVEL_3_THRESHOLD),
        _ => None,
    }
}

/// Highest level whose threshold `score` has reached.
#[must_use]
pub fn level_for_score(score: u32) -> u8 {
    (2..=MAX_LEVEL)
        .rev()
        .find(|level| threshold_for(*level).is_some_and(|threshold| score >= threshold))
        .unwrap_or(1)
}

/// True when moving from `previous` to `current` reached `threshold`.
#[must_use]
pub fn crossed(previous: u32, current: u32, threshold: u32) -> bool {
    previous < threshold && current >= threshold
}

/// Level the player should advance to after scoring, if any.
///
/// Only the level directly above `level` is considered, and only when its
/// threshold was crossed by this score change.
#[must_use]
pub fn next_level(level: u8, previous: u32, current: u32) -> Option<u8> {
    if level >= MAX_LEVEL {
        return None;
    }

    let threshold = threshold_for(level + 1)?;
    if crossed(previous, current, threshold) {
        Some(level_for_score(current).max(level + 1))
    } else {
        None
    }
}

/// True once the score has reached the winning total.
#[must_use]
pub fn has_won(score: u32) -> bool {
    score >= WIN_SCORE
}

/// Tick interval at `level`, truncated to whole milliseconds.
#[must_use]
pub fn tick_interval(base: Duration, level: u8) -> Duration {
    let millis = base.as_millis() / u128::from(speed_multiplier(level));
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}
