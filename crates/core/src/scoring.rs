//! Scoring module - points, level progression, and gravity speed-up
//!
//! Line clears award a per-count base (100/300/500/800) multiplied by the
//! level the player was on when the lines locked. Manual drops pay per row:
//! one point for a soft drop step, two per row for a hard drop. Level is a
//! pure function of total lines cleared (one level per ten lines, starting
//! at level 1), and each level-up shaves 50ms off the drop interval down
//! to a 100ms floor.

use crate::types::{
    DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_CLEAR_POINTS, SOFT_DROP_POINTS_PER_ROW,
};

/// Points for clearing `lines` rows simultaneously at the given level.
///
/// `level` is the level in effect when the piece locked, before any
/// level-up triggered by these same lines.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    let base = LINE_CLEAR_POINTS
        .get(lines as usize)
        .copied()
        .unwrap_or(0);
    base * level
}

/// Points for manually descending `rows` rows.
pub fn drop_points(rows: u32, hard: bool) -> u32 {
    let per_row = if hard {
        HARD_DROP_POINTS_PER_ROW
    } else {
        SOFT_DROP_POINTS_PER_ROW
    };
    rows * per_row
}

/// Level implied by a total line count (1-based).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Drop interval after one level-up, floored at the minimum.
pub fn next_drop_interval(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(DROP_INTERVAL_STEP_MS)
        .max(DROP_INTERVAL_MIN_MS)
}
