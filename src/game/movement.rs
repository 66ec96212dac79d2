//! # Movement Rules
//!
//! Resolves requested motion against the capability table of the tiles the
//! character would enter, and derives facing and display orientation from
//! the motion vector.

use crate::config::DISPLAY_DEAD_ZONE;
use crate::{Capability, ChunkedWorld, DisplayOrientation, Facing, Point};

/// Scales a keyboard-style vector so diagonals have unit length.
///
/// # Examples
///
/// ```
/// use world_explorer::normalize_motion;
///
/// let (x, y) = normalize_motion(1.0, -1.0);
/// assert!((x * x + y * y - 1.0).abs() < 1e-9);
/// assert_eq!(normalize_motion(1.0, 0.0), (1.0, 0.0));
/// ```
pub fn normalize_motion(x_move: f64, y_move: f64) -> (f64, f64) {
    if x_move != 0.0 && y_move != 0.0 {
        (x_move / std::f64::consts::SQRT_2, y_move / std::f64::consts::SQRT_2)
    } else {
        (x_move, y_move)
    }
}

/// Moves a character at `from` by `speed · (x_move, y_move)`.
///
/// The diagonal destination is taken when its tile allows movement and at
/// least one of the axis-only destinations does too. Otherwise the X-only
/// move is tried, then the Y-only move.
pub fn resolve_motion(world: &ChunkedWorld, from: Point, x_move: f64, y_move: f64, speed: f64) -> Point {
    let dx = speed * x_move;
    let dy = speed * y_move;

    let diagonal = from.offset(dx, dy);
    let along_x = from.offset(dx, 0.0);
    let along_y = from.offset(0.0, dy);

    let can_enter = |p: Point| world.get(p.tile()).allows(Capability::Move);
    let (diagonal_ok, x_ok, y_ok) = (can_enter(diagonal), can_enter(along_x), can_enter(along_y));

    if diagonal_ok && (x_ok || y_ok) {
        diagonal
    } else if x_ok {
        along_x
    } else if y_ok {
        along_y
    } else {
        from
    }
}

/// Facing implied by a motion vector, `None` when there is no motion.
///
/// The dominant axis wins; ties go to the vertical axis.
pub fn facing_from_motion(x_move: f64, y_move: f64) -> Option<Facing> {
    if x_move == 0.0 && y_move == 0.0 {
        return None;
    }
    let facing = if x_move.abs() > y_move.abs() {
        if x_move > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    } else if y_move > 0.0 {
        Facing::Top
    } else {
        Facing::Bottom
    };
    Some(facing)
}

/// Sprite orientation for a motion vector.
///
/// Axes below the dead zone are ignored; no motion shows the front sprite.
pub fn display_orientation(x_move: f64, y_move: f64) -> DisplayOrientation {
    let horizontal = if x_move.abs() > DISPLAY_DEAD_ZONE {
        Some(x_move > 0.0)
    } else {
        None
    };
    let vertical = if y_move.abs() > DISPLAY_DEAD_ZONE {
        Some(y_move > 0.0)
    } else {
        None
    };

    match (horizontal, vertical) {
        (Some(false), Some(true)) => DisplayOrientation::LeftBack,
        (Some(true), Some(true)) => DisplayOrientation::RightBack,
        (Some(false), Some(false)) => DisplayOrientation::LeftFront,
        (Some(true), Some(false)) => DisplayOrientation::RightFront,
        (Some(false), None) => DisplayOrientation::Left,
        (Some(true), None) => DisplayOrientation::Right,
        (None, Some(true)) => DisplayOrientation::Back,
        (None, Some(false)) | (None, None) => DisplayOrientation::Front,
    }
}
