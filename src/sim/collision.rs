//! Collision and scoring predicates
//!
//! Pure functions over avatar/obstacle geometry. Spans are compared with
//! strict inequalities, so touching edges do not collide; the ground is the
//! one exception and counts contact as a hit.

use super::state::{Avatar, Obstacle};

/// Avatar has reached the bottom of the playfield
pub fn hits_ground(avatar: &Avatar, playfield_height: f64) -> bool {
    avatar.bottom() >= playfield_height
}

/// Horizontal spans `[x-r, x+r]` and `[ox, ox+width]` overlap
pub fn overlaps_horizontally(avatar: &Avatar, obstacle: &Obstacle, width: f64) -> bool {
    avatar.x + avatar.radius > obstacle.x && avatar.x - avatar.radius < obstacle.x + width
}

/// Avatar pokes into the top segment or the bottom segment
pub fn breaches_gap(avatar: &Avatar, obstacle: &Obstacle, playfield_height: f64) -> bool {
    avatar.top() < obstacle.gap_top || avatar.bottom() > obstacle.bottom_segment_y(playfield_height)
}

/// Full obstacle collision test
pub fn hits_obstacle(
    avatar: &Avatar,
    obstacle: &Obstacle,
    width: f64,
    playfield_height: f64,
) -> bool {
    overlaps_horizontally(avatar, obstacle, width) && breaches_gap(avatar, obstacle, playfield_height)
}

/// The trailing edge moved from ahead of the avatar to at-or-behind it this tick
pub fn crossed_trailing_edge(before: f64, after: f64, avatar_x: f64) -> bool {
    before > avatar_x && after <= avatar_x
}
