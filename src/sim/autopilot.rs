//! Idle/demo mode - a trivial pilot that keeps the avatar near the next gap

use super::state::GameState;

/// How far below the gap centre the avatar may sink before flapping.
/// A flap from rest climbs about 78 units, so this keeps the peak inside the gap.
const FLAP_MARGIN: f64 = 25.0;

/// Decide whether the pilot should flap this frame.
///
/// Targets the centre of the first obstacle whose trailing edge is still ahead
/// of the avatar, or the middle of the playfield when none is. Only flaps while
/// falling so the avatar does not climb out of the gap.
pub fn wants_flap(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }

    let tuning = &state.tuning;
    let avatar = &state.avatar;
    let target = state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(tuning.obstacle_width) > avatar.x - avatar.radius)
        .map(|o| o.gap_center(tuning.playfield_height))
        .unwrap_or(tuning.playfield_height / 2.0);

    avatar.velocity >= 0.0 && avatar.y > target + FLAP_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{spawn_obstacle, tick};

    #[test]
    fn test_no_flap_when_idle() {
        let state = GameState::new(3);
        assert!(!wants_flap(&state));
    }

    #[test]
    fn test_flaps_when_sinking() {
        let mut state = GameState::new(3);
        state.start_session();
        state.avatar.y = 300.0;
        state.avatar.velocity = 1.0;
        assert!(wants_flap(&state));
        state.avatar.velocity = -4.0;
        assert!(!wants_flap(&state));
    }

    #[test]
    fn test_pilot_survives_and_scores() {
        let mut state = GameState::new(42);
        state.start_session();

        // 20 seconds of play with a spawn every 2 seconds
        for frame in 0..1200u32 {
            if frame % 120 == 0 {
                spawn_obstacle(&mut state);
            }
            if wants_flap(&state) {
                state.flap();
            }
            tick(&mut state, SIM_DT);
        }

        assert!(state.is_running(), "pilot crashed with score {}", state.score);
        assert!(state.score >= 5);
    }
}
