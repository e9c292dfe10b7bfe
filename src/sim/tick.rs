//! Per-frame simulation tick and obstacle spawner
//!
//! Order within a tick is load-bearing:
//! power-up expiry, gravity, ground check, then per obstacle
//! move / collide / score, and finally pruning.

use rand::Rng;

use super::collision;
use super::state::{CollisionKind, GameEvent, GameState, Obstacle};

/// Advance the game state by one animation frame.
///
/// `dt` only advances the session clock used for power-up expiry; motion is
/// expressed in units per frame. No-op unless a session is running.
pub fn tick(state: &mut GameState, dt: f64) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    state.clock += dt;

    for kind in state.power_ups.expire(state.clock) {
        log::debug!("{} expired at {:.2}s", kind.as_str(), state.clock);
        state.events.push(GameEvent::PowerUpExpired(kind));
    }

    let tuning = &state.tuning;

    // Gravity
    state.avatar.velocity += tuning.gravity;
    state.avatar.y += state.avatar.velocity;

    if collision::hits_ground(&state.avatar, tuning.playfield_height) {
        state.end_session(Some(CollisionKind::Ground));
        return;
    }

    let speed = state.power_ups.obstacle_speed(tuning);
    let invisible = state.power_ups.invisibility.active;
    let width = tuning.obstacle_width;
    let height = tuning.playfield_height;

    let mut hit = None;
    for obstacle in state.obstacles.iter_mut() {
        let before = obstacle.trailing_edge(width);
        obstacle.x -= speed;

        if !invisible && collision::hits_obstacle(&state.avatar, obstacle, width, height) {
            hit = Some(obstacle.id);
            break;
        }

        if collision::crossed_trailing_edge(before, obstacle.trailing_edge(width), state.avatar.x)
        {
            state.score += 1;
            log::debug!("Passed obstacle {} (score {})", obstacle.id, state.score);
            state.events.push(GameEvent::Scored { score: state.score });
        }
    }

    if let Some(id) = hit {
        state.end_session(Some(CollisionKind::Obstacle { id }));
        return;
    }

    state.obstacles.retain(|o| o.x >= -width);
}

/// Spawn a new obstacle at the right edge of the playfield.
///
/// The top segment height is a whole number in `[0, height/2)`, and the
/// bottom segment fills the rest so `top + bottom + gap == height` exactly.
pub fn spawn_obstacle(state: &mut GameState) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let max_top = state.tuning.max_gap_top().max(0.0) as u32;
    let gap_top = if max_top == 0 {
        0.0
    } else {
        f64::from(state.rng.random_range(0..max_top))
    };
    let gap_bottom = state.tuning.playfield_height - gap_top - state.tuning.gap_size;

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        x: state.tuning.playfield_width,
        gap_top,
        gap_bottom,
    });
    state.events.push(GameEvent::ObstacleSpawned { id });
    log::debug!("Spawned obstacle {} (gap top {})", id, gap_top);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::powerup::PowerUpKind;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345);
        state.start_session();
        state.drain_events();
        state
    }

    /// Obstacle whose gap is centred on the avatar's start height
    fn open_gate(state: &mut GameState, x: f64) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x,
            gap_top: 175.0,
            gap_bottom: 175.0,
        });
        id
    }

    #[test]
    fn test_tick_noop_when_not_running() {
        let mut state = GameState::new(1);
        tick(&mut state, SIM_DT);
        assert_eq!(state.avatar.y, 250.0);
        assert_eq!(state.time_ticks, 0);
        assert!(spawn_obstacle(&mut state).is_none());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_free_fall_trajectory() {
        let mut state = running_state();

        let mut velocity = 0.0f64;
        let mut y = 250.0f64;
        for _ in 0..10 {
            velocity += 0.6;
            y += velocity;
            tick(&mut state, SIM_DT);
        }

        assert_eq!(state.avatar.velocity, velocity);
        assert_eq!(state.avatar.y, y);
        assert!((state.avatar.velocity - 6.0).abs() < 1e-9);
        assert!((state.avatar.y - 283.0).abs() < 1e-9);
        assert!(state.is_running());
    }

    #[test]
    fn test_velocity_is_n_times_gravity() {
        let mut state = running_state();
        for n in 1..=20u32 {
            tick(&mut state, SIM_DT);
            assert!((state.avatar.velocity - f64::from(n) * 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ground_ends_session() {
        let mut state = running_state();
        let mut ticks = 0;
        while state.is_running() {
            tick(&mut state, SIM_DT);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.avatar.bottom() >= 500.0);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Collision(CollisionKind::Ground),
                GameEvent::GameOver { score: 0 },
            ]
        );
        // Further ticks do nothing
        let y = state.avatar.y;
        tick(&mut state, SIM_DT);
        assert_eq!(state.avatar.y, y);
    }

    #[test]
    fn test_obstacles_move_at_current_speed() {
        let mut state = running_state();
        let id = open_gate(&mut state, 300.0);
        state.avatar.velocity = -0.6; // hover

        tick(&mut state, SIM_DT);
        assert_eq!(state.obstacles[0].x, 298.0);

        state.activate_slow_motion();
        state.avatar.velocity = -0.6;
        tick(&mut state, SIM_DT);
        assert_eq!(state.obstacles[0].x, 297.0);
        assert_eq!(state.obstacles[0].id, id);
    }

    #[test]
    fn test_gate_collision_ends_session() {
        let mut state = running_state();
        let id = state.next_entity_id();
        // Gap far above the avatar
        state.obstacles.push(Obstacle {
            id,
            x: 66.0,
            gap_top: 0.0,
            gap_bottom: 350.0,
        });
        state.avatar.velocity = -0.6;

        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Collision(CollisionKind::Obstacle { id }),
                GameEvent::GameOver { score: 0 },
            ]
        );
    }

    #[test]
    fn test_invisibility_suppresses_gate_collision() {
        let mut state = running_state();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: 66.0,
            gap_top: 0.0,
            gap_bottom: 350.0,
        });

        state.activate_invisibility();
        state.avatar.velocity = -0.6;
        tick(&mut state, SIM_DT);
        assert!(state.is_running());

        // Toggle off mid-run: the next overlapping check collides
        state.power_ups.reset();
        state.avatar.velocity = -0.6;
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_invisibility_does_not_stop_ground_collision() {
        let mut state = running_state();
        state.activate_invisibility();
        state.avatar.y = 490.0;
        tick(&mut state, SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_score_once_per_obstacle() {
        let mut state = running_state();
        open_gate(&mut state, 10.0); // trailing edge 60, crosses 50 after 5 ticks

        let mut scores = Vec::new();
        for _ in 0..20 {
            state.avatar.velocity = -0.6;
            tick(&mut state, SIM_DT);
            scores.push(state.score);
        }
        assert!(state.is_running());
        assert_eq!(scores[3], 0);
        assert_eq!(scores[4], 1);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_counts_with_off_grid_speed() {
        let mut state = running_state();
        state.tuning.obstacle_speed = 1.5;
        open_gate(&mut state, 10.0); // 60 -> 58.5 -> ... never lands on 50 exactly

        for _ in 0..20 {
            state.avatar.velocity = -0.6;
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_under_slow_motion() {
        let mut state = running_state();
        open_gate(&mut state, 10.0);
        state.activate_slow_motion();
        for _ in 0..15 {
            state.avatar.velocity = -0.6;
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_prune_off_screen() {
        let mut state = running_state();
        let keep = open_gate(&mut state, 200.0);
        open_gate(&mut state, -49.0); // -51 after move
        let edge = open_gate(&mut state, -48.0); // exactly -50 after move
        let last = open_gate(&mut state, 300.0);

        state.avatar.velocity = -0.6;
        tick(&mut state, SIM_DT);

        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![keep, edge, last]);
    }

    #[test]
    fn test_power_up_expires_on_clock() {
        let mut state = running_state();
        state.activate_slow_motion();
        state.drain_events();

        // 299 frames at 60 Hz is just under 5 seconds
        for _ in 0..299 {
            state.avatar.velocity = -0.6;
            tick(&mut state, SIM_DT);
        }
        assert!(state.power_ups.is_active(PowerUpKind::SlowMotion));

        state.avatar.velocity = -0.6;
        tick(&mut state, SIM_DT);
        state.avatar.velocity = -0.6;
        tick(&mut state, SIM_DT);
        assert!(!state.power_ups.is_active(PowerUpKind::SlowMotion));
        assert_eq!(state.obstacle_speed(), 2.0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpExpired(PowerUpKind::SlowMotion))
        );
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let mut state = running_state();
        let id = spawn_obstacle(&mut state).unwrap();
        let obstacle = state.obstacles[0];
        assert_eq!(obstacle.id, id);
        assert_eq!(obstacle.x, 400.0);
        assert!(obstacle.gap_top >= 0.0 && obstacle.gap_top < 250.0);
        assert_eq!(obstacle.gap_top.fract(), 0.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ObstacleSpawned { id }]
        );
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let mut a = running_state();
        let mut b = running_state();
        for _ in 0..10 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        assert_eq!(a.obstacles, b.obstacles);
    }

    proptest! {
        #[test]
        fn gap_invariant_holds(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            state.start_session();
            for _ in 0..8 {
                spawn_obstacle(&mut state);
            }
            for o in &state.obstacles {
                prop_assert_eq!(o.gap_top + o.gap_bottom + 150.0, 500.0);
            }
        }
    }
}
