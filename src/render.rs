//! Per-frame draw list
//!
//! The core does not own drawing primitives; it describes a frame as a list
//! of commands (clear, sprites, text) for whatever surface the frontend has.

use glam::Vec2;

use crate::sim::{GameState, PowerUpKind};

/// Alpha used for the avatar while invisibility is active
pub const INVISIBLE_ALPHA: f32 = 0.4;

/// Images the frontend must supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Avatar,
    ObstacleTop,
    ObstacleBottom,
}

/// A single drawing operation, in playfield units
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { size: Vec2 },
    /// Draw `sprite` with its top-left corner at `pos`
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        size: Vec2,
        alpha: f32,
    },
    /// Text with its baseline starting at `pos`
    Text { text: String, pos: Vec2, size_px: f32 },
}

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Build the draw list for the current state
    pub fn build(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let mut commands = Vec::with_capacity(3 + state.obstacles.len() * 2);

        commands.push(DrawCommand::Clear {
            size: Vec2::new(tuning.playfield_width as f32, tuning.playfield_height as f32),
        });

        let avatar = &state.avatar;
        let diameter = (avatar.radius * 2.0) as f32;
        commands.push(DrawCommand::Sprite {
            sprite: Sprite::Avatar,
            pos: Vec2::new(
                (avatar.x - avatar.radius) as f32,
                (avatar.y - avatar.radius) as f32,
            ),
            size: Vec2::splat(diameter),
            alpha: if state.power_ups.is_active(PowerUpKind::Invisibility) {
                INVISIBLE_ALPHA
            } else {
                1.0
            },
        });

        let width = tuning.obstacle_width as f32;
        for obstacle in &state.obstacles {
            let x = obstacle.x as f32;
            commands.push(DrawCommand::Sprite {
                sprite: Sprite::ObstacleTop,
                pos: Vec2::new(x, 0.0),
                size: Vec2::new(width, obstacle.gap_top as f32),
                alpha: 1.0,
            });
            commands.push(DrawCommand::Sprite {
                sprite: Sprite::ObstacleBottom,
                pos: Vec2::new(x, obstacle.bottom_segment_y(tuning.playfield_height) as f32),
                size: Vec2::new(width, obstacle.gap_bottom as f32),
                alpha: 1.0,
            });
        }

        commands.push(DrawCommand::Text {
            text: format!("Score: {}", state.score),
            pos: Vec2::new(20.0, 30.0),
            size_px: 20.0,
        });

        let status: Vec<String> = PowerUpKind::ALL
            .into_iter()
            .filter(|kind| state.power_ups.is_active(*kind))
            .map(|kind| {
                let left = state.power_ups.effect(kind).remaining(state.clock);
                format!("{} {:.1}s", kind.as_str(), left)
            })
            .collect();
        if !status.is_empty() {
            commands.push(DrawCommand::Text {
                text: status.join("  "),
                pos: Vec2::new(20.0, 55.0),
                size_px: 14.0,
            });
        }

        Self { commands }
    }

    pub fn sprites(&self, which: Sprite) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Sprite { sprite, .. } if *sprite == which))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_frame_layout() {
        let mut state = GameState::new(1);
        state.start_session();
        state.score = 3;
        state.obstacles.push(Obstacle {
            id: 1,
            x: 120.0,
            gap_top: 100.0,
            gap_bottom: 250.0,
        });

        let frame = Frame::build(&state);
        assert_eq!(
            frame.commands[0],
            DrawCommand::Clear {
                size: Vec2::new(400.0, 500.0)
            }
        );
        assert_eq!(
            frame.commands[1],
            DrawCommand::Sprite {
                sprite: Sprite::Avatar,
                pos: Vec2::new(35.0, 235.0),
                size: Vec2::splat(30.0),
                alpha: 1.0,
            }
        );
        assert_eq!(
            frame.commands[3],
            DrawCommand::Sprite {
                sprite: Sprite::ObstacleBottom,
                pos: Vec2::new(120.0, 250.0),
                size: Vec2::new(50.0, 250.0),
                alpha: 1.0,
            }
        );
        assert_eq!(frame.sprites(Sprite::ObstacleTop).count(), 1);
        assert!(matches!(
            frame.commands.last(),
            Some(DrawCommand::Text { text, .. }) if text == "Score: 3"
        ));
    }

    #[test]
    fn test_invisible_avatar_is_translucent() {
        let mut state = GameState::new(1);
        state.start_session();
        state.activate_invisibility();

        let frame = Frame::build(&state);
        assert!(matches!(
            frame.sprites(Sprite::Avatar).next(),
            Some(DrawCommand::Sprite { alpha, .. }) if *alpha == INVISIBLE_ALPHA
        ));
        assert!(matches!(
            frame.commands.last(),
            Some(DrawCommand::Text { text, .. }) if text.starts_with("Invisibility")
        ));
    }
}
