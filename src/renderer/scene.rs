//! Scene construction
//!
//! Turns a [`RunState`] into a display list. Layers, back to front:
//! background gradient, (shake) ground + grid, obstacles, particles, player.
//! Reads the run state only; shake jitter comes from the builder's own RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{DrawCmd, Rgba};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::collision::is_dangerous;
use crate::sim::entity::{Obstacle, ObstacleType, Player, World};
use crate::sim::state::RunState;

/// Grid line spacing and horizontal slant
const GRID_SPACING: f32 = 100.0;
const GRID_SLANT: f32 = 200.0;
/// Player tilt per unit of vertical speed
const PLAYER_TILT: f32 = 0.05;

/// Per-world color scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub sky_top: Rgba,
    pub sky_bottom: Rgba,
    pub ground: Rgba,
    pub grid: Rgba,
    pub obstacle: Rgba,
    pub primary: Rgba,
}

impl Theme {
    pub fn for_world(world: World) -> Self {
        match world {
            World::Bright => Self {
                sky_top: Rgba::from_hex(0xE0F7FA),
                sky_bottom: Rgba::from_hex(0xFFFFFF),
                ground: Rgba::from_hex(0x222222),
                grid: Rgba::from_hex(0xDDDDDD),
                obstacle: Rgba::from_hex(0xFF0055),
                primary: Rgba::from_hex(world.primary_color()),
            },
            World::Dark => Self {
                sky_top: Rgba::from_hex(0x1A0510),
                sky_bottom: Rgba::from_hex(0x0A0A0A),
                ground: Rgba::from_hex(0x444444),
                grid: Rgba::from_hex(0x333333),
                obstacle: Rgba::from_hex(0xFF0000),
                primary: Rgba::from_hex(world.primary_color()),
            },
        }
    }
}

/// Obstacles that can't hurt the player right now
const SAFE_OBSTACLE: Rgba = Rgba::from_hex(0x646464).with_alpha(0.3);

/// Builds the display list for one frame
pub struct SceneBuilder {
    /// Cosmetic only; never shared with the simulation
    rng: Pcg32,
    cmds: Vec<DrawCmd>,
}

impl SceneBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            cmds: Vec::with_capacity(512),
        }
    }

    /// Build this frame's display list
    pub fn build(&mut self, run: &RunState, settings: &Settings) -> &[DrawCmd] {
        self.cmds.clear();
        let world = run.player.world;
        let theme = Theme::for_world(world);

        self.cmds.push(DrawCmd::VerticalGradient {
            pos: Vec2::ZERO,
            size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            top: theme.sky_top,
            bottom: theme.sky_bottom,
        });

        self.cmds.push(DrawCmd::Save);
        if settings.effective_screen_shake() {
            let offset = run.shake.offset(&mut self.rng);
            if offset != Vec2::ZERO {
                self.cmds.push(DrawCmd::Translate(offset));
            }
        }

        self.push_ground(&theme, run, settings.grid);

        for obstacle in &run.obstacles {
            self.push_obstacle(obstacle, world, &theme);
        }

        if settings.particles {
            for p in &run.particles {
                self.cmds.push(DrawCmd::Alpha(p.life));
                self.cmds.push(DrawCmd::FillCircle {
                    center: p.pos,
                    radius: p.size,
                    color: Rgba::from_hex(p.color),
                });
            }
            if !run.particles.is_empty() {
                self.cmds.push(DrawCmd::Alpha(1.0));
            }
        }

        self.push_player(&run.player, &theme, settings.player_tilt());

        // Shake translation
        self.cmds.push(DrawCmd::Restore);
        &self.cmds
    }

    fn push_ground(&mut self, theme: &Theme, run: &RunState, grid: bool) {
        self.cmds.push(DrawCmd::FillRect {
            pos: Vec2::new(0.0, GROUND_Y),
            size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT - GROUND_Y),
            color: theme.ground,
        });

        if !grid {
            return;
        }
        let offset = ((run.frame as f64 * run.progress.speed as f64) % GRID_SPACING as f64) as f32;
        let mut x = 0.0;
        while x < CANVAS_WIDTH + GRID_SPACING {
            self.cmds.push(DrawCmd::Line {
                from: Vec2::new(x - offset, 0.0),
                to: Vec2::new(x - offset - GRID_SLANT, CANVAS_HEIGHT),
                color: theme.grid,
                width: 2.0,
            });
            x += GRID_SPACING;
        }
    }

    fn push_obstacle(&mut self, obstacle: &Obstacle, world: World, theme: &Theme) {
        let dangerous = is_dangerous(obstacle.affinity, world);
        let color = if dangerous { theme.obstacle } else { SAFE_OBSTACLE };
        let Obstacle { pos, size, .. } = *obstacle;

        match obstacle.kind {
            ObstacleType::Spike => {
                if dangerous {
                    self.cmds.push(DrawCmd::Shadow {
                        color: theme.obstacle,
                        blur: 10.0,
                    });
                }
                self.cmds.push(DrawCmd::FillTriangle {
                    points: [
                        Vec2::new(pos.x, pos.y + size.y),
                        Vec2::new(pos.x + size.x / 2.0, pos.y),
                        pos + size,
                    ],
                    color,
                });
                if dangerous {
                    self.cmds.push(DrawCmd::Shadow {
                        color: theme.obstacle,
                        blur: 0.0,
                    });
                }
            }
            ObstacleType::Gap => {}
            ObstacleType::Wall | ObstacleType::Enemy => {
                self.cmds.push(DrawCmd::FillRect { pos, size, color });
                // Neon border
                if dangerous {
                    self.cmds.push(DrawCmd::StrokeRect {
                        pos,
                        size,
                        color: Rgba::WHITE,
                        width: 2.0,
                    });
                }
            }
        }
    }

    fn push_player(&mut self, player: &Player, theme: &Theme, tilt: bool) {
        let half = player.size / 2.0;

        self.cmds.push(DrawCmd::Save);
        self.cmds.push(DrawCmd::Translate(player.center()));
        if tilt && player.vy != 0.0 {
            self.cmds.push(DrawCmd::Rotate(player.vy * PLAYER_TILT));
        }

        self.cmds.push(DrawCmd::Shadow {
            color: theme.primary,
            blur: 20.0,
        });
        self.cmds.push(DrawCmd::FillRect {
            pos: -half,
            size: player.size,
            color: theme.primary,
        });

        // Inner core
        self.cmds.push(DrawCmd::Shadow {
            color: theme.primary,
            blur: 0.0,
        });
        self.cmds.push(DrawCmd::FillRect {
            pos: -half / 2.0,
            size: half,
            color: Rgba::WHITE,
        });
        self.cmds.push(DrawCmd::Restore);
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(0)
    }
}
