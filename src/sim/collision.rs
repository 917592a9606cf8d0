//! Obstacle scrolling, culling and world-affinity collisions
//!
//! The central rule of the game: an obstacle only hurts when its world tag
//! matches the player's current world (or is `Both`). Switching world is how
//! the player phases through a hazard that is already on top of them.

use glam::Vec2;

use super::entity::{Affinity, Obstacle, Player, World};

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

/// Whether an obstacle tagged `affinity` can hurt a player in `world`
pub fn is_dangerous(affinity: Affinity, world: World) -> bool {
    affinity == Affinity::Both || affinity == Affinity::from(world)
}

/// A run-ending collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Where the obstacle was when it connected
    pub obstacle_pos: Vec2,
    pub affinity: Affinity,
}

/// Scroll every obstacle left by `speed`, cull the ones that left the
/// screen and test the rest against the player
///
/// Obstacles are visited newest first. Processing stops at the first lethal
/// overlap; that obstacle is marked inactive and the hit returned. Overlaps
/// while the player is immune, or with obstacles from the other world, have
/// no effect at all.
pub fn resolve_obstacles(obstacles: &mut Vec<Obstacle>, player: &Player, speed: f32) -> Option<Hit> {
    let player_box = player.bounds();

    let mut i = obstacles.len();
    while i > 0 {
        i -= 1;
        let obs = &mut obstacles[i];
        obs.pos.x -= speed;

        if obs.right() < 0.0 {
            obstacles.remove(i);
            continue;
        }

        if !obs.passed && obs.right() < player_box.min.x {
            obs.passed = true;
        }

        if !obs.active || !is_dangerous(obs.affinity, player.world) {
            continue;
        }

        if player.invincible_timer == 0 && player_box.overlaps(&obs.bounds()) {
            obs.active = false;
            return Some(Hit {
                obstacle_pos: obs.pos,
                affinity: obs.affinity,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::ObstacleType;
    use crate::sim::spawner::spawn_obstacle;

    fn obstacle_at(x: f32, affinity: Affinity) -> Obstacle {
        let mut obs = spawn_obstacle(ObstacleType::Spike, affinity);
        obs.pos.x = x;
        obs
    }

    #[test]
    fn test_affinity_rule() {
        assert!(is_dangerous(Affinity::Bright, World::Bright));
        assert!(!is_dangerous(Affinity::Bright, World::Dark));
        assert!(is_dangerous(Affinity::Dark, World::Dark));
        assert!(!is_dangerous(Affinity::Dark, World::Bright));
        assert!(is_dangerous(Affinity::Both, World::Bright));
        assert!(is_dangerous(Affinity::Both, World::Dark));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let right = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let below = Aabb::from_pos_size(Vec2::new(0.0, 10.0), Vec2::splat(10.0));
        let inside = Aabb::from_pos_size(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_matching_world_overlap_hits() {
        let player = Player::default();
        let mut obstacles = vec![obstacle_at(player.pos.x + 8.0, Affinity::Bright)];
        let hit = resolve_obstacles(&mut obstacles, &player, 8.0);
        assert!(hit.is_some());
        assert!(!obstacles[0].active);
    }

    #[test]
    fn test_other_world_overlap_is_harmless() {
        let player = Player::default();
        let mut obstacles = vec![obstacle_at(player.pos.x + 8.0, Affinity::Dark)];
        for _ in 0..5 {
            assert!(resolve_obstacles(&mut obstacles, &player, 8.0).is_none());
        }
        assert!(obstacles[0].active);
    }

    #[test]
    fn test_both_hits_either_world() {
        for world in [World::Bright, World::Dark] {
            let player = Player {
                world,
                ..Default::default()
            };
            let mut obstacles = vec![obstacle_at(player.pos.x, Affinity::Both)];
            assert!(resolve_obstacles(&mut obstacles, &player, 1.0).is_some());
        }
    }

    #[test]
    fn test_invincible_player_phases_through() {
        let player = Player {
            invincible_timer: 3,
            ..Default::default()
        };
        let mut obstacles = vec![obstacle_at(player.pos.x, Affinity::Bright)];
        assert!(resolve_obstacles(&mut obstacles, &player, 1.0).is_none());
        assert!(obstacles[0].active);
    }

    #[test]
    fn test_jumping_player_clears_spike() {
        let mut player = Player::default();
        player.pos.y -= 60.0;
        player.grounded = false;
        let mut obstacles = vec![obstacle_at(player.pos.x, Affinity::Bright)];
        assert!(resolve_obstacles(&mut obstacles, &player, 1.0).is_none());
    }

    #[test]
    fn test_cull_and_passed() {
        let player = Player::default();
        let mut obstacles = vec![
            obstacle_at(-35.0, Affinity::Dark),
            obstacle_at(100.0, Affinity::Dark),
            obstacle_at(600.0, Affinity::Dark),
        ];
        resolve_obstacles(&mut obstacles, &player, 8.0);

        // -35 -> -43, right edge -3: culled
        assert_eq!(obstacles.len(), 2);
        assert!(obstacles[0].passed); // 92..132, behind the player at 150
        assert!(!obstacles[1].passed);
    }

    #[test]
    fn test_stops_at_first_hit() {
        let player = Player::default();
        let mut obstacles = vec![
            obstacle_at(900.0, Affinity::Bright),
            obstacle_at(player.pos.x, Affinity::Bright),
        ];
        assert!(resolve_obstacles(&mut obstacles, &player, 4.0).is_some());
        // Newest (last) hit first; the older one was not advanced
        assert_eq!(obstacles[0].pos.x, 900.0);
    }
}
