use cgmath::{Point3, Vector3, Zero};

use crate::game::camera::Camera;
use crate::game::raycast::{Aabb, Ray};
use crate::game::world::BlockWorld;

pub const GRAVITY: f32 = -20.0;
pub const JUMP_SPEED: f32 = 12.0;
pub const SPRINT_JUMP_SPEED: f32 = 16.0;
pub const WALK_SPEED: f32 = 10.0;
pub const SPRINT_SPEED: f32 = 18.0;
pub const CROUCH_SPEED: f32 = 5.0;

pub const SPAWN_POINT: Point3<f32> = Point3::new(0.0, 10.0, 0.0);
const FALL_OUT_Y: f32 = -50.0;

/// Body box relative to `position` (the point between the feet).
pub const BODY_MIN: Vector3<f32> = Vector3::new(-0.6, -0.9, -0.6);
pub const BODY_MAX: Vector3<f32> = Vector3::new(0.6, 2.0, 0.6);

// Ground probes start at foot level and accept a surface up to 0.3 below.
const GROUND_TOLERANCE: f32 = 1.2;
const GROUND_PROBE_RANGE: f32 = 4.0;
const GROUND_PROBE_OFFSETS: [(f32, f32); 5] = [
    (0.0, 0.0),
    (0.5, 0.5),
    (0.5, -0.5),
    (-0.5, 0.5),
    (-0.5, -0.5),
];

const PUSH_EPSILON: f32 = 0.001;

enum Axis {
    X,
    Y,
    Z,
}

/// What the keys ask for this frame, already resolved to named actions.
#[derive(Copy, Clone, Debug, Default)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    pub crouch: bool,
}

pub struct Player {
    pub position: Point3<f32>,
    pub velocity_y: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: SPAWN_POINT,
            velocity_y: 0.0,
            on_ground: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.position + BODY_MIN,
            max: self.position + BODY_MAX,
        }
    }

    /// One frame of movement. Runs the ground check against the state the
    /// previous frame left behind, applies gravity or collapses the fall on
    /// landing, respawns after a fall-out, then walks and integrates with
    /// per-axis collision resolution.
    pub fn update(&mut self, world: &BlockWorld, camera: &Camera, intent: MoveIntent, dt: f32) {
        self.on_ground = self.ground_check(world);

        if self.on_ground {
            self.velocity_y = 0.0;
        } else {
            self.velocity_y += GRAVITY * dt;
        }

        if self.position.y < FALL_OUT_Y {
            self.position = SPAWN_POINT;
            self.velocity_y = 0.0;
        }

        if intent.jump && self.on_ground {
            self.velocity_y = if intent.sprint && intent.forward {
                SPRINT_JUMP_SPEED
            } else {
                JUMP_SPEED
            };
        }

        let speed = if intent.crouch {
            CROUCH_SPEED
        } else if intent.sprint && intent.forward {
            SPRINT_SPEED
        } else {
            WALK_SPEED
        };

        let forward = camera.get_forward_horizontal();
        let right = camera.get_right();
        let mut walk = Vector3::zero();
        if intent.forward {
            walk += forward;
        }
        if intent.backward {
            walk -= forward;
        }
        if intent.right {
            walk += right;
        }
        if intent.left {
            walk -= right;
        }
        let walk = walk * speed * dt;

        self.position.x += walk.x;
        self.resolve_axis(world, Axis::X);
        self.position.z += walk.z;
        self.resolve_axis(world, Axis::Z);
        self.position.y += self.velocity_y * dt;
        self.resolve_axis(world, Axis::Y);
    }

    /// Five downward rays from foot level: one under the center, four under
    /// the corners. Grounded when any of them finds a surface within the
    /// tolerance band below the feet.
    fn ground_check(&self, world: &BlockWorld) -> bool {
        let foot_y = self.position.y + BODY_MIN.y;

        for (dx, dz) in GROUND_PROBE_OFFSETS {
            let ray = Ray::new(
                Point3::new(self.position.x + dx, foot_y, self.position.z + dz),
                -Vector3::unit_y(),
            );
            if let Some(hit) = world.cast_ray(&ray, GROUND_PROBE_RANGE) {
                let surface_y = ray.origin.y - hit.distance;
                if surface_y > self.position.y - GROUND_TOLERANCE {
                    return true;
                }
            }
        }

        false
    }

    /// Pushes the body out of any block it overlaps, along one axis only.
    /// Called right after that axis moved, so the smaller penetration side
    /// is the one the movement just created. A push up is a landing.
    fn resolve_axis(&mut self, world: &BlockWorld, axis: Axis) {
        let overlaps = world.collect_overlaps(&self.aabb());

        for block in &overlaps {
            let body = self.aabb();
            if !body.intersects(block) {
                continue;
            }

            match axis {
                Axis::X => {
                    let push_neg = body.max.x - block.min.x;
                    let push_pos = block.max.x - body.min.x;
                    if push_neg < push_pos {
                        self.position.x -= push_neg + PUSH_EPSILON;
                    } else {
                        self.position.x += push_pos + PUSH_EPSILON;
                    }
                }
                Axis::Z => {
                    let push_neg = body.max.z - block.min.z;
                    let push_pos = block.max.z - body.min.z;
                    if push_neg < push_pos {
                        self.position.z -= push_neg + PUSH_EPSILON;
                    } else {
                        self.position.z += push_pos + PUSH_EPSILON;
                    }
                }
                Axis::Y => {
                    let push_down = body.max.y - block.min.y;
                    let push_up = block.max.y - body.min.y;
                    if push_up <= push_down {
                        self.position.y += push_up + PUSH_EPSILON;
                        self.on_ground = true;
                    } else {
                        self.position.y -= push_down + PUSH_EPSILON;
                    }
                    self.velocity_y = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::block::BlockKind;

    fn looking_along_x() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0)
    }

    /// Single ground block whose top face is at y = 0.
    fn world_with_floor() -> BlockWorld {
        let mut world = BlockWorld::new();
        world.add(Point3::new(0.0, -1.0, 0.0), BlockKind::Stone);
        world
    }

    fn standing_player() -> Player {
        let mut player = Player::new();
        player.position = Point3::new(0.0, 0.901, 0.0);
        player
    }

    #[test]
    fn test_gravity_accumulates_in_the_air() {
        let world = BlockWorld::new();
        let mut player = Player::new();

        player.update(&world, &looking_along_x(), MoveIntent::default(), 0.1);
        assert!(!player.on_ground);
        assert!((player.velocity_y + 2.0).abs() < 1e-5);
        assert!((player.position.y - 9.8).abs() < 1e-4);
    }

    #[test]
    fn test_grounded_collapses_fall() {
        let world = world_with_floor();
        let mut player = standing_player();
        player.velocity_y = -5.0;

        player.update(&world, &looking_along_x(), MoveIntent::default(), 0.016);
        assert!(player.on_ground);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn test_corner_probe_grounds_on_offset_block() {
        let mut world = BlockWorld::new();
        // Block only under the (+0.5, +0.5) corner probe, not the center.
        world.add(Point3::new(1.4, -1.0, 1.4), BlockKind::Stone);

        let mut player = standing_player();
        player.update(&world, &looking_along_x(), MoveIntent::default(), 0.016);
        assert!(player.on_ground);
    }

    #[test]
    fn test_surface_below_tolerance_is_not_ground() {
        let mut world = BlockWorld::new();
        // Top face at y = -0.4, which is 0.4 below the feet.
        world.add(Point3::new(0.0, -1.4, 0.0), BlockKind::Stone);

        let mut player = Player::new();
        player.position = Point3::new(0.0, 0.9, 0.0);
        player.update(&world, &looking_along_x(), MoveIntent::default(), 0.016);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_jump_requires_ground() {
        let world = world_with_floor();
        let intent = MoveIntent {
            jump: true,
            ..MoveIntent::default()
        };

        let mut player = standing_player();
        player.update(&world, &looking_along_x(), intent, 0.016);
        assert_eq!(player.velocity_y, JUMP_SPEED);

        let mut airborne = Player::new();
        airborne.update(&BlockWorld::new(), &looking_along_x(), intent, 0.016);
        assert!(airborne.velocity_y < 0.0);
    }

    #[test]
    fn test_sprint_jump_is_stronger() {
        let world = world_with_floor();
        let intent = MoveIntent {
            jump: true,
            sprint: true,
            forward: true,
            ..MoveIntent::default()
        };

        let mut player = standing_player();
        player.update(&world, &looking_along_x(), intent, 0.016);
        assert_eq!(player.velocity_y, SPRINT_JUMP_SPEED);
    }

    #[test]
    fn test_walk_speeds() {
        let dt = 0.1;
        let cases = [
            (MoveIntent { forward: true, ..Default::default() }, WALK_SPEED),
            (
                MoveIntent { forward: true, sprint: true, ..Default::default() },
                SPRINT_SPEED,
            ),
            (
                MoveIntent { forward: true, crouch: true, ..Default::default() },
                CROUCH_SPEED,
            ),
            // Crouch wins over sprint.
            (
                MoveIntent { forward: true, sprint: true, crouch: true, ..Default::default() },
                CROUCH_SPEED,
            ),
        ];

        for (intent, speed) in cases {
            let mut player = Player::new();
            player.update(&BlockWorld::new(), &looking_along_x(), intent, dt);
            assert!(
                (player.position.x - speed * dt).abs() < 1e-4,
                "expected speed {speed}"
            );
        }
    }

    #[test]
    fn test_sprint_needs_forward() {
        let intent = MoveIntent {
            right: true,
            sprint: true,
            ..MoveIntent::default()
        };
        let mut player = Player::new();
        player.update(&BlockWorld::new(), &looking_along_x(), intent, 0.1);

        // Strafing right moves along +z at walking speed, not sprint speed.
        assert!((player.position.z - WALK_SPEED * 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_wall_pushes_back_on_x() {
        let mut world = BlockWorld::new();
        world.add(Point3::new(1.5, 0.5, 0.0), BlockKind::Stone);

        let mut player = Player::new();
        player.position = Point3::new(-0.2, 0.0, 0.0);
        let intent = MoveIntent {
            forward: true,
            ..MoveIntent::default()
        };
        player.update(&world, &looking_along_x(), intent, 0.1);

        // The step would land at x = 0.8; the wall face at x = 0.5 caps the
        // body's +x extent instead.
        assert!((player.position.x - (0.5 - BODY_MAX.x)).abs() < 0.01);
    }

    #[test]
    fn test_fall_lands_on_block() {
        let world = world_with_floor();
        let mut player = Player::new();
        player.position = Point3::new(0.0, 1.5, 0.0);
        player.velocity_y = -10.0;

        // The step carries the feet 0.6 into the floor block; the y resolve
        // pushes back up so they rest on the top face.
        player.update(&world, &looking_along_x(), MoveIntent::default(), 0.1);
        assert!(player.on_ground);
        assert_eq!(player.velocity_y, 0.0);
        assert!((player.position.y - 0.9).abs() < 0.01);
    }

    #[test]
    fn test_fall_out_respawns() {
        let world = BlockWorld::new();
        let mut player = Player::new();
        player.position = Point3::new(4.0, -60.0, 4.0);
        player.velocity_y = -40.0;

        player.update(&world, &looking_along_x(), MoveIntent::default(), 0.1);
        assert_eq!(player.position, SPAWN_POINT);
        assert_eq!(player.velocity_y, 0.0);
    }
}
