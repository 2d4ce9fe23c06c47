use cgmath::{MetricSpace, Point3};

use crate::game::block::{BlockKind, GRID_STEP};
use crate::game::camera::Camera;
use crate::game::player::{Player, BODY_MAX, BODY_MIN};
use crate::game::raycast::Ray;
use crate::game::world::BlockWorld;

/// Edits gate on the distance from the eye to the hit block's center, not
/// to the surface point the ray crossed.
pub const REMOVE_RANGE: f32 = 12.0;
pub const PLACE_RANGE: f32 = 14.0;

// Edit rays reach well past either gate; the gate does the real limiting.
const EDIT_RAY_LENGTH: f32 = 100.0;

// Placement exclusion zones around the player, in XZ distance from its
// position plus a vertical band.
const BODY_CLEARANCE: f32 = 1.2;
const FOOT_CLEARANCE: f32 = 1.5;

/// Deletes the block the view ray hits, if its center is close enough.
/// Returns whether a block was removed.
pub fn remove_block(world: &mut BlockWorld, camera: &Camera) -> bool {
    let ray = Ray::new(camera.position, camera.get_direction());
    let Some(hit) = world.cast_ray(&ray, EDIT_RAY_LENGTH) else {
        return false;
    };
    if camera.position.distance(hit.center) >= REMOVE_RANGE {
        return false;
    }
    world.remove(hit.id)
}

/// Places a block of `kind` against the face the view ray hits: one grid
/// step out from the hit block's center, along the face normal. Rejected
/// when the spot would sit inside the player's body or directly under its
/// feet. Returns whether a block was placed.
pub fn place_block(
    world: &mut BlockWorld,
    camera: &Camera,
    player: &Player,
    kind: BlockKind,
) -> bool {
    let ray = Ray::new(camera.position, camera.get_direction());
    let Some(hit) = world.cast_ray(&ray, EDIT_RAY_LENGTH) else {
        return false;
    };
    if camera.position.distance(hit.center) >= PLACE_RANGE {
        return false;
    }

    let candidate = hit.center + hit.normal * GRID_STEP;
    if intrudes_on_player(player, candidate) {
        return false;
    }

    world.add(candidate, kind);
    true
}

fn intrudes_on_player(player: &Player, candidate: Point3<f32>) -> bool {
    let dx = candidate.x - player.position.x;
    let dz = candidate.z - player.position.z;
    let horizontal = (dx * dx + dz * dz).sqrt();

    let feet = player.position.y + BODY_MIN.y;
    let head = player.position.y + BODY_MAX.y;

    // Inside the body band.
    if horizontal < BODY_CLEARANCE && candidate.y >= feet && candidate.y <= head {
        return true;
    }

    // Immediately beneath the feet; placing there would wedge the player.
    if horizontal < FOOT_CLEARANCE && candidate.y > feet - GRID_STEP && candidate.y < feet {
        return true;
    }

    false
}
