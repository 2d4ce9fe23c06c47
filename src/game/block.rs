use cgmath::Point3;

use crate::game::raycast::Aabb;

/// Blocks sit on a fixed grid, two world units apart, so neighbouring
/// cubes share faces exactly.
pub const GRID_STEP: f32 = 2.0;
pub const BLOCK_HALF_EXTENT: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Sand,
    Dirt,
    Stone,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Sand => "Sand",
            BlockKind::Dirt => "Dirt",
            BlockKind::Stone => "Stone",
        }
    }

    // Column of the block's tile in the generated atlas.
    pub fn atlas_tile(&self) -> u32 {
        match self {
            BlockKind::Sand => 0,
            BlockKind::Dirt => 1,
            BlockKind::Stone => 2,
        }
    }
}

/// Stable handle to a block; ids are never reused within a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(pub u64);

/// One placed cube: a grid-aligned center position, a kind that picks the
/// texture tile, and the id the edit operations address it by. Each block
/// is both a render instance and a collider of half-extent 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub position: Point3<f32>,
    pub kind: BlockKind,
}

impl Block {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, BLOCK_HALF_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_tiles_are_distinct() {
        let tiles = [
            BlockKind::Sand.atlas_tile(),
            BlockKind::Dirt.atlas_tile(),
            BlockKind::Stone.atlas_tile(),
        ];
        assert_ne!(tiles[0], tiles[1]);
        assert_ne!(tiles[1], tiles[2]);
        assert_ne!(tiles[0], tiles[2]);
    }

    #[test]
    fn test_block_collider_extents() {
        let block = Block {
            id: BlockId(0),
            position: Point3::new(3.0, -2.0, 5.0),
            kind: BlockKind::Dirt,
        };
        let aabb = block.aabb();
        assert_eq!(aabb.min, Point3::new(2.0, -3.0, 4.0));
        assert_eq!(aabb.max, Point3::new(4.0, -1.0, 6.0));
    }
}
