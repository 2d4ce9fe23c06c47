use cgmath::Point3;

use crate::game::block::{Block, BlockId, BlockKind, GRID_STEP};
use crate::game::raycast::{self, Aabb, Ray};

// Fixed terrain footprint: TERRAIN_SIDE² columns, TERRAIN_LAYERS deep.
pub const TERRAIN_SIDE: u32 = 25;
pub const TERRAIN_LAYERS: u32 = 8;

pub struct BlockHit {
    pub id: BlockId,
    pub center: Point3<f32>,
    pub kind: BlockKind,
    pub distance: f32,
    pub normal: cgmath::Vector3<f32>,
}

/// Every placed block, in one flat list. Queries are linear scans; at the
/// few thousand blocks this demo holds that is cheaper than maintaining any
/// index, and keeps edits to a push or a retain.
pub struct BlockWorld {
    blocks: Vec<Block>,
    next_id: u64,
    revision: u64,
}

impl BlockWorld {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            next_id: 0,
            revision: 0,
        }
    }

    /// Fills the starting field: a 25×25 column grid, eight layers deep,
    /// centred near the origin. The top layer is sand, the next three dirt,
    /// the rest stone.
    pub fn generate_terrain(&mut self) {
        for layer in 0..TERRAIN_LAYERS {
            let kind = match layer {
                0 => BlockKind::Sand,
                1..=3 => BlockKind::Dirt,
                _ => BlockKind::Stone,
            };
            let y = -(layer as f32) * GRID_STEP;

            for gx in 0..TERRAIN_SIDE {
                for gz in 0..TERRAIN_SIDE {
                    let x = gx as f32 * GRID_STEP - 25.0;
                    let z = gz as f32 * GRID_STEP - 25.0;
                    self.add(Point3::new(x, y, z), kind);
                }
            }
        }
    }

    pub fn add(&mut self, position: Point3<f32>, kind: BlockKind) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(Block { id, position, kind });
        self.revision += 1;
        id
    }

    pub fn remove(&mut self, id: BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|block| block.id != id);
        if self.blocks.len() == before {
            return false;
        }
        self.revision += 1;
        true
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Bumped on every edit; the renderer rebuilds its instance buffer when
    /// the value it last saw goes stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Nearest block intersected by the ray within `max_len`.
    pub fn cast_ray(&self, ray: &Ray, max_len: f32) -> Option<BlockHit> {
        let mut nearest: Option<BlockHit> = None;

        for block in &self.blocks {
            if let Some((distance, normal)) = raycast::ray_box_intersection(ray, &block.aabb()) {
                if distance > max_len {
                    continue;
                }
                if nearest.as_ref().map_or(true, |hit| distance < hit.distance) {
                    nearest = Some(BlockHit {
                        id: block.id,
                        center: block.position,
                        kind: block.kind,
                        distance,
                        normal,
                    });
                }
            }
        }

        nearest
    }

    /// Colliders of every block overlapping the query box.
    pub fn collect_overlaps(&self, query: &Aabb) -> Vec<Aabb> {
        self.blocks
            .iter()
            .map(|block| block.aabb())
            .filter(|aabb| aabb.intersects(query))
            .collect()
    }
}
