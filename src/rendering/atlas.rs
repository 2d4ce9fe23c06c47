use image::{Rgba, RgbaImage};
use noise::{NoiseFn, Perlin};

use crate::game::block::BlockKind;

pub const TILE_SIZE: u32 = 16;
pub const TILE_COUNT: u32 = 3;

/// Procedurally built texture atlas, one tile per block kind laid out in a
/// single row. The column index matches `BlockKind::atlas_tile`.
pub struct BlockAtlas {
    image: RgbaImage,
}

impl BlockAtlas {
    pub fn new() -> Self {
        let mut image = RgbaImage::new(TILE_SIZE * TILE_COUNT, TILE_SIZE);

        for kind in [BlockKind::Sand, BlockKind::Dirt, BlockKind::Stone] {
            let tile = kind.atlas_tile();
            let perlin = Perlin::new(tile);
            let (base, amplitude) = Self::tile_style(kind);

            for py in 0..TILE_SIZE {
                for px in 0..TILE_SIZE {
                    // Offset by half a texel so samples never land on the
                    // perlin lattice, where the noise is always zero.
                    let sample = [
                        (px as f64 + 0.5) * 0.6,
                        (py as f64 + 0.5) * 0.6 + tile as f64 * 31.0,
                    ];
                    let speckle = perlin.get(sample) as f32 * amplitude;

                    let on_border =
                        px == 0 || py == 0 || px == TILE_SIZE - 1 || py == TILE_SIZE - 1;
                    let shade = if on_border { 0.82 } else { 1.0 };

                    let mut pixel = [0u8; 4];
                    for (channel, out) in base.iter().zip(pixel.iter_mut()) {
                        *out = ((channel + speckle) * shade).clamp(0.0, 255.0) as u8;
                    }
                    pixel[3] = 255;

                    image.put_pixel(tile * TILE_SIZE + px, py, Rgba(pixel));
                }
            }
        }

        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn tile_style(kind: BlockKind) -> ([f32; 3], f32) {
        match kind {
            BlockKind::Sand => ([219.0, 192.0, 130.0], 14.0),
            BlockKind::Dirt => ([134.0, 96.0, 67.0], 18.0),
            BlockKind::Stone => ([128.0, 128.0, 128.0], 22.0),
        }
    }
}

impl Default for BlockAtlas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_dimensions() {
        let atlas = BlockAtlas::new();
        assert_eq!(atlas.image().width(), TILE_SIZE * TILE_COUNT);
        assert_eq!(atlas.image().height(), TILE_SIZE);
    }

    #[test]
    fn test_tile_centers_near_base_colors() {
        let atlas = BlockAtlas::new();
        for kind in [BlockKind::Sand, BlockKind::Dirt, BlockKind::Stone] {
            let (base, amplitude) = BlockAtlas::tile_style(kind);
            let x = kind.atlas_tile() * TILE_SIZE + TILE_SIZE / 2;
            let pixel = atlas.image().get_pixel(x, TILE_SIZE / 2);
            for (channel, expected) in pixel.0.iter().zip(base.iter()) {
                assert!(
                    (*channel as f32 - expected).abs() <= amplitude + 1.0,
                    "{} channel {channel} too far from {expected}",
                    kind.name()
                );
            }
            assert_eq!(pixel.0[3], 255);
        }
    }

    #[test]
    fn test_tiles_are_distinct() {
        let atlas = BlockAtlas::new();
        let center = |kind: BlockKind| {
            *atlas
                .image()
                .get_pixel(kind.atlas_tile() * TILE_SIZE + TILE_SIZE / 2, TILE_SIZE / 2)
        };
        let sand = center(BlockKind::Sand);
        let dirt = center(BlockKind::Dirt);
        let stone = center(BlockKind::Stone);
        assert_ne!(sand, dirt);
        assert_ne!(dirt, stone);
        assert_ne!(sand, stone);
    }
}
