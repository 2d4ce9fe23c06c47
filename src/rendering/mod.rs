pub mod atlas;
pub mod block_renderer;
pub mod gpu;
pub mod projection;
pub mod sky;
pub mod texture;
