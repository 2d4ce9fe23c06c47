pub mod actions;
pub mod block;
pub mod camera;
pub mod player;
pub mod raycast;
pub mod world;
