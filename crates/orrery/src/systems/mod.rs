pub mod animation;
pub mod builder;
pub mod content;
pub mod glow;
pub mod interaction;
pub mod lighting;
pub mod raycast;
pub mod render;
pub mod rng;
pub mod starfield;
