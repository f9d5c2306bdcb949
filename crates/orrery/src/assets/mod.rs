pub mod defaults;
pub mod manifest;
pub mod registry;
pub mod textures;
