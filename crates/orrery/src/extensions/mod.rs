// extensions/mod.rs
//
// Building blocks that stay decoupled from bodies and renderables.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
