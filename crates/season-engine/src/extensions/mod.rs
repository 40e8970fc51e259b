// extensions/mod.rs
//
// Presentation-side geometry that builds on the core model but is not part
// of it: the rotation compositor for points fixed on the tilted body.

pub mod transform;

pub use transform::{compose, site_offset, LocalTransform};
