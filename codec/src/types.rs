//! Codec implementations for scalar fields, fixed-width blobs, and repeated groups.

pub mod group;
pub mod primitives;
