//! Triangle-mesh scenes in, ASCII STL out, and back.
//!
//! This crate is a bidirectional codec between a small scene-graph
//! representation (a single shape holding an indexed triangle face set) and
//! the ASCII STL interchange format. [`io::stl::load`] parses a `solid` into
//! an [`IndexedFaceSet`] with per-face normals, three fresh vertices per
//! facet; [`io::stl::save`] validates the scene's shape constraints and
//! reconstructs every facet's `outer loop` from the flat, `-1`-terminated
//! coordinate index buffer.

pub mod faces;
pub mod io;
pub mod scene;

pub use self::{
    faces::Faces,
    scene::{Appearance, IndexedFaceSet, Material, Node, NormalBinding, SceneGraph, Shape},
};
