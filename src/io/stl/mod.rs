//! The ASCII STL format.
//!
//! STL stores one named solid as a flat list of "facets": a triangle with
//! its own normal and three inline vertex positions. There is no shared
//! topology in the file at all. [`load`] therefore produces an indexed face
//! set with three fresh vertices per facet (no welding of coincident
//! positions) and normals bound per face; [`save`] accepts exactly that kind
//! of scene back and reconstructs every facet's `outer loop` from the flat
//! index buffer.
//!
//! Only the ASCII flavor is handled, and only single-solid files.

mod read;
mod write;


pub use self::{
    read::{load, Reader},
    write::{save, Writer},
};


/// The file extension associated with this format.
pub const FILE_EXTENSION: &str = "stl";
