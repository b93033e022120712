//! The scene-graph slice consumed by the STL codec.
//!
//! This is deliberately a closed world: the STL grammar only ever produces
//! (and the writer only ever accepts) a scene with one shape child whose
//! geometry is an indexed face set. So instead of an open node hierarchy,
//! [`Node`] is a tagged variant over exactly the node types this format
//! touches, and all "what kind of node is this" queries are pattern matches.

use cgmath::{Point3, Vector3};


/// Marks the end of one face's index run in [`IndexedFaceSet::coord_index`].
pub const END_OF_FACE: i32 = -1;


// ===========================================================================
// ===== SceneGraph
// ===========================================================================

/// The top-level container: an ordered list of child nodes plus a label for
/// the source the scene was read from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneGraph {
    url: String,
    children: Vec<Node>,
}

impl SceneGraph {
    /// An empty scene with no children and an empty url.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all children. The url is left untouched.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}


// ===========================================================================
// ===== Node and the per-kind payloads
// ===========================================================================

/// One scene-graph node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Shape(Shape),
    Appearance(Appearance),
    Material(Material),
    IndexedFaceSet(IndexedFaceSet),
}

impl Node {
    pub fn is_shape(&self) -> bool {
        self.as_shape().is_some()
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Node::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_indexed_face_set(&self) -> Option<&IndexedFaceSet> {
        match self {
            Node::IndexedFaceSet(ifs) => Some(ifs),
            _ => None,
        }
    }
}

/// A renderable object: optional appearance plus optional geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    appearance: Option<Box<Node>>,
    geometry: Option<Box<Node>>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_appearance(&mut self, node: Node) {
        self.appearance = Some(Box::new(node));
    }

    pub fn appearance(&self) -> Option<&Node> {
        self.appearance.as_deref()
    }

    pub fn set_geometry(&mut self, node: Node) {
        self.geometry = Some(Box::new(node));
    }

    pub fn geometry(&self) -> Option<&Node> {
        self.geometry.as_deref()
    }

    /// The geometry, if it is an indexed face set.
    pub fn geometry_face_set(&self) -> Option<&IndexedFaceSet> {
        self.geometry().and_then(Node::as_indexed_face_set)
    }
}

/// Rendering attributes of a shape. Only the material reference exists in
/// this slice of the hierarchy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Appearance {
    material: Option<Box<Node>>,
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_material(&mut self, node: Node) {
        self.material = Some(Box::new(node));
    }

    pub fn material(&self) -> Option<&Node> {
        self.material.as_deref()
    }
}

/// Surface material. Opaque here: the STL format carries no appearance data,
/// so a default-constructed material is all the codec ever creates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material;

impl Material {
    pub fn new() -> Self {
        Material
    }
}


// ===========================================================================
// ===== IndexedFaceSet
// ===========================================================================

/// How the entries of the normal buffer relate to the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalBinding {
    /// No usable normals (empty buffer, or a buffer whose length does not
    /// match the binding implied by the flag).
    None,
    /// One normal per vertex.
    PerVertex,
    /// One normal per face.
    PerFace,
}

/// A polygonal mesh with shared vertex positions.
///
/// Faces reference vertices by index: `coord_index` holds one run of
/// non-negative indices per face, each run terminated by [`END_OF_FACE`].
/// `coord` stores the positions as flat `x y z` triples, so index `i` refers
/// to `coord[3*i..3*i+3]`. The normal buffer is laid out the same way; its
/// meaning depends on the `normal_per_vertex` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFaceSet {
    name: String,
    coord: Vec<f32>,
    coord_index: Vec<i32>,
    normal: Vec<f32>,
    normal_per_vertex: bool,
}

impl IndexedFaceSet {
    /// An empty face set. Normals default to per-vertex binding.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            coord: Vec::new(),
            coord_index: Vec::new(),
            normal: Vec::new(),
            normal_per_vertex: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn coord(&self) -> &[f32] {
        &self.coord
    }

    pub fn coord_mut(&mut self) -> &mut Vec<f32> {
        &mut self.coord
    }

    pub fn coord_index(&self) -> &[i32] {
        &self.coord_index
    }

    pub fn coord_index_mut(&mut self) -> &mut Vec<i32> {
        &mut self.coord_index
    }

    pub fn normal(&self) -> &[f32] {
        &self.normal
    }

    pub fn normal_mut(&mut self) -> &mut Vec<f32> {
        &mut self.normal
    }

    pub fn set_normal_per_vertex(&mut self, per_vertex: bool) {
        self.normal_per_vertex = per_vertex;
    }

    /// Number of vertices in the coordinate buffer.
    pub fn num_vertices(&self) -> usize {
        self.coord.len() / 3
    }

    /// Number of terminated index runs, i.e. faces.
    pub fn num_faces(&self) -> usize {
        self.coord_index.iter().filter(|&&i| i < 0).count()
    }

    /// The binding the normal buffer actually satisfies. A buffer whose
    /// length does not match the flag yields `None`: callers must never end
    /// up indexing past the buffer because the flag promised more normals
    /// than are there.
    pub fn normal_binding(&self) -> NormalBinding {
        if self.normal.is_empty() {
            NormalBinding::None
        } else if self.normal_per_vertex {
            if self.normal.len() == 3 * self.num_vertices() {
                NormalBinding::PerVertex
            } else {
                NormalBinding::None
            }
        } else {
            if self.normal.len() == 3 * self.num_faces() {
                NormalBinding::PerFace
            } else {
                NormalBinding::None
            }
        }
    }

    /// `true` if every index run has exactly three entries. An unterminated
    /// trailing run disqualifies the mesh.
    pub fn is_triangle_mesh(&self) -> bool {
        let mut run_len = 0;
        for &i in &self.coord_index {
            if i < 0 {
                if run_len != 3 {
                    return false;
                }
                run_len = 0;
            } else {
                run_len += 1;
            }
        }
        run_len == 0
    }

    /// Position of vertex `index`. Panics if out of bounds.
    pub fn vertex(&self, index: usize) -> Point3<f32> {
        let v = &self.coord[3 * index..3 * index + 3];
        Point3::new(v[0], v[1], v[2])
    }

    /// Normal of face `face` under per-face binding. Panics if out of bounds.
    pub fn face_normal(&self, face: usize) -> Vector3<f32> {
        let n = &self.normal[3 * face..3 * face + 3];
        Vector3::new(n[0], n[1], n[2])
    }
}

impl Default for IndexedFaceSet {
    fn default() -> Self {
        Self::new()
    }
}
