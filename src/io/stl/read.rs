use std::{
    fs::File,
    io,
    path::Path,
};

use cgmath::{Point3, Vector3};

use crate::{
    io::{parse::Tokenizer, Error},
    scene::{Appearance, IndexedFaceSet, Material, Node, SceneGraph, Shape, END_OF_FACE},
};


/// A reader able to read ASCII STL files.
pub struct Reader<R: io::Read> {
    tokens: Tokenizer<R>,
}

impl Reader<File> {
    /// Creates a new `Reader` for the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: io::Read> Reader<R> {
    /// Creates a new `Reader` from the given `io::Read` instance. If you want
    /// to open a file, rather use [`Reader::open`].
    pub fn new(input: R) -> Self {
        Self {
            tokens: Tokenizer::new(input),
        }
    }

    /// Parses one solid and appends the resulting shape to `scene`.
    ///
    /// The grammar is enforced strictly and case-sensitively; the first
    /// violation aborts with [`Error::Grammar`] carrying the construct that
    /// was expected. Facets matched before the failure have already been
    /// committed, so a scene left behind by a failed read must be discarded
    /// by the caller.
    pub fn read_into(mut self, scene: &mut SceneGraph) -> Result<(), Error> {
        if !self.tokens.expecting("solid")? {
            return Err(Error::expected("solid"));
        }
        if !self.tokens.advance()? {
            return Err(Error::expected("solid name"));
        }

        let mut ifs = IndexedFaceSet::new();
        ifs.set_name(self.tokens.token());
        ifs.set_normal_per_vertex(false);

        let result = self.read_facets(&mut ifs);

        // The shape is attached even when the facet loop failed, so whatever
        // was matched up to that point stays visible to the caller.
        let mut appearance = Appearance::new();
        appearance.set_material(Node::Material(Material::new()));

        let mut shape = Shape::new();
        shape.set_appearance(Node::Appearance(appearance));
        shape.set_geometry(Node::IndexedFaceSet(ifs));
        scene.add_child(Node::Shape(shape));

        result
    }

    /// Reads facet records until `endsolid`, appending to the buffers of
    /// `ifs`.
    fn read_facets(&mut self, ifs: &mut IndexedFaceSet) -> Result<(), Error> {
        // Every facet introduces three fresh vertices, so face indices are
        // just a running count. Local on purpose: independent loads never
        // share state.
        let mut next_vertex: i32 = 0;

        loop {
            if !self.tokens.advance()? {
                // the input ended before the solid was closed
                return Err(Error::expected("endsolid"));
            }
            if self.tokens.token() == "endsolid" {
                // Done. An optional name and arbitrary junk may follow; we
                // don't read any of it.
                return Ok(());
            }

            let facet = self.read_facet()?;

            let normal = ifs.normal_mut();
            normal.push(facet.normal.x);
            normal.push(facet.normal.y);
            normal.push(facet.normal.z);

            let coord = ifs.coord_mut();
            for v in &facet.vertices {
                coord.push(v.x);
                coord.push(v.y);
                coord.push(v.z);
            }

            let coord_index = ifs.coord_index_mut();
            for _ in 0..3 {
                coord_index.push(next_vertex);
                next_vertex += 1;
            }
            coord_index.push(END_OF_FACE);
        }
    }

    /// Parses one facet record. The current token is the one that was not
    /// `endsolid`, i.e. it has to be `facet`.
    fn read_facet(&mut self) -> Result<Facet, Error> {
        if !(self.tokens.token() == "facet" && self.tokens.expecting("normal")?) {
            return Err(Error::expected("facet normal"));
        }
        let [x, y, z] = match self.tokens.vec3()? {
            Some(n) => n,
            None => return Err(Error::expected("normal vector")),
        };
        let normal = Vector3::new(x, y, z);

        if !(self.tokens.expecting("outer")? && self.tokens.expecting("loop")?) {
            return Err(Error::expected("outer loop"));
        }

        let mut vertices = [Point3::new(0.0, 0.0, 0.0); 3];
        for vertex in &mut vertices {
            if !self.tokens.expecting("vertex")? {
                return Err(Error::expected("vertex"));
            }
            let [x, y, z] = match self.tokens.vec3()? {
                Some(v) => v,
                None => return Err(Error::expected("vertex position")),
            };
            *vertex = Point3::new(x, y, z);
        }

        if !self.tokens.expecting("endloop")? {
            return Err(Error::expected("endloop"));
        }
        if !self.tokens.expecting("endfacet")? {
            return Err(Error::expected("endfacet"));
        }

        Ok(Facet { normal, vertices })
    }
}

/// One parsed facet record.
struct Facet {
    normal: Vector3<f32>,
    vertices: [Point3<f32>; 3],
}


/// Loads the ASCII STL file at `path` into `scene`.
///
/// Any previous children of `scene` are dropped and its url is reset before
/// parsing starts. On success the scene holds a single [`Shape`] child with
/// an [`Appearance`] (carrying a default [`Material`]) and an
/// [`IndexedFaceSet`] geometry whose normals are bound per face and whose
/// name is the solid name from the file.
///
/// Fails with [`Error::Io`] if the file cannot be opened and with
/// [`Error::Grammar`] on the first grammar violation, including a file that
/// ends without `endsolid`. The file handle is released on every path.
pub fn load(path: impl AsRef<Path>, scene: &mut SceneGraph) -> Result<(), Error> {
    scene.clear();
    scene.set_url("");

    Reader::open(path)?.read_into(scene)
}
