use std::{
    fs::File,
    io::{self, BufWriter, Cursor},
    path::Path,
};

use boolinator::Boolinator;

use crate::{
    faces::Faces,
    io::Error,
    scene::{IndexedFaceSet, NormalBinding, SceneGraph},
};


/// The solid name used when neither the face set nor the caller provides one.
const DEFAULT_SOLID_NAME: &str = "mesh";


/// A writer able to write a scene as an ASCII STL file.
///
/// All structural preconditions are checked by [`Writer::new`], before any
/// I/O happens: a `Writer` that exists can always be written out. This is
/// what guarantees that [`save`] never creates or truncates the destination
/// for a scene that fails validation.
pub struct Writer<'a> {
    ifs: &'a IndexedFaceSet,
    solid_name: Option<String>,
}

impl<'a> Writer<'a> {
    /// Validates `scene` for STL serialization.
    ///
    /// The scene must consist of exactly one child; that child must be a
    /// shape; its geometry must be an indexed face set; the face set must be
    /// a pure triangle mesh with normals bound per face and every stored
    /// vertex index in range. Anything else fails with
    /// [`Error::UnsupportedMesh`] naming the violated precondition.
    pub fn new(scene: &'a SceneGraph) -> Result<Self, Error> {
        let child = match scene.children() {
            [child] => child,
            _ => return Err(Error::UnsupportedMesh("scene must have exactly one child")),
        };
        let shape = child
            .as_shape()
            .ok_or(Error::UnsupportedMesh("the only child must be a shape"))?;
        let ifs = shape
            .geometry_face_set()
            .ok_or(Error::UnsupportedMesh("shape geometry must be an indexed face set"))?;

        ifs.is_triangle_mesh()
            .ok_or(Error::UnsupportedMesh("face set must be a pure triangle mesh"))?;
        (ifs.normal_binding() == NormalBinding::PerFace)
            .ok_or(Error::UnsupportedMesh("face set normals must be bound per face"))?;

        let num_vertices = ifs.num_vertices();
        ifs.coord_index()
            .iter()
            .all(|&i| i < 0 || (i as usize) < num_vertices)
            .ok_or(Error::UnsupportedMesh("coordinate index out of range"))?;

        Ok(Self {
            ifs,
            solid_name: None,
        })
    }

    /// Overrides the solid name written to the file. Takes precedence over
    /// the face set's own name.
    pub fn with_solid_name(mut self, name: impl Into<String>) -> Self {
        self.solid_name = Some(name.into());
        self
    }

    /// Writes the solid as ASCII STL text.
    ///
    /// Every coordinate and normal component is printed with six fractional
    /// digits (printf's `%f`). That is part of the wire contract, not a
    /// display choice: it is what makes load/save round trips byte
    /// identical. The closing `endsolid` line carries no trailing newline.
    pub fn write_to(&self, mut w: impl io::Write) -> Result<(), Error> {
        let ifs = self.ifs;
        let name = self.resolved_name();

        writeln!(w, "solid {}", name)?;

        let faces = Faces::new(ifs.num_vertices(), ifs.coord_index());
        for face in 0..faces.num_faces() {
            let n = ifs.face_normal(face);
            writeln!(w, "facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;

            writeln!(w, "  outer loop")?;
            let mut slot = 0;
            loop {
                let vertex = faces.face_vertex(face, slot);
                if vertex < 0 {
                    break;
                }
                let v = ifs.vertex(vertex as usize);
                writeln!(w, "    vertex {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
                slot += 1;
            }
            writeln!(w, "  endloop")?;
            writeln!(w, "endfacet")?;
        }

        write!(w, "endsolid {}", name)?;
        w.flush()?;

        Ok(())
    }

    /// Writes the solid into a `Vec<u8>` which is returned on success.
    pub fn write_to_memory(&self) -> Result<Vec<u8>, Error> {
        let mut w = Cursor::new(Vec::new());
        self.write_to(&mut w)?;
        Ok(w.into_inner())
    }

    /// Override, then face set name, then default.
    fn resolved_name(&self) -> &str {
        match &self.solid_name {
            Some(name) => name,
            None if !self.ifs.name().is_empty() => self.ifs.name(),
            None => DEFAULT_SOLID_NAME,
        }
    }
}


/// Saves `scene` as an ASCII STL file at `path`.
///
/// The scene is validated first (see [`Writer::new`]); on a validation
/// failure the destination file is not created or modified. The solid name
/// is the face set's name if non-empty, otherwise it is derived from the
/// final segment of `path` with its extension stripped.
///
/// Fails with [`Error::Io`] if the destination cannot be opened for writing.
pub fn save(path: impl AsRef<Path>, scene: &SceneGraph) -> Result<(), Error> {
    let path = path.as_ref();

    let mut writer = Writer::new(scene)?;
    if writer.ifs.name().is_empty() {
        writer = writer.with_solid_name(solid_name_from(path));
    }

    writer.write_to(BufWriter::new(File::create(path)?))
}

/// Derives the solid name from the destination path: the final path segment
/// with its extension stripped. A segment without a dot is used whole; a
/// path without a usable stem falls back to the default name.
fn solid_name_from(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(DEFAULT_SOLID_NAME)
        .to_string()
}
