//! Per-face queries over a flat, sentinel-terminated index buffer.

use crate::scene::END_OF_FACE;


/// A read-only view that recovers each face's ordered vertex list from an
/// [`IndexedFaceSet`][crate::scene::IndexedFaceSet] style coordinate index
/// buffer, without materializing a nested structure.
///
/// The buffer is scanned once at construction to record where every
/// terminated run starts; queries then stay within a single run. Only runs
/// that are actually closed by [`END_OF_FACE`] count as faces; trailing
/// indices without a terminator are ignored.
#[derive(Debug, Clone)]
pub struct Faces<'a> {
    num_vertices: usize,
    coord_index: &'a [i32],
    starts: Vec<usize>,
}

impl<'a> Faces<'a> {
    pub fn new(num_vertices: usize, coord_index: &'a [i32]) -> Self {
        let mut starts = Vec::new();
        let mut run_start = 0;
        for (pos, &i) in coord_index.iter().enumerate() {
            if i < 0 {
                starts.push(run_start);
                run_start = pos + 1;
            }
        }

        Self {
            num_vertices,
            coord_index,
            starts,
        }
    }

    /// The vertex count this view was built with.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of terminated runs in the buffer.
    pub fn num_faces(&self) -> usize {
        self.starts.len()
    }

    /// Number of vertices of face `face`, 0 if `face` is out of range.
    pub fn face_size(&self, face: usize) -> usize {
        match self.starts.get(face) {
            Some(&start) => self.run(start).count(),
            None => 0,
        }
    }

    /// The vertex index at position `slot` of face `face`, or [`END_OF_FACE`]
    /// once `slot` walks past the end of that face (or `face` itself is out
    /// of range).
    pub fn face_vertex(&self, face: usize, slot: usize) -> i32 {
        match self.starts.get(face) {
            Some(&start) => self.run(start).nth(slot).unwrap_or(END_OF_FACE),
            None => END_OF_FACE,
        }
    }

    /// The indices of the run starting at `start`, up to its terminator.
    fn run(&self, start: usize) -> impl Iterator<Item = i32> + '_ {
        self.coord_index[start..]
            .iter()
            .cloned()
            .take_while(|&i| i >= 0)
    }
}
