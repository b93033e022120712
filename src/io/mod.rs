//! Reading and writing scenes from/to mesh files.

use std::io;

use failure::Fail;


pub(crate) mod parse;
pub mod stl;


/// The error type of all reading and writing operations in this crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// The underlying file or stream failed (including: the source cannot be
    /// opened, the destination cannot be created).
    #[fail(display = "IO error: {}", _0)]
    Io(io::Error),

    /// The token stream violates the STL grammar. The payload names the
    /// construct the parser was expecting at the point of failure.
    #[fail(display = "invalid STL: expecting {}", _0)]
    Grammar(String),

    /// The scene does not satisfy the writer's structural preconditions. The
    /// payload names the violated precondition.
    #[fail(display = "unsupported mesh: {}", _0)]
    UnsupportedMesh(&'static str),
}

impl Error {
    /// Grammar violation: `construct` was required next but not found.
    pub(crate) fn expected(construct: impl Into<String>) -> Self {
        Error::Grammar(construct.into())
    }
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}
