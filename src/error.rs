//! The error type returned by every fallible operation in this crate.

use core::fmt;
use std::io;

/// Everything that can go wrong while reading a Norton Guide or Expert Help database.
#[derive(Debug)]
pub enum Error {
    /// The underlying file could not be read, or failed in some way that isn't
    /// simply running out of bytes (permissions, the path not existing, etc).
    Io(io::Error),
    /// A read ran off the end of the file.
    ///
    /// This is also raised by [`Guide::skip`](crate::guide::Guide::skip) and
    /// [`Guide::load`](crate::guide::Guide::load) when the cursor is already at
    /// or past the end of the file.
    Eof,
    /// The entry at the current position did not have a type tag this library
    /// understands (or was a menu record where an entry was expected).
    ///
    /// This is a subtype of [`Error::Eof`] in the sense that
    /// [`stops_iteration`](Error::stops_iteration) is true for both: whole-guide
    /// iteration treats unrecognised entries exactly like running off the end
    /// of the file, so a corrupt tail doesn't wedge the caller in a loop.
    UnknownEntryType(u16),
}

impl Error {
    /// `true` for the error kinds that mean "there is nothing more to read here",
    /// whether that's a literal end of file or an entry this library can't make
    /// sense of. Whole-guide iteration stops cleanly on either, and surfaces
    /// anything else (a real I/O failure) as a terminal `Err` item instead.
    pub fn stops_iteration(&self) -> bool {
        matches!(self, Error::Eof | Error::UnknownEntryType(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{err}"),
            Error::Eof => write!(f, "unexpected end of file"),
            Error::UnknownEntryType(tag) => write!(f, "unknown entry type: {tag}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::Eof,
            _ => Error::Io(err),
        }
    }
}

impl From<scroll::Error> for Error {
    fn from(err: scroll::Error) -> Self {
        Error::Io(io::Error::new(io::ErrorKind::Other, err.to_string()))
    }
}

/// A convenience alias for `Result<T, Error>`, used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;
