use oxttl::TurtleParseError;
use rdf_loom_model::IriParseError;
use rdf_loom_writer::{CollectionError, WriterError};
use std::io;

/// An error raised while loading a file into a [`Store`](crate::store::Store).
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An error raised while reading the file.
    #[error(transparent)]
    Parsing(#[from] TurtleParseError),
    /// The base IRI is invalid.
    #[error("Invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        /// The IRI itself.
        iri: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
}

impl From<LoaderError> for io::Error {
    #[inline]
    fn from(error: LoaderError) -> Self {
        match error {
            LoaderError::Parsing(error) => error.into(),
            LoaderError::InvalidBaseIri { .. } => {
                Self::new(io::ErrorKind::InvalidInput, error.to_string())
            }
        }
    }
}

/// An error raised while writing a file from a [`Store`](crate::store::Store).
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    /// An error raised while writing the content.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The graph contains a malformed list.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl From<WriterError> for SerializerError {
    #[inline]
    fn from(error: WriterError) -> Self {
        match error {
            WriterError::Io(error) => Self::Io(error),
            WriterError::Collection(error) => Self::Collection(error),
            error => Self::Io(error.into()),
        }
    }
}

impl From<SerializerError> for io::Error {
    #[inline]
    fn from(error: SerializerError) -> Self {
        match error {
            SerializerError::Io(error) => error,
            SerializerError::Collection(error) => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}
