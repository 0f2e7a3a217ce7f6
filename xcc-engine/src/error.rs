//! Error types for xcc-engine

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML tree error: {0}")]
    Tree(#[from] xcc_tree_traits::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to preprocess {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid task manifest: {0}")]
    Manifest(String),
}

impl Error {
    /// Attach the source file to an error raised while processing it
    pub fn in_file<P: Into<PathBuf>>(path: P, source: Error) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
