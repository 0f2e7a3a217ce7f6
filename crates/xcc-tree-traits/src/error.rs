//! Error types for XML tree operations

/// Result type for XML tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all XML tree operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// XML parsing failed
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// The document has no root element
    #[error("Document has no root element")]
    NoDocumentElement,

    /// An element operation was applied to a node that is not an element
    #[error("Node is not an element: {0}")]
    NotElement(String),

    /// Serializing the tree failed
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A structural edit was rejected by the underlying tree
    #[error("Tree mutation error: {0}")]
    Mutation(String),
}

impl Error {
    /// Create a new parse error
    pub fn xml_parse<S: Into<String>>(msg: S) -> Self {
        Error::XmlParse(msg.into())
    }

    /// Create a new mutation error
    pub fn mutation<S: Into<String>>(msg: S) -> Self {
        Error::Mutation(msg.into())
    }
}
