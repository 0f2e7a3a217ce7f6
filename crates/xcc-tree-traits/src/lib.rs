//! Core tree abstractions for the xcc conditional XAML preprocessor.
//!
//! The resolver in `xcc-engine` never talks to an XML library directly. It
//! walks and edits documents through the traits defined here, and adapter
//! crates (such as `xot-adapter`) provide the concrete tree.

pub mod error;
pub mod name;
pub mod tree;

pub use error::Error;
pub use name::{NamespaceDeclaration, QualifiedName};
pub use tree::{MutableXmlTree, XmlTree};
