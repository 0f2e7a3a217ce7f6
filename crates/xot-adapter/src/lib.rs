//! xot adapter for the xcc tree abstraction
//!
//! Wraps a single `xot` document so the conditional resolver can walk and
//! edit it through the `xcc-tree-traits` interfaces.

pub mod tree;

// Re-export main types
pub use tree::XotTree;

// Re-export key types for convenience
pub use xot::{Node, Xot};
