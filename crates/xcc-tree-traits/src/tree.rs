//! XML tree abstraction traits

use crate::error::Result;
use crate::name::{NamespaceDeclaration, QualifiedName};
use std::collections::HashSet;
use std::fmt::Debug;

/// Read access to a single parsed XML document.
///
/// Implementations own the document; node handles are only meaningful for
/// the tree that produced them.
pub trait XmlTree {
    /// Type representing a node handle in this tree
    type Node: Copy + Eq + Debug;

    /// Get the document element (root element)
    fn document_element(&self) -> Result<Self::Node>;

    /// Get the child elements of an element, in document order.
    ///
    /// Text, comments and processing instructions are skipped.
    fn child_elements(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Get the parent of an element, `None` for the document element
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// Get the qualified name of an element
    fn element_name(&self, node: Self::Node) -> Result<QualifiedName>;

    /// Get all attributes of an element as (name, value) pairs, in order.
    ///
    /// Namespace declarations are not attributes and are not included.
    fn attributes(&self, node: Self::Node) -> Vec<(QualifiedName, String)>;

    /// Get the value of a single attribute
    fn attribute(&self, node: Self::Node, name: &QualifiedName) -> Option<String> {
        self.attributes(node)
            .into_iter()
            .find(|(attribute_name, _)| attribute_name == name)
            .map(|(_, value)| value)
    }

    /// Get the namespace declarations made on an element, in order
    fn namespace_declarations(&self, node: Self::Node) -> Vec<NamespaceDeclaration>;

    /// The namespace bound to `prefix` at `node`, looking through the
    /// declarations of the element and its ancestors
    fn namespace_for_prefix(&self, node: Self::Node, prefix: &str) -> Option<String> {
        let mut current = Some(node);
        while let Some(element) = current {
            if let Some(declaration) = self
                .namespace_declarations(element)
                .into_iter()
                .find(|declaration| declaration.prefix == prefix)
            {
                return Some(declaration.uri);
            }
            current = self.parent_element(element);
        }
        None
    }

    /// Whether some prefix in scope at `node` is bound to `uri`.
    ///
    /// A prefix redeclared closer to `node` hides the outer binding.
    fn is_namespace_in_scope(&self, node: Self::Node, uri: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(node);
        while let Some(element) = current {
            for declaration in self.namespace_declarations(element) {
                if seen.insert(declaration.prefix.clone()) && declaration.uri == uri {
                    return true;
                }
            }
            current = self.parent_element(element);
        }
        false
    }

    /// Serialize the whole document.
    ///
    /// Output carries no XML declaration and no added indentation.
    fn serialize(&self) -> Result<String>;
}

/// Structural edits needed to resolve conditional content in place
pub trait MutableXmlTree: XmlTree {
    /// Give an element a new qualified name, keeping its content
    fn rename_element(&mut self, node: Self::Node, name: &QualifiedName) -> Result<()>;

    /// Detach an element and its subtree from its parent
    fn remove_element(&mut self, node: Self::Node) -> Result<()>;

    /// Remove an attribute, returning whether it was present
    fn remove_attribute(&mut self, node: Self::Node, name: &QualifiedName) -> Result<bool>;

    /// Set an attribute value.
    ///
    /// A name not yet present on the element is appended after the existing
    /// attributes.
    fn set_attribute(&mut self, node: Self::Node, name: &QualifiedName, value: &str)
        -> Result<()>;

    /// Declare a namespace on an element
    fn declare_namespace(&mut self, node: Self::Node, declaration: &NamespaceDeclaration)
        -> Result<()>;

    /// Remove the declaration bound to `prefix`, returning whether it was present
    fn remove_namespace_declaration(&mut self, node: Self::Node, prefix: &str) -> Result<bool>;
}
