//! XmlTree implementation for xot

use std::fmt;

use xcc_tree_traits::{
    error::{Error, Result},
    name::{NamespaceDeclaration, QualifiedName},
    tree::{MutableXmlTree, XmlTree},
};
use xot::{NameId, Node, PrefixId, Xot};

/// One parsed document held in its own `Xot` arena.
///
/// Whitespace-only text is kept as parsed, so serializing an untouched tree
/// reproduces the source layout apart from attribute spacing and quoting.
pub struct XotTree {
    pub(crate) xot: Xot,
    document: Node,
}

impl XotTree {
    /// Parse a document, preserving whitespace text nodes
    pub fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let document = xot.parse(xml).map_err(|e| Error::xml_parse(e.to_string()))?;
        Ok(Self { xot, document })
    }

    /// Get the document node (the parent of the root element)
    pub fn document(&self) -> Node {
        self.document
    }

    /// Get a reference to the underlying Xot
    pub fn xot(&self) -> &Xot {
        &self.xot
    }

    fn qualified_name(&self, name: NameId) -> QualifiedName {
        let (local_name, namespace) = self.xot.name_ns_str(name);
        QualifiedName::new(namespace, local_name)
    }

    /// Interns `name`, creating the namespace entry when needed
    fn add_name(&mut self, name: &QualifiedName) -> NameId {
        if name.is_unqualified() {
            self.xot.add_name(&name.local_name)
        } else {
            let namespace = self.xot.add_namespace(&name.namespace);
            self.xot.add_name_ns(&name.local_name, namespace)
        }
    }

    fn attribute_name_id(&self, node: Node, name: &QualifiedName) -> Option<NameId> {
        self.xot
            .attributes(node)
            .iter()
            .map(|(name_id, _)| name_id.to_owned())
            .find(|name_id| self.qualified_name(*name_id) == *name)
    }

    fn declared_prefix_id(&self, node: Node, prefix: &str) -> Option<PrefixId> {
        self.xot
            .namespaces(node)
            .iter()
            .map(|(prefix_id, _)| prefix_id.to_owned())
            .find(|prefix_id| self.xot.prefix_str(*prefix_id) == prefix)
    }

    fn ensure_element(&self, node: Node) -> Result<()> {
        if self.xot.is_element(node) {
            Ok(())
        } else {
            Err(Error::NotElement(format!("{:?}", node)))
        }
    }
}

impl fmt::Debug for XotTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XotTree")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl XmlTree for XotTree {
    type Node = Node;

    fn document_element(&self) -> Result<Self::Node> {
        self.xot
            .children(self.document)
            .find(|node| self.xot.is_element(*node))
            .ok_or(Error::NoDocumentElement)
    }

    fn child_elements(&self, node: Self::Node) -> Vec<Self::Node> {
        self.xot
            .children(node)
            .filter(|child| self.xot.is_element(*child))
            .collect()
    }

    fn parent_element(&self, node: Self::Node) -> Option<Self::Node> {
        self.xot
            .parent(node)
            .filter(|parent| self.xot.is_element(*parent))
    }

    fn element_name(&self, node: Self::Node) -> Result<QualifiedName> {
        self.ensure_element(node)?;
        self.xot
            .node_name(node)
            .map(|name| self.qualified_name(name))
            .ok_or_else(|| Error::NotElement(format!("{:?}", node)))
    }

    fn attributes(&self, node: Self::Node) -> Vec<(QualifiedName, String)> {
        if !self.xot.is_element(node) {
            return Vec::new();
        }
        self.xot
            .attributes(node)
            .iter()
            .map(|(name, value)| (self.qualified_name(name.to_owned()), value.to_string()))
            .collect()
    }

    fn namespace_declarations(&self, node: Self::Node) -> Vec<NamespaceDeclaration> {
        if !self.xot.is_element(node) {
            return Vec::new();
        }
        self.xot
            .namespaces(node)
            .iter()
            .map(|(prefix, namespace)| {
                NamespaceDeclaration::new(
                    self.xot.prefix_str(prefix.to_owned()),
                    self.xot.namespace_str(namespace.to_owned()),
                )
            })
            .collect()
    }

    fn serialize(&self) -> Result<String> {
        self.xot
            .to_string(self.document)
            .map_err(|e| Error::Serialize(e.to_string()))
    }
}

impl MutableXmlTree for XotTree {
    fn rename_element(&mut self, node: Self::Node, name: &QualifiedName) -> Result<()> {
        self.ensure_element(node)?;
        let name_id = self.add_name(name);
        let element = self
            .xot
            .element_mut(node)
            .ok_or_else(|| Error::NotElement(format!("{:?}", node)))?;
        element.set_name(name_id);
        Ok(())
    }

    fn remove_element(&mut self, node: Self::Node) -> Result<()> {
        self.ensure_element(node)?;
        if self.document_element()? == node {
            return Err(Error::mutation("cannot remove the document element"));
        }
        self.xot
            .remove(node)
            .map_err(|e| Error::mutation(e.to_string()))
    }

    fn remove_attribute(&mut self, node: Self::Node, name: &QualifiedName) -> Result<bool> {
        self.ensure_element(node)?;
        match self.attribute_name_id(node, name) {
            Some(name_id) => Ok(self.xot.attributes_mut(node).remove(name_id).is_some()),
            None => Ok(false),
        }
    }

    fn set_attribute(
        &mut self,
        node: Self::Node,
        name: &QualifiedName,
        value: &str,
    ) -> Result<()> {
        self.ensure_element(node)?;
        let name_id = self.add_name(name);
        self.xot
            .attributes_mut(node)
            .insert(name_id, value.to_string());
        Ok(())
    }

    fn declare_namespace(
        &mut self,
        node: Self::Node,
        declaration: &NamespaceDeclaration,
    ) -> Result<()> {
        self.ensure_element(node)?;
        let prefix = self.xot.add_prefix(&declaration.prefix);
        let namespace = self.xot.add_namespace(&declaration.uri);
        self.xot.namespaces_mut(node).insert(prefix, namespace);
        Ok(())
    }

    fn remove_namespace_declaration(&mut self, node: Self::Node, prefix: &str) -> Result<bool> {
        self.ensure_element(node)?;
        match self.declared_prefix_id(node, prefix) {
            Some(prefix_id) => Ok(self.xot.namespaces_mut(node).remove(prefix_id).is_some()),
            None => Ok(false),
        }
    }
}
