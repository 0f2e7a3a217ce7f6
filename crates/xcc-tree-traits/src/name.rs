//! Namespace-qualified names and namespace declarations

use std::fmt;

/// A (namespace, local name) pair.
///
/// The empty namespace string means the name is not in any namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: String,
    pub local_name: String,
}

impl QualifiedName {
    /// Create a name in the given namespace
    pub fn new<N: Into<String>, L: Into<String>>(namespace: N, local_name: L) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Create a name that is not in any namespace
    pub fn local<L: Into<String>>(local_name: L) -> Self {
        Self::new(String::new(), local_name)
    }

    /// Whether this name has no namespace
    pub fn is_unqualified(&self) -> bool {
        self.namespace.is_empty()
    }

    /// The same local name moved into another namespace
    pub fn with_namespace<N: Into<String>>(&self, namespace: N) -> Self {
        Self::new(namespace, self.local_name.clone())
    }
}

impl fmt::Display for QualifiedName {
    /// Clark notation, `{namespace}local`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

/// A `xmlns` / `xmlns:prefix` binding declared on an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceDeclaration {
    /// Empty for the default namespace
    pub prefix: String,
    pub uri: String,
}

impl NamespaceDeclaration {
    pub fn new<P: Into<String>, U: Into<String>>(prefix: P, uri: U) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// Whether this declares the default namespace
    pub fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }
}
