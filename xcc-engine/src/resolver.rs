//! Resolution of condition namespaces in a document tree
//!
//! One pass walks every element from the root, parent before children, with
//! an explicit stack so deep documents cannot exhaust the call stack. After
//! the walk the root is cleaned of condition namespace declarations and
//! markup-compatibility hints that downstream markup compilers reject.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use xcc_tree_traits::{MutableXmlTree, NamespaceDeclaration, QualifiedName};

use crate::condition::{is_condition_namespace, ConditionEvaluator, SymbolSet};
use crate::error::Result;
use crate::xmlns::{mc_ignorable, mc_process_content, MARKUP_COMPATIBILITY, XAML_PRESENTATION};

/// Namespace that included elements are moved into
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputNamespace {
    /// The root's default `xmlns` if declared, else the root element's own
    /// namespace
    #[default]
    RootDefault,
    /// Always this namespace
    Fixed(String),
}

impl OutputNamespace {
    /// The XAML presentation namespace
    pub fn presentation() -> Self {
        Self::Fixed(XAML_PRESENTATION.to_string())
    }
}

impl From<&str> for OutputNamespace {
    /// `root-default`, `presentation`, or a namespace URI
    fn from(value: &str) -> Self {
        match value {
            "" | "root-default" => Self::RootDefault,
            "presentation" => Self::presentation(),
            uri => Self::Fixed(uri.to_string()),
        }
    }
}

impl From<String> for OutputNamespace {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<OutputNamespace> for String {
    fn from(value: OutputNamespace) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OutputNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootDefault => write!(f, "root-default"),
            Self::Fixed(uri) if uri == XAML_PRESENTATION => write!(f, "presentation"),
            Self::Fixed(uri) => write!(f, "{}", uri),
        }
    }
}

/// Resolver behaviour that is not tied to the symbol set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Strip namespaces listed in the root's `mc:Ignorable` (such as
    /// design-time `d:` content), plus the markup-compatibility declarations
    pub remove_ignorable_content: bool,
    pub output_namespace: OutputNamespace,
}

/// The conditional resolution engine for one build configuration
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    evaluator: ConditionEvaluator,
    options: ResolverOptions,
}

/// Facts about the root gathered before the walk, plus what the walk did
struct Walk<N> {
    root: N,
    ignorable_prefixes: Option<Vec<String>>,
    remove_namespaces: HashSet<String>,
    output_namespace: String,
    markup_compatibility_in_use: bool,
    changed: bool,
}

impl Resolver {
    pub fn new(symbols: SymbolSet, options: ResolverOptions) -> Self {
        Self {
            evaluator: ConditionEvaluator::new(symbols),
            options,
        }
    }

    pub fn symbols(&self) -> &SymbolSet {
        self.evaluator.symbols()
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn evaluator(&self) -> &ConditionEvaluator {
        &self.evaluator
    }

    /// Resolve all conditional content of `tree` in place.
    ///
    /// Returns whether anything changed. Errors only come from the tree
    /// itself, e.g. a document without a root element or a condition that
    /// would remove the root element.
    pub fn resolve<T: MutableXmlTree>(&mut self, tree: &mut T) -> Result<bool> {
        let root = tree.document_element()?;
        let mut walk = self.prepare(tree, root)?;

        // (element, whether its own namespace may have lost its binding)
        let mut stack = vec![(root, false)];
        while let Some((element, check_scope)) = stack.pop() {
            if let Some(check_children) =
                self.resolve_element(tree, element, check_scope, &mut walk)?
            {
                let children = tree.child_elements(element).into_iter().rev();
                stack.extend(children.map(|child| (child, check_children)));
            }
        }

        let removed_prefixes = self.clean_root(tree, root, &mut walk)?;
        if self.options.remove_ignorable_content {
            self.remove_markup_compatibility(tree, root, &mut walk)?;
        } else if !removed_prefixes.is_empty() {
            rewrite_ignorable(tree, root, &removed_prefixes, &mut walk)?;
        }

        Ok(walk.changed)
    }

    fn prepare<T: MutableXmlTree>(&self, tree: &T, root: T::Node) -> Result<Walk<T::Node>> {
        let ignorable_prefixes = tree.attribute(root, &mc_ignorable()).map(|value| {
            value
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        });
        let declarations = tree.namespace_declarations(root);

        let remove_namespaces = match &ignorable_prefixes {
            Some(prefixes) if self.options.remove_ignorable_content => declarations
                .iter()
                .filter(|declaration| {
                    !declaration.is_default()
                        && !is_condition_namespace(&declaration.uri)
                        && prefixes.contains(&declaration.prefix)
                })
                .map(|declaration| declaration.uri.clone())
                .collect(),
            _ => HashSet::new(),
        };

        let output_namespace = match &self.options.output_namespace {
            OutputNamespace::Fixed(uri) => uri.clone(),
            OutputNamespace::RootDefault => match declarations.iter().find(|d| d.is_default()) {
                Some(declaration) => declaration.uri.clone(),
                None => {
                    let root_namespace = tree.element_name(root)?.namespace;
                    if is_condition_namespace(&root_namespace) {
                        String::new()
                    } else {
                        root_namespace
                    }
                }
            },
        };

        Ok(Walk {
            root,
            ignorable_prefixes,
            remove_namespaces,
            output_namespace,
            markup_compatibility_in_use: false,
            changed: false,
        })
    }

    /// Returns `None` when the element was removed. Otherwise the element
    /// survived and the flag tells whether its children must check that
    /// their namespace is still bound.
    fn resolve_element<T: MutableXmlTree>(
        &mut self,
        tree: &mut T,
        element: T::Node,
        check_scope: bool,
        walk: &mut Walk<T::Node>,
    ) -> Result<Option<bool>> {
        let name = tree.element_name(element)?;

        if walk.remove_namespaces.contains(&name.namespace) {
            debug!(element = %name, "removing ignorable element");
            tree.remove_element(element)?;
            walk.changed = true;
            return Ok(None);
        }

        let namespace = match self.evaluator.evaluate_name(&name) {
            None => {
                if name.namespace == MARKUP_COMPATIBILITY {
                    walk.markup_compatibility_in_use = true;
                }
                check_scope.then_some(name.namespace)
            }
            Some(true) => {
                let renamed = name.with_namespace(walk.output_namespace.clone());
                debug!(from = %name, to = %renamed, "including element");
                tree.rename_element(element, &renamed)?;
                walk.changed = true;
                Some(renamed.namespace)
            }
            Some(false) => {
                debug!(element = %name, "excluding element");
                tree.remove_element(element)?;
                walk.changed = true;
                return Ok(None);
            }
        };

        let default_reset = match namespace {
            Some(namespace) => bind_namespace(tree, element, &namespace, walk)?,
            None => false,
        };
        self.resolve_attributes(tree, element, walk)?;
        Ok(Some(check_scope || default_reset))
    }

    fn resolve_attributes<T: MutableXmlTree>(
        &mut self,
        tree: &mut T,
        element: T::Node,
        walk: &mut Walk<T::Node>,
    ) -> Result<()> {
        // snapshot, the loop edits the attribute list
        for (name, value) in tree.attributes(element) {
            if walk.remove_namespaces.contains(&name.namespace) {
                debug!(attribute = %name, "removing ignorable attribute");
                tree.remove_attribute(element, &name)?;
                walk.changed = true;
                continue;
            }

            match self.evaluator.evaluate_name(&name) {
                None => {
                    // the root's hints are removed with the declaration
                    let root_hint = element == walk.root
                        && (name == mc_ignorable() || name == mc_process_content());
                    if name.namespace == MARKUP_COMPATIBILITY && !root_hint {
                        walk.markup_compatibility_in_use = true;
                    }
                }
                Some(true) => {
                    let plain = QualifiedName::local(name.local_name.clone());
                    debug!(attribute = %name, "including attribute");
                    tree.remove_attribute(element, &name)?;
                    tree.remove_attribute(element, &plain)?;
                    tree.set_attribute(element, &plain, &value)?;
                    walk.changed = true;
                }
                Some(false) => {
                    debug!(attribute = %name, "excluding attribute");
                    tree.remove_attribute(element, &name)?;
                    walk.changed = true;
                }
            }
        }
        Ok(())
    }

    /// Drop condition and ignorable namespace declarations and
    /// `mc:ProcessContent` from the root, returning the removed prefixes
    fn clean_root<T: MutableXmlTree>(
        &self,
        tree: &mut T,
        root: T::Node,
        walk: &mut Walk<T::Node>,
    ) -> Result<Vec<String>> {
        let mut removed_prefixes = Vec::new();
        for declaration in tree.namespace_declarations(root) {
            let obsolete = is_condition_namespace(&declaration.uri)
                || walk.remove_namespaces.contains(&declaration.uri);
            if obsolete && tree.remove_namespace_declaration(root, &declaration.prefix)? {
                debug!(prefix = %declaration.prefix, uri = %declaration.uri, "removed namespace declaration");
                removed_prefixes.push(declaration.prefix);
                walk.changed = true;
            }
        }

        if tree.remove_attribute(root, &mc_process_content())? {
            walk.changed = true;
        }
        Ok(removed_prefixes)
    }

    fn remove_markup_compatibility<T: MutableXmlTree>(
        &self,
        tree: &mut T,
        root: T::Node,
        walk: &mut Walk<T::Node>,
    ) -> Result<()> {
        if tree.remove_attribute(root, &mc_ignorable())? {
            walk.changed = true;
        }

        if walk.markup_compatibility_in_use {
            warn!("markup compatibility namespace is still in use, keeping its declaration");
            return Ok(());
        }
        for declaration in tree.namespace_declarations(root) {
            if declaration.uri == MARKUP_COMPATIBILITY
                && tree.remove_namespace_declaration(root, &declaration.prefix)?
            {
                walk.changed = true;
            }
        }
        Ok(())
    }
}

/// Keep only the `mc:Ignorable` prefixes that are still declared
fn rewrite_ignorable<T: MutableXmlTree>(
    tree: &mut T,
    root: T::Node,
    removed_prefixes: &[String],
    walk: &mut Walk<T::Node>,
) -> Result<()> {
    let Some(prefixes) = &walk.ignorable_prefixes else {
        return Ok(());
    };
    let kept: Vec<&str> = prefixes
        .iter()
        .filter(|prefix| !removed_prefixes.contains(*prefix))
        .map(String::as_str)
        .collect();

    if kept.is_empty() {
        if tree.remove_attribute(root, &mc_ignorable())? {
            walk.changed = true;
        }
    } else if kept.len() != prefixes.len() {
        tree.set_attribute(root, &mc_ignorable(), &kept.join(" "))?;
        walk.changed = true;
    }
    Ok(())
}

/// Make `namespace` writable at `element`.
///
/// A named namespace that nothing in scope binds gets a generated `nsN`
/// prefix, on the root unless an ancestor binding is hidden by a nearer
/// redeclaration. No namespace under a non-empty default gets `xmlns=""`.
/// Returns whether the default namespace was reset, which leaves unprefixed
/// descendants to be checked in turn.
fn bind_namespace<T: MutableXmlTree>(
    tree: &mut T,
    element: T::Node,
    namespace: &str,
    walk: &mut Walk<T::Node>,
) -> Result<bool> {
    if namespace.is_empty() {
        return match tree.namespace_for_prefix(element, "") {
            Some(default) if !default.is_empty() => {
                debug!(%default, "resetting default namespace");
                tree.declare_namespace(element, &NamespaceDeclaration::new("", ""))?;
                walk.changed = true;
                Ok(true)
            }
            _ => Ok(false),
        };
    }
    if tree.is_namespace_in_scope(element, namespace) {
        return Ok(false);
    }

    let mut declared_above = false;
    let mut current = Some(element);
    while let Some(ancestor) = current {
        if tree.namespace_declarations(ancestor).iter().any(|d| d.uri == namespace) {
            declared_above = true;
            break;
        }
        current = tree.parent_element(ancestor);
    }
    let target = if declared_above { element } else { walk.root };

    let prefix = (0..)
        .map(|i| format!("ns{}", i))
        .find(|prefix| tree.namespace_for_prefix(element, prefix).is_none())
        .unwrap_or_default();
    debug!(%prefix, uri = namespace, "declaring namespace");
    tree.declare_namespace(target, &NamespaceDeclaration::new(prefix, namespace))?;
    walk.changed = true;
    Ok(false)
}
