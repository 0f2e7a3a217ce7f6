//! Condition namespaces and their evaluation against defined symbols
//!
//! A condition namespace is `condition:SYMBOL` or `condition:!SYMBOL`. Only
//! single-symbol presence and negation are supported.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::trace;
use xcc_tree_traits::QualifiedName;

use crate::xmlns::CONDITION_PREFIX;

/// Get the condition body of a namespace, if it is a condition namespace.
///
/// `condition:!DEBUG` yields `!DEBUG`.
pub fn condition_of(namespace: &str) -> Option<&str> {
    namespace.strip_prefix(CONDITION_PREFIX)
}

/// Whether the namespace starts with `condition:`
pub fn is_condition_namespace(namespace: &str) -> bool {
    condition_of(namespace).is_some()
}

/// Defined conditional compilation symbols (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    symbols: HashSet<String>,
}

impl SymbolSet {
    /// Parse a `;`-separated symbol list such as `"WINDOWS_APP; DEBUG"`.
    ///
    /// Tokens are trimmed and empty tokens are dropped.
    pub fn parse(defined_symbols: &str) -> Self {
        defined_symbols.split(';').collect()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in sorted order
    pub fn sorted(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.symbols.iter().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let symbols = iter
            .into_iter()
            .map(|symbol| symbol.as_ref().trim().to_string())
            .filter(|symbol| !symbol.is_empty())
            .collect();
        Self { symbols }
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sorted().join(";"))
    }
}

/// Evaluates condition namespaces, memoizing each distinct condition.
///
/// The cache lives as long as the evaluator. An evaluator belongs to exactly
/// one symbol set (one build configuration), so entries never go stale.
#[derive(Debug, Clone, Default)]
pub struct ConditionEvaluator {
    symbols: SymbolSet,
    results: HashMap<String, bool>,
}

impl ConditionEvaluator {
    pub fn new(symbols: SymbolSet) -> Self {
        Self {
            symbols,
            results: HashMap::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Evaluate a namespace.
    ///
    /// Returns `None` when the namespace is not a condition namespace;
    /// otherwise whether content in it should be included.
    pub fn evaluate(&mut self, namespace: &str) -> Option<bool> {
        let condition = condition_of(namespace)?;

        if let Some(result) = self.results.get(condition) {
            return Some(*result);
        }

        let result = match condition.strip_prefix('!') {
            Some(symbol) => !self.symbols.contains(symbol),
            None => self.symbols.contains(condition),
        };
        trace!(condition, result, "evaluated condition");
        self.results.insert(condition.to_string(), result);
        Some(result)
    }

    /// Evaluate the namespace of a qualified name
    pub fn evaluate_name(&mut self, name: &QualifiedName) -> Option<bool> {
        self.evaluate(&name.namespace)
    }

    /// Whether a result for this condition body (e.g. `!DEBUG`) is cached
    pub fn is_cached(&self, condition: &str) -> bool {
        self.results.contains_key(condition)
    }
}
