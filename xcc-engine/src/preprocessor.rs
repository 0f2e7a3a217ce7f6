//! String and file level entry points

use std::fs;
use std::path::Path;

use tracing::debug;
use xcc_tree_traits::{MutableXmlTree, XmlTree};
use xot_adapter::XotTree;

use crate::condition::SymbolSet;
use crate::error::{Error, Result};
use crate::resolver::{Resolver, ResolverOptions};

/// The XAML preprocessor.
///
/// Holds one [`Resolver`], so condition results are shared by every document
/// processed with the same instance.
#[derive(Debug, Clone, Default)]
pub struct XamlPreprocessor {
    resolver: Resolver,
}

impl XamlPreprocessor {
    /// Create a preprocessor from a `;`-separated symbol list with default
    /// options
    pub fn new(defined_symbols: &str) -> Self {
        Self::with_options(SymbolSet::parse(defined_symbols), ResolverOptions::default())
    }

    pub fn with_options(symbols: SymbolSet, options: ResolverOptions) -> Self {
        debug!(symbols = %symbols, ?options, "creating preprocessor");
        Self {
            resolver: Resolver::new(symbols, options),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve an already parsed document in place
    pub fn process_document<T: MutableXmlTree>(&mut self, tree: &mut T) -> Result<bool> {
        self.resolver.resolve(tree)
    }

    /// Process XAML text.
    ///
    /// Unchanged input is returned as-is; otherwise the result is serialized
    /// without XML declaration or indentation.
    pub fn process_xaml(&mut self, xaml: &str) -> Result<String> {
        let mut tree = XotTree::parse(xaml)?;
        if !self.process_document(&mut tree)? {
            return Ok(xaml.to_string());
        }
        Ok(tree.serialize()?)
    }

    /// Process `source` and write the result to `target`.
    ///
    /// The target is written only when the document changed; the return
    /// value tells whether it was.
    pub fn process_xaml_file(&mut self, source: &Path, target: &Path) -> Result<bool> {
        self.write_if_changed(source, target).map_err(|e| Error::in_file(source, e))
    }

    fn write_if_changed(&mut self, source: &Path, target: &Path) -> Result<bool> {
        let xaml = fs::read_to_string(source)?;
        let mut tree = XotTree::parse(&xaml)?;
        if !self.process_document(&mut tree)? {
            return Ok(false);
        }

        let output = tree.serialize()?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, output)?;
        Ok(true)
    }
}
