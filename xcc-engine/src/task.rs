//! Build task: preprocess the XAML item groups of a project
//!
//! Every changed file is written below `output_path` and replaced in its item
//! group by a linked item pointing at the generated copy. The link keeps the
//! item's original project-relative location, which is what lets the markup
//! compiler treat the generated file as the original page.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::condition::SymbolSet;
use crate::error::{Error, Result};
use crate::preprocessor::XamlPreprocessor;
use crate::report::{FileReport, RunReport};
use crate::resolver::{OutputNamespace, ResolverOptions};

/// A file item of a build item group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskItem {
    /// Item path as written in the project
    pub item_spec: String,
    /// Resolved source path, when different from `item_spec`
    pub full_path: Option<PathBuf>,
    /// Project-relative location of a linked item
    pub link: Option<String>,
    /// Remaining item metadata, copied onto generated items
    pub metadata: BTreeMap<String, String>,
}

impl TaskItem {
    pub fn new<S: Into<String>>(item_spec: S) -> Self {
        Self {
            item_spec: item_spec.into(),
            ..Self::default()
        }
    }

    /// The file to read, relative item specs resolved against `base_dir`
    pub fn source_path(&self, base_dir: &Path) -> PathBuf {
        match &self.full_path {
            Some(path) => path.clone(),
            None => base_dir.join(&self.item_spec),
        }
    }

    /// Where the processed copy goes, relative to the output directory.
    ///
    /// The link wins over the item spec; an absolute path keeps only its file
    /// name.
    pub fn target_relative_path(&self) -> PathBuf {
        let relative = match self.link.as_deref() {
            Some(link) if !link.is_empty() => link,
            _ => self.item_spec.as_str(),
        };
        let relative = Path::new(relative);
        if relative.is_absolute() {
            if let Some(file_name) = relative.file_name() {
                return PathBuf::from(file_name);
            }
        }
        relative.to_path_buf()
    }
}

/// Parameters of one preprocessing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessTask {
    pub defined_symbols: String,
    pub application_definitions: Vec<TaskItem>,
    pub pages: Vec<TaskItem>,
    pub embedded_xaml_resources: Vec<TaskItem>,
    pub output_path: PathBuf,
    /// Directory relative item specs are resolved against
    pub base_dir: PathBuf,
    pub remove_ignorable_content: bool,
    pub output_namespace: OutputNamespace,
}

/// Results of a run: the item groups to compile instead of the originals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    pub new_application_definitions: Vec<TaskItem>,
    pub new_pages: Vec<TaskItem>,
    pub new_embedded_xaml_resources: Vec<TaskItem>,
    pub generated_files: Vec<TaskItem>,
    pub report: RunReport,
}

/// Collects what a run generated across item groups
struct RunState {
    preprocessor: XamlPreprocessor,
    generated_files: Vec<TaskItem>,
    files: Vec<FileReport>,
}

impl PreprocessTask {
    /// Load a task from a JSON manifest
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| Error::in_file(path, e))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Manifest(e.to_string()))
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            remove_ignorable_content: self.remove_ignorable_content,
            output_namespace: self.output_namespace.clone(),
        }
    }

    /// Run the task. The first failing file aborts the whole run.
    pub fn execute(&self) -> Result<TaskOutput> {
        let symbols = SymbolSet::parse(&self.defined_symbols);
        info!("XCC > DefinedSymbols: {}", symbols);

        let mut state = RunState {
            preprocessor: XamlPreprocessor::with_options(symbols, self.resolver_options()),
            generated_files: Vec::new(),
            files: Vec::new(),
        };

        let new_application_definitions =
            self.process_group(&self.application_definitions, &mut state)?;
        let new_pages = self.process_group(&self.pages, &mut state)?;
        let new_embedded_xaml_resources =
            self.process_group(&self.embedded_xaml_resources, &mut state)?;

        Ok(TaskOutput {
            new_application_definitions,
            new_pages,
            new_embedded_xaml_resources,
            generated_files: state.generated_files,
            report: RunReport::new(&self.defined_symbols, state.files),
        })
    }

    fn process_group(&self, items: &[TaskItem], state: &mut RunState) -> Result<Vec<TaskItem>> {
        let mut group = Vec::with_capacity(items.len());
        for item in items {
            match self.process_item(item, state)? {
                Some(generated) => {
                    state.generated_files.push(generated.clone());
                    group.push(generated);
                }
                None => group.push(item.clone()),
            }
        }
        Ok(group)
    }

    fn process_item(&self, item: &TaskItem, state: &mut RunState) -> Result<Option<TaskItem>> {
        let source = item.source_path(&self.base_dir);
        let relative = item.target_relative_path();
        let target = self.output_path.join(&relative);

        info!("XCC > Preprocessing {}", relative.display());
        let start = Instant::now();
        let changed = state.preprocessor.process_xaml_file(&source, &target)?;
        let duration = start.elapsed();
        info!(
            "XCC > Preprocess completed in {}ms, {} has {}changed",
            duration.as_millis(),
            relative.display(),
            if changed { "" } else { "not " }
        );

        state
            .files
            .push(FileReport::new(source, target.clone(), changed, duration));

        if !changed {
            return Ok(None);
        }
        Ok(Some(TaskItem {
            item_spec: target.to_string_lossy().into_owned(),
            full_path: Some(target),
            link: Some(relative.to_string_lossy().into_owned()),
            metadata: item.metadata.clone(),
        }))
    }
}
