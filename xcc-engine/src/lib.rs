//! xcc-engine: conditional compilation for XAML
//!
//! Elements and attributes whose namespace is `condition:SYMBOL` or
//! `condition:!SYMBOL` are kept (moved into the output namespace) or dropped
//! depending on the defined symbols, much like `#if SYMBOL`. Leftover
//! markup-compatibility bookkeeping is stripped from the document root.
//!
//! # Quick Start
//!
//! ```rust
//! use xcc_engine::XamlPreprocessor;
//!
//! let mut preprocessor = XamlPreprocessor::new("WINDOWS_APP;DEBUG");
//! let xaml = r#"<Page xmlns="urn:ui" xmlns:wp81="condition:WINDOWS_PHONE_APP"><wp81:Grid/></Page>"#;
//! assert_eq!(preprocessor.process_xaml(xaml)?, r#"<Page xmlns="urn:ui"/>"#);
//! # Ok::<(), xcc_engine::Error>(())
//! ```

pub mod condition;
pub mod error;
pub mod preprocessor;
pub mod report;
pub mod resolver;
pub mod task;
pub mod xmlns;

// Re-export core types
pub use condition::{ConditionEvaluator, SymbolSet};
pub use error::{Error, Result};
pub use preprocessor::XamlPreprocessor;
pub use report::{FileReport, RunReport};
pub use resolver::{OutputNamespace, Resolver, ResolverOptions};
pub use task::{PreprocessTask, TaskItem, TaskOutput};
