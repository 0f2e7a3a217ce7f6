//! Well-known namespaces and names

use xcc_tree_traits::QualifiedName;

/// The Markup Compatibility namespace.
pub const MARKUP_COMPATIBILITY: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// The XAML presentation namespace, used as the fixed output namespace by
/// the legacy deployment mode.
pub const XAML_PRESENTATION: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";

/// Namespaces starting with this prefix carry a condition.
pub const CONDITION_PREFIX: &str = "condition:";

/// `mc:Ignorable`
pub fn mc_ignorable() -> QualifiedName {
    QualifiedName::new(MARKUP_COMPATIBILITY, "Ignorable")
}

/// `mc:ProcessContent`
pub fn mc_process_content() -> QualifiedName {
    QualifiedName::new(MARKUP_COMPATIBILITY, "ProcessContent")
}
