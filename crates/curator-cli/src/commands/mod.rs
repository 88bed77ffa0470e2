pub mod create;
pub mod inspect;
pub mod libraries;
pub mod list;
pub mod query;

use curator::{CategorySet, PluginCreator};
use std::sync::Arc;

pub(crate) fn describe_categories(categories: &CategorySet) -> String {
    categories
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// One line per creator: qualified name, categories, then keywords.
pub(crate) fn describe_creator<C: PluginCreator + ?Sized>(creator: &C) -> String {
    format!(
        "{:<56} [{}]  {}",
        creator.plugin_object_namespace_and_name(),
        describe_categories(&creator.plugin_object_categories()),
        creator.plugin_object_keywords().join(", ")
    )
}

pub(crate) fn describe_creators<C: PluginCreator + ?Sized>(creators: &[Arc<C>]) -> Vec<String> {
    creators
        .iter()
        .map(|creator| describe_creator(creator.as_ref()))
        .collect()
}

pub(crate) fn print_lines(lines: &[String], when_empty: &str) {
    if lines.is_empty() {
        println!("{when_empty}");
    }
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
pub(crate) fn builtin_context() -> curator::PluginContext {
    let context = curator::PluginContext::new();
    curator::builtin::register_all(&context).expect("built-in library registers cleanly");
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator::builtin::selectors::ResidueRangeSelectorCreator;

    #[test]
    fn creator_line_lists_every_category_and_keyword() {
        let line = describe_creator(&ResidueRangeSelectorCreator);
        assert!(line.starts_with("curator::builtin::selectors::ResidueRangeSelector "));
        assert!(line.contains("[Selector,ResidueSelector | Selector,RangeSelector]"));
        assert!(line.ends_with("selector, residues"));
    }
}
