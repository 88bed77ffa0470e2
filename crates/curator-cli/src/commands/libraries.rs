use super::print_lines;
use crate::error::Result;
use curator::PluginContext;

pub fn run(context: &PluginContext) -> Result<()> {
    print_lines(&render(context), "No plugin libraries registered.");
    Ok(())
}

fn render(context: &PluginContext) -> Vec<String> {
    context
        .libraries()
        .into_iter()
        .map(|library| {
            format!(
                "{}: {} plugins, {} engines, {} data representations",
                library.name, library.plugins, library.engines, library.data_representations
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin_context;

    #[test]
    fn summarizes_the_builtin_library() {
        let context = builtin_context();
        assert_eq!(
            render(&context),
            ["curator-builtin: 7 plugins, 2 engines, 3 data representations"]
        );
    }

    #[test]
    fn unregistered_library_disappears() {
        let context = builtin_context();
        context
            .unregister_library(curator::builtin::LIBRARY_NAME)
            .unwrap();
        assert!(render(&context).is_empty());
    }
}
