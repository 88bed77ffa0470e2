use super::print_lines;
use crate::cli::{InspectArgs, Role};
use crate::error::Result;
use curator::{PluginContext, PluginCreator, Registry};

pub fn run_categories(args: InspectArgs, context: &PluginContext) -> Result<()> {
    let lines = match args.role {
        Role::Plugin => category_counts(context.module_manager()),
        Role::Engine => category_counts(context.engine_manager().registry()),
        Role::DataRepresentation => {
            category_counts(context.data_representation_manager().registry())
        }
    };
    print_lines(&lines, "No categories declared.");
    Ok(())
}

pub fn run_keywords(args: InspectArgs, context: &PluginContext) -> Result<()> {
    let lines = match args.role {
        Role::Plugin => keyword_counts(context.module_manager()),
        Role::Engine => keyword_counts(context.engine_manager().registry()),
        Role::DataRepresentation => {
            keyword_counts(context.data_representation_manager().registry())
        }
    };
    print_lines(&lines, "No keywords declared.");
    Ok(())
}

/// Each declared category path with the number of creators declaring it exactly.
fn category_counts<C: PluginCreator + ?Sized>(registry: &Registry<C>) -> Vec<String> {
    registry
        .all_categories()
        .into_iter()
        .map(|category| {
            let count = registry.get_all_plugins_by_category(&category, false).len();
            format!("{category} ({count})")
        })
        .collect()
}

fn keyword_counts<C: PluginCreator + ?Sized>(registry: &Registry<C>) -> Vec<String> {
    registry
        .all_keywords()
        .into_iter()
        .map(|keyword| {
            let count = registry.plugins_by_keyword(&keyword).len();
            format!("{keyword} ({count})")
        })
        .collect()
}
