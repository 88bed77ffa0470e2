use super::{describe_creators, print_lines};
use crate::cli::{ListArgs, Role};
use crate::error::Result;
use curator::{Category, PluginContext, PluginCreator, Registry, Request};
use tracing::info;

pub fn run(args: ListArgs, context: &PluginContext) -> Result<()> {
    let lines = render(&args, context);
    info!(role = ?args.role, listed = lines.len(), "Listed creators.");
    print_lines(&lines, "No creators found.");
    Ok(())
}

fn render(args: &ListArgs, context: &PluginContext) -> Vec<String> {
    match args.role {
        Role::Plugin => list_in(context.module_manager(), args),
        Role::Engine => list_in(context.engine_manager().registry(), args),
        Role::DataRepresentation => list_in(context.data_representation_manager().registry(), args),
    }
}

fn list_in<C: PluginCreator + ?Sized>(registry: &Registry<C>, args: &ListArgs) -> Vec<String> {
    let mut creators = match &args.category {
        Some(category) => {
            registry.get_all_plugins_by_category(&Category::parse(category), args.subcategories)
        }
        None => match &args.keyword {
            Some(keyword) => return describe_creators(&registry.plugins_by_keyword(keyword)),
            None => registry.get_plugins_matching(&Request::<C>::new()),
        },
    };
    if let Some(keyword) = &args.keyword {
        creators.retain(|creator| creator.plugin_object_keywords().contains(keyword));
    }
    describe_creators(&creators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin_context;

    fn args(category: Option<&str>, subcategories: bool, keyword: Option<&str>, role: Role) -> ListArgs {
        ListArgs {
            category: category.map(String::from),
            subcategories,
            keyword: keyword.map(String::from),
            role,
        }
    }

    fn names(lines: &[String]) -> Vec<&str> {
        lines
            .iter()
            .filter_map(|line| line.split_whitespace().next())
            .filter_map(|name| name.rsplit("::").next())
            .collect()
    }

    #[test]
    fn lists_every_creator_for_the_plugin_role() {
        let context = builtin_context();
        let lines = render(&args(None, false, None, Role::Plugin), &context);
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn role_selects_the_registry() {
        let context = builtin_context();
        let engines = render(&args(None, false, None, Role::Engine), &context);
        assert_eq!(names(&engines), ["MonteCarloAnnealer", "GreedyPacker"]);
        let representations = render(&args(None, false, None, Role::DataRepresentation), &context);
        assert_eq!(representations.len(), 3);
    }

    #[test]
    fn category_with_and_without_subcategories() {
        let context = builtin_context();
        let exact = render(&args(Some("Selector"), false, None, Role::Plugin), &context);
        assert!(exact.is_empty());
        let nested = render(&args(Some("Selector"), true, None, Role::Plugin), &context);
        assert_eq!(names(&nested), ["ElementSelector", "ResidueRangeSelector"]);
    }

    #[test]
    fn keyword_narrows_the_listing() {
        let context = builtin_context();
        let packing = render(&args(None, false, Some("packing"), Role::Plugin), &context);
        assert_eq!(packing.len(), 2);
        let greedy = render(&args(Some("Engine"), true, Some("greedy"), Role::Engine), &context);
        assert_eq!(names(&greedy), ["GreedyPacker"]);
    }
}
