use super::{describe_creators, print_lines};
use crate::cli::{QueryArgs, Role};
use crate::error::{CliError, Result};
use curator::request::{KeywordMode, PropertyMode};
use curator::{Category, DataRepresentationRequest, PluginContext, PluginCreator, Request};
use tracing::{debug, info};

pub fn run(args: QueryArgs, context: &PluginContext) -> Result<()> {
    let lines = render(&args, context)?;
    info!(role = ?args.role, matches = lines.len(), "Query evaluated.");
    print_lines(&lines, "No creators satisfy the request.");
    Ok(())
}

fn render(args: &QueryArgs, context: &PluginContext) -> Result<Vec<String>> {
    let representation_filters = !args.compatible_with.is_empty()
        || !args.incompatible_with.is_empty()
        || !args.property.is_empty();
    if representation_filters && args.role != Role::DataRepresentation {
        return Err(CliError::Argument(
            "engine and property filters need '--role data-representation'".to_string(),
        ));
    }

    let lines = match args.role {
        Role::Plugin => {
            let request = common_request(args);
            describe_creators(&context.module_manager().get_plugins_matching(&request))
        }
        Role::Engine => {
            let request = common_request(args);
            describe_creators(&context.engine_manager().get_engines_matching(&request))
        }
        Role::DataRepresentation => {
            let request = representation_request(args);
            describe_creators(
                &context
                    .data_representation_manager()
                    .get_compatible_data_representation_creators(&request),
            )
        }
    };
    Ok(lines)
}

fn common_request<C: PluginCreator + ?Sized>(args: &QueryArgs) -> Request<C> {
    let mut request = Request::<C>::new();
    if let Some(name) = &args.name {
        request.add_name_requirement(name.as_str());
    }
    if !args.category.is_empty() {
        request.add_category_requirement(
            args.category.iter().map(|path| Category::parse(path)),
            args.subcategories,
        );
    }
    if !args.exclude_category.is_empty() {
        request.add_category_exclusion(
            args.exclude_category.iter().map(|path| Category::parse(path)),
            args.subcategories,
        );
    }
    if !args.keyword.is_empty() {
        let mode = if args.all_keywords {
            KeywordMode::MustHaveAll
        } else {
            KeywordMode::MustHaveAtLeastOne
        };
        request.add_keyword_requirement(args.keyword.iter().cloned(), mode);
    }
    debug!(criteria = request.criteria_count(), "Built request.");
    request
}

fn representation_request(args: &QueryArgs) -> DataRepresentationRequest {
    let mut request: DataRepresentationRequest = common_request(args);
    let match_any = args.any_engine;
    if !args.compatible_with.is_empty() {
        request.add_engines_compatibility_requirement(args.compatible_with.iter().cloned(), match_any);
    }
    if !args.incompatible_with.is_empty() {
        request.add_engines_incompatibility_requirement(
            args.incompatible_with.iter().cloned(),
            match_any,
        );
    }
    if !args.property.is_empty() {
        request.add_property_requirement(args.property.iter().cloned(), PropertyMode::MustBePresent);
    }
    request
}
