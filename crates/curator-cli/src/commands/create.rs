use super::describe_categories;
use crate::cli::{CreateArgs, Role};
use crate::error::Result;
use curator::{Plugin, PluginContext, PluginRole};
use tracing::info;

pub fn run(args: CreateArgs, context: &PluginContext) -> Result<()> {
    let description = render(&args, context)?;
    info!(name = %args.name, role = ?args.role, "Created plugin object.");
    println!("{description}");
    Ok(())
}

fn render(args: &CreateArgs, context: &PluginContext) -> Result<String> {
    let description = match args.role {
        Role::Plugin => {
            let object = context
                .module_manager()
                .get_plugin_by_name(&args.name)?
                .create_plugin_object();
            describe_object(object.role(), object.as_plugin())
        }
        Role::Engine => {
            let engine = context.engine_manager().create_engine_by_name(&args.name)?;
            describe_object(PluginRole::Engine, engine.as_plugin())
        }
        Role::DataRepresentation => {
            let representation = context
                .data_representation_manager()
                .create_data_representation_by_name(&args.name)?;
            describe_object(PluginRole::DataRepresentation, representation.as_plugin())
        }
    };
    Ok(description)
}

fn describe_object(role: PluginRole, plugin: &dyn Plugin) -> String {
    let categories = describe_categories(&plugin.categories());
    format!(
        "Created {role} {} [{categories}]",
        plugin.class_namespace_and_name()
    )
}
