use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The Curator Developers",
    version,
    about = "Curator CLI - inspect, query and instantiate the plugins known to a Curator registry.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a registry configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail when unregistering plugins that are not registered, overriding the config file.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Check that created objects report the same key as their creator.
    #[arg(long, global = true, conflicts_with = "no_verify_created_objects")]
    pub verify_created_objects: bool,

    /// Skip the identity check on created objects.
    #[arg(long, global = true)]
    pub no_verify_created_objects: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered creators, optionally narrowed by category or keyword.
    List(ListArgs),
    /// Find the creators that satisfy a combination of criteria.
    Query(QueryArgs),
    /// Show every declared category path and how many creators use it.
    Categories(InspectArgs),
    /// Show every declared keyword and how many creators carry it.
    Keywords(InspectArgs),
    /// Instantiate a plugin by bare or namespace-qualified name.
    Create(CreateArgs),
    /// Show the registered plugin libraries.
    Libraries,
}

/// Which registry a command looks at.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Every registered creator.
    #[default]
    Plugin,
    /// Engine creators only.
    Engine,
    /// Data representation creators only.
    DataRepresentation,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list creators in this category path, e.g. 'Selector,AtomSelector'.
    #[arg(long, value_name = "PATH")]
    pub category: Option<String>,

    /// Also list creators in subcategories of --category.
    #[arg(long, requires = "category")]
    pub subcategories: bool,

    /// Only list creators carrying this keyword.
    #[arg(long, value_name = "KEYWORD")]
    pub keyword: Option<String>,

    #[arg(long, value_enum, default_value_t = Role::Plugin)]
    pub role: Role,
}

/// Arguments for the `query` subcommand. Every given criterion must hold.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Bare or namespace-qualified plugin name.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Require membership in at least one of these category paths.
    /// Can be used multiple times.
    #[arg(long, value_name = "PATH")]
    pub category: Vec<String>,

    /// Reject creators in any of these category paths.
    /// Can be used multiple times.
    #[arg(long, value_name = "PATH")]
    pub exclude_category: Vec<String>,

    /// Let category criteria match subcategories as well.
    #[arg(long)]
    pub subcategories: bool,

    /// Require at least one of these keywords. Can be used multiple times.
    #[arg(long, value_name = "KEYWORD")]
    pub keyword: Vec<String>,

    /// Require every --keyword instead of at least one.
    #[arg(long, requires = "keyword")]
    pub all_keywords: bool,

    /// Require explicit compatibility with this qualified engine name.
    /// Data representations only.
    #[arg(long, value_name = "ENGINE")]
    pub compatible_with: Vec<String>,

    /// Require explicit incompatibility with this qualified engine name.
    /// Data representations only.
    #[arg(long, value_name = "ENGINE")]
    pub incompatible_with: Vec<String>,

    /// With several engines, one match is enough instead of all.
    #[arg(long)]
    pub any_engine: bool,

    /// Require this declared property. Data representations only.
    #[arg(long, value_name = "PROPERTY")]
    pub property: Vec<String>,

    #[arg(long, value_enum, default_value_t = Role::Plugin)]
    pub role: Role,
}

/// Arguments for the `categories` and `keywords` subcommands.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(long, value_enum, default_value_t = Role::Plugin)]
    pub role: Role,
}

/// Arguments for the `create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Bare or namespace-qualified name of the plugin to create.
    #[arg(required = true)]
    pub name: String,

    #[arg(long, value_enum, default_value_t = Role::Plugin)]
    pub role: Role,
}
