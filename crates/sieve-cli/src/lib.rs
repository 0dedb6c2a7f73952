//! CLI logic for the Sieve policy compiler.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! inputs, running the [`PolicyBuilder`], and writing artifacts.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, CompileArgs, DefaultsArgs, JoinArgs};

use log::info;
use serde_json::{Map, Value};

use sieve::{
    PolicyBuilder, SieveError,
    config::{AppConfig, JoinConfig},
    document::DocumentFlags,
    emit,
    normalize::NormalizeOptions,
    read_source, write_artifact,
};

/// Run the Sieve CLI application
///
/// # Errors
///
/// Returns `SieveError` for:
/// - Configuration loading errors
/// - Unreadable inputs or unwritable outputs
/// - Source list or name list errors
/// - Invalid base objects
pub fn run(args: &Args) -> Result<(), SieveError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Compile(compile) => run_compile(compile, app_config),
        Command::Defaults(defaults) => run_defaults(defaults, app_config),
        Command::Join(join) => run_join(join, app_config),
    }
}

fn run_compile(args: &CompileArgs, app_config: AppConfig) -> Result<(), SieveError> {
    info!(
        input_path = args.input,
        output_path = args.out;
        "Compiling source list"
    );

    // Switches only turn options on.
    let normalize = *app_config.normalize();
    let document = *app_config.document();
    let app_config = app_config
        .with_normalize(NormalizeOptions {
            sorted: normalize.sorted || args.sorted,
            compact_single_elements: normalize.compact_single_elements || args.compact,
            strip_empty_attribute_lists: normalize.strip_empty_attribute_lists || args.strip_empty,
        })
        .with_document(DocumentFlags {
            comments: document.comments || args.comments,
            data_attributes: document.data_attributes || args.data_attributes,
        });

    let builder = PolicyBuilder::new(app_config);

    let source = read_source(&args.input)?;
    let document = builder.parse(&source)?;

    let base = load_base(args.base.as_ref())?;
    let removals = args
        .remove_list
        .as_ref()
        .map(|path| {
            read_source(path).and_then(|text| builder.load_name_list(&text, None))
        })
        .transpose()?;

    let json = builder.render_json(&document, base.as_ref(), removals.as_ref())?;
    write_artifact(&args.out, &json)?;

    info!(output_file = args.out; "Policy written successfully");
    Ok(())
}

fn run_defaults(args: &DefaultsArgs, app_config: AppConfig) -> Result<(), SieveError> {
    info!(
        elements_path = args.elements,
        attributes_path = args.attributes,
        output_path = args.out;
        "Building default configuration"
    );

    let builder = PolicyBuilder::new(app_config);

    let base = load_base(args.base.as_ref())?;
    let elements = read_source(&args.elements)
        .and_then(|text| builder.load_name_list(&text, None))?;
    let attributes = read_source(&args.attributes)
        .and_then(|text| builder.load_name_list(&text, None))?;

    let json = builder.render_name_list_config(base.as_ref(), &elements, &attributes)?;
    write_artifact(&args.out, &json)?;

    info!(output_file = args.out; "Default configuration written successfully");
    Ok(())
}

fn load_base(path: Option<&String>) -> Result<Option<Map<String, Value>>, SieveError> {
    path.map(|path| read_source(path).and_then(|text| emit::parse_base(&text)))
        .transpose()
}

fn run_join(args: &JoinArgs, app_config: AppConfig) -> Result<(), SieveError> {
    info!(lists = args.lists.len(), output_path = args.out; "Joining name lists");

    let app_config = match args.width {
        Some(width) => app_config.with_join(JoinConfig::new(width.max(1))),
        None => app_config,
    };
    let builder = PolicyBuilder::new(app_config);

    let lists = args
        .lists
        .iter()
        .map(|path| read_source(path).and_then(|text| builder.load_name_list(&text, None)))
        .collect::<Result<Vec<_>, _>>()?;

    write_artifact(&args.out, &builder.join(&lists))?;

    info!(output_file = args.out; "Joined list written successfully");
    Ok(())
}
