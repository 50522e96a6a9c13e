//! bibplate's main application entry point.
//! Handles command-line argument parsing and drives the load, group and
//! render flow.

use bibplate::{
    cli::{get_args, Args},
    config::{get_config, Config, Target},
    constants::DEFAULT_TEMPLATE,
    entry::{parse_entries, sort_entries},
    error::{default_error_handler, Result},
    grouping::group_entries,
    logger::init_logger,
    template::{BibTemplateRenderer, TemplateRenderer},
};
use log::debug;

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration file (if any) and applies inline options
/// 2. Reads the template, falling back to the built-in one
/// 3. Reads and sorts the entries
/// 4. Groups the entries
/// 5. Renders the template and writes the result
fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(dir) => get_config(dir)?,
        None => Config::default(),
    };
    if let Some(options) = &args.options {
        config.apply_options(options)?;
    }
    debug!("Using configuration {:?}", config);

    let template = match &args.template {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let mut entries = parse_entries(&std::fs::read_to_string(&args.entries)?)?;
    sort_entries(&mut entries);

    let groups = group_entries(&entries, config.groupby, config.order);
    let renderer = BibTemplateRenderer::new(config);
    let output = renderer.render(&template, &groups)?;

    if renderer.config().target == Target::Wiki {
        debug!("Output is wiki markup and is left for the host renderer");
    }

    match args.output {
        Some(path) => std::fs::write(path, output)?,
        None => print!("{output}"),
    }
    Ok(())
}
