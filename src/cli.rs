//! Command-line interface implementation for bibplate.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for bibplate.
#[derive(Parser, Debug)]
#[command(author, version, about = "bibplate: render bibliography entries through publication-list templates", long_about = None)]
pub struct Args {
    /// JSON or YAML file holding the list of entries
    #[arg(value_name = "ENTRIES")]
    pub entries: PathBuf,

    /// Template file; the built-in publication list is used when omitted
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Directory containing bibplate.json, bibplate.yml or bibplate.yaml
    #[arg(short, long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Inline options applied on top of the configuration,
    /// e.g. "groupby=author;order=ascending"
    #[arg(short, long, value_name = "OPTIONS")]
    pub options: Option<String>,

    /// Write the rendered output to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
