use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use crate::ai::DEFAULT_MODEL;

#[derive(Parser, Debug)]
#[command(name = "k8sai")]
#[command(about = "k8sai is a super fancy CLI for Kubernetes AI.")]
pub struct Cli {
    /// Namespace to inspect for pending pods
    #[arg(short = 'n', long, value_parser = NonEmptyStringValueParser::new())]
    pub namespace: String,

    /// Chat model used to explain pod events
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Line printed to stderr when the command line cannot be parsed.
pub fn parse_error_message(err: &clap::Error) -> String {
    format!(
        "Whoops. There was an error while executing the CLI '{}'",
        err.to_string().trim_end()
    )
}
