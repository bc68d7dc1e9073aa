//! Catbuffer CLI

use catbuffer_cli::{decode, encode, layout, load, DECODE_CMD, ENCODE_CMD, LAYOUT_CMD};
use catbuffer_layout::Config;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::error;

/// Returns the version of the crate.
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Flag for verbose output
const VERBOSE_FLAG: &str = "verbose";

fn schema_arg() -> Arg {
    Arg::new("schema")
        .long("schema")
        .required(true)
        .help("Path to a YAML or JSON schema file")
        .value_parser(clap::value_parser!(PathBuf))
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .required(true)
        .help("Name of the structure")
        .value_parser(clap::value_parser!(String))
}

fn limit_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("max-items")
                .long("max-items")
                .help("Maximum number of items in a single group")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("max-blob-len")
                .long("max-blob-len")
                .help("Maximum length of a single variable blob, in bytes")
                .value_parser(clap::value_parser!(usize)),
        )
}

fn config(matches: &ArgMatches) -> Config {
    let mut config = Config::default();
    if let Some(max_items) = matches.get_one::<usize>("max-items") {
        config.max_items = *max_items;
    }
    if let Some(max_blob_len) = matches.get_one::<usize>("max-blob-len") {
        config.max_blob_len = *max_blob_len;
    }
    config
}

/// Entrypoint for the Catbuffer CLI
fn main() -> std::process::ExitCode {
    // Define application
    let matches = Command::new("catbuffer")
        .version(crate_version())
        .about("Inspect schemas and convert structures between hex and JSON.")
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new(LAYOUT_CMD)
                .about("Print every structure of a schema with its fields and fixed size.")
                .arg(schema_arg()),
        )
        .subcommand(limit_args(
            Command::new(DECODE_CMD)
                .about("Decode a hex-encoded structure and print it as JSON.")
                .arg(schema_arg())
                .arg(type_arg())
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Hex-encoded bytes (whitespace and a 0x prefix are ignored)")
                        .value_parser(clap::value_parser!(String)),
                ),
        ))
        .subcommand(limit_args(
            Command::new(ENCODE_CMD)
                .about("Encode a JSON structure and print it as hex.")
                .arg(schema_arg())
                .arg(type_arg())
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("JSON object with every content field (size and count fields are derived)")
                        .value_parser(clap::value_parser!(String)),
                ),
        ))
        .get_matches();

    // Create logger
    let level = if matches.get_flag(VERBOSE_FLAG) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Parse subcommands
    let Some((cmd, matches)) = matches.subcommand() else {
        error!("no subcommand provided");
        return std::process::ExitCode::FAILURE;
    };
    let Some(path) = matches.get_one::<PathBuf>("schema") else {
        error!(cmd, "missing schema");
        return std::process::ExitCode::FAILURE;
    };
    let schema = match load(path) {
        Ok(schema) => schema,
        Err(e) => {
            error!(error=?e, "failed to load schema");
            return std::process::ExitCode::FAILURE;
        }
    };
    let result = match cmd {
        LAYOUT_CMD => Ok(layout(&schema)),
        DECODE_CMD | ENCODE_CMD => {
            let name = matches.get_one::<String>("type").map(String::as_str);
            let input = matches.get_one::<String>("input").map(String::as_str);
            let (Some(name), Some(input)) = (name, input) else {
                error!(cmd, "missing arguments");
                return std::process::ExitCode::FAILURE;
            };
            if cmd == DECODE_CMD {
                decode(&schema, config(matches), name, input)
            } else {
                encode(&schema, config(matches), name, input)
            }
        }
        cmd => {
            error!(cmd, "invalid subcommand");
            return std::process::ExitCode::FAILURE;
        }
    };
    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error=?e, cmd, "command failed");
            std::process::ExitCode::FAILURE
        }
    }
}
