use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use unpacker_core::{handle_unpack, FsStore, LogReporter, UnpackConfig};

#[derive(Parser)]
#[command(
    version,
    about = "Unpack the sourcemaps generated by Webpack to a project folder",
    disable_version_flag = true
)]
struct Cli {
    /// Glob pattern describing the sourcemap files to unpack
    #[arg(short, long, value_name = "GLOB-PATTERN", default_value = "*.map")]
    input: String,

    /// Folder the recovered sources are written to
    #[arg(short, long, value_name = "FOLDER", default_value = ".")]
    output: PathBuf,

    /// Extra extension whose content is a module exporting the file's text (repeatable)
    #[arg(long = "text-ext", value_name = "EXT")]
    text_ext: Vec<String>,

    /// Extra extension whose content is a module exporting a data URI (repeatable)
    #[arg(long = "binary-ext", value_name = "EXT")]
    binary_ext: Vec<String>,

    /// Print a JSON summary of written and skipped files when done
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn init_logger(cli: &Cli) {
    let level = if cli.quiet { LevelFilter::Warn } else { LevelFilter::Info };
    // JSON goes to stdout, so keep diagnostics off it in that mode.
    let target = if cli.json { env_logger::Target::Stderr } else { env_logger::Target::Stdout };
    env_logger::Builder::new()
        .filter_level(level)
        .target(target)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli);

    let config = UnpackConfig {
        input: cli.input.clone(),
        output: cli.output.clone(),
        ..UnpackConfig::default()
    }
    .with_text_exts(&cli.text_ext)
    .with_binary_exts(&cli.binary_ext);

    let report = match handle_unpack(&config, Arc::new(FsStore), Arc::new(LogReporter)).await {
        Ok(r) => r,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("failed to serialize summary: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
