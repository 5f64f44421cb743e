mod config;
mod tvrename;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::tvrename::TvRename;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Rename TV episodes in season folders to SxxxExxx format"
)]
pub struct Args {
    /// Show directory containing "Season N" and "Specials" folders
    #[arg(value_hint = clap::ValueHint::DirPath, required_unless_present = "SHELL")]
    path: Option<PathBuf>,

    /// Enable debug prints
    #[arg(short = 'D', long)]
    debug: bool,

    /// Media file extension(s) to rename
    #[arg(short, long, num_args = 1, action = clap::ArgAction::Append, value_name = "EXTENSION")]
    extension: Option<Vec<String>>,

    /// Ignore episode numbers in file names and number by position only
    #[arg(short, long)]
    ignore_filename: bool,

    /// Default language tag for subtitles without one
    #[arg(short = 'L', long, value_name = "LANGUAGE")]
    language: Option<String>,

    /// Only print changes without renaming files
    #[arg(short, long, visible_alias = "dryrun")]
    print: bool,

    /// Create shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let result = if let Some(ref shell) = args.completion {
        episode_rename::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        TvRename::run_with_args(args)
    };
    if let Err(error) = result {
        episode_rename::print_error!("{error:#}");
        std::process::exit(1);
    }
}
