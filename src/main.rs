/*!
Main binary for jparse.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use log::info;
use std::io::{self, IsTerminal, Read, stdout};
use std::{fs, path::PathBuf};

use jparse::{DEFAULT_MAX_DEPTH, ParseOptions, commands, tokenizer, utils};

/// Parse a JSON document and print the resulting value.
#[derive(Parser)]
#[command(name = "jp", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Do not pretty-print the JSON output, instead use compact
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// When to colorize the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Display depth of the input document
    #[arg(long, action = ArgAction::SetTrue)]
    depth: bool,
    /// Print the token stream instead of the parsed value
    #[arg(long, action = ArgAction::SetTrue)]
    tokens: bool,
    /// Maximum nesting of objects/arrays
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Disable the nesting limit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "max_depth")]
    no_depth_limit: bool,
    #[command(flatten)]
    verbose: Verbosity,
}

/// Output colorization mode
#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    /// Colorize when STDOUT is a terminal
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}

/// Available subcommands for `jp`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jp to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// This reads the input document (from FILE, or STDIN when piped), parses it
/// and prints the result to STDOUT, formatted according to the command line
/// arguments.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            if !stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }

    if let Some(Commands::Generate(cmd)) = args.command {
        match cmd {
            GenerateCommand::Shell { shell } => {
                commands::generate::generate_completions(
                    shell,
                    &mut Args::command(),
                    &mut stdout().lock(),
                );
            }
            GenerateCommand::Man { output_dir } => {
                for path in commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir,
                )? {
                    println!("Generated: {}", path.display());
                }
            }
        }
        return Ok(());
    }

    // Read input content
    let (input_content, source) = if let Some(path) = args.input {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        (content, path.display().to_string())
    } else {
        if io::stdin().is_terminal() {
            // No piped input and no file specified
            let mut cmd = Args::command();
            return Ok(cmd.print_help()?);
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read STDIN")?;
        (buffer, "<stdin>".to_string())
    };
    info!("read {} bytes from {source}", input_content.len());

    if args.tokens {
        let tokens = tokenizer::tokenize(&input_content)
            .with_context(|| format!("Failed to tokenize JSON from {source}"))?;
        return utils::write_tokens(&mut stdout().lock(), &tokens);
    }

    let options = ParseOptions::default()
        .with_max_depth((!args.no_depth_limit).then_some(args.max_depth));
    let json = jparse::parse_with_options(&input_content, options)
        .with_context(|| format!("Failed to parse JSON from {source}"))?;

    // Display depth
    if args.depth {
        println!("Depth: {}", json.depth());
    }

    utils::write_colored_result(&mut stdout().lock(), &json, !args.compact)
}
