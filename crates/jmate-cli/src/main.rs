use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use jmate_config::{Config, ConfigLoader, OutputStream};
use std::path::{Path, PathBuf};

mod commands;
mod literal;

/// Variadic printf over the native formatting routine.
///
/// Arguments are boxed from their literal form and routed to the entry point
/// for their count (printf_0 .. printf_5), which renders them with the
/// process's snprintf (or the routine configured in jmate.toml).
///
/// EXAMPLES:
///     jmate printf 'result: 0x%08x\n' 0x92
///     jmate printf '%s is %d\n' "\"answer\"" 42
///     jmate println 'hello'
///     jmate entry 3
///
/// ENVIRONMENT VARIABLES:
///     JMATE_NATIVE_LIBRARY  Shared library to resolve the routine from
///     JMATE_NATIVE_SYMBOL   Routine symbol name (default: snprintf)
///     JMATE_OUTPUT          stdout or stderr
///     JMATE_LOG             Log level (off, error, warn, info, debug, trace)
#[derive(Parser)]
#[command(name = "jmate")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a jmate.toml (default: searched upwards from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log every entry point invocation
    #[arg(long, global = true)]
    trace: bool,

    /// Print to stderr instead of the configured stream
    #[arg(long, global = true)]
    stderr: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format and print arguments
    ///
    /// FORMAT has backslash escapes expanded. Each ARG is boxed from its
    /// literal form: null, true/false, 'c', 42, 0x92, 12L, 1.5, @0x1000,
    /// anything else is a string.
    ///
    /// FORMAT is passed to the native routine unchecked: each directive must
    /// match its ARG (%s for strings or null, integer directives for the
    /// rest) and %n is never allowed.
    ///
    /// EXAMPLES:
    ///     jmate printf '%d + %d\n' 1 2
    ///     jmate printf '%c%c\n' "'o'" "'k'"
    Printf {
        /// printf format string
        #[arg(allow_hyphen_values = true)]
        format: String,
        /// Arguments, at most five
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print text followed by a newline
    Println {
        /// Text, printed as a format with no arguments (write %% for %)
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Show the entry point selected for N arguments
    ///
    /// Without N, lists the whole table.
    Entry {
        /// Argument count
        n: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config, cli.verbose, cli.trace);

    // Command-line flag overrides config and environment
    let stream = if cli.stderr {
        OutputStream::Stderr
    } else {
        config.output_stream()
    };
    let options = commands::Options {
        native: config.native(),
        stream,
        trace: cli.trace,
    };

    match cli.command {
        Commands::Printf { format, args } => commands::printf::run(&options, &format, &args),
        Commands::Println { text } => commands::printf::run_println(&options, &text),
        Commands::Entry { n } => commands::entry::run(n),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => {
            let cwd = std::env::current_dir()?;
            loader
                .load_from_directory(&cwd)
                .context("Failed to load project configuration")
        }
    }
}

/// Level from -v flags, else the configured level; RUST_LOG refines either
fn init_logging(config: &Config, verbose: u8, trace: bool) {
    let level = match verbose {
        0 => config.log_level(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if trace {
        builder.parse_filters("jmate_io::bridge=debug");
    }
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.target(env_logger::Target::Stderr);

    // A logger may already be installed
    let _ = builder.try_init();
}
