use std::fs::{self, File};
use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use jsonshape::notice::{Notice, notice_json};
use jsonshape::{EmptyArrayPolicy, Options, Session, Workspace};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmptyArrayArg {
    EmptyElements,
    Omit,
}

#[derive(Parser, Debug)]
#[command(
    name = "jsonshape",
    about = "Trim JSON to a template and replay it over documents",
    version
)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false, global = true)]
    pretty: bool,

    /// Options file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// How array fields with an empty template array are replayed
    #[arg(long, value_enum, global = true)]
    empty_array: Option<EmptyArrayArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the initial template for a sample document
    Normalize {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },
    /// Keep only the fields named by a template
    Replay {
        /// Template file
        #[arg(short, long)]
        template: PathBuf,
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },
    /// Run the prune-then-commit workflow without an editor
    Build {
        /// Edited template (defaults to the unedited normalized template)
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Where to write the filtered source
        #[arg(long)]
        source_out: Option<PathBuf>,
        /// Where to write the target (defaults to stdout)
        #[arg(long)]
        target_out: Option<PathBuf>,
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut options = match &args.config {
        Some(path) => Options::from_json_str(&fs::read_to_string(path)?)
            .with_context(|| format!("invalid options file {}", path.display()))?,
        None => Options::default(),
    };
    if let Some(arg) = args.empty_array {
        options.empty_array = match arg {
            EmptyArrayArg::EmptyElements => EmptyArrayPolicy::EmptyElements,
            EmptyArrayArg::Omit => EmptyArrayPolicy::Omit,
        };
    }
    debug!(?options, "resolved options");

    match &args.command {
        Command::Normalize { input } => {
            let template = match input {
                Some(path) => jsonshape::normalize_from_reader(File::open(path)?)?,
                None => jsonshape::normalize_from_reader(stdin())?,
            };
            emit(stdout(), &template, args.pretty)?;
        }
        Command::Replay { template, input } => {
            let template = read_json(Some(template.as_path()))?;
            let source = read_json(input.as_deref())?;
            jsonshape::replay_to_writer(stdout(), &template, &source, &options, args.pretty)?;
        }
        Command::Build { template, source_out, target_out, input } => {
            let source = read_json(input.as_deref())?;
            let mut session = Session::start(Workspace::new(source), options);
            if let Some(path) = template {
                session.edit(read_json(Some(path.as_path()))?);
            }

            let (session, notice) = session.update_source()?;
            report(&notice)?;
            let done = session.set_target()?;
            report(&done.notice)?;
            debug!(route = done.route.path(), "workflow finished");

            if let Some(path) = source_out {
                emit(File::create(path)?, &done.workspace.source, args.pretty)?;
            }
            let target = done.workspace.target.unwrap_or_default();
            match target_out {
                Some(path) => emit(File::create(path)?, &target, args.pretty)?,
                None => emit(stdout(), &target, args.pretty)?,
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_json(path: Option<&Path>) -> Result<Value> {
    let mut buf = String::new();
    match path {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    let value = serde_json::from_str(&buf)?;
    Ok(value)
}

fn emit<W: Write>(mut w: W, value: &Value, pretty: bool) -> Result<()> {
    if pretty {
        writeln!(w, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        writeln!(w, "{}", serde_json::to_string(value)?)?;
    }
    Ok(())
}

// Notices go to stderr, one JSON object per line, before any output is
// written.
fn report(notice: &Notice) -> Result<()> {
    eprintln!("{}", serde_json::to_string(&notice_json(notice))?);
    Ok(())
}
