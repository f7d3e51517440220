//! Blind Quote Core CLI
//!
//! Entry point for bq-core, handling:
//! - Printable quote rendering from a state snapshot and override fields
//! - Token map inspection
//! - Scripted distribution dialogs for remotes and dual brackets

use bq_common::{field_ids, OutputFormat, OverrideFields, QuoteSnapshot};
use bq_core::config::{load_config, ConfigError};
use bq_core::distribution::{DialogEvent, Field, ModalOutcome, ModalRequest};
use bq_core::exit_codes::ExitCode;
use bq_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use bq_core::notify::{LogNotifier, RecordingNotifier};
use bq_core::workflow::{handle_distribution, DistributionKind, MemoryStore, QuotePresenter, QuoteWorkflow};
use bq_core::StateStore;
use bq_report::{QuoteError, QuoteGenerator};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

/// Blind Quote Core - printable quotes and distribution dialogs
#[derive(Parser)]
#[command(name = "bq-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (overrides BQ_CONFIG / BQ_CONFIG_DIR / XDG lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "html")]
    format: OutputFormat,

    /// Log level (overrides BQ_LOG)
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Log format (overrides BQ_LOG_FORMAT)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the printable quote
    Render(RenderArgs),

    /// Print the projected token map
    Tokens(InputArgs),

    /// Replay a distribution dialog and commit the split
    Distribute(DistributeArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Quote snapshot JSON (summary, items, ui)
    #[arg(long)]
    snapshot: PathBuf,

    /// Override fields JSON, keyed by field name or by form field id
    #[arg(long)]
    overrides: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Quote template (overrides config)
    #[arg(long)]
    quote_template: Option<PathBuf>,

    /// Detailed item list template (overrides config)
    #[arg(long)]
    details_template: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DistributeArgs {
    /// Which quantities to distribute
    #[arg(value_enum)]
    kind: DistributionKind,

    /// Quote snapshot JSON
    #[arg(long)]
    snapshot: PathBuf,

    /// Field edit applied in order, e.g. `first=2` or `second=1`
    #[arg(long = "set", value_parser = parse_edit)]
    edits: Vec<(Field, String)>,

    /// Close the dialog without confirming
    #[arg(long)]
    cancel: bool,
}

fn parse_edit(raw: &str) -> Result<(Field, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = match name.trim() {
        "first" | "1" => Field::First,
        "second" | "2" => Field::Second,
        other => return Err(format!("unknown field '{}' (expected first or second)", other)),
    };
    Ok((field, value.to_string()))
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write output: {0}")]
    Write(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Read { .. } | CliError::Parse { .. } => ExitCode::ArgsError,
            CliError::Write(_) => ExitCode::IoError,
            CliError::Config(_) => ExitCode::ConfigError,
            CliError::Quote(err) => ExitCode::from(err),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(cli.global.log_level, cli.global.log_format);
    init_logging(&log_config);

    let result = match &cli.command {
        Commands::Render(args) => run_render(&cli.global, args),
        Commands::Tokens(args) => run_tokens(&cli.global, args),
        Commands::Distribute(args) => run_distribute(&cli.global, args),
    };

    let exit_code = result.unwrap_or_else(|err| {
        error!(error = %err, "Command failed");
        eprintln!("bq-core: {}", err);
        err.exit_code()
    });

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Input helpers
// ============================================================================

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Overrides are accepted either as `OverrideFields` JSON or as a flat map
/// of form field ids (`f3-quote-id`, ...).
fn load_overrides(path: Option<&Path>) -> Result<OverrideFields, CliError> {
    let Some(path) = path else {
        return Ok(OverrideFields::default());
    };
    let value: serde_json::Value = read_json(path)?;

    let is_form = value
        .as_object()
        .is_some_and(|map| map.keys().any(|key| field_ids::ALL.contains(&key.as_str())));
    if is_form {
        let form: BTreeMap<String, String> = value
            .as_object()
            .into_iter()
            .flatten()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(text) => Some((key.clone(), text.clone())),
                serde_json::Value::Number(number) => Some((key.clone(), number.to_string())),
                _ => None,
            })
            .collect();
        debug!(fields = form.len(), "Overrides read as form field map");
        return Ok(OverrideFields::from_form(&form));
    }

    serde_json::from_value(value).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(QuoteError::from)?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

/// Writes HTML to a file or stdout, keeping the first write error.
struct OutputPresenter<'a> {
    target: Option<&'a Path>,
    result: std::io::Result<()>,
}

impl QuotePresenter for OutputPresenter<'_> {
    fn show(&mut self, html: &str) {
        self.result = match self.target {
            Some(path) => std::fs::write(path, html),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(html.as_bytes())
                    .and_then(|_| stdout.write_all(b"\n"))
            }
        };
    }
}

fn run_render(global: &GlobalOpts, args: &RenderArgs) -> Result<ExitCode, CliError> {
    let mut config = load_config(global.config.as_deref())?.config;
    if let Some(path) = &args.quote_template {
        config.templates.quote = path.clone();
    }
    if let Some(path) = &args.details_template {
        config.templates.details = path.clone();
    }

    let snapshot: QuoteSnapshot = read_json(&args.input.snapshot)?;
    let overrides = load_overrides(args.input.overrides.as_deref())?;

    let workflow = QuoteWorkflow::from_config(config);
    let store = MemoryStore::new(snapshot);
    let form = overrides.to_form();
    let mut notifier = LogNotifier;

    match global.format {
        OutputFormat::Html => {
            let mut presenter = OutputPresenter {
                target: args.output.as_deref(),
                result: Ok(()),
            };
            workflow.handle_printable_quote_request(&store, &form, &mut presenter, &mut notifier)?;
            presenter.result.map_err(CliError::Write)?;
        }
        OutputFormat::Json => {
            let rendered = workflow.handle_printable_quote_request(
                &store,
                &form,
                &mut |_html: &str| {},
                &mut notifier,
            )?;
            print_json(&rendered)?;
        }
        OutputFormat::Summary => {
            let rendered = workflow.handle_printable_quote_request(
                &store,
                &form,
                &mut |_html: &str| {},
                &mut notifier,
            )?;
            println!("{}", rendered.summary_line());
        }
    }

    Ok(ExitCode::Clean)
}

fn run_tokens(global: &GlobalOpts, args: &InputArgs) -> Result<ExitCode, CliError> {
    let config = load_config(global.config.as_deref())?.config;
    let snapshot: QuoteSnapshot = read_json(&args.snapshot)?;
    let overrides = load_overrides(args.overrides.as_deref())?;

    let tokens = QuoteGenerator::new(config).project(&snapshot, &overrides);
    match global.format {
        OutputFormat::Summary => println!("{} tokens", tokens.len()),
        OutputFormat::Html | OutputFormat::Json => print_json(&tokens)?,
    }
    Ok(ExitCode::Clean)
}

fn run_distribute(global: &GlobalOpts, args: &DistributeArgs) -> Result<ExitCode, CliError> {
    let snapshot: QuoteSnapshot = read_json(&args.snapshot)?;
    let total = args.kind.total(&snapshot);
    let mut store = MemoryStore::new(snapshot);

    let mut events: Vec<DialogEvent> = args
        .edits
        .iter()
        .map(|(field, raw)| DialogEvent::Edit(*field, raw.clone()))
        .collect();
    events.push(if args.cancel {
        DialogEvent::Cancel
    } else {
        DialogEvent::Confirm
    });

    let mut notifier = RecordingNotifier::new();
    let mut request: Option<ModalRequest> = None;
    let mut present = |shown: &ModalRequest| request = Some(shown.clone());
    let outcome = match handle_distribution(
        args.kind,
        &mut store,
        events,
        &mut present,
        &mut notifier,
    ) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "Distribution dialog failed");
            eprintln!("bq-core: {}", err);
            return Ok(ExitCode::InternalError);
        }
    };

    if let Some(request) = &request {
        eprintln!("{}", request.message);
        for field in &request.fields {
            eprintln!("  {} {}", field.label, field.value);
        }
    }
    for message in notifier.messages() {
        eprintln!("{}", message);
    }

    let ModalOutcome::Committed(split) = outcome else {
        if args.cancel {
            eprintln!("Distribution cancelled; nothing committed.");
        }
        return Ok(ExitCode::Rejected);
    };

    match global.format {
        OutputFormat::Summary => println!(
            "{}: {} + {} = {}",
            args.kind, split.first, split.second, total
        ),
        OutputFormat::Html | OutputFormat::Json => print_json(&serde_json::json!({
            "kind": args.kind,
            "total": total,
            "first": split.first,
            "second": split.second,
            "distribution": store.snapshot().ui.distribution,
            "dialog": request,
        }))?,
    }
    Ok(ExitCode::Clean)
}
