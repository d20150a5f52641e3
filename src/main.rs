use anyhow::{Context, Result};
use clap::Parser;
use filehop::cli::{Cli, Command, GlobalArgs};
use filehop::config::{ParserConfig, Settings};
use filehop::parser::SessionLogParser;
use filehop::predict::Predictor;
use filehop::report;
use filehop::store::{RedisStore, StoreError, TransitionStore, DEFAULT_NAMESPACE, DEFAULT_REDIS_URL};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Rows shown by `transitions` and `predict` when no --top is given
const DEFAULT_TOP: usize = 10;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Flags merged over the settings file
struct Resolved {
    parser: SessionLogParser,
    redis_url: String,
    namespace: String,
    top: usize,
}

fn resolve(global: &GlobalArgs) -> Result<Resolved> {
    let settings = match &global.config {
        Some(path) => Settings::from_toml(path)?,
        None => Settings::default(),
    };

    let project = match global.project.clone().or(settings.project_root) {
        Some(project) => project,
        None => std::env::current_dir()
            .context("Failed to determine current directory")?
            .display()
            .to_string(),
    };
    let sessions_dir = global.sessions_dir.clone().or(settings.sessions_dir);
    let config = ParserConfig::from_env(&project, sessions_dir.as_deref())?;

    Ok(Resolved {
        parser: SessionLogParser::new(config),
        redis_url: global
            .redis_url
            .clone()
            .or(settings.redis_url)
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
        namespace: global
            .namespace
            .clone()
            .or(settings.namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        top: settings.top.unwrap_or(DEFAULT_TOP),
    })
}

/// Open and ping the store; a store that can't be reached is reported, not fatal
fn connect_store(url: &str) -> Option<RedisStore> {
    match RedisStore::connect(url).and_then(|store| store.ping().map(|_| store)) {
        Ok(store) => Some(store),
        Err(e) => {
            report_store_error(url, &e);
            None
        }
    }
}

fn report_store_error(url: &str, e: &StoreError) {
    tracing::debug!("store error: {}", e);
    match e {
        StoreError::InvalidUrl { message, .. } => eprintln!("Error: Invalid Redis URL {}: {}", url, message),
        _ => eprintln!("Error: Cannot connect to Redis at {}", url),
    }
}

/// Connectivity failures end the command quietly; other store errors propagate
fn handle_store_result<T>(url: &str, result: Result<T, StoreError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_connection() => {
            report_store_error(url, &e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn run(command: Command, resolved: Resolved, global: &GlobalArgs, out: &mut impl Write) -> Result<()> {
    let format = global.format;

    match command {
        Command::Stats => {
            let stats = resolved.parser.get_stats();
            report::write_stats(out, &stats, format)?;
        }
        Command::Transitions { top } => {
            let graph = resolved.parser.build_transition_matrix(true);
            report::write_transitions(out, &graph, top.unwrap_or(resolved.top), format)?;
        }
        Command::Sync => {
            let Some(store) = connect_store(&resolved.redis_url) else {
                return Ok(());
            };
            let result = resolved.parser.sync_to_store(&store, &resolved.namespace);
            if let Some(sync) = handle_store_result(&resolved.redis_url, result)? {
                report::write_sync(out, &sync, format)?;
            }
        }
        Command::Predict { files, top } => {
            let Some(store) = connect_store(&resolved.redis_url) else {
                return Ok(());
            };
            let limit = top.unwrap_or(resolved.top);
            let predictor = Predictor::new(&store).with_namespace(resolved.namespace.as_str());
            let result = match files.as_slice() {
                [single] => predictor.predict_next(single, limit),
                many => predictor.get_all_predictions(many, limit),
            };
            if let Some(predictions) = handle_store_result(&resolved.redis_url, result)? {
                report::write_predictions(out, &files, &predictions, format)?;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.global.debug);

    let resolved = resolve(&args.global)?;
    tracing::debug!(
        base_path = %resolved.parser.base_path().display(),
        namespace = %resolved.namespace,
        "resolved configuration"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(args.command, resolved, &args.global, &mut out)
}
