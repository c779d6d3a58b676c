use std::io::Write;
use std::path::Path;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::client::{build_client, execute, ExecuteOptions};
use crate::config::Config;
use crate::context::Environment;
use crate::errors::HttpcliError;
use crate::request::OutboundRequest;
use crate::sessions::{self, headers, resolve_session, Context, ContextStore};
use crate::status::ExitStatus;

/// Log filter directives, e.g. `HTTPCLI_LOG=httpcli=trace`
pub const LOG_ENV_VAR: &str = "HTTPCLI_LOG";

/// Main entry point for the CLI.
///
/// Parses arguments, loads the config and the session context, then runs
/// exactly one command against them.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    if args.len() <= 1 {
        let _ = write!(env.stderr, "{}", Args::usage());
        return ExitStatus::Usage;
    }

    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitStatus::Success,
                _ => ExitStatus::Usage,
            };
        }
    };

    init_tracing(&env, parsed.debug);

    let command = match parsed.command.as_deref() {
        Some(word) => Command::parse(word, &parsed.args),
        None => {
            let _ = write!(env.stderr, "{}", Args::usage());
            return ExitStatus::Usage;
        }
    };

    match command.and_then(|command| program(&parsed, command, &mut env)) {
        Ok(status) => status,
        Err(e) => handle_error(&mut env, e),
    }
}

/// Run one command against the session context
pub fn program(
    args: &Args,
    command: Command,
    env: &mut Environment,
) -> Result<ExitStatus, HttpcliError> {
    tracing::debug!(?command, "dispatching command");

    let config = match Config::load(env, args.config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(env.stderr, "Warning: Failed to load config: {}", e);
            Config::with_dir(Config::resolve_dir(env, args.config_dir.as_deref()))
        }
    };

    let session = resolve_session(args.session.as_deref());
    let kind = args.store.or(config.defaults.store).unwrap_or_default();
    let store = sessions::open_store(kind, &config, session, env);
    tracing::debug!(session, location = %store.location(), "opened context store");

    let mut ctx = store.load()?;
    let mutates = command.mutates();

    match command {
        Command::Url(None) => {
            let url = ctx.base_url()?.ok_or(HttpcliError::NoBaseUrl)?;
            write!(env.stdout, "{}", url)?;
            env.stdout.flush()?;
            writeln!(env.stderr)?;
        }
        Command::Url(Some(value)) => ctx.set_base_url(&value)?,
        Command::Set { name, value } => {
            headers::validate(&name, value.as_deref())?;
            match value {
                Some(value) => ctx.headers_mut().set(&name, value),
                None => {
                    if !ctx.headers_mut().remove(&name) {
                        tracing::debug!(header = %name, "header was not set");
                    }
                }
            }
        }
        Command::List => {
            write!(env.stdout, "{}", ctx.headers().to_lines())?;
        }
        Command::Clear => ctx.set_headers(None),
        Command::Reset => ctx = Context::new(),
        Command::Env => {
            let url = ctx.base_url()?.map(|u| u.to_string()).unwrap_or_default();
            write!(env.stdout, "{}\n\n{}", url, ctx.headers().to_lines())?;
        }
        Command::Session => {
            if args.path {
                writeln!(env.stdout, "{}", store.location())?;
            } else {
                writeln!(env.stdout, "{}", session)?;
            }
        }
        Command::Request { method, url, content_type, flags } => {
            let stdin = env.stdin.lock();
            let request =
                OutboundRequest::build(method, &url, content_type.as_deref(), &ctx, stdin)?;
            let opts = ExecuteOptions {
                exclude: args.exclude.iter().chain(&flags.exclude).cloned().collect(),
                quiet: args.quiet || flags.quiet || config.defaults.quiet,
                pretty: args.pretty || flags.pretty || config.defaults.pretty,
                colors: env.colors,
            };
            let code = send(&request, &opts, request_timeout(args, &config)?, env)?;
            return Ok(ExitStatus::from_http_status(code));
        }
    }

    if mutates {
        save(store.as_ref(), &ctx, env)?;
    }

    Ok(ExitStatus::Success)
}

fn save(
    store: &dyn ContextStore,
    ctx: &Context,
    env: &mut Environment,
) -> Result<(), HttpcliError> {
    store.store(ctx, &mut env.stdout)?;
    tracing::debug!(location = %store.location(), "stored session context");
    Ok(())
}

fn send(
    request: &OutboundRequest,
    opts: &ExecuteOptions,
    timeout: Option<Duration>,
    env: &Environment,
) -> Result<u16, HttpcliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut stdout = env.stdout.lock();
    let mut stderr = env.stderr.lock();

    runtime.block_on(async {
        let client = build_client(timeout)?;
        execute(&client, request, opts, &mut stdout, &mut stderr).await
    })
}

/// `--timeout` wins over `defaults.timeout`
fn request_timeout(args: &Args, config: &Config) -> Result<Option<Duration>, HttpcliError> {
    match args.timeout {
        Some(secs) if !secs.is_finite() || secs <= 0.0 => Err(HttpcliError::Usage(format!(
            "--timeout must be a positive number of seconds, got {}",
            secs
        ))),
        Some(secs) => Ok(Some(Duration::from_secs_f64(secs))),
        None => Ok(config.timeout()),
    }
}

fn init_tracing(env: &Environment, debug: bool) {
    let filter = if debug {
        EnvFilter::new("httpcli=debug")
    } else {
        env.var(LOG_ENV_VAR)
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_error(env: &mut Environment, error: HttpcliError) -> ExitStatus {
    tracing::debug!(error = ?error, "command failed");
    let _ = writeln!(env.stderr, "{}: {}", env.program_name, error);
    if matches!(error, HttpcliError::Usage(_)) {
        let _ = writeln!(env.stderr, "Run '{} --help' for usage.", env.program_name);
    }
    error.exit_status()
}
