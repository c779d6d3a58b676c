//! CLI argument definitions using clap
//!
//! The first positional argument is the command: one of the context verbs or
//! an HTTP method. Everything after the first argument of the command is kept
//! verbatim, so header values may start with `-`. See [`crate::cli::Command`]
//! for how the rest is read.

use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::StoreKind;

const COMMANDS_HELP: &str = "\
Commands:
  url                      Print the base URL of the session
  url <base-url>           Set the base URL; must be absolute (\"-\" clears it)
  reset                    Clear the base URL and all headers

  set <name> <value>       Set a header sent with every request
  set <name>               Remove a header
  list                     List the session headers
  clear                    Remove all session headers
  env                      Print the base URL followed by the headers
  session                  Print the session id (--path: its state file)

  GET <url>                Any other command is an HTTP method. A relative
  DELETE <url>             <url> is combined with the base URL. No body is
  * <url>                  sent for these methods.

  POST <url> [type]        The request body is read from stdin; [type]
  PUT <url> [type]         defaults to the session Content-Type header, then
  * <url> <type>           to application/json. Other methods send a body
                           only when <type> is given.

Exit status:
  0 success, 1 usage, 2 session context, 3 transport, 4 HTTP 4xx, 5 HTTP 5xx";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "http", version, about, long_about = None)]
#[command(override_usage = "http [OPTIONS] <COMMAND> [ARGS]...")]
#[command(after_help = COMMANDS_HELP)]
pub struct Args {
    // =========================================================================
    // POSITIONAL ARGUMENTS
    // =========================================================================

    /// Context command or HTTP method
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Arguments of the command
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    // =========================================================================
    // REQUEST OPTIONS
    // =========================================================================

    /// Session headers to leave out of this request (comma-separated)
    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "NAMES",
        value_delimiter = ',',
        help_heading = "Request"
    )]
    pub exclude: Vec<String>,

    /// Pretty-print JSON responses
    #[arg(short = 'p', long = "pretty", action = ArgAction::SetTrue, help_heading = "Request")]
    pub pretty: bool,

    /// Do not write the request/response dump to stderr
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, help_heading = "Request")]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        env = "HTTPCLI_TIMEOUT",
        help_heading = "Request"
    )]
    pub timeout: Option<f64>,

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Session id (default: today's date and the parent process id)
    #[arg(
        long = "session",
        value_name = "ID",
        env = "HTTPCLI_SESSION_ID",
        help_heading = "Session"
    )]
    pub session: Option<String>,

    /// Where the session context lives
    #[arg(
        long = "store",
        value_name = "STORE",
        env = "HTTPCLI_STORE",
        value_enum,
        help_heading = "Session"
    )]
    pub store: Option<StoreKind>,

    /// Directory holding config.toml and session files
    #[arg(
        long = "config-dir",
        value_name = "DIR",
        env = "HTTPCLI_CONFIG_DIR",
        help_heading = "Session"
    )]
    pub config_dir: Option<PathBuf>,

    /// With `session`: print the path of the session state file
    #[arg(long = "path", action = ArgAction::SetTrue, help_heading = "Session")]
    pub path: bool,

    // =========================================================================
    // TROUBLESHOOTING
    // =========================================================================

    /// Log debug events to stderr
    #[arg(long = "debug", action = ArgAction::SetTrue, help_heading = "Troubleshooting")]
    pub debug: bool,
}

impl Args {
    /// Full help text, printed when no command is given
    pub fn usage() -> String {
        Args::command().render_help().to_string()
    }
}
