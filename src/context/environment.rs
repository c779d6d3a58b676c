//! Environment struct (stdin/stdout/etc.)

use std::collections::BTreeMap;
use std::io::{self, Stderr, Stdin, Stdout};

/// Execution environment
pub struct Environment {
    pub stdin: Stdin,
    pub stdout: Stdout,
    pub stderr: Stderr,
    /// Whether diagnostics on stderr may use ANSI colors
    pub colors: bool,
    pub program_name: String,
    /// Snapshot of the process environment taken at startup
    pub vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }

    /// Look up a variable in the startup snapshot, treating empty values as unset
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl Default for Environment {
    fn default() -> Self {
        let vars: BTreeMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            stderr: io::stderr(),
            colors: detect_color_support(&vars),
            program_name: "http".to_string(),
            vars,
        }
    }
}

/// Colors are only used for stderr diagnostics on a real terminal
fn detect_color_support(vars: &BTreeMap<String, String>) -> bool {
    if !atty::is(atty::Stream::Stderr) {
        return false;
    }

    if vars.contains_key("NO_COLOR") {
        return false;
    }

    !matches!(vars.get("TERM").map(String::as_str), Some("dumb"))
}
