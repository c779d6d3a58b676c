//! Common test utilities for httpcli integration tests
//!
//! Every `MockEnvironment` gets its own config directory and a fixed session
//! id, so tests never see each other's context or the developer's own.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Exit status codes of the `http` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Usage = 1,
    Context = 2,
    Transport = 3,
    ClientError = 4,
    ServerError = 5,
    Other = -1,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            1 => ExitStatus::Usage,
            2 => ExitStatus::Context,
            3 => ExitStatus::Transport,
            4 => ExitStatus::ClientError,
            5 => ExitStatus::ServerError,
            _ => ExitStatus::Other,
        }
    }
}

/// Result of running the HTTP CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
}

/// Mock environment for testing
pub struct MockEnvironment {
    /// Temporary config directory holding session files
    pub config_dir: TempDir,
    /// Session id pinned through `HTTPCLI_SESSION_ID`
    pub session: String,
    /// Environment variables to set
    pub env_vars: HashMap<String, String>,
    /// Standard input content
    pub stdin: Option<Vec<u8>>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::with_session("test-session")
    }

    pub fn with_session(session: &str) -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            session: session.to_string(),
            env_vars: HashMap::new(),
            stdin: None,
        }
    }

    /// Set an environment variable
    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Set stdin content
    pub fn set_stdin(&mut self, content: &[u8]) -> &mut Self {
        self.stdin = Some(content.to_vec());
        self
    }

    /// State file of the pinned session
    pub fn session_file(&self) -> PathBuf {
        self.config_dir.path().join(format!("{}.env", self.session))
    }
}

/// Run the HTTP CLI with the given arguments and environment
pub fn http_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_http"));
    cmd.args(args);

    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("HTTPCLI_") {
            cmd.env_remove(&key);
        }
    }
    cmd.env("HTTPCLI_CONFIG_DIR", env.config_dir.path());
    cmd.env("HTTPCLI_SESSION_ID", &env.session);
    cmd.env("HTTPCLI_TIMEOUT", "5");
    cmd.env("NO_COLOR", "1");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(ref stdin_data) = env.stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            stdin.write_all(stdin_data).expect("Failed to write to stdin");
        }
        let output = child.wait_with_output().expect("Failed to wait for command");
        parse_output(output)
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().expect("Failed to execute command");
        parse_output(output)
    }
}

fn parse_output(output: Output) -> CliResponse {
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_status: ExitStatus::from(output.status.code().unwrap_or(-1)),
    }
}
