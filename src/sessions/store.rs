//! Context persistence
//!
//! Two media are supported:
//!
//! - [`FileStore`]: `<config-dir>/<session>.env` holding `KEY=VALUE` lines,
//!   written atomically with mode 0600.
//! - [`EnvStore`]: `HTTPCLI_`-prefixed environment variables. A child process
//!   cannot change its parent shell's environment, so storing prints a script
//!   of `export`/`unset` lines for the caller to `eval`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use url::form_urlencoded;

use crate::errors::HttpcliError;
use crate::sessions::context::{is_context_key, Context};

/// Prefix of every variable owned by the environment store
pub const ENV_PREFIX: &str = "HTTPCLI_";

/// Load and store the context of one session
pub trait ContextStore {
    /// Read the persisted context; an absent or empty medium is an empty context
    fn load(&self) -> Result<Context, HttpcliError>;

    /// Persist `ctx`. Stores that need the caller's cooperation write
    /// instructions to `out`.
    fn store(&self, ctx: &Context, out: &mut dyn Write) -> Result<(), HttpcliError>;

    /// Human readable location of the persisted state
    fn location(&self) -> String;
}

/// File-backed store, one file per session
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path, session: &str) -> Self {
        Self {
            path: dir.join(format!("{}.env", session_file_stem(session))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContextStore for FileStore {
    fn load(&self) -> Result<Context, HttpcliError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "no session state, starting empty"
                );
                return Ok(Context::new());
            }
        };

        let records = parse_records(&content);
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "loaded session state"
        );
        Ok(Context::from_records(records))
    }

    fn store(&self, ctx: &Context, _out: &mut dyn Write) -> Result<(), HttpcliError> {
        let persist_err = |source: std::io::Error| HttpcliError::Persist {
            path: self.path.display().to_string(),
            source,
        };

        let parent = self.path.parent().unwrap_or(Path::new("."));
        create_private_dir(parent).map_err(persist_err)?;

        // NamedTempFile is created 0600 on unix and renamed over the target.
        let mut temp = NamedTempFile::new_in(parent).map_err(persist_err)?;
        temp.write_all(format_records(&ctx.to_records()).as_bytes())
            .map_err(persist_err)?;
        temp.as_file().sync_all().map_err(persist_err)?;
        temp.persist(&self.path).map_err(|e| persist_err(e.error))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(persist_err)?;
        }

        tracing::debug!(path = %self.path.display(), "stored session state");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Environment-backed store
///
/// Holds the `HTTPCLI_*` variables seen at startup so that storing can unset
/// the ones the new context no longer has.
#[derive(Debug, Clone, Default)]
pub struct EnvStore {
    initial: BTreeMap<String, String>,
}

impl EnvStore {
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let initial = vars
            .into_iter()
            .filter_map(|(k, v)| {
                let key = k.as_ref().strip_prefix(ENV_PREFIX)?;
                is_context_key(key).then(|| (key.to_string(), v.into()))
            })
            .collect();
        Self { initial }
    }

    /// Shell script that brings the caller's environment in line with `ctx`
    pub fn script(&self, ctx: &Context) -> String {
        let records = ctx.to_records();
        let mut script = String::new();

        for key in self.initial.keys().filter(|k| !records.contains_key(*k)) {
            script.push_str(&format!("unset {}{}\n", ENV_PREFIX, key));
        }
        for (key, value) in &records {
            script.push_str(&format!("export {}{}={}\n", ENV_PREFIX, key, shell_quote(value)));
        }
        script
    }
}

impl ContextStore for EnvStore {
    fn load(&self) -> Result<Context, HttpcliError> {
        Ok(Context::from_records(
            self.initial.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }

    fn store(&self, ctx: &Context, out: &mut dyn Write) -> Result<(), HttpcliError> {
        out.write_all(self.script(ctx).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn location(&self) -> String {
        format!("environment ({}*)", ENV_PREFIX)
    }
}

/// Parse `KEY=VALUE` lines, splitting on the first `=`; other lines are skipped
pub fn parse_records(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn format_records(records: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in records {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Bash ANSI-C quoting: `$'...'` with `\` and `'` escaped
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 3);
    quoted.push_str("$'");
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// File name stem for a session id
///
/// Form-urlencoded with `*` escaped too, so distinct ids never share a file
/// and separators cannot leave the sessions directory.
fn session_file_stem(session: &str) -> String {
    form_urlencoded::byte_serialize(session.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}
