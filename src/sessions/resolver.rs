//! Session id resolution
//!
//! Every command issued from the same parent shell on the same calendar day
//! shares one session, so concurrent shells keep independent contexts without
//! any explicit session management. Scripts run in sub-shells get a fresh
//! parent pid; they should pin `HTTPCLI_SESSION_ID` instead.

use chrono::{Local, NaiveDate};
use once_cell::sync::OnceCell;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Overrides the derived session id verbatim
pub const SESSION_ID_VAR: &str = "HTTPCLI_SESSION_ID";

static SESSION: OnceCell<String> = OnceCell::new();

/// Resolve the session id for this process, computing it on first use
///
/// `overridden` carries `--session` / `HTTPCLI_SESSION_ID`.
pub fn resolve_session(overridden: Option<&str>) -> &'static str {
    SESSION.get_or_init(|| {
        let session = derive_session(overridden, Local::now().date_naive(), parent_pid());
        tracing::debug!(session = %session, "resolved session");
        session
    })
}

/// Pure form of [`resolve_session`]
pub fn derive_session(overridden: Option<&str>, today: NaiveDate, ppid: u32) -> String {
    match overridden {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("{}-{:08x}", today.format("%Y-%m-%d"), ppid),
    }
}

fn parent_pid() -> u32 {
    let pid = std::process::id();
    match process_parent(pid) {
        Some(ppid) => ppid,
        None => {
            tracing::warn!(pid, "parent process not found, session is scoped to this process");
            pid
        }
    }
}

/// Parent of `pid` according to the OS process table
pub fn process_parent(pid: u32) -> Option<u32> {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        false,
        ProcessRefreshKind::nothing(),
    );
    system.process(pid)?.parent().map(|ppid| ppid.as_u32())
}
