//! Ctrl+C handling
//!
//! The first interrupt only raises a flag and the current command runs to
//! completion. A second interrupt exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::status::ExitStatus;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C was pressed
#[inline]
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Install the process-wide Ctrl+C handler
pub fn install_handler() {
    let installed = ctrlc::set_handler(move || {
        if INTERRUPTED.swap(true, Ordering::SeqCst) {
            std::process::exit(ExitStatus::Interrupted as i32);
        }
        eprintln!("\nInterrupted");
    });

    if let Err(e) = installed {
        tracing::debug!(error = %e, "could not install Ctrl+C handler");
    }
}

