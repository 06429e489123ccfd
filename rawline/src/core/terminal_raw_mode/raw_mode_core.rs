// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#[cfg(unix)]
use super::raw_mode_unix::{self, SavedTerminalState};

/// RAII guard that puts the controlling terminal into raw mode, and puts it back the way
/// it found it when dropped.
///
/// The saved attributes live inside the guard, not in a process global, so nested or
/// repeated guards each restore exactly what they saw.
#[derive(Debug)]
pub struct RawModeGuard {
    #[cfg(unix)]
    saved: SavedTerminalState,
}

impl RawModeGuard {
    /// Enable raw mode on stdin (or `/dev/tty` when stdin is redirected).
    ///
    /// # Errors
    ///
    /// Returns miette diagnostic errors if:
    /// - No terminal file descriptor can be obtained
    /// - Terminal attributes cannot be retrieved or set
    /// - The platform is not supported
    pub fn new() -> miette::Result<Self> {
        #[cfg(unix)]
        {
            let saved = raw_mode_unix::enable_raw_mode()?;
            tracing::debug!(message = "raw mode enabled");
            Ok(Self { saved })
        }

        #[cfg(not(unix))]
        {
            Err(miette::miette!("raw mode is only supported on unix platforms"))
        }
    }

    /// Restore the saved attributes now instead of waiting for drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be set.
    pub fn restore(&self) -> miette::Result<()> {
        #[cfg(unix)]
        {
            raw_mode_unix::disable_raw_mode(&self.saved)
        }

        #[cfg(not(unix))]
        {
            Ok(())
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(report) = self.restore() {
            tracing::error!(message = "failed to restore terminal attributes", ?report);
        }
    }
}
