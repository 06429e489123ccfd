// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::try_create_layers;
use tracing_core::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Configure where tracing output goes, and at which level. You can display the logs
/// to:
/// 1. a file,
/// 2. stdout or stderr,
/// 3. both.
///
/// Use [`TracingConfig::install_global`] or [`TracingConfig::install_thread_local`] to
/// activate it.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `String` is the file path to use for the log file. Eg: `/tmp/rawline.log` or
///   `rawline.log`.
/// - [`DisplayPreference`] is the display to use for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path */),
    DisplayAndFile(DisplayPreference, String /* tracing_log_file_path */),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    /// Log to the given file only, at `DEBUG` level. This is the only sane choice while
    /// the terminal is in raw mode.
    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| "rawline_debug.log".to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    /// Install the subscriber for the whole process.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer can't be created (eg: the log file path is bad), or a
    /// global subscriber was already installed.
    pub fn install_global(self) -> miette::Result<()> {
        let Some(layers) = try_create_layers(self)? else {
            return Ok(());
        };
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|e| miette::miette!("failed to install tracing subscriber: {e}"))
    }

    /// Install the subscriber for the current thread only. Drop the returned guard to
    /// uninstall it. Returns `None` when [`WriterConfig::None`] is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer can't be created.
    pub fn install_thread_local(
        self,
    ) -> miette::Result<Option<tracing::subscriber::DefaultGuard>> {
        let Some(layers) = try_create_layers(self)? else {
            return Ok(None);
        };
        let subscriber = tracing_subscriber::registry().with(layers);
        Ok(Some(tracing::subscriber::set_default(subscriber)))
    }
}
