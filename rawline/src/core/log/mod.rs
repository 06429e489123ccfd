// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tracing subscriber setup. The line editor itself only emits `tracing` events; the
//! host decides where they go by building a [`TracingConfig`] and installing it.
//!
//! A raw mode terminal owns stdout, so interactive hosts should log to a file:
//!
//! ```no_run
//! use rawline::{TracingConfig, WriterConfig};
//! use tracing_core::LevelFilter;
//!
//! TracingConfig {
//!     writer_config: WriterConfig::File("rawline_debug.log".into()),
//!     level_filter: LevelFilter::DEBUG,
//! }
//! .install_global()
//! .unwrap();
//! ```

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
