// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line editor: decode keys, edit a single line of text, and keep the terminal in
//! sync with it.
//!
//! An [`EditSession`] owns all the state. Each key goes through the same pipeline:
//!
//! ```text
//! KeyDecoder -> apply_key -> LineBuffer -> offset_to_screen -> redraw / move_to
//! ```
//!
//! A resize skips the first three stages and re-enters at the renderer.
//!
//! ```no_run
//! use miette::IntoDiagnostic as _;
//! use rawline::{Capabilities, CrosstermMetrics, EditSession, EditorEvent, EditorOptions,
//!               MetricsProvider, MioStdinSource, NoHighlight, RawModeGuard};
//!
//! # fn main() -> miette::Result<()> {
//! let _raw_mode = RawModeGuard::new()?;
//! let mut metrics_provider = CrosstermMetrics::default();
//! let metrics = metrics_provider.current_metrics().into_diagnostic()?;
//! let mut session = EditSession::new(
//!     "",
//!     NoHighlight,
//!     Capabilities::ansi(),
//!     metrics,
//!     EditorOptions::default(),
//! );
//! let mut stdout = std::io::stdout();
//! let mut source = MioStdinSource::new().into_diagnostic()?;
//! session.start(&mut stdout).into_diagnostic()?;
//! if let EditorEvent::Line(line) = session
//!     .read_line(&mut source, &mut metrics_provider, &mut stdout)
//!     .into_diagnostic()?
//! {
//!     println!("{}", String::from_utf8_lossy(&line));
//! }
//! # Ok(())
//! # }
//! ```

// Attach sources.
pub mod annotation;
pub mod editor;
pub mod error;
pub mod event_handlers;
pub mod key;
pub mod key_decoder;
pub mod key_table;
pub mod line_buffer;
pub mod read_line;
pub mod render;
pub mod resize;
pub mod screen_position;

// Re-export.
pub use annotation::*;
pub use editor::*;
pub use error::*;
pub use key::*;
pub use key_decoder::*;
pub use key_table::*;
pub use line_buffer::*;
pub use screen_position::*;
