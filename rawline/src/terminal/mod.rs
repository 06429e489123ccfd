// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terminal as seen by the line editor: a table of capability primitives, the
//! current metrics, and a byte source that can be polled with a timeout.
//!
//! The editor consumes all three as plain data and traits. Concrete providers for ANSI
//! terminals ([`Capabilities::ansi`], [`CrosstermMetrics`], [`MioStdinSource`]) live
//! here too, so that a host only has to wire them up.

// Attach sources.
pub mod byte_source;
pub mod capabilities;
pub mod metrics;
#[cfg(unix)]
pub mod mio_stdin_source;

// Re-export.
pub use byte_source::*;
pub use capabilities::*;
pub use metrics::*;
#[cfg(unix)]
pub use mio_stdin_source::*;
