// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal raw mode for the embedding host.
//!
//! The line editor core never touches termios: it only reads bytes and writes escape
//! sequences. Something has to switch the line discipline off first, though, so that
//! every keystroke (including the bytes of an escape sequence) arrives immediately and
//! is not echoed. That is this module's job.
//!
//! **Cooked mode** (default): input is line buffered, special characters (Ctrl+C,
//! Ctrl+D) are interpreted by the kernel, and typed characters are echoed.
//!
//! **Raw mode**: no line buffering, no signal generation, no echo, and no output
//! post-processing (so `\n` moves down without returning to column 0). The editor's
//! ANSI capability table relies on that last point.
//!
//! Use [`RawModeGuard`], which restores the saved terminal attributes when dropped,
//! including while unwinding from a panic:
//!
//! ```no_run
//! use rawline::RawModeGuard;
//!
//! {
//!     let _guard = RawModeGuard::new().expect("Failed to enable raw mode");
//!     // Terminal is now in raw mode.
//! } // Original attributes restored here.
//! ```

// Attach sources.
mod raw_mode_core;

#[cfg(unix)]
mod raw_mode_unix;

// Re-export.
pub use raw_mode_core::*;
