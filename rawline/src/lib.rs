// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # rawline
//!
//! A single line editor for raw mode terminals. It does the few things that are
//! surprisingly hard to get right with nothing but a byte stream and a handful of
//! cursor movement primitives:
//!
//! - Telling a lone `ESC` apart from the start of an arrow key sequence, by waiting a
//!   short time for the rest of the sequence ([`KeyDecoder`]).
//! - Knowing where the hardware cursor is, even when the line wraps and the terminal
//!   has the "newline glitch" at the right margin ([`CursorTracker`]).
//! - Redrawing the line with per character colors supplied by the caller
//!   ([`Highlighter`]), and moving the cursor with as few bytes as possible.
//! - Recovering from terminal resizes, which can arrive while waiting for a key.
//!
//! Everything the editor needs from the terminal comes in through plain data
//! ([`Capabilities`], [`TerminalMetrics`]) and two traits ([`ByteSource`],
//! [`MetricsProvider`]), so the whole pipeline runs against in-memory fakes in tests.
//! See [`line_editor`] for an end to end example.
//!
//! Only single byte characters are supported: a byte is a character, and every
//! character is one column wide.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap().
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

/// Enable verbose tracing of every key the decoder resolves.
pub const DEBUG_RAWLINE_DECODER: bool = false;
/// Enable verbose tracing of the stdin byte source.
pub const DEBUG_RAWLINE_TERMINAL: bool = false;

// Attach modules.
pub mod core;
pub mod line_editor;
pub mod terminal;

// Re-export.
pub use self::core::*;
pub use line_editor::*;
pub use terminal::*;
