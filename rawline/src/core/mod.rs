// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Ambient plumbing shared by the line editor and its host: the `ok!` macro, tracing
//! setup, terminal raw mode, and test fixtures.

// Attach sources.
pub mod decl_macros;
pub mod log;
pub mod terminal_raw_mode;
pub mod test_fixtures;

// Re-export.
pub use log::*;
pub use terminal_raw_mode::*;
pub use test_fixtures::*;

pub type StdMutex<T> = std::sync::Mutex<T>;
