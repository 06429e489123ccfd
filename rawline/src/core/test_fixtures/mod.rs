// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the two ends of the line editor: a [`StdoutMock`] that captures
//! everything written to the terminal, and a [`ScriptedByteSource`] that replays keys,
//! pauses and resizes.

// Attach sources.
pub mod scripted_byte_source;
pub mod stdout_mock;

// Re-export.
pub use scripted_byte_source::*;
pub use stdout_mock::*;
