// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Fatal errors of a line editing session. Anything that isn't fatal (an unknown key,
/// a delete at the end of the line, a missing capability) is handled inside the
/// session and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum LineEditorError {
    /// Reading input or writing to the terminal failed.
    #[error(transparent)]
    IO(#[from] io::Error),

    #[error(transparent)]
    LineBuffer(#[from] LineBufferError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineBufferError {
    #[error("nothing to delete at offset {offset}, the line is {length} bytes long")]
    NothingToDelete { offset: usize, length: usize },
}
