// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io, time::Duration};

/// What a single poll of a [`ByteSource`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEvent {
    /// One raw input byte.
    Byte(u8),
    /// The timeout elapsed with nothing to read.
    TimedOut,
    /// The terminal was resized while waiting. Any bytes that arrived together with
    /// the resize stay queued for the next poll.
    Resized,
    /// End of input. Every later poll returns this too.
    Closed,
}

/// Raw, unbuffered terminal input.
///
/// The only suspension point of the line editor is inside [`ByteSource::poll_byte`],
/// so implementations must be interruptible by a resize: return
/// [`SourceEvent::Resized`] instead of sleeping through it.
pub trait ByteSource {
    /// Wait up to `timeout` for the next byte. `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying wait or read fails for any reason other than
    /// an interrupted system call.
    fn poll_byte(&mut self, timeout: Option<Duration>) -> io::Result<SourceEvent>;
}
