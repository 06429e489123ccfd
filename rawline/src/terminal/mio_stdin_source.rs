// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`ByteSource`] backed by the process's stdin.
//!
//! Stdin and a `SIGWINCH` signal source are registered with a single [`mio::Poll`], so
//! a blocked wait for the next key wakes up as soon as the terminal is resized. No
//! threads are involved: the poll runs on the caller's thread, inside
//! [`ByteSource::poll_byte`].

use std::{collections::VecDeque,
          io::{self, ErrorKind, Stdin},
          os::fd::{AsFd, AsRawFd as _, BorrowedFd, OwnedFd},
          time::{Duration, Instant}};

use mio::{Events, Interest, Poll, Token, unix::SourceFd};
use rustix::event::{PollFd, PollFlags, Timespec};
use signal_hook::consts::SIGWINCH;
use signal_hook_mio::v1_0::Signals;

use super::{ByteSource, SourceEvent};
use crate::DEBUG_RAWLINE_TERMINAL;

pub const STDIN_READ_BUFFER_SIZE: usize = 1_024;

const EVENTS_CAPACITY: usize = 8;

/// Which registered source a readiness event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKindReady {
    Stdin,
    Signals,
    Unknown,
}

impl SourceKindReady {
    #[must_use]
    pub const fn to_token(self) -> Token {
        match self {
            Self::Stdin => Token(0),
            Self::Signals => Token(1),
            Self::Unknown => Token(usize::MAX),
        }
    }

    #[must_use]
    pub const fn from_token(token: Token) -> Self {
        match token.0 {
            0 => Self::Stdin,
            1 => Self::Signals,
            _ => Self::Unknown,
        }
    }
}

/// The descriptor bytes are read from. Stdin in production, anything readable in tests.
#[derive(Debug)]
enum InputFd {
    Stdin(Stdin),
    Owned(OwnedFd),
}

impl AsFd for InputFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            InputFd::Stdin(stdin) => stdin.as_fd(),
            InputFd::Owned(fd) => fd.as_fd(),
        }
    }
}

/// Reads stdin in chunks into an internal queue and hands the bytes out one at a time.
///
/// Reads go straight to the file descriptor. [`Stdin`]'s own buffering would keep
/// bytes where `mio` can't see them, and the next poll would block on input that has
/// already arrived.
#[allow(missing_debug_implementations)]
pub struct MioStdinSource {
    poll_handle: Poll,
    ready_events_buffer: Events,
    input: InputFd,
    signals: Signals,
    read_buffer: [u8; STDIN_READ_BUFFER_SIZE],
    pending_bytes: VecDeque<u8>,
    closed: bool,
}

impl MioStdinSource {
    /// # Errors
    ///
    /// Returns an error if the poll can't be created, or if stdin or the `SIGWINCH`
    /// handler can't be registered with it.
    pub fn new() -> io::Result<Self> { Self::with_input_fd(InputFd::Stdin(io::stdin())) }

    /// Same as [`MioStdinSource::new`], but reads from `input` instead of stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll can't be created, or if `input` or the `SIGWINCH`
    /// handler can't be registered with it.
    pub fn with_input(input: OwnedFd) -> io::Result<Self> {
        Self::with_input_fd(InputFd::Owned(input))
    }

    fn with_input_fd(input: InputFd) -> io::Result<Self> {
        let poll_handle = Poll::new()?;
        let mio_registry = poll_handle.registry();

        mio_registry.register(
            &mut SourceFd(&input.as_fd().as_raw_fd()),
            SourceKindReady::Stdin.to_token(),
            Interest::READABLE,
        )?;

        let mut signals = Signals::new([SIGWINCH])?;
        mio_registry.register(
            &mut signals,
            SourceKindReady::Signals.to_token(),
            Interest::READABLE,
        )?;

        DEBUG_RAWLINE_TERMINAL.then(|| {
            tracing::debug!(message = "mio-stdin-source: registered stdin and SIGWINCH");
        });

        Ok(Self {
            poll_handle,
            ready_events_buffer: Events::with_capacity(EVENTS_CAPACITY),
            input,
            signals,
            read_buffer: [0u8; STDIN_READ_BUFFER_SIZE],
            pending_bytes: VecDeque::new(),
            closed: false,
        })
    }

    /// Returns `false` once stdin reports end of file.
    fn consume_stdin_input(&mut self) -> io::Result<bool> {
        loop {
            match rustix::io::read(self.input.as_fd(), &mut self.read_buffer[..]) {
                Ok(0) => {
                    DEBUG_RAWLINE_TERMINAL.then(|| {
                        tracing::debug!(message = "mio-stdin-source: EOF (0 bytes)");
                    });
                    return Ok(false);
                }
                Ok(n) => {
                    DEBUG_RAWLINE_TERMINAL.then(|| {
                        tracing::debug!(
                            message = "mio-stdin-source: read bytes",
                            bytes_read = n
                        );
                    });
                    self.pending_bytes.extend(&self.read_buffer[..n]);
                    // Readiness is edge triggered: a full buffer may have left bytes
                    // behind that no further event will announce.
                    if n < STDIN_READ_BUFFER_SIZE || !self.has_more_input()? {
                        return Ok(true);
                    }
                }
                Err(rustix::io::Errno::INTR) => {}
                Err(rustix::io::Errno::AGAIN) => return Ok(true),
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    /// Non blocking check for unread input (or a hang up) on the input descriptor.
    fn has_more_input(&self) -> io::Result<bool> {
        let mut poll_fds = [PollFd::new(&self.input, PollFlags::IN)];
        let no_wait = Timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        loop {
            match rustix::event::poll(&mut poll_fds, Some(&no_wait)) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    let revents = poll_fds[0].revents();
                    return Ok(revents.intersects(PollFlags::IN | PollFlags::HUP));
                }
                Err(rustix::io::Errno::INTR) => {}
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    fn consume_pending_signals(&mut self) -> bool {
        self.signals.pending().any(|sig| sig == SIGWINCH)
    }
}

impl ByteSource for MioStdinSource {
    fn poll_byte(&mut self, timeout: Option<Duration>) -> io::Result<SourceEvent> {
        if let Some(byte) = self.pending_bytes.pop_front() {
            return Ok(SourceEvent::Byte(byte));
        }
        if self.closed {
            return Ok(SourceEvent::Closed);
        }

        let deadline = timeout.map(|timeout| Instant::now() + timeout);

        loop {
            let remaining =
                deadline.map(|deadline| deadline.saturating_duration_since(Instant::now()));

            match self
                .poll_handle
                .poll(&mut self.ready_events_buffer, remaining)
            {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }

            if self.ready_events_buffer.is_empty() {
                if deadline.is_some() {
                    return Ok(SourceEvent::TimedOut);
                }
                continue;
            }

            let ready: Vec<SourceKindReady> = self
                .ready_events_buffer
                .iter()
                .map(|event| SourceKindReady::from_token(event.token()))
                .collect();

            let mut resized = false;
            for source_kind in ready {
                match source_kind {
                    SourceKindReady::Stdin => {
                        if !self.consume_stdin_input()? {
                            self.closed = true;
                        }
                    }
                    SourceKindReady::Signals => {
                        resized |= self.consume_pending_signals();
                    }
                    SourceKindReady::Unknown => {
                        tracing::warn!(message = "mio-stdin-source: unknown token");
                    }
                }
            }

            if resized {
                DEBUG_RAWLINE_TERMINAL.then(|| {
                    tracing::debug!(message = "mio-stdin-source: SIGWINCH received");
                });
                return Ok(SourceEvent::Resized);
            }
            if let Some(byte) = self.pending_bytes.pop_front() {
                return Ok(SourceEvent::Byte(byte));
            }
            if self.closed {
                return Ok(SourceEvent::Closed);
            }
        }
    }
}
