// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, io, time::Duration};

use crate::{ByteSource, SourceEvent};

/// One step of a [`ScriptedByteSource`] script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Byte(u8),
    /// The user pauses long enough for any bounded poll to time out. An unbounded poll
    /// simply waits through it.
    Silence,
    /// The terminal is resized.
    Resize,
}

/// Replays a fixed script, then reports [`SourceEvent::Closed`] forever. No real time
/// passes: a [`ScriptStep::Silence`] is what makes a bounded poll time out.
///
/// ```
/// use rawline::{ByteSource, ScriptedByteSource, SourceEvent};
/// use std::time::Duration;
///
/// let mut source = ScriptedByteSource::default().bytes(b"\x1b").silence();
/// let timeout = Some(Duration::from_millis(300));
/// assert_eq!(source.poll_byte(None).unwrap(), SourceEvent::Byte(0x1b));
/// assert_eq!(source.poll_byte(timeout).unwrap(), SourceEvent::TimedOut);
/// assert_eq!(source.poll_byte(timeout).unwrap(), SourceEvent::Closed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedByteSource {
    pub steps: VecDeque<ScriptStep>,
    /// Every timeout passed to [`ByteSource::poll_byte`], in call order.
    pub requested_timeouts: Vec<Option<Duration>>,
}

impl ScriptedByteSource {
    #[must_use]
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.extend(bytes.iter().copied().map(ScriptStep::Byte));
        self
    }

    #[must_use]
    pub fn silence(mut self) -> Self {
        self.steps.push_back(ScriptStep::Silence);
        self
    }

    #[must_use]
    pub fn resize(mut self) -> Self {
        self.steps.push_back(ScriptStep::Resize);
        self
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool { self.steps.is_empty() }
}

impl ByteSource for ScriptedByteSource {
    fn poll_byte(&mut self, timeout: Option<Duration>) -> io::Result<SourceEvent> {
        self.requested_timeouts.push(timeout);
        loop {
            match self.steps.pop_front() {
                Some(ScriptStep::Byte(byte)) => return Ok(SourceEvent::Byte(byte)),
                Some(ScriptStep::Resize) => return Ok(SourceEvent::Resized),
                Some(ScriptStep::Silence) if timeout.is_some() => {
                    return Ok(SourceEvent::TimedOut);
                }
                Some(ScriptStep::Silence) => {}
                None => return Ok(SourceEvent::Closed),
            }
        }
    }
}
