// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns raw terminal bytes into [`Key`]s.
//!
//! A lone `ESC` and the first byte of an arrow key sequence look the same. The decoder
//! resolves this greedily with a timeout:
//!
//! 1. Take a byte, from the pushback queue if it isn't empty, otherwise by waiting on
//!    the source with no time limit. A byte that can't start any sequence in the
//!    [`KeyTable`] is decoded on its own by [`Key::from_single_byte`].
//! 2. Otherwise keep polling with whatever is left of the escape timeout:
//!    - a buffer that matches a sequence exactly, and is not the start of any longer
//!      one, resolves right away;
//!    - a byte that extends the buffer towards some sequence is accumulated;
//!    - a byte that extends nothing ends the sequence. If some prefix of the buffer
//!      matched a sequence exactly, the longest such match wins and the bytes after it
//!      (the breaking byte included) are pushed back. Otherwise the first buffered
//!      byte is decoded on its own and everything after it is pushed back;
//!    - when the timeout elapses the buffer resolves the same way.
//!
//! Pushed back bytes are decoded again, in arrival order, before the source is read.

use std::{collections::VecDeque,
          io,
          time::{Duration, Instant}};

use smallvec::smallvec;

use super::{Key, KeySequence, KeyTable};
use crate::{ByteSource, DEBUG_RAWLINE_DECODER, SourceEvent};

/// How long to wait for the rest of an escape sequence.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(300);

/// What the decoder hands to the edit loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// The terminal was resized.
    Resize,
    /// The byte source is closed and every pushed back byte has been decoded.
    EndOfInput,
}

#[derive(Debug, Clone)]
pub struct KeyDecoder {
    table: KeyTable,
    escape_timeout: Duration,
    pushback: VecDeque<u8>,
    /// A resize seen while a sequence was being accumulated. Delivered after that key.
    resize_pending: bool,
    source_closed: bool,
}

impl Default for KeyDecoder {
    fn default() -> Self { Self::new(KeyTable::ansi_default(), DEFAULT_ESCAPE_TIMEOUT) }
}

impl KeyDecoder {
    #[must_use]
    pub fn new(table: KeyTable, escape_timeout: Duration) -> Self {
        Self {
            table,
            escape_timeout,
            pushback: VecDeque::new(),
            resize_pending: false,
            source_closed: false,
        }
    }

    #[must_use]
    pub fn table(&self) -> &KeyTable { &self.table }

    #[must_use]
    pub fn escape_timeout(&self) -> Duration { self.escape_timeout }

    /// Bytes waiting to be decoded again, oldest first.
    #[must_use]
    pub fn pushback(&self) -> &VecDeque<u8> { &self.pushback }

    /// Produce exactly one event. Blocks without a time limit only while nothing is
    /// pending.
    ///
    /// # Errors
    ///
    /// Returns an error if polling the source fails.
    pub fn next_event(&mut self, source: &mut dyn ByteSource) -> io::Result<InputEvent> {
        if std::mem::take(&mut self.resize_pending) {
            return Ok(InputEvent::Resize);
        }

        let first = match self.pushback.pop_front() {
            Some(byte) => byte,
            None => match self.await_first_byte(source)? {
                Some(byte) => byte,
                None if self.source_closed => return Ok(InputEvent::EndOfInput),
                None => return Ok(InputEvent::Resize),
            },
        };

        let key = if self.table.starts_sequence(first) {
            self.disambiguate(first, source)?
        } else {
            Key::from_single_byte(first)
        };

        DEBUG_RAWLINE_DECODER.then(|| {
            tracing::debug!(
                message = "key decoder: resolved",
                ?key,
                pushback = self.pushback.len()
            );
        });

        Ok(InputEvent::Key(key))
    }

    /// `None` means either a resize or the end of input, told apart by
    /// `source_closed`.
    fn await_first_byte(&mut self, source: &mut dyn ByteSource) -> io::Result<Option<u8>> {
        if self.source_closed {
            return Ok(None);
        }
        loop {
            match source.poll_byte(None)? {
                SourceEvent::Byte(byte) => return Ok(Some(byte)),
                SourceEvent::Resized => return Ok(None),
                SourceEvent::Closed => {
                    self.source_closed = true;
                    return Ok(None);
                }
                // An unbounded wait has nothing to time out on.
                SourceEvent::TimedOut => {}
            }
        }
    }

    fn disambiguate(&mut self, first: u8, source: &mut dyn ByteSource) -> io::Result<Key> {
        let deadline = Instant::now() + self.escape_timeout;
        let mut buffer: KeySequence = smallvec![first];
        // Longest prefix of `buffer` that matched a sequence exactly, and its key.
        let mut longest_exact: Option<(Key, usize)> = None;

        loop {
            let current = self.table.lookup(&buffer);
            if let Some(key) = current.exact {
                if !current.extendable {
                    return Ok(key);
                }
                longest_exact = Some((key, buffer.len()));
            }

            let Some(byte) = self.next_byte_before(deadline, source)? else {
                DEBUG_RAWLINE_DECODER.then(|| {
                    tracing::debug!(message = "key decoder: timed out", ?buffer);
                });
                return Ok(self.resolve_broken_prefix(&buffer, longest_exact, None));
            };

            buffer.push(byte);
            if self.table.lookup(&buffer).is_candidate() {
                continue;
            }
            buffer.pop();

            return Ok(self.resolve_broken_prefix(&buffer, longest_exact, Some(byte)));
        }
    }

    /// Next byte from the pushback queue or the source, or `None` once the deadline
    /// passes or the source closes.
    fn next_byte_before(
        &mut self,
        deadline: Instant,
        source: &mut dyn ByteSource,
    ) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.pop_front() {
            return Ok(Some(byte));
        }
        if self.source_closed {
            return Ok(None);
        }
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }
            match source.poll_byte(Some(remaining))? {
                SourceEvent::Byte(byte) => return Ok(Some(byte)),
                SourceEvent::TimedOut => return Ok(None),
                SourceEvent::Closed => {
                    self.source_closed = true;
                    return Ok(None);
                }
                SourceEvent::Resized => self.resize_pending = true,
            }
        }
    }

    /// The accumulated `buffer` (plus `extra`, the byte that broke it, if any) can't
    /// grow into a longer sequence. Resolve to the longest exact match seen so far, or
    /// to `buffer[0]` decoded on its own when there was none. Whatever follows the
    /// resolved part is queued, in arrival order, ahead of anything already pushed back.
    fn resolve_broken_prefix(
        &mut self,
        buffer: &[u8],
        longest_exact: Option<(Key, usize)>,
        extra: Option<u8>,
    ) -> Key {
        let (key, consumed) = match longest_exact {
            Some((key, length)) => (key, length),
            None => (Key::from_single_byte(buffer[0]), 1),
        };
        if let Some(byte) = extra {
            self.pushback.push_front(byte);
        }
        for &byte in buffer[consumed..].iter().rev() {
            self.pushback.push_front(byte);
        }
        key
    }
}

#[cfg(test)]
mod tests_esc_disambiguation {
    use super::*;
    use crate::ScriptedByteSource;
    use pretty_assertions::assert_eq;

    fn two_level_table() -> KeyTable {
        KeyTable::default()
            .with_binding(b"\x1bA", Key::Home)
            .with_binding(b"\x1bAB", Key::End)
    }

    fn decode_all(decoder: &mut KeyDecoder, source: &mut ScriptedByteSource) -> Vec<InputEvent> {
        let mut events = vec![];
        loop {
            let event = decoder.next_event(source).unwrap();
            events.push(event);
            if event == InputEvent::EndOfInput {
                return events;
            }
        }
    }

    #[test]
    fn test_shorter_match_on_timeout() {
        let mut decoder = KeyDecoder::new(two_level_table(), DEFAULT_ESCAPE_TIMEOUT);
        let mut source = ScriptedByteSource::default().bytes(b"\x1bA").silence();
        assert_eq!(
            decoder.next_event(&mut source).unwrap(),
            InputEvent::Key(Key::Home)
        );
        assert!(decoder.pushback().is_empty());
    }

    #[test]
    fn test_longer_match_within_timeout() {
        let mut decoder = KeyDecoder::new(two_level_table(), DEFAULT_ESCAPE_TIMEOUT);
        let mut source = ScriptedByteSource::default().bytes(b"\x1bAB");
        assert_eq!(
            decoder.next_event(&mut source).unwrap(),
            InputEvent::Key(Key::End)
        );
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_shorter_match_then_non_extending_byte_is_pushed_back() {
        let mut decoder = KeyDecoder::new(two_level_table(), DEFAULT_ESCAPE_TIMEOUT);
        let mut source = ScriptedByteSource::default().bytes(b"\x1bAx");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Home),
                InputEvent::Key(Key::Char(b'x')),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_earlier_exact_match_survives_a_broken_longer_prefix() {
        let table = KeyTable::default()
            .with_binding(b"\x1bA", Key::Home)
            .with_binding(b"\x1bABC", Key::End);
        let mut decoder = KeyDecoder::new(table, DEFAULT_ESCAPE_TIMEOUT);
        let mut source = ScriptedByteSource::default().bytes(b"\x1bABx");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Home),
                InputEvent::Key(Key::Char(b'B')),
                InputEvent::Key(Key::Char(b'x')),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_earlier_exact_match_survives_a_timeout() {
        let table = KeyTable::default()
            .with_binding(b"\x1bA", Key::Home)
            .with_binding(b"\x1bABC", Key::End);
        let mut decoder = KeyDecoder::new(table, DEFAULT_ESCAPE_TIMEOUT);
        let mut source = ScriptedByteSource::default().bytes(b"\x1bAB").silence();
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Home),
                InputEvent::Key(Key::Char(b'B')),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_lone_escape_times_out_to_literal() {
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default().bytes(b"\x1b").silence().bytes(b"q");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Unknown(0x1b)),
                InputEvent::Key(Key::Char(b'q')),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_broken_prefix_is_pushed_back_in_order() {
        // `ESC [` leads towards the arrows, `Z` matches nothing.
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default().bytes(b"\x1b[Zk");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Unknown(0x1b)),
                InputEvent::Key(Key::Char(b'[')),
                InputEvent::Key(Key::Char(b'Z')),
                InputEvent::Key(Key::Char(b'k')),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_escape_then_arrow_from_pushback() {
        // The second `ESC` breaks the first prefix and is then decoded from the
        // pushback queue together with the bytes that follow it.
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default().bytes(b"\x1b\x1b[D");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Unknown(0x1b)),
                InputEvent::Key(Key::CursorLeft),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_arrow_keys_and_delete() {
        let mut decoder = KeyDecoder::default();
        let mut source =
            ScriptedByteSource::default().bytes(b"\x1b[C\x1bOD\x1b[3~\x1b[1~\x1bOF");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::CursorRight),
                InputEvent::Key(Key::CursorLeft),
                InputEvent::Key(Key::Delete),
                InputEvent::Key(Key::Home),
                InputEvent::Key(Key::End),
                InputEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_plain_bytes_never_wait() {
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default().bytes(b"hi\r");
        assert_eq!(
            decode_all(&mut decoder, &mut source),
            vec![
                InputEvent::Key(Key::Char(b'h')),
                InputEvent::Key(Key::Char(b'i')),
                InputEvent::Key(Key::Enter),
                InputEvent::EndOfInput,
            ]
        );
        assert!(source.requested_timeouts.iter().all(Option::is_none));
    }

    #[test]
    fn test_disambiguation_polls_with_timeout() {
        let timeout = Duration::from_secs(5);
        let mut decoder = KeyDecoder::new(KeyTable::ansi_default(), timeout);
        let mut source = ScriptedByteSource::default().bytes(b"\x1b[A");
        decoder.next_event(&mut source).unwrap();

        assert_eq!(source.requested_timeouts.len(), 3);
        assert_eq!(source.requested_timeouts[0], None);
        for requested in &source.requested_timeouts[1..] {
            let requested = requested.unwrap();
            assert!(requested <= timeout);
            assert!(requested > Duration::ZERO);
        }
    }

    #[test]
    fn test_resize_while_idle_is_immediate() {
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default().resize().bytes(b"a");
        assert_eq!(decode_all(&mut decoder, &mut source), vec![
            InputEvent::Resize,
            InputEvent::Key(Key::Char(b'a')),
            InputEvent::EndOfInput,
        ]);
    }

    #[test]
    fn test_resize_mid_sequence_is_latched() {
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default()
            .bytes(b"\x1b[")
            .resize()
            .bytes(b"D");
        assert_eq!(decode_all(&mut decoder, &mut source), vec![
            InputEvent::Key(Key::CursorLeft),
            InputEvent::Resize,
            InputEvent::EndOfInput,
        ]);
    }

    #[test]
    fn test_close_mid_sequence_flushes_pushback() {
        let mut decoder = KeyDecoder::default();
        let mut source = ScriptedByteSource::default().bytes(b"\x1b[");
        assert_eq!(decode_all(&mut decoder, &mut source), vec![
            InputEvent::Key(Key::Unknown(0x1b)),
            InputEvent::Key(Key::Char(b'[')),
            InputEvent::EndOfInput,
        ]);
        assert_eq!(decoder.next_event(&mut source).unwrap(), InputEvent::EndOfInput);
    }

    #[test]
    fn test_zero_timeout_resolves_immediately() {
        let mut decoder = KeyDecoder::new(KeyTable::ansi_default(), Duration::ZERO);
        let mut source = ScriptedByteSource::default().bytes(b"\x1b[D");
        assert_eq!(decode_all(&mut decoder, &mut source), vec![
            InputEvent::Key(Key::Unknown(0x1b)),
            InputEvent::Key(Key::Char(b'[')),
            InputEvent::Key(Key::Char(b'D')),
            InputEvent::EndOfInput,
        ]);
    }
}
