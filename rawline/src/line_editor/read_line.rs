// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use super::{EditSession, EditorEvent, InputEvent, LineEditorError};
use crate::{ByteSource, MetricsProvider};

impl EditSession {
    /// Run the edit loop until the line is finished. Returns [`EditorEvent::Line`],
    /// [`EditorEvent::Interrupted`] or [`EditorEvent::Eof`].
    ///
    /// Resizes are handled in between keys, by re-measuring the terminal with
    /// `metrics_provider`. If that fails the old metrics are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `source` or writing to `term` fails.
    pub fn read_line(
        &mut self,
        source: &mut dyn ByteSource,
        metrics_provider: &mut dyn MetricsProvider,
        term: &mut dyn Write,
    ) -> Result<EditorEvent, LineEditorError> {
        loop {
            match self.decoder.next_event(source)? {
                InputEvent::Key(key) => match self.apply_key(key, term)? {
                    Some(event) if event.is_terminal() => return Ok(event),
                    Some(event) => {
                        tracing::debug!(message = "line editor: ignored", ?event);
                    }
                    None => {}
                },
                InputEvent::Resize => match metrics_provider.current_metrics() {
                    Ok(metrics) => self.on_resize(metrics, term)?,
                    Err(error) => {
                        tracing::warn!(
                            message = "line editor: resize without new metrics",
                            ?error
                        );
                    }
                },
                InputEvent::EndOfInput => {
                    // Same as Ctrl+D on an empty line, whatever is in the buffer.
                    self.finish_line(term)?;
                    return Ok(EditorEvent::Eof);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::{Capabilities, ColorTag, EditSession, EditorEvent, EditorOptions,
                FixedMetrics, MetricsProvider, NoHighlight, ScriptedByteSource,
                StdoutMock, TerminalMetrics, WrapPolicy};
    use pretty_assertions::assert_eq;

    fn metrics(width: usize) -> TerminalMetrics {
        TerminalMetrics::new(width, 24, WrapPolicy::XTERM)
    }

    fn session(initial_text: &str, width: usize) -> EditSession {
        EditSession::new(
            initial_text,
            NoHighlight,
            Capabilities::ansi(),
            metrics(width),
            EditorOptions::default(),
        )
    }

    #[test]
    fn test_read_line_with_arrow_keys() {
        let mut session = session("", 20);
        let mut out = StdoutMock::new();
        session.start(&mut out).unwrap();

        // "helo", left, insert "l", end, "!" enter.
        let mut source = ScriptedByteSource::default().bytes(b"helo\x1b[Dl\x1bOF!\r");
        let event = session
            .read_line(&mut source, &mut FixedMetrics(metrics(20)), &mut out)
            .unwrap();

        assert_eq!(event, EditorEvent::Line(b"hello!".to_vec()));
        assert!(out.get_copy_of_buffer_as_string_strip_ansi().contains("hello!"));
    }

    #[test]
    fn test_read_line_handles_resize() {
        let mut session = session("abcdef", 80);
        let mut out = StdoutMock::new();
        session.start(&mut out).unwrap();

        let mut source = ScriptedByteSource::default().resize().bytes(b"\x1b[D");
        let mut provider = FixedMetrics(metrics(4));
        let event = session.read_line(&mut source, &mut provider, &mut out).unwrap();

        assert_eq!(event, EditorEvent::Eof);
        assert_eq!(session.metrics(), metrics(4));
    }

    #[test]
    fn test_resize_then_keep_editing() {
        let mut session = session("abcdef", 80);
        let mut out = StdoutMock::new();
        session.start(&mut out).unwrap();

        let mut source = ScriptedByteSource::default()
            .resize()
            .bytes(b"\x1b[D\x7f\r");
        let event = session
            .read_line(&mut source, &mut FixedMetrics(metrics(4)), &mut out)
            .unwrap();
        assert_eq!(event, EditorEvent::Line(b"abcdf".to_vec()));
    }

    #[test]
    fn test_end_of_input_leaves_cursor_on_fresh_row() {
        let mut session = session("", 20);
        let mut out = StdoutMock::new();
        session.start(&mut out).unwrap();

        let mut source = ScriptedByteSource::default().bytes(b"ab");
        let event = session
            .read_line(&mut source, &mut FixedMetrics(metrics(20)), &mut out)
            .unwrap();

        assert_eq!(event, EditorEvent::Eof);
        assert!(out.get_copy_of_buffer_as_string().ends_with("\x1b[K\r\n"));
        assert!(out.get_copy_of_buffer_as_string_strip_ansi().contains("ab"));
        assert!(session.text().is_empty());
        assert_eq!(session.offset(), 0);
    }

    #[test]
    fn test_failed_metrics_keep_old_ones() {
        struct Broken;
        impl MetricsProvider for Broken {
            fn current_metrics(&mut self) -> io::Result<TerminalMetrics> {
                Err(io::Error::other("no tty"))
            }
        }

        let mut session = session("ab", 30);
        let mut out = StdoutMock::new();
        let mut source = ScriptedByteSource::default().resize().bytes(b"c\r");
        let event = session.read_line(&mut source, &mut Broken, &mut out).unwrap();

        assert_eq!(event, EditorEvent::Line(b"abc".to_vec()));
        assert_eq!(session.metrics(), metrics(30));
    }

    #[test]
    fn test_interrupt_and_unknown_bytes() {
        let mut session = session("", 30);
        let mut out = StdoutMock::new();
        let mut source = ScriptedByteSource::default().bytes(b"a\x07\x1b[Ab\x03");
        let event = session
            .read_line(&mut source, &mut FixedMetrics(metrics(30)), &mut out)
            .unwrap();
        assert_eq!(event, EditorEvent::Interrupted);
    }

    #[test]
    fn test_session_reads_consecutive_lines() {
        let mut session = session("", 30);
        let mut out = StdoutMock::new();
        let mut source = ScriptedByteSource::default().bytes(b"one\rtwo\r\x04");
        let mut provider = FixedMetrics(metrics(30));

        let mut lines = vec![];
        loop {
            match session.read_line(&mut source, &mut provider, &mut out).unwrap() {
                EditorEvent::Line(line) => lines.push(line),
                other => {
                    assert_eq!(other, EditorEvent::Eof);
                    break;
                }
            }
        }
        assert_eq!(lines, vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_highlighter_sees_every_edit() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::<Vec<u8>>::new()));
        let seen_by_highlighter = seen.clone();
        let mut session = EditSession::new(
            "",
            move |text: &[u8], colors: &mut [Option<ColorTag>]| {
                seen_by_highlighter.borrow_mut().push(text.to_vec());
                colors.fill(Some(ColorTag(2)));
            },
            Capabilities::ansi(),
            metrics(30),
            EditorOptions::default(),
        );
        let mut out = StdoutMock::new();
        let mut source = ScriptedByteSource::default().bytes(b"ab\x7f\r");
        session
            .read_line(&mut source, &mut FixedMetrics(metrics(30)), &mut out)
            .unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![b"a".to_vec(), b"ab".to_vec(), b"a".to_vec()]
        );
        assert!(out.get_copy_of_buffer_as_string().contains("\x1b[32m"));
    }
}
