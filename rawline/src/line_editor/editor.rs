// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io::Write,
          time::Duration};

use super::{AnnotationOverlay, CursorTracker, DEFAULT_ESCAPE_TIMEOUT, Highlighter, Key,
            KeyDecoder, KeyTable, LineBuffer, LineEditorError, ScreenPos,
            offset_to_screen};
use crate::{Capabilities, TerminalMetrics, ok};

/// Per session settings. The defaults fit an interactive ANSI terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Keys that end the session with [`EditorEvent::Line`].
    pub terminators: Vec<Key>,
    /// How long the decoder waits for the rest of an escape sequence.
    pub escape_timeout: Duration,
    /// When `false` no color sequences are emitted, whatever the highlighter says.
    pub colors_enabled: bool,
    pub key_table: KeyTable,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            terminators: vec![Key::Enter],
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
            colors_enabled: true,
            key_table: KeyTable::ansi_default(),
        }
    }
}

/// What happened as the result of one step of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A terminator key was pressed. Carries the finished line, byte for byte as it
    /// was typed.
    Line(Vec<u8>),
    /// Ctrl+D on an empty line, or the input was closed.
    Eof,
    /// Ctrl+C.
    Interrupted,
    /// The terminal was resized and the line re-rendered.
    Resized,
    /// A key with no editing meaning. Nothing changed.
    Ignored(Key),
}

impl EditorEvent {
    /// The session is over and the line has been handed back.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EditorEvent::Line(_) | EditorEvent::Eof | EditorEvent::Interrupted
        )
    }
}

/// All the state of one line being edited: the text, its colors, the edit offset, the
/// believed hardware cursor, and the terminal it is rendered on.
///
/// There is no global state, so a host is free to run several sessions one after the
/// other (or on different terminals). When a session ends its text is handed back and
/// it is left empty, with the cursor at the start of a fresh row, ready to read the
/// next line.
pub struct EditSession {
    pub(crate) line: LineBuffer,
    pub(crate) overlay: AnnotationOverlay,
    pub(crate) offset: usize,
    pub(crate) cursor: CursorTracker,
    pub(crate) metrics: TerminalMetrics,
    pub(crate) caps: Capabilities,
    pub(crate) highlighter: Box<dyn Highlighter>,
    pub(crate) decoder: KeyDecoder,
    pub(crate) terminators: Vec<Key>,
    pub(crate) colors_enabled: bool,
}

impl Debug for EditSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("line", &self.line)
            .field("offset", &self.offset)
            .field("cursor", &self.cursor)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl EditSession {
    /// Set up a session without touching the terminal. The edit offset starts at the
    /// end of `initial_text`. Call [`EditSession::start`] to render it.
    #[must_use]
    pub fn new(
        initial_text: &str,
        highlighter: impl Highlighter + 'static,
        caps: Capabilities,
        metrics: TerminalMetrics,
        options: EditorOptions,
    ) -> Self {
        let line = LineBuffer::from(initial_text);
        let offset = line.len();
        Self {
            line,
            overlay: AnnotationOverlay::default(),
            offset,
            cursor: CursorTracker::default(),
            metrics,
            caps,
            highlighter: Box::new(highlighter),
            decoder: KeyDecoder::new(options.key_table, options.escape_timeout),
            terminators: options.terminators,
            colors_enabled: options.colors_enabled,
        }
    }

    /// Render the line starting at the beginning of the cursor's row, and leave the
    /// cursor at the edit offset.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `term` fails.
    pub fn start(&mut self, term: &mut dyn Write) -> Result<(), LineEditorError> {
        self.caps.write_carriage_return(term)?;
        self.cursor.reset();
        self.refresh_annotations();
        self.redraw(term)?;
        term.flush()?;
        ok!()
    }

    #[must_use]
    pub fn text(&self) -> &[u8] { self.line.as_bytes() }

    #[must_use]
    pub fn offset(&self) -> usize { self.offset }

    /// Believed position of the hardware cursor, relative to the line's origin.
    #[must_use]
    pub fn cursor(&self) -> ScreenPos { self.cursor.pos() }

    #[must_use]
    pub fn metrics(&self) -> TerminalMetrics { self.metrics }

    #[must_use]
    pub fn overlay(&self) -> &AnnotationOverlay { &self.overlay }

    /// Screen cell of the edit offset under the current width.
    #[must_use]
    pub fn offset_position(&self) -> ScreenPos {
        offset_to_screen(self.offset, self.metrics.width())
    }
}
