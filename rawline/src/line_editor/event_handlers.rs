// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One step of the edit loop: apply a [`Key`] to the session and update the terminal.
//!
//! Cursor-only keys just move the cursor. Keys that change the text re-run the
//! highlighter and redraw. Terminating keys hand the line back.

use std::io::Write;

use super::{EditSession, EditorEvent, Key, LineEditorError};
use crate::{Movement, ok};

impl EditSession {
    /// Apply one key. Returns `Ok(None)` while editing continues.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `term` fails.
    pub fn apply_key(
        &mut self,
        key: Key,
        term: &mut dyn Write,
    ) -> Result<Option<EditorEvent>, LineEditorError> {
        if self.terminators.contains(&key) {
            let line = self.finish_line(term)?;
            return Ok(Some(EditorEvent::Line(line)));
        }

        let maybe_event = match key {
            Key::Char(byte) => {
                self.handle_insert(byte, term)?;
                None
            }
            Key::CursorLeft => {
                if self.offset > 0 {
                    self.offset -= 1;
                    self.move_cursor_to_offset(term)?;
                }
                None
            }
            Key::CursorRight => {
                if self.offset < self.line.len() {
                    self.offset += 1;
                    self.move_cursor_to_offset(term)?;
                }
                None
            }
            Key::Home => {
                self.offset = 0;
                self.move_cursor_to_offset(term)?;
                None
            }
            Key::End => {
                self.offset = self.line.len();
                self.move_cursor_to_offset(term)?;
                None
            }
            Key::Delete => {
                self.handle_delete(term)?;
                None
            }
            Key::Backspace => {
                if self.offset > 0 {
                    self.offset -= 1;
                    self.handle_delete(term)?;
                }
                None
            }
            Key::EndOfFile if self.line.is_empty() => {
                self.finish_line(term)?;
                Some(EditorEvent::Eof)
            }
            Key::EndOfFile => {
                self.handle_delete(term)?;
                None
            }
            Key::Interrupt => {
                self.finish_line(term)?;
                Some(EditorEvent::Interrupted)
            }
            Key::CursorUp | Key::CursorDown | Key::Enter | Key::Unknown(_) => {
                Some(EditorEvent::Ignored(key))
            }
        };

        term.flush()?;
        Ok(maybe_event)
    }

    fn handle_insert(&mut self, byte: u8, term: &mut dyn Write) -> Result<(), LineEditorError> {
        self.line.insert(self.offset, byte);
        self.offset += 1;
        self.refresh_annotations();
        self.redraw(term)?;
        ok!()
    }

    fn handle_delete(&mut self, term: &mut dyn Write) -> Result<(), LineEditorError> {
        if self.offset >= self.line.len() {
            tracing::debug!(
                message = "line editor: nothing to delete",
                offset = self.offset
            );
            return ok!();
        }
        self.line.delete(self.offset)?;
        self.refresh_annotations();
        self.redraw(term)?;
        ok!()
    }

    /// Park the cursor after the last character, move to the start of a fresh row, and
    /// reset the session for the next line. Returns the text of the finished line.
    pub(crate) fn finish_line(
        &mut self,
        term: &mut dyn Write,
    ) -> Result<Vec<u8>, LineEditorError> {
        self.offset = self.line.len();
        self.move_cursor_to_offset(term)?;

        // A full last row has already wrapped the cursor onto a fresh one.
        let already_on_fresh_row = self.cursor.pos().col == 0 && !self.line.is_empty();
        if !already_on_fresh_row {
            self.caps.write_carriage_return(term)?;
            self.caps.write_movement(Movement::Down, 1, term)?;
        }

        tracing::debug!(message = "line editor: line finished", length = self.line.len());

        let line = self.line.take();
        self.offset = 0;
        self.cursor.reset();
        term.flush()?;
        ok!(line)
    }
}
