// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use super::{ColorTag, EditSession, ScreenPos};
use crate::ok;

impl EditSession {
    /// Let the highlighter recolor the current text.
    pub(crate) fn refresh_annotations(&mut self) {
        self.overlay
            .refresh(self.line.as_bytes(), self.highlighter.as_mut());
    }

    /// Re-render the whole line from its origin and put the cursor back at the edit
    /// offset. Anything left over from a longer previous render is cleared.
    ///
    /// Two redraws without an edit in between emit the same bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `term` fails.
    pub fn redraw(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let saved = self.offset_position();

        self.cursor.move_to(ScreenPos::ORIGIN, &self.caps, term)?;

        let mut active_color: Option<ColorTag> = None;
        for (index, &byte) in self.line.as_bytes().iter().enumerate() {
            if self.colors_enabled {
                let wanted_color = self.overlay.color_at(index);
                if wanted_color != active_color {
                    match wanted_color {
                        Some(ColorTag(code)) => self.caps.write_set_foreground(code, term)?,
                        None => self.caps.write_reset_color(term)?,
                    }
                    active_color = wanted_color;
                }
            }
            term.write_all(&[byte])?;
            self.cursor
                .advance_after_print(&self.metrics, &self.caps, term)?;
        }

        if active_color.is_some() {
            self.caps.write_reset_color(term)?;
        }
        self.caps.write_clr_eol(term)?;

        self.cursor.move_to(saved, &self.caps, term)?;
        ok!()
    }

    /// Move the cursor to the edit offset, without re-rendering.
    pub(crate) fn move_cursor_to_offset(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let target = self.offset_position();
        self.cursor.move_to(target, &self.caps, term)
    }
}
