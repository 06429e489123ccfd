// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use super::{EditSession, LineEditorError};
use crate::{TerminalMetrics, ok};

impl EditSession {
    /// Adopt new terminal metrics and re-render from scratch.
    ///
    /// After a resize the terminal may have reflowed the old rows in ways that can't be
    /// predicted, so the belief about the cursor is dropped: the screen is cleared
    /// (homing the cursor) and the line is drawn again from the top left corner.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `term` fails.
    pub fn on_resize(
        &mut self,
        metrics: TerminalMetrics,
        term: &mut dyn Write,
    ) -> Result<(), LineEditorError> {
        tracing::debug!(
            message = "line editor: resize",
            width = metrics.width(),
            height = metrics.height()
        );

        self.metrics = metrics;
        let target = self.offset_position();

        self.cursor.reset();
        self.caps.write_clear_screen(term)?;
        self.redraw(term)?;
        self.cursor.move_to(target, &self.caps, term)?;
        term.flush()?;

        ok!()
    }
}
