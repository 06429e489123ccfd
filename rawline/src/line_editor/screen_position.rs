// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Where characters of the line land on screen, and where the hardware cursor is
//! believed to be. Rows and columns are relative to the line's origin (the cell where
//! its first character is printed), and the line wraps every `width` columns.

use std::io::{self, Write};

use crate::{Capabilities, Movement, TerminalMetrics, ok};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPos {
    pub row: usize,
    pub col: usize,
}

impl ScreenPos {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self { Self { row, col } }
}

/// Screen cell of the character at `offset` (or of the cursor parked at `offset`).
#[must_use]
pub fn offset_to_screen(offset: usize, width: usize) -> ScreenPos {
    let width = width.max(1);
    ScreenPos::new(offset / width, offset % width)
}

#[must_use]
pub fn screen_to_offset(pos: ScreenPos, width: usize) -> usize {
    pos.row * width.max(1) + pos.col
}

/// Believed position of the hardware cursor. Everything that moves the real cursor
/// goes through here, so the belief stays true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorTracker {
    pos: ScreenPos,
}

impl CursorTracker {
    #[must_use]
    pub fn pos(&self) -> ScreenPos { self.pos }

    /// Forget the belief, because something outside (a clear screen, a fresh row) put
    /// the cursor back at the origin.
    pub fn reset(&mut self) { self.pos = ScreenPos::ORIGIN; }

    /// Emit the movements that take the cursor from its believed position to `target`.
    ///
    /// Rows move straight up or down. Columns move directly, except that a carriage
    /// return is used when the target is column 0, or when going through column 0 is
    /// shorter than stepping left one cell at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn move_to(
        &mut self,
        target: ScreenPos,
        caps: &Capabilities,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let from = self.pos;

        if target.row > from.row {
            caps.write_movement(Movement::Down, target.row - from.row, out)?;
        } else if target.row < from.row {
            caps.write_movement(Movement::Up, from.row - target.row, out)?;
        }

        if target.col > from.col {
            caps.write_movement(Movement::Right, target.col - from.col, out)?;
        } else if target.col < from.col {
            let distance = from.col - target.col;
            let has_carriage_return = caps.carriage_return.is_some();
            if has_carriage_return && target.col == 0 {
                caps.write_carriage_return(out)?;
            } else if has_carriage_return && homing_is_shorter(caps, target.col, distance) {
                caps.write_carriage_return(out)?;
                caps.write_movement(Movement::Right, target.col, out)?;
            } else {
                caps.write_movement(Movement::Left, distance, out)?;
            }
        }

        self.pos = target;
        ok!()
    }

    /// Account for one printed character. When it filled the last column the cursor
    /// belongs on the next row; if the terminal won't put it there on its own, do it
    /// explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn advance_after_print(
        &mut self,
        metrics: &TerminalMetrics,
        caps: &Capabilities,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        self.pos.col += 1;
        if self.pos.col >= metrics.width() {
            self.pos = ScreenPos::new(self.pos.row + 1, 0);
            if metrics.wrap_policy.needs_explicit_wrap() {
                caps.write_carriage_return(out)?;
                caps.write_movement(Movement::Down, 1, out)?;
            }
        }
        ok!()
    }
}

/// Only single steps have a cost proportional to the distance. Going via column 0
/// costs a carriage return plus `target_col` steps right.
fn homing_is_shorter(caps: &Capabilities, target_col: usize, distance: usize) -> bool {
    caps.bulk(Movement::Left).is_none()
        && (caps.single(Movement::Right).is_some() || caps.bulk(Movement::Right).is_some())
        && target_col < distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WrapPolicy;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn move_and_capture(from: ScreenPos, to: ScreenPos, caps: &Capabilities) -> Vec<u8> {
        let mut tracker = CursorTracker { pos: from };
        let mut out = Vec::new();
        tracker.move_to(to, caps, &mut out).unwrap();
        assert_eq!(tracker.pos(), to);
        out
    }

    #[test_case(0, 10, ScreenPos::new(0, 0) ; "start")]
    #[test_case(9, 10, ScreenPos::new(0, 9) ; "last column")]
    #[test_case(10, 10, ScreenPos::new(1, 0) ; "ten characters wrap")]
    #[test_case(25, 10, ScreenPos::new(2, 5) ; "third row")]
    #[test_case(3, 0, ScreenPos::new(3, 0) ; "zero width is treated as one")]
    fn test_offset_to_screen(offset: usize, width: usize, expected: ScreenPos) {
        assert_eq!(offset_to_screen(offset, width), expected);
        assert_eq!(screen_to_offset(expected, width), offset);
    }

    #[test]
    fn test_move_bulk() {
        let out = move_and_capture(
            ScreenPos::new(2, 3),
            ScreenPos::new(0, 7),
            &Capabilities::ansi(),
        );
        assert_eq!(out, b"\x1b[2A\x1b[4C");
    }

    #[test]
    fn test_move_to_column_zero_uses_carriage_return() {
        let out = move_and_capture(
            ScreenPos::new(1, 15),
            ScreenPos::new(0, 0),
            &Capabilities::ansi(),
        );
        assert_eq!(out, b"\x1b[A\r");
    }

    #[test]
    fn test_move_left_steps_when_closer() {
        let out = move_and_capture(
            ScreenPos::new(0, 9),
            ScreenPos::new(0, 7),
            &Capabilities::single_step(),
        );
        assert_eq!(out, b"\x08\x08");
    }

    #[test]
    fn test_move_left_homes_when_origin_is_closer() {
        let out = move_and_capture(
            ScreenPos::new(0, 9),
            ScreenPos::new(0, 2),
            &Capabilities::single_step(),
        );
        assert_eq!(out, b"\r\x1b[C\x1b[C");
    }

    #[test]
    fn test_move_left_bulk_never_homes() {
        let out = move_and_capture(
            ScreenPos::new(0, 9),
            ScreenPos::new(0, 2),
            &Capabilities::ansi(),
        );
        assert_eq!(out, b"\x1b[7D");
    }

    #[test]
    fn test_move_without_carriage_return() {
        let caps = Capabilities {
            carriage_return: None,
            ..Capabilities::single_step()
        };
        let out = move_and_capture(ScreenPos::new(0, 3), ScreenPos::new(0, 0), &caps);
        assert_eq!(out, b"\x08\x08\x08");
    }

    #[test]
    fn test_move_to_same_position_is_silent() {
        let pos = ScreenPos::new(1, 4);
        assert!(move_and_capture(pos, pos, &Capabilities::ansi()).is_empty());
    }

    #[test_case(WrapPolicy::XTERM, b"\r\n" ; "newline glitch")]
    #[test_case(WrapPolicy { auto_right_margin: false, eat_newline_glitch: false }, b"\r\n" ; "no auto wrap")]
    #[test_case(WrapPolicy { auto_right_margin: true, eat_newline_glitch: false }, b"" ; "terminal wraps by itself")]
    fn test_advance_wraps(wrap_policy: WrapPolicy, expected: &[u8]) {
        let metrics = TerminalMetrics::new(3, 10, wrap_policy);
        let caps = Capabilities::ansi();
        let mut tracker = CursorTracker::default();
        let mut out = Vec::new();
        for _ in 0..3 {
            tracker.advance_after_print(&metrics, &caps, &mut out).unwrap();
        }
        assert_eq!(tracker.pos(), ScreenPos::new(1, 0));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_advance_wraps_with_bulk_down_only() {
        let metrics = TerminalMetrics::new(3, 10, WrapPolicy::XTERM);
        let caps = Capabilities {
            cursor_down: None,
            ..Capabilities::ansi()
        };
        let mut tracker = CursorTracker::default();
        let mut out = Vec::new();
        for _ in 0..3 {
            tracker.advance_after_print(&metrics, &caps, &mut out).unwrap();
        }
        assert_eq!(tracker.pos(), ScreenPos::new(1, 0));
        assert_eq!(out, b"\r\x1b[1B");
    }
}
