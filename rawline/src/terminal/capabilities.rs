// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Capability primitives consumed by the renderer and the cursor tracker.
//!
//! Every primitive is optional. A missing bulk form ("move N") degrades to repeating the
//! single step form, and a missing single step form skips the movement entirely. Nothing
//! here ever fails because the terminal is less capable than expected.

use std::io::{self, Write};

use crate::ok;

const CSI: &[u8] = b"\x1b[";

/// The four directions the cursor can be moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Up,
    Down,
    Left,
    Right,
}

/// A parameterized escape sequence: `prefix`, the decimal parameter, then `suffix`.
/// Covers both `ESC [ n A` style bulk movement and `ESC [ 38 ; 5 ; n m` style colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSequence {
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
}

impl ParamSequence {
    /// `ESC [ <n> <final_byte>`.
    #[must_use]
    pub fn csi(final_byte: u8) -> Self {
        Self {
            prefix: CSI.to_vec(),
            suffix: vec![final_byte],
        }
    }

    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write(&self, param: usize, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(&self.prefix)?;
        write!(out, "{param}")?;
        out.write_all(&self.suffix)
    }
}

/// How foreground colors are selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSequence {
    /// `ESC [ 3 n m` for the 8 basic colors, `ESC [ 38 ; 5 ; n m` for everything else.
    Ansi256,
    /// A single parameterized sequence used for every color code.
    Param(ParamSequence),
}

impl ColorSequence {
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write(&self, code: u8, out: &mut dyn Write) -> io::Result<()> {
        match self {
            ColorSequence::Ansi256 if code < 8 => write!(out, "\x1b[3{code}m"),
            ColorSequence::Ansi256 => write!(out, "\x1b[38;5;{code}m"),
            ColorSequence::Param(sequence) => sequence.write(usize::from(code), out),
        }
    }
}

/// Terminal wrap behavior at the right margin.
///
/// - `auto_right_margin` (terminfo `am`): printing in the last column moves the cursor
///   to the start of the next row.
/// - `eat_newline_glitch` (terminfo `xn`): the wrap is deferred until the next printable
///   character, and a newline emitted right at the boundary is swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapPolicy {
    pub auto_right_margin: bool,
    pub eat_newline_glitch: bool,
}

impl WrapPolicy {
    /// Policy of xterm and virtually every modern terminal emulator.
    pub const XTERM: Self = Self {
        auto_right_margin: true,
        eat_newline_glitch: true,
    };

    /// When the cursor fills the last column, does the renderer have to move it to the
    /// next row itself? True unless the terminal wraps immediately on its own.
    #[must_use]
    pub fn needs_explicit_wrap(&self) -> bool {
        !self.auto_right_margin || self.eat_newline_glitch
    }
}

/// Table of terminal primitives. Plain data, so hosts can build one for any terminal
/// (or strip entries out to exercise the fallbacks).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub cursor_up: Option<Vec<u8>>,
    pub cursor_down: Option<Vec<u8>>,
    pub cursor_left: Option<Vec<u8>>,
    pub cursor_right: Option<Vec<u8>>,
    pub parm_up: Option<ParamSequence>,
    pub parm_down: Option<ParamSequence>,
    pub parm_left: Option<ParamSequence>,
    pub parm_right: Option<ParamSequence>,
    pub carriage_return: Option<Vec<u8>>,
    pub clr_eol: Option<Vec<u8>>,
    pub clear_screen: Option<Vec<u8>>,
    pub set_foreground: Option<ColorSequence>,
    pub reset_color: Option<Vec<u8>>,
}

impl Capabilities {
    /// VT100 / xterm primitives, including the bulk movement forms.
    #[must_use]
    pub fn ansi() -> Self {
        Self {
            parm_up: Some(ParamSequence::csi(b'A')),
            parm_down: Some(ParamSequence::csi(b'B')),
            parm_right: Some(ParamSequence::csi(b'C')),
            parm_left: Some(ParamSequence::csi(b'D')),
            ..Self::single_step()
        }
    }

    /// [`Capabilities::ansi`] without any bulk movement form. Every movement of N
    /// columns or rows costs N single steps.
    #[must_use]
    pub fn single_step() -> Self {
        Self {
            cursor_up: Some(b"\x1b[A".to_vec()),
            cursor_down: Some(b"\n".to_vec()),
            cursor_left: Some(b"\x08".to_vec()),
            cursor_right: Some(b"\x1b[C".to_vec()),
            parm_up: None,
            parm_down: None,
            parm_left: None,
            parm_right: None,
            carriage_return: Some(b"\r".to_vec()),
            clr_eol: Some(b"\x1b[K".to_vec()),
            clear_screen: Some(b"\x1b[H\x1b[2J".to_vec()),
            set_foreground: Some(ColorSequence::Ansi256),
            reset_color: Some(b"\x1b[0m".to_vec()),
        }
    }

    #[must_use]
    pub fn single(&self, movement: Movement) -> Option<&[u8]> {
        match movement {
            Movement::Up => self.cursor_up.as_deref(),
            Movement::Down => self.cursor_down.as_deref(),
            Movement::Left => self.cursor_left.as_deref(),
            Movement::Right => self.cursor_right.as_deref(),
        }
    }

    #[must_use]
    pub fn bulk(&self, movement: Movement) -> Option<&ParamSequence> {
        match movement {
            Movement::Up => self.parm_up.as_ref(),
            Movement::Down => self.parm_down.as_ref(),
            Movement::Left => self.parm_left.as_ref(),
            Movement::Right => self.parm_right.as_ref(),
        }
    }

    /// Move the hardware cursor `count` cells. Uses one bulk sequence when available
    /// (and `count > 1`), otherwise repeats the single step. When neither exists the
    /// movement is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_movement(
        &self,
        movement: Movement,
        count: usize,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        if count == 0 {
            return ok!();
        }

        let single = self.single(movement);
        if let Some(bulk) = self.bulk(movement)
            && (count > 1 || single.is_none())
        {
            return bulk.write(count, out);
        }

        match single {
            Some(single) => {
                for _ in 0..count {
                    out.write_all(single)?;
                }
                ok!()
            }
            None => {
                tracing::debug!(
                    message = "capability missing, movement skipped",
                    ?movement,
                    count
                );
                ok!()
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_carriage_return(&self, out: &mut dyn Write) -> io::Result<()> {
        write_optional(self.carriage_return.as_deref(), out)
    }

    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_clr_eol(&self, out: &mut dyn Write) -> io::Result<()> {
        write_optional(self.clr_eol.as_deref(), out)
    }

    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_clear_screen(&self, out: &mut dyn Write) -> io::Result<()> {
        write_optional(self.clear_screen.as_deref(), out)
    }

    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_set_foreground(&self, code: u8, out: &mut dyn Write) -> io::Result<()> {
        match &self.set_foreground {
            Some(sequence) => sequence.write(code, out),
            None => ok!(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_reset_color(&self, out: &mut dyn Write) -> io::Result<()> {
        write_optional(self.reset_color.as_deref(), out)
    }
}

fn write_optional(sequence: Option<&[u8]>, out: &mut dyn Write) -> io::Result<()> {
    match sequence {
        Some(bytes) => out.write_all(bytes),
        None => ok!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn emitted(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Vec<u8> {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        out
    }

    #[test_case(Movement::Up, 3, b"\x1b[3A" ; "up")]
    #[test_case(Movement::Down, 2, b"\x1b[2B" ; "down")]
    #[test_case(Movement::Right, 12, b"\x1b[12C" ; "right")]
    #[test_case(Movement::Left, 5, b"\x1b[5D" ; "left")]
    fn test_bulk_movement(movement: Movement, count: usize, expected: &[u8]) {
        let caps = Capabilities::ansi();
        let out = emitted(|out| caps.write_movement(movement, count, out));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_single_step_for_one_cell_even_with_bulk() {
        let caps = Capabilities::ansi();
        let out = emitted(|out| caps.write_movement(Movement::Left, 1, out));
        assert_eq!(out, b"\x08");
    }

    #[test]
    fn test_repeats_single_step_without_bulk() {
        let caps = Capabilities::single_step();
        let out = emitted(|out| caps.write_movement(Movement::Right, 3, out));
        assert_eq!(out, b"\x1b[C\x1b[C\x1b[C");
    }

    #[test]
    fn test_bulk_only_used_for_single_cell() {
        let caps = Capabilities {
            cursor_up: None,
            ..Capabilities::ansi()
        };
        let out = emitted(|out| caps.write_movement(Movement::Up, 1, out));
        assert_eq!(out, b"\x1b[1A");
    }

    #[test]
    fn test_missing_primitive_skips_movement() {
        let caps = Capabilities::default();
        let out = emitted(|out| caps.write_movement(Movement::Down, 4, out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_count_emits_nothing() {
        let caps = Capabilities::ansi();
        let out = emitted(|out| caps.write_movement(Movement::Right, 0, out));
        assert!(out.is_empty());
    }

    #[test_case(1, b"\x1b[31m" ; "basic color")]
    #[test_case(7, b"\x1b[37m" ; "last basic color")]
    #[test_case(208, b"\x1b[38;5;208m" ; "indexed color")]
    fn test_ansi_foreground(code: u8, expected: &[u8]) {
        let caps = Capabilities::ansi();
        let out = emitted(|out| caps.write_set_foreground(code, out));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_wrap_policy() {
        assert!(WrapPolicy::XTERM.needs_explicit_wrap());
        assert!(WrapPolicy::default().needs_explicit_wrap());
        assert!(
            !WrapPolicy {
                auto_right_margin: true,
                eat_newline_glitch: false,
            }
            .needs_explicit_wrap()
        );
    }
}
