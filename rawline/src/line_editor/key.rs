// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Logical key produced by the [`super::KeyDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A byte to insert into the line, including bytes `>= 0x80`.
    Char(u8),
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    Home,
    End,
    Delete,
    Backspace,
    Enter,
    /// Ctrl+C.
    Interrupt,
    /// Ctrl+D.
    EndOfFile,
    /// A control byte with no meaning to the editor.
    Unknown(u8),
}

impl Key {
    /// Meaning of a byte that doesn't start any known multi-byte sequence.
    #[must_use]
    pub fn from_single_byte(byte: u8) -> Self {
        match byte {
            0x20..=0x7e | 0x80..=0xff => Key::Char(byte),
            0x7f | 0x08 => Key::Backspace,
            b'\r' | b'\n' => Key::Enter,
            0x03 => Key::Interrupt,
            0x04 => Key::EndOfFile,
            0x01 => Key::Home,
            0x05 => Key::End,
            _ => Key::Unknown(byte),
        }
    }
}
