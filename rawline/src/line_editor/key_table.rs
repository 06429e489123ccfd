// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;

use super::Key;

/// Escape sequences are short. This is enough to keep every sequence in the default
/// table on the stack.
pub const KEY_SEQUENCE_INLINE_CAPACITY: usize = 8;

pub type KeySequence = SmallVec<[u8; KEY_SEQUENCE_INLINE_CAPACITY]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub sequence: KeySequence,
    pub key: Key,
}

/// How a buffer of accumulated bytes relates to the sequences in a [`KeyTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefixMatch {
    /// The key whose sequence equals the buffer, if any.
    pub exact: Option<Key>,
    /// Whether some longer sequence starts with the buffer.
    pub extendable: bool,
}

impl PrefixMatch {
    /// The buffer is still worth accumulating into.
    #[must_use]
    pub fn is_candidate(&self) -> bool { self.exact.is_some() || self.extendable }
}

/// Declarative table of `(byte sequence, key)` pairs. The decoder resolves every entry
/// with the same algorithm, so supporting another terminal is a matter of adding rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyTable {
    bindings: Vec<KeyBinding>,
}

impl KeyTable {
    /// Arrows in CSI (`ESC [`) and SS3 (`ESC O`) form, the Home and End variants sent by
    /// common terminals, and Delete.
    #[must_use]
    pub fn ansi_default() -> Self {
        let mut table = Self::default();
        for (final_byte, key) in [
            (b'A', Key::CursorUp),
            (b'B', Key::CursorDown),
            (b'C', Key::CursorRight),
            (b'D', Key::CursorLeft),
            (b'H', Key::Home),
            (b'F', Key::End),
        ] {
            table.bind(&[0x1b, b'[', final_byte], key);
            table.bind(&[0x1b, b'O', final_byte], key);
        }
        table.bind(b"\x1b[1~", Key::Home);
        table.bind(b"\x1b[4~", Key::End);
        table.bind(b"\x1b[3~", Key::Delete);
        table
    }

    /// Add a binding. A later binding for the same sequence replaces the earlier one.
    /// Empty sequences are ignored.
    pub fn bind(&mut self, sequence: &[u8], key: Key) {
        if sequence.is_empty() {
            return;
        }
        match self
            .bindings
            .iter_mut()
            .find(|binding| binding.sequence.as_slice() == sequence)
        {
            Some(binding) => binding.key = key,
            None => self.bindings.push(KeyBinding {
                sequence: SmallVec::from_slice(sequence),
                key,
            }),
        }
    }

    #[must_use]
    pub fn with_binding(mut self, sequence: &[u8], key: Key) -> Self {
        self.bind(sequence, key);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize { self.bindings.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    /// Does any sequence start with `byte`?
    #[must_use]
    pub fn starts_sequence(&self, byte: u8) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.sequence.first() == Some(&byte))
    }

    #[must_use]
    pub fn lookup(&self, buffer: &[u8]) -> PrefixMatch {
        let mut result = PrefixMatch::default();
        for binding in &self.bindings {
            let sequence = binding.sequence.as_slice();
            if sequence == buffer {
                result.exact = Some(binding.key);
            } else if sequence.starts_with(buffer) {
                result.extendable = true;
            }
        }
        result
    }
}
