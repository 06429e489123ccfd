// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::LineBufferError;

/// The text being edited, one byte per character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: Vec<u8>,
}

impl From<&str> for LineBuffer {
    fn from(value: &str) -> Self {
        Self {
            text: value.as_bytes().to_vec(),
        }
    }
}

impl LineBuffer {
    #[must_use]
    pub fn len(&self) -> usize { self.text.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.text }

    /// Insert `byte` before the character at `offset`. An offset past the end appends.
    pub fn insert(&mut self, offset: usize, byte: u8) {
        let offset = offset.min(self.text.len());
        self.text.insert(offset, byte);
    }

    /// Remove and return the character at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LineBufferError::NothingToDelete`] if `offset` is not before the end of
    /// the line. The buffer is left untouched.
    pub fn delete(&mut self, offset: usize) -> Result<u8, LineBufferError> {
        if offset >= self.text.len() {
            return Err(LineBufferError::NothingToDelete {
                offset,
                length: self.text.len(),
            });
        }
        Ok(self.text.remove(offset))
    }

    /// Hand the text over, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> { std::mem::take(&mut self.text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0 ; "at start")]
    #[test_case(2 ; "in the middle")]
    #[test_case(5 ; "at end")]
    fn test_insert_then_delete_restores(offset: usize) {
        let mut buffer = LineBuffer::from("hello");
        let before = buffer.clone();

        buffer.insert(offset, b'X');
        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.as_bytes()[offset], b'X');

        assert_eq!(buffer.delete(offset), Ok(b'X'));
        assert_eq!(buffer, before);
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut buffer = LineBuffer::from("ab");
        buffer.insert(42, b'c');
        assert_eq!(buffer.as_bytes(), b"abc");
    }

    #[test]
    fn test_delete_at_end_is_an_error() {
        let mut buffer = LineBuffer::from("ab");
        assert_eq!(
            buffer.delete(2),
            Err(LineBufferError::NothingToDelete {
                offset: 2,
                length: 2
            })
        );
        assert_eq!(buffer.as_bytes(), b"ab");
        assert!(LineBuffer::default().delete(0).is_err());
    }

    #[test]
    fn test_take_empties() {
        let mut buffer = LineBuffer::from("line");
        assert_eq!(buffer.take(), b"line".to_vec());
        assert!(buffer.is_empty());
    }
}
