// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Extra slots allocated whenever the overlay has to grow, so that typing doesn't
/// reallocate on every keystroke.
pub const ANNOTATION_HEADROOM: usize = 256;

/// Foreground color code, as understood by the capability table's set-foreground
/// primitive (0..=7 basic colors, 8..=255 indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(pub u8);

/// Caller supplied highlighting. Called before every redraw with the current text and
/// one slot per character, every slot reset to `None` (default color).
///
/// Closures work directly:
///
/// ```
/// use rawline::{ColorTag, Highlighter};
///
/// let mut digits_in_red = |text: &[u8], colors: &mut [Option<ColorTag>]| {
///     for (byte, slot) in text.iter().zip(colors.iter_mut()) {
///         if byte.is_ascii_digit() {
///             *slot = Some(ColorTag(1));
///         }
///     }
/// };
///
/// let mut colors = [None; 3];
/// digits_in_red.annotate(b"a1b", &mut colors);
/// assert_eq!(colors, [None, Some(ColorTag(1)), None]);
/// ```
pub trait Highlighter {
    fn annotate(&mut self, text: &[u8], colors: &mut [Option<ColorTag>]);
}

impl<F> Highlighter for F
where
    F: FnMut(&[u8], &mut [Option<ColorTag>]),
{
    fn annotate(&mut self, text: &[u8], colors: &mut [Option<ColorTag>]) {
        self(text, colors);
    }
}

/// Leaves every character in the default color.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlight;

impl Highlighter for NoHighlight {
    fn annotate(&mut self, _text: &[u8], _colors: &mut [Option<ColorTag>]) {}
}

/// Per character colors, written only by the [`Highlighter`]. Grows with the text,
/// never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationOverlay {
    slots: Vec<Option<ColorTag>>,
}

impl AnnotationOverlay {
    #[must_use]
    pub fn capacity(&self) -> usize { self.slots.len() }

    /// Reset the first `text.len()` slots and let `highlighter` fill them in.
    pub fn refresh(&mut self, text: &[u8], highlighter: &mut dyn Highlighter) {
        if self.slots.len() < text.len() {
            self.slots.resize(text.len() + ANNOTATION_HEADROOM, None);
        }
        let colors = &mut self.slots[..text.len()];
        colors.fill(None);
        highlighter.annotate(text, colors);
    }

    /// Color of the character at `index`. Slots past the capacity are unset.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<ColorTag> {
        self.slots.get(index).copied().flatten()
    }
}
