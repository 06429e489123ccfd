// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use super::WrapPolicy;

/// Dimensions and wrap behavior of the terminal. Immutable for the length of a session,
/// except that a resize swaps in a freshly measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalMetrics {
    width: usize,
    height: usize,
    pub wrap_policy: WrapPolicy,
}

impl TerminalMetrics {
    /// A terminal that reports zero columns or rows is treated as 1 wide / 1 high.
    #[must_use]
    pub fn new(width: usize, height: usize, wrap_policy: WrapPolicy) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            wrap_policy,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize { self.width }

    #[must_use]
    pub fn height(&self) -> usize { self.height }
}

/// Measures the terminal on demand, typically right after a resize notification.
pub trait MetricsProvider {
    /// # Errors
    ///
    /// Returns an error if the terminal can't be queried.
    fn current_metrics(&mut self) -> io::Result<TerminalMetrics>;
}

/// Uses `crossterm` to query the size of the controlling terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosstermMetrics {
    pub wrap_policy: WrapPolicy,
}

impl Default for CrosstermMetrics {
    fn default() -> Self {
        Self {
            wrap_policy: WrapPolicy::XTERM,
        }
    }
}

impl MetricsProvider for CrosstermMetrics {
    fn current_metrics(&mut self) -> io::Result<TerminalMetrics> {
        let (columns, rows) = crossterm::terminal::size()?;
        Ok(TerminalMetrics::new(
            usize::from(columns),
            usize::from(rows),
            self.wrap_policy,
        ))
    }
}

/// Always reports the same metrics. Handy for hosts that aren't attached to a real
/// terminal, and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics(pub TerminalMetrics);

impl MetricsProvider for FixedMetrics {
    fn current_metrics(&mut self) -> io::Result<TerminalMetrics> { Ok(self.0) }
}
