// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix implementation of raw mode using rustix's safe termios API.

use rustix::{fd::{AsFd, BorrowedFd},
             termios::{self, OptionalActions, Termios}};
use std::{fs::File, io};

/// Either stdin (when it is a tty) or `/dev/tty` (when stdin is redirected, eg: `echo
/// data | rawline`).
#[derive(Debug)]
enum TerminalFd {
    Stdin(io::Stdin),
    DevTty(File),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
        }
    }
}

fn get_terminal_fd() -> io::Result<TerminalFd> {
    let stdin = io::stdin();
    if termios::isatty(&stdin) {
        Ok(TerminalFd::Stdin(stdin))
    } else {
        let file = File::options().read(true).write(true).open("/dev/tty")?;
        Ok(TerminalFd::DevTty(file))
    }
}

/// The attributes that were in effect before raw mode was enabled, plus the descriptor
/// they were read from.
pub struct SavedTerminalState {
    fd: TerminalFd,
    original: Termios,
}

impl std::fmt::Debug for SavedTerminalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedTerminalState")
            .field("fd", &self.fd)
            .finish_non_exhaustive()
    }
}

/// Save the current attributes, then apply `cfmakeraw` semantics (no `ICANON`, `ISIG`,
/// `ECHO`, `OPOST`; `VMIN=1`, `VTIME=0`).
pub fn enable_raw_mode() -> miette::Result<SavedTerminalState> {
    let fd = get_terminal_fd()
        .map_err(|e| miette::miette!("failed to get terminal file descriptor: {e}"))?;

    let original = termios::tcgetattr(&fd)
        .map_err(|e| miette::miette!("failed to retrieve terminal attributes: {e}"))?;

    let mut raw = original.clone();
    raw.make_raw();

    termios::tcsetattr(&fd, OptionalActions::Now, &raw)
        .map_err(|e| miette::miette!("failed to set terminal attributes: {e}"))?;

    Ok(SavedTerminalState { fd, original })
}

pub fn disable_raw_mode(saved: &SavedTerminalState) -> miette::Result<()> {
    termios::tcsetattr(&saved.fd, OptionalActions::Now, &saved.original)
        .map_err(|e| miette::miette!("failed to restore terminal attributes: {e}"))
}
