// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given expression (or unit, if none) in [`Ok`]. Used at the tail of
/// functions that return [`Result`] so the happy path reads as one line.
///
/// ```
/// use rawline::ok;
///
/// fn unit() -> std::io::Result<()> { ok!() }
/// fn value() -> std::io::Result<u8> { ok!(42) }
///
/// assert!(unit().is_ok());
/// assert_eq!(value().unwrap(), 42);
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
