// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Edit one line in the terminal, then print it.
//!
//! ```text
//! rawline --initial "echo 42" --enable-logging
//! ```

use std::{io::{self, Write as _},
          time::Duration};

use clap::Parser;
use miette::IntoDiagnostic as _;
use rawline::{Capabilities, ColorTag, CrosstermMetrics, EditSession, EditorEvent,
              EditorOptions, MetricsProvider as _, MioStdinSource, RawModeGuard,
              TracingConfig, WriterConfig};
use tracing_core::LevelFilter;

use crate::clap_config::CLIArg;

const LOG_FILE_NAME: &str = "rawline_debug.log";

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if cli_arg.global_options.enable_logging {
        // Stdout belongs to the raw mode terminal, so only log to a file.
        TracingConfig {
            writer_config: WriterConfig::File(LOG_FILE_NAME.to_string()),
            level_filter: LevelFilter::DEBUG,
        }
        .install_global()?;
    }

    tracing::debug!(message = "rawline: start", ?cli_arg);

    let options = EditorOptions {
        escape_timeout: Duration::from_millis(cli_arg.escape_timeout_ms),
        colors_enabled: !cli_arg.no_color,
        ..EditorOptions::default()
    };
    let caps = if cli_arg.single_step {
        Capabilities::single_step()
    } else {
        Capabilities::ansi()
    };

    let mut metrics_provider = CrosstermMetrics::default();
    let metrics = metrics_provider.current_metrics().into_diagnostic()?;

    let raw_mode = RawModeGuard::new()?;
    let mut source = MioStdinSource::new().into_diagnostic()?;
    let mut stdout = io::stdout();

    let mut session = EditSession::new(
        &cli_arg.initial,
        highlight_digits_punctuation_and_capitals,
        caps,
        metrics,
        options,
    );
    session.start(&mut stdout).into_diagnostic()?;
    let result = session.read_line(&mut source, &mut metrics_provider, &mut stdout);

    raw_mode.restore()?;

    let event = result.into_diagnostic()?;
    tracing::debug!(message = "rawline: done", ?event);

    let mut stdout = stdout.lock();
    let written = match event {
        EditorEvent::Line(line) => {
            writeln!(stdout, "{}", String::from_utf8_lossy(&line))
        }
        EditorEvent::Interrupted => writeln!(stdout, "^C"),
        _ => writeln!(stdout, "^D"),
    };
    written.into_diagnostic()?;

    Ok(())
}

/// Digits in cyan, ASCII punctuation in yellow, capital letters in magenta.
fn highlight_digits_punctuation_and_capitals(
    text: &[u8],
    colors: &mut [Option<ColorTag>],
) {
    for (byte, slot) in text.iter().zip(colors.iter_mut()) {
        *slot = match *byte {
            b'0'..=b'9' => Some(ColorTag(6)),
            b'A'..=b'Z' => Some(ColorTag(5)),
            _ if byte.is_ascii_punctuation() => Some(ColorTag(3)),
            _ => None,
        };
    }
}

mod clap_config {
    use clap::{Args, Parser};

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "rawline")]
    #[command(about = "Edit a single line in a raw mode terminal, then print it")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(false))]
    pub struct CLIArg {
        #[arg(long, short = 'i', default_value = "", help = "Text to start editing with")]
        pub initial: String,

        #[arg(
            long,
            short = 't',
            default_value_t = 300,
            help = "How long to wait for the rest of an escape sequence, in milliseconds"
        )]
        pub escape_timeout_ms: u64,

        #[arg(long, help = "Don't emit any color sequences")]
        pub no_color: bool,

        #[arg(
            long,
            help = "Pretend the terminal has no bulk cursor movement (`ESC [ n C` etc)"
        )]
        pub single_step: bool,

        #[command(flatten)]
        pub global_options: GlobalOption,
    }

    #[derive(Debug, Args)]
    pub struct GlobalOption {
        #[arg(
            global = true,
            long,
            short = 'l',
            help = "Log app output to a file named `rawline_debug.log` for debugging."
        )]
        pub enable_logging: bool,
    }
}
