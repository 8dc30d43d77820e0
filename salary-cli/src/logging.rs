use std::io::{self, IsTerminal};

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Event formatter for a command-line tool writing to stderr.
///
/// Quiet mode prints `level: message`, the way compilers report diagnostics.
/// Verbose mode prefixes the wall-clock time and the emitting module, which
/// is what you want when following the net-to-gross search step by step.
struct CliFmt {
    verbose: bool,
}

impl<S, N> FormatEvent<S, N> for CliFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let color = if ansi { level_color(*meta.level()) } else { "" };
        let reset = if ansi { "\x1b[0m" } else { "" };

        if self.verbose {
            let dim = if ansi { "\x1b[2m" } else { "" };
            write!(writer, "{dim}{}{reset} ", Local::now().format("%H:%M:%S%.3f"))?;
            write!(writer, "{color}{:>5}{reset} {}: ", meta.level(), meta.target())?;
        } else {
            write!(writer, "{color}{}{reset}: ", level_label(*meta.level()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::ERROR => "error",
        Level::WARN => "warning",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        Level::TRACE => "trace",
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Filter directive used when `RUST_LOG` is not set.
///
/// Quiet by default so calculation output is not interleaved with log lines.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Initializes logging to stderr. Call once at startup.
///
/// - Level: `RUST_LOG` when set, otherwise [`default_directive`].
/// - Colored when stderr is a terminal, plain when redirected.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .event_format(CliFmt { verbose });

    // A second initialization (e.g. from tests) is a no-op.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
