//! Custom tracing formatter with tick counter integration.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Global atomic counter for tracking simulation ticks
static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Maximum value for tick counter display (16-bit hex)
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

/// Cached format description for timestamps
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

/// A formatter that prefixes each line with a timestamp and the current
/// simulation tick in hexadecimal, so log lines can be correlated with
/// frames.
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        // Timestamp (dimmed when ANSI)
        let now = OffsetDateTime::now_utc();
        let formatted_time = now.format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        write_dimmed(&mut writer, formatted_time)?;
        writer.write_char(' ')?;

        // Tick counter, dim when ANSI
        let tick_count = tick_count() & TICK_DISPLAY_MASK;
        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[2m0x{:04X}\x1b[0m ", tick_count)?;
        } else {
            write!(writer, "0x{:04X} ", tick_count)?;
        }

        write_colored_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        // Span scope chain (bold names, fields in braces)
        if let Some(scope) = ctx.event_scope() {
            let mut saw_any = false;
            for span in scope.from_root() {
                write_bold(&mut writer, span.metadata().name())?;
                saw_any = true;
                let ext = span.extensions();
                if let Some(fields) = &ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write_bold(&mut writer, "{")?;
                        write!(writer, "{}", fields)?;
                        write_bold(&mut writer, "}")?;
                    }
                }
                write_dimmed(&mut writer, ":")?;
            }
            if saw_any {
                writer.write_char(' ')?;
            }
        }

        // Target (dimmed), then the event fields
        write_dimmed(&mut writer, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;
        ctx.format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Write the verbosity level with the same coloring/alignment as the Full formatter.
fn write_colored_level(writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
    let text = match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => " INFO",
        Level::WARN => " WARN",
        Level::ERROR => "ERROR",
    };

    if writer.has_ansi_escapes() {
        let color = match *level {
            Level::TRACE => "\x1b[35m", // purple
            Level::DEBUG => "\x1b[34m", // blue
            Level::INFO => "\x1b[32m",  // green
            Level::WARN => "\x1b[33m",  // yellow
            Level::ERROR => "\x1b[31m", // red
        };
        write!(writer, "{}{}\x1b[0m", color, text)
    } else {
        write!(writer, "{:>5}", text)
    }
}

fn write_dimmed(writer: &mut Writer<'_>, s: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "\x1b[2m{}\x1b[0m", s)
    } else {
        write!(writer, "{}", s)
    }
}

fn write_bold(writer: &mut Writer<'_>, s: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "\x1b[1m{}\x1b[0m", s)
    } else {
        write!(writer, "{}", s)
    }
}

/// Increment the global tick counter by 1
///
/// This should be called once per frame from the driver loop
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Get the current tick count
pub fn tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
