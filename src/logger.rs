use crate::error::Result;
use crate::format_compiler::CompiledFormat;
use crate::prefix::{Level, PrefixDecorator};
use crate::record_encoder::encode_record;
use crate::sink::ByteSink;
use crate::value::Value;

/// The logging front end: owns a sink and an ordered set of prefix
/// decorators, and writes one decorated record per log call.

/// A logger bound to a byte sink.
///
/// Every log call applies the configured prefixes in order, encodes the
/// main record, and signals the record boundary to the sink with a single
/// `line_hint`. The logger holds no lock; share-nothing callers that need
/// concurrent logging create one logger per thread, each with its own
/// sink.
///
/// # Examples
///
/// ```
/// use format_logger::{log_line, Level, LevelPrefix, Logger};
///
/// let mut logger = Logger::new(Vec::new());
/// logger.push_prefix(Box::new(LevelPrefix));
///
/// log_line!(logger, Level::Warn, "disk %2s at %u%%", "sd", 93u32).unwrap();
/// assert!(logger.sink().starts_with(b"[%8s]\0WARN"));
/// ```
pub struct Logger<S: ByteSink> {
    sink: S,
    prefixes: Vec<Box<dyn PrefixDecorator>>,
}

impl<S: ByteSink> Logger<S> {
    /// A logger with no prefixes.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            prefixes: Vec::new(),
        }
    }

    /// A logger with a prefix chain, applied in the given order.
    pub fn with_prefixes(sink: S, prefixes: Vec<Box<dyn PrefixDecorator>>) -> Self {
        Self { sink, prefixes }
    }

    /// Append a prefix decorator to the chain.
    pub fn push_prefix(&mut self, prefix: Box<dyn PrefixDecorator>) {
        self.prefixes.push(prefix);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Write one decorated record: prefixes, main record, line hint.
    pub fn log(&mut self, level: Level, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        for prefix in &self.prefixes {
            prefix.apply(level, &mut self.sink)?;
        }
        encode_record(format, args, &mut self.sink)?;
        self.sink.line_hint()?;
        Ok(())
    }

    pub fn trace(&mut self, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        self.log(Level::Trace, format, args)
    }

    pub fn debug(&mut self, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        self.log(Level::Debug, format, args)
    }

    pub fn info(&mut self, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        self.log(Level::Info, format, args)
    }

    pub fn warn(&mut self, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        self.log(Level::Warn, format, args)
    }

    pub fn error(&mut self, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        self.log(Level::Error, format, args)
    }

    pub fn critical(&mut self, format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
        self.log(Level::Critical, format, args)
    }
}

/// Logs one line through a [`Logger`], binding the format string literal to
/// its cached compiled layout.
///
/// The literal is compiled once per process (first use) and fetched from
/// the [`format_cache`](crate::format_cache) afterwards; a trailing newline
/// is appended to the literal so each line's record text ends the line on
/// its own. Arguments are wrapped via [`Value::from`], so integers and
/// string slices can be passed directly.
///
/// # Examples
///
/// ```
/// use format_logger::{log_line, Level, Logger};
///
/// let mut logger = Logger::new(Vec::new());
/// log_line!(logger, Level::Info, "connected to %s in %u ms", "db-primary", 45u32).unwrap();
/// ```
#[macro_export]
macro_rules! log_line {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        match $crate::format_cache::compiled(concat!($fmt, "\n")) {
            Ok(format) => $logger.log($level, format.as_ref(), &[$($crate::Value::from($arg)),*]),
            Err(err) => Err(err),
        }
    }};
}
