//! # Format Logger
//!
//! A logging library that compiles printf-style format strings into fixed
//! binary field layouts once, then encodes each log call as a compact byte
//! record against the precomputed layout:
//!
//! * **No per-call text parsing**: format text is scanned a single time;
//!   every later record write is a bounded sequence of binary field copies
//! * **Compact records**: integers travel as raw native bytes, strings as
//!   fixed buffers or length-prefixed payloads
//! * **Extensible specifiers**: the terminator registry accepts new
//!   specifier characters without changes to the scan algorithm
//!
//! ## Main Components
//!
//! * `CompiledFormat`: the result of scanning format text, an ordered field
//!   layout plus size information
//! * `TerminatorRegistry`: the specifier rules (`%d`, `%u`, `%x`, `%s`,
//!   `%%` built in) that drive the scan
//! * `encode_record`: the two-pass record encoder writing to a `ByteSink`
//! * `Logger` and the prefix decorators: the logging front end that stamps
//!   level and timestamp records before each line
//! * `format_cache`: the process-wide cache binding each format literal to
//!   its compiled layout on first use
//!
//! ## Quick Start
//!
//! ```
//! use format_logger::{log_line, Level, LevelPrefix, Logger};
//!
//! // Collect records in memory; FileSink writes them to disk instead.
//! let mut logger = Logger::new(Vec::new());
//! logger.push_prefix(Box::new(LevelPrefix));
//!
//! log_line!(logger, Level::Info, "listening on port %u", 8080u32).unwrap();
//! log_line!(logger, Level::Warn, "queue depth %d (limit %d)", 950, 1000).unwrap();
//!
//! assert!(!logger.sink().is_empty());
//! ```
//!
//! The record layout is platform-native: integer fields carry no endianness
//! tag, so files move between machines only when writer and reader agree on
//! byte order.

pub mod error;
pub mod field;
pub mod format_cache;
pub mod format_compiler;
pub mod logger;
pub mod prefix;
pub mod record_encoder;
pub mod sink;
pub mod terminators;
pub mod value;

pub use error::{Error, Result};
pub use field::{FieldDescriptor, FieldKind};
pub use format_compiler::CompiledFormat;
pub use logger::Logger;
pub use prefix::{Level, LevelPrefix, NanosecondTimestampPrefix, PrefixDecorator, TimestampPrefix};
pub use record_encoder::encode_record;
pub use sink::{BufferedSink, ByteSink, FileSink};
pub use terminators::{
    HexIntRule, PercentRule, SignedIntRule, StringRule, TerminatorRegistry, TerminatorRule,
    UnsignedIntRule,
};
pub use value::Value;
