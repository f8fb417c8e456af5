use std::fs;
use std::io;

use format_logger::format_cache::compiled;
use format_logger::{
    log_line, BufferedSink, ByteSink, FileSink, Level, LevelPrefix, Logger,
    NanosecondTimestampPrefix, TimestampPrefix, Value,
};
use tempfile::tempdir;

/// Collects bytes and counts record boundaries.
struct HintCountingSink {
    bytes: Vec<u8>,
    hints: usize,
}

impl HintCountingSink {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            hints: 0,
        }
    }
}

impl ByteSink for HintCountingSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    fn line_hint(&mut self) -> io::Result<()> {
        self.hints += 1;
        Ok(())
    }
}

#[test]
fn test_log_line_writes_record_with_newline_suffix() {
    let mut logger = Logger::new(Vec::new());
    log_line!(logger, Level::Info, "port=%d", 8080).unwrap();

    let mut expected = b"port=%d\n\0".to_vec();
    expected.extend_from_slice(&8080i32.to_ne_bytes());
    assert_eq!(logger.sink(), &expected);
}

#[test]
fn test_one_line_hint_per_record() {
    let mut logger = Logger::with_prefixes(
        HintCountingSink::new(),
        vec![Box::new(LevelPrefix), Box::new(NanosecondTimestampPrefix)],
    );

    log_line!(logger, Level::Debug, "first").unwrap();
    log_line!(logger, Level::Debug, "second %s", "msg").unwrap();

    // Prefix records share their line's single hint.
    assert_eq!(logger.sink().hints, 2);
}

#[test]
fn test_level_prefix_record() {
    let mut logger = Logger::new(Vec::new());
    logger.push_prefix(Box::new(LevelPrefix));

    log_line!(logger, Level::Warn, "x").unwrap();

    let mut expected = b"[%8s]\0".to_vec();
    expected.extend_from_slice(b"WARN\0\0\0\0");
    expected.extend_from_slice(b"x\n\0");
    assert_eq!(logger.sink(), &expected);
}

#[test]
fn test_critical_level_fills_its_buffer() {
    let mut logger = Logger::new(Vec::new());
    logger.push_prefix(Box::new(LevelPrefix));

    log_line!(logger, Level::Critical, "y").unwrap();
    assert!(logger.sink().starts_with(b"[%8s]\0CRITICAL"));
}

#[test]
fn test_nanosecond_prefix_layout() {
    let mut logger = Logger::with_prefixes(Vec::new(), vec![Box::new(NanosecondTimestampPrefix)]);
    log_line!(logger, Level::Trace, "z").unwrap();

    let record = logger.sink();
    // "[%llu]: " literal + NUL, one 8-byte counter, then the main record.
    assert!(record.starts_with(b"[%llu]: \0"));
    let prefix_len = "[%llu]: ".len() + 1 + 8;
    assert_eq!(&record[prefix_len..], b"z\n\0");
}

#[test]
fn test_timestamp_prefix_layout() {
    let mut logger = Logger::with_prefixes(Vec::new(), vec![Box::new(TimestampPrefix)]);
    log_line!(logger, Level::Info, "t").unwrap();

    let record = logger.sink();
    let literal = b"[%d-%3s-%d %d:%d:%d]: \0";
    assert!(record.starts_with(literal));
    // Five 4-byte calendar integers plus the fixed 3-byte month name.
    let prefix_len = literal.len() + 5 * 4 + 3;
    assert_eq!(&record[prefix_len..], b"t\n\0");
}

#[test]
fn test_level_methods_dispatch() {
    let format = compiled("v=%d").unwrap();
    let mut logger = Logger::new(HintCountingSink::new());

    logger.trace(&format, &[Value::from(1)]).unwrap();
    logger.debug(&format, &[Value::from(2)]).unwrap();
    logger.info(&format, &[Value::from(3)]).unwrap();
    logger.warn(&format, &[Value::from(4)]).unwrap();
    logger.error(&format, &[Value::from(5)]).unwrap();
    logger.critical(&format, &[Value::from(6)]).unwrap();

    assert_eq!(logger.sink().hints, 6);
    assert_eq!(logger.sink().bytes.len(), 6 * format.size());
}

#[test]
fn test_encoding_error_propagates_through_logger() {
    let mut logger = Logger::new(Vec::new());
    let result = log_line!(logger, Level::Info, "needs one arg %d");
    assert!(result.is_err());
    assert!(logger.sink().is_empty());
}

#[test]
fn test_buffered_sink_caches_small_writes() {
    let mut sink = BufferedSink::new(Vec::new());
    sink.write(b"cached").unwrap();
    assert!(sink.get_ref().is_empty(), "small writes should stay in the cache");

    sink.flush().unwrap();
    assert_eq!(sink.get_ref().as_slice(), b"cached");
}

#[test]
fn test_buffered_sink_passes_large_writes_through_in_order() {
    let mut sink = BufferedSink::new(Vec::new());
    sink.write(b"head").unwrap();

    let large = vec![0xAB; 8 * 1024];
    sink.write(&large).unwrap();

    // The cached bytes must drain before the oversized write.
    assert!(sink.get_ref().starts_with(b"head"));
    assert_eq!(sink.get_ref().len(), 4 + large.len());
}

#[test]
fn test_file_sink_round_trip_through_logger() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.bin");

    let sink = FileSink::create(&path).unwrap();
    let mut logger = Logger::new(sink);
    logger.push_prefix(Box::new(LevelPrefix));

    log_line!(logger, Level::Error, "fd %d closed", 42).unwrap();
    drop(logger);

    let written = fs::read(&path).unwrap();

    let mut reference = Logger::new(Vec::new());
    reference.push_prefix(Box::new(LevelPrefix));
    log_line!(reference, Level::Error, "fd %d closed", 42).unwrap();

    assert_eq!(&written, reference.sink());
}
