use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Byte sinks consumed by the record encoder.
///
/// The encoder hands every record to a sink as a bounded sequence of
/// `write` calls followed by one `line_hint`. Buffering and flush policy
/// belong entirely to the sink; the encoder makes no assumption about when
/// bytes actually reach their destination.

/// Destination for encoded record bytes.
pub trait ByteSink {
    /// Append bytes to the sink.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Hint that a logical record boundary was reached. Sinks may use this
    /// for flush decisions; the default does nothing.
    fn line_hint(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects records in memory. Handy in tests and for staging a batch of
/// records before shipping them elsewhere.
impl ByteSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Size of the in-memory cache in front of the inner writer.
const CACHE_SIZE: usize = 4 * 1024;

/// A sink that batches small writes through a 4 KiB cache before an inner
/// [`io::Write`].
///
/// Writes larger than the cache bypass it entirely (after draining what is
/// already cached, so ordering is preserved). Record boundaries do not
/// force a flush; call [`BufferedSink::flush`] for that, and dropping the
/// sink flushes best-effort.
pub struct BufferedSink<W: Write> {
    inner: W,
    cache: Vec<u8>,
}

impl<W: Write> BufferedSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            cache: Vec::with_capacity(CACHE_SIZE),
        }
    }

    /// Drain the cache and flush the inner writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_cache()?;
        self.inner.flush()
    }

    /// The inner writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    fn flush_cache(&mut self) -> io::Result<()> {
        if !self.cache.is_empty() {
            self.inner.write_all(&self.cache)?;
            self.cache.clear();
        }
        Ok(())
    }
}

impl<W: Write> ByteSink for BufferedSink<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if bytes.len() > CACHE_SIZE {
            self.flush_cache()?;
            return self.inner.write_all(bytes);
        }
        if self.cache.len() + bytes.len() > CACHE_SIZE {
            self.flush_cache()?;
        }
        self.cache.extend_from_slice(bytes);
        Ok(())
    }
}

impl<W: Write> Drop for BufferedSink<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// A buffered sink over a file.
pub type FileSink = BufferedSink<File>;

impl FileSink {
    /// Create (or truncate) a log file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}
