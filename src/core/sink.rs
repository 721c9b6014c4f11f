//! Output sinks for formatted log lines
//!
//! A [`Sink`] accepts the bytes of one formatted entry. Sinks take `&self`
//! and decide their own synchronization; the logger adds none around the
//! write call.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

pub trait Sink: Send + Sync {
    fn write(&self, data: &[u8]) -> io::Result<usize>;

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        (**self).write(data)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}

impl Sink for io::Stdout {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.lock().write_all(data).map(|()| data.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl Sink for io::Stderr {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.lock().write_all(data).map(|()| data.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Discards everything
impl Sink for io::Sink {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        Ok(data.len())
    }
}

/// Adapts any [`Write`] into a sink by serializing writes behind a mutex
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.writer.lock().write_all(data).map(|()| data.len())
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

/// Append-mode file sink
pub struct FileSink {
    inner: WriterSink<File>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            inner: WriterSink::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.inner.write(data)
    }

    fn flush(&self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// In-memory sink; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    data: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    pub fn clear(&self) {
        self.data.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.data.lock().extend_from_slice(data);
        Ok(data.len())
    }
}
