//! `MakeWriter` that hands complete log lines to a callback.
//!
//! # Design
//! - The formatter writes arbitrary byte chunks; lines are reassembled before
//!   they reach the sink.
//! - A trailing partial line is flushed when the writer drops.

use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

/// `tracing_subscriber` writer factory forwarding each line to a callback.
pub struct LineSinkMakeWriter {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
}

impl LineSinkMakeWriter {
    /// Forward lines to `sink`.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }
}

impl<'a> MakeWriter<'a> for LineSinkMakeWriter {
    type Writer = LineSinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineSinkWriter {
            sink: Arc::clone(&self.sink),
            buffer: LineBuffer::default(),
        }
    }
}

/// Writer produced by [`LineSinkMakeWriter`] for a single event.
pub struct LineSinkWriter {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
    buffer: LineBuffer,
}

impl LineSinkWriter {
    fn emit(&self, line: &str) {
        if !line.is_empty() {
            (self.sink)(line);
        }
    }
}

impl Write for LineSinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in self.buffer.push(buf) {
            self.emit(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineSinkWriter {
    fn drop(&mut self) {
        if let Some(line) = self.buffer.finish() {
            self.emit(&line);
        }
    }
}

#[derive(Default)]
struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            lines.push(trim_line(&String::from_utf8_lossy(&line)));
        }
        lines
    }

    fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buffer).to_string();
        self.buffer.clear();
        Some(trim_line(&line))
    }
}

fn trim_line(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::{LineBuffer, LineSinkMakeWriter};

    #[test]
    fn line_buffer_splits_on_newlines() {
        let mut buffer = LineBuffer::default();
        let lines = buffer.push(b"alpha\nbeta\n");
        assert_eq!(lines, vec!["alpha".to_string(), "beta".to_string()]);
        assert!(buffer.finish().is_none());
    }

    #[test]
    fn line_buffer_keeps_partial_line() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"alp").is_empty());
        assert_eq!(buffer.push(b"ha\r\nbe"), vec!["alpha".to_string()]);
        assert_eq!(buffer.finish(), Some("be".to_string()));
    }

    #[test]
    fn writer_flushes_partial_line_on_drop() -> std::io::Result<()> {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let captured = Arc::clone(&seen);
        let make = LineSinkMakeWriter::new(move |line| {
            if let Ok(mut guard) = captured.lock() {
                guard.push(line.to_string());
            }
        });
        {
            let mut writer = make.make_writer();
            writer.write_all(b"one\ntwo")?;
        }
        let seen = seen.lock().map(|guard| guard.clone()).unwrap_or_default();
        assert_eq!(seen, vec!["one".to_string(), "two".to_string()]);
        Ok(())
    }
}
