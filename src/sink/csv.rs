//! Delimited-text sink.

use std::io::{BufWriter, Write};

use super::{Sink, SinkError, Value};

/// Writes one delimited line per row. The generated corpus contains no
/// delimiter or newline bytes, so no quoting or escaping is applied.
pub struct CsvSink<W: Write> {
    writer: BufWriter<W>,
    delimiter: u8,
    trailing_delimiter: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        CsvSink {
            writer: BufWriter::new(writer),
            delimiter: b',',
            trailing_delimiter: false,
        }
    }

    pub fn with_delimiter(writer: W, delimiter: u8) -> Self {
        CsvSink {
            writer: BufWriter::new(writer),
            delimiter,
            trailing_delimiter: false,
        }
    }

    /// The `.tbl` flavor: pipe-delimited with a trailing delimiter before
    /// the newline.
    pub fn tbl(writer: W) -> Self {
        CsvSink {
            writer: BufWriter::new(writer),
            delimiter: b'|',
            trailing_delimiter: true,
        }
    }
}

impl<W: Write + Send> Sink for CsvSink<W> {
    fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError> {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(&[self.delimiter])?;
            }
            write!(self.writer, "{}", value)?;
        }
        if self.trailing_delimiter {
            self.writer.write_all(&[self.delimiter])?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.flush()
    }
}
