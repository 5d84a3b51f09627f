//! Batched INSERT-statement sink.

use std::io::{BufWriter, Write};

use super::{Sink, SinkError, Value};

const MAX_BATCH_ROWS: usize = 1024;

/// Accumulates rows into multi-row `INSERT INTO ... VALUES` statements and
/// writes a completed statement per batch (or on flush) to the underlying
/// writer. Integers go unquoted; every other value is single-quoted, with
/// embedded quotes doubled.
pub struct SqlBatchSink<W: Write> {
    writer: BufWriter<W>,
    insert_hint: String,
    buf: String,
    count: usize,
}

impl<W: Write> SqlBatchSink<W> {
    pub fn new(writer: W, table: &str, columns: &[&str]) -> Self {
        SqlBatchSink {
            writer: BufWriter::new(writer),
            insert_hint: format!("INSERT INTO {} ({}) VALUES", table, columns.join(", ")),
            buf: String::new(),
            count: 0,
        }
    }

    fn push_value(buf: &mut String, value: &Value) {
        match value {
            Value::Int(v) => buf.push_str(&v.to_string()),
            Value::Money(v) => {
                buf.push('\'');
                buf.push_str(&v.to_string());
                buf.push('\'');
            }
            Value::Char(c) => {
                buf.push('\'');
                if *c == '\'' {
                    buf.push('\'');
                }
                buf.push(*c);
                buf.push('\'');
            }
            Value::Str(s) => {
                buf.push('\'');
                for ch in s.chars() {
                    if ch == '\'' {
                        buf.push('\'');
                    }
                    buf.push(ch);
                }
                buf.push('\'');
            }
        }
    }
}

impl<W: Write + Send> Sink for SqlBatchSink<W> {
    fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError> {
        if self.count == 0 {
            self.buf.push_str(&self.insert_hint);
            self.buf.push(' ');
        } else {
            self.buf.push_str(", ");
        }
        self.buf.push('(');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            Self::push_value(&mut self.buf, value);
        }
        self.buf.push(')');
        self.count += 1;

        if self.count >= MAX_BATCH_ROWS {
            return self.flush();
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.writer.write_all(self.buf.as_bytes())?;
        self.writer.write_all(b";\n")?;
        self.buf.clear();
        self.count = 0;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.flush()?;
        self.writer.flush()?;
        Ok(())
    }
}
