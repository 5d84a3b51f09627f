//! JSON-lines sink: one object per row, keyed by column name.

use std::io::{BufWriter, Write};

use serde_json::{json, Map};

use super::{Sink, SinkError, Value};

pub struct NdjsonSink<W: Write> {
    writer: BufWriter<W>,
    columns: Vec<String>,
}

impl<W: Write> NdjsonSink<W> {
    pub fn new(writer: W, columns: &[&str]) -> Self {
        NdjsonSink {
            writer: BufWriter::new(writer),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(v) => json!(v),
        Value::Str(v) => json!(v),
        Value::Char(v) => json!(v.to_string()),
        // Fixed-point decimal as a string, never a float.
        Value::Money(v) => json!(v.to_string()),
    }
}

impl<W: Write + Send> Sink for NdjsonSink<W> {
    fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError> {
        debug_assert_eq!(values.len(), self.columns.len());
        let mut obj = Map::with_capacity(values.len());
        for (column, value) in self.columns.iter().zip(values.iter()) {
            obj.insert(column.clone(), to_json(value));
        }
        serde_json::to_writer(&mut self.writer, &serde_json::Value::Object(obj))?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbgen::prelude::Money;

    #[test]
    fn writes_one_object_per_row() {
        let mut out = Vec::new();
        {
            let mut sink = NdjsonSink::new(&mut out, &["r_regionkey", "r_name", "bal"]);
            sink.write_row(vec![
                Value::Int(0),
                Value::Str("AFRICA".into()),
                Value::Money(Money(-12)),
            ])
            .unwrap();
            sink.close().unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"r_regionkey\":0,\"r_name\":\"AFRICA\",\"bal\":\"-0.12\"}\n"
        );
    }
}
