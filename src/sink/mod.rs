//! Row sinks: where generated rows go.
//!
//! A `Sink` receives positional column values, one call per row. Methods
//! take `&mut self`, so a sink instance has exactly one writer by
//! construction; sharing one across threads is a compile error, not a
//! runtime hazard. `ConcurrentSink` is the fan-out composite that spreads
//! rows over a fixed pool of downstream sinks.

mod concurrent;
mod csv;
mod ndjson;
mod sql;

pub use concurrent::ConcurrentSink;
pub use csv::CsvSink;
pub use ndjson::NdjsonSink;
pub use sql::SqlBatchSink;

use std::fmt;
use std::io;

use thiserror::Error;

use crate::dbgen::prelude::Money;

pub mod prelude {
    pub use super::{ConcurrentSink, CsvSink, NdjsonSink, Sink, SinkError, SqlBatchSink, Value};
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
    #[error("json encoding failure: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sink is closed")]
    Closed,
    #[error("fan-out worker terminated")]
    WorkerGone,
}

/// One column value. Money stays in integer cents until display, where it
/// renders as a fixed-point decimal string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Char(char),
    Money(Money),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
            Value::Char(v) => write!(f, "{}", v),
            Value::Money(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Money(v)
    }
}

/// The sink capability. `write_row` may buffer; `flush` makes everything
/// written so far durable downstream; `close` flushes and releases the
/// sink. Calling after `close` is an error.
pub trait Sink: Send {
    fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
    fn close(&mut self) -> Result<(), SinkError>;
}

impl Sink for Box<dyn Sink> {
    fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError> {
        (**self).write_row(values)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}
