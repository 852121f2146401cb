//! Result sink port
//!
//! Destination for result rows. The header is written once per run,
//! then one row per (persona, model) exchange in call order.

use survey_domain::OutputRow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Write failed: {0}")]
    Write(String),
}

pub trait ResultSink: Send {
    fn write_header(&mut self, columns: &[String]) -> Result<(), SinkError>;

    /// Append one row. Implementations must make the row durable before
    /// returning so partial runs leave usable output.
    fn write_row(&mut self, row: &OutputRow) -> Result<(), SinkError>;
}

/// In-memory sink, mostly for tests
#[derive(Debug, Default)]
pub struct MemorySink {
    pub header: Option<Vec<String>>,
    pub rows: Vec<OutputRow>,
}

impl ResultSink for MemorySink {
    fn write_header(&mut self, columns: &[String]) -> Result<(), SinkError> {
        self.header = Some(columns.to_vec());
        Ok(())
    }

    fn write_row(&mut self, row: &OutputRow) -> Result<(), SinkError> {
        self.rows.push(row.clone());
        Ok(())
    }
}
