//! CSV writer for simulation results.
//!
//! One file per persona-type run. Every row is flushed as soon as it is
//! written so an interrupted run keeps all completed rows.

use std::fs::File;
use std::path::{Path, PathBuf};
use survey_application::ports::result_sink::{ResultSink, SinkError};
use survey_domain::OutputRow;

pub struct CsvResultSink {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvResultSink {
    /// Create (or truncate) the result file, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: csv::Writer::from_writer(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record<I, T>(&mut self, record: I) -> Result<(), SinkError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(record).map_err(map_csv_error)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl ResultSink for CsvResultSink {
    fn write_header(&mut self, columns: &[String]) -> Result<(), SinkError> {
        self.write_record(columns)
    }

    fn write_row(&mut self, row: &OutputRow) -> Result<(), SinkError> {
        self.write_record(row.to_record())
    }
}

fn map_csv_error(e: csv::Error) -> SinkError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => SinkError::Io(io),
        other => SinkError::Write(format!("{:?}", other)),
    }
}
