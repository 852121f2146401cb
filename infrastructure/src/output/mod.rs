//! Result file writers.

mod csv_sink;

pub use csv_sink::CsvResultSink;
