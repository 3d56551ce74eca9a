//! Price history sources.

mod csv_source;

pub use csv_source::{read_series, resolve_symbol_file, CsvSeriesSource};
