use std::{fs::File, io::Read};

use crate::{
    error::{ConvertError, Result},
    models::config::{Config, Separator},
};

/// Build CSV reader over any source. The header row is read by the converter
/// itself, and rows of any length are accepted so arity is checked per row.
pub fn build_reader<R: Read>(source: R, separator: Separator) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(separator.as_byte())
        .has_headers(false)
        .flexible(true)
        .buffer_capacity(32 * 1024)
        .from_reader(source)
}

/// Open the configured input file and build its CSV reader
pub fn build_csv_reader(config: &Config) -> Result<csv::Reader<File>> {
    let file = File::open(&config.file_path).map_err(|e| ConvertError::FileAccess {
        path: config.file_path.clone(),
        source: e,
    })?;

    Ok(build_reader(file, config.separator))
}
