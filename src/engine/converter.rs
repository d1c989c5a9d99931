use csv::StringRecord;
use std::io::Read;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    adapters::csv_parser::build_csv_reader,
    error::{ConvertError, Result},
    models::{
        config::Config,
        record::{Header, Record},
    },
};

/// Outcome of a completed conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub converted: usize,
    pub skipped: usize,
}

/// Read the configured file and send one record per well-formed row.
///
/// The file is closed when this returns. The channel is closed on every
/// return path, because `record_tx` is consumed.
pub async fn convert(config: &Config, record_tx: mpsc::Sender<Record>) -> Result<ConvertSummary> {
    let reader = build_csv_reader(config)?;
    convert_reader(reader, record_tx).await
}

/// Header first, then one record per data row.
///
/// Rows whose field count differs from the header are logged and skipped. Any
/// read error is fatal and returned to the caller.
pub async fn convert_reader<R: Read>(
    mut reader: csv::Reader<R>,
    record_tx: mpsc::Sender<Record>,
) -> Result<ConvertSummary> {
    let mut row = StringRecord::new();

    match reader.read_record(&mut row) {
        Ok(true) => {}
        Ok(false) => return Err(ConvertError::EmptyInput),
        Err(e) => return Err(ConvertError::HeaderRead(e)),
    }
    let header = Header::from_row(&row);
    if header.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    debug!(columns = ?header.names(), "Read header row");

    let mut summary = ConvertSummary::default();

    while reader.read_record(&mut row).map_err(ConvertError::RowRead)? {
        let record = match Record::from_row(&header, &row) {
            Ok(record) => record,
            Err(err) => {
                let fields: Vec<&str> = row.iter().collect();
                warn!(
                    line = row.position().map(|p| p.line()),
                    row = ?fields,
                    error = %err,
                    "Skipping row"
                );
                summary.skipped += 1;
                continue;
            }
        };

        // Waits until the sink has room for the record
        if record_tx.send(record).await.is_err() {
            return Err(ConvertError::SinkClosed);
        }

        summary.converted += 1;
    }

    info!(
        converted = summary.converted,
        skipped = summary.skipped,
        "Finished reading input"
    );

    // Close the channel to signal the sink no more records will arrive
    drop(record_tx);

    Ok(summary)
}
