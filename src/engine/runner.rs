use crate::{
    adapters::output::JsonArrayWriter,
    error::{ConvertError, Result},
    models::record::Record,
};

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

/// Run the sink loop: receive records in arrival order and write them as a
/// JSON array until the channel is closed.
pub async fn run<W: Write>(
    mut rx: mpsc::Receiver<Record>,
    writer: W,
    pretty: bool,
) -> io::Result<usize> {
    let mut output = JsonArrayWriter::new(writer, pretty)?;

    while let Some(record) = rx.recv().await {
        output.write_record(&record)?;
    }

    output.finish()
}

async fn write_output(
    rx: mpsc::Receiver<Record>,
    file: File,
    path: PathBuf,
    pretty: bool,
) -> Result<usize> {
    run(rx, BufWriter::new(file), pretty)
        .await
        .map_err(|e| ConvertError::Output { path, source: e })
}

/// Staging file next to the output, so the final rename stays on one filesystem.
fn staging_path(output_path: &Path) -> PathBuf {
    let mut name = OsString::from(output_path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// A running sink whose output is only published by `commit`.
///
/// Records are written to a staging file; an existing file at the output
/// path is left alone until the run has succeeded.
pub struct PendingOutput {
    handle: JoinHandle<Result<usize>>,
    staging_path: PathBuf,
    output_path: PathBuf,
}

impl PendingOutput {
    /// Wait for the sink to drain the channel, then move the staging file
    /// into place. Returns how many records were written.
    pub async fn commit(self) -> Result<usize> {
        let written = match self.handle.await {
            Ok(Ok(written)) => written,
            Ok(Err(e)) => {
                remove_staging(&self.staging_path);
                return Err(e);
            }
            Err(e) => {
                remove_staging(&self.staging_path);
                return Err(e.into());
            }
        };

        if let Err(e) = fs::rename(&self.staging_path, &self.output_path) {
            remove_staging(&self.staging_path);
            return Err(ConvertError::Output {
                path: self.output_path,
                source: e,
            });
        }

        info!(output = %self.output_path.display(), records = written, "Completed");
        Ok(written)
    }

    /// Stop the sink after a fatal error and drop the staging file. Returns
    /// the sink's own error, if it failed first.
    pub async fn discard(self) -> Option<ConvertError> {
        self.handle.abort();
        let sink_error = match self.handle.await {
            Ok(Err(e)) => Some(e),
            _ => None,
        };

        remove_staging(&self.staging_path);
        sink_error
    }
}

fn remove_staging(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(staging = %path.display(), "Removed staging output"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(staging = %path.display(), error = %e, "Failed to remove staging output"),
    }
}

/// Create the staging file, spawn the sink task and return the record sender
/// along with the pending output
pub fn setup_sink(
    output_path: &Path,
    pretty: bool,
) -> Result<(mpsc::Sender<Record>, PendingOutput)> {
    let staging_path = staging_path(output_path);
    let file = File::create(&staging_path).map_err(|e| ConvertError::Output {
        path: staging_path.clone(),
        source: e,
    })?;

    // Capacity 1 is the smallest tokio allows: every send waits for the sink
    let (record_tx, record_rx) = mpsc::channel(1);

    info!(output = %output_path.display(), "Writing JSON file");
    let handle = tokio::spawn(write_output(
        record_rx,
        file,
        staging_path.clone(),
        pretty,
    ));

    Ok((
        record_tx,
        PendingOutput {
            handle,
            staging_path,
            output_path: output_path.to_path_buf(),
        },
    ))
}
