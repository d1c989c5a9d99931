use std::{fs, io, path::Path};

use crate::error::{ConvertError, Result};

const EXPECTED_EXTENSION: &str = "csv";

/// Text after the last `.` of the file name. Unlike `Path::extension`, a
/// dotfile such as `.csv` has the extension `csv`.
pub fn file_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|i| &name[i + 1..])
}

/// Check the input has a `.csv` extension and exists on disk.
///
/// The extension is checked first, so a wrong extension is reported without
/// touching the filesystem. Metadata errors other than "not found" are
/// surfaced as `FileAccess`.
pub fn validate(path: &Path) -> Result<()> {
    if file_extension(path) != Some(EXPECTED_EXTENSION) {
        return Err(ConvertError::WrongExtension(path.to_path_buf()));
    }

    match fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ConvertError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(ConvertError::FileAccess {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
