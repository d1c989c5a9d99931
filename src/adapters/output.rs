use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::models::record::Record;

/// Output location for an input file: same directory, with the trailing
/// `.csv` of the file name replaced by `.json`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    match input.file_name().and_then(|n| n.to_str()) {
        Some(name) => {
            let stem = name.strip_suffix(".csv").unwrap_or(name);
            input.with_file_name(format!("{stem}.json"))
        }
        None => input.with_extension("json"),
    }
}

/// Streams records into a JSON array one at a time.
///
/// Compact output matches `serde_json::to_string` of the whole record list and
/// pretty output matches `serde_json::to_string_pretty`, without buffering
/// the records.
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    pretty: bool,
    written: usize,
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(mut writer: W, pretty: bool) -> io::Result<Self> {
        writer.write_all(b"[")?;
        Ok(JsonArrayWriter {
            writer,
            pretty,
            written: 0,
        })
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        if self.written > 0 {
            self.writer.write_all(b",")?;
        }

        if self.pretty {
            let body = serde_json::to_string_pretty(record)?;
            write!(self.writer, "\n  {}", body.replace('\n', "\n  "))?;
        } else {
            serde_json::to_writer(&mut self.writer, record)?;
        }

        self.written += 1;
        Ok(())
    }

    /// Close the array and flush. Returns the number of records written.
    pub fn finish(mut self) -> io::Result<usize> {
        if self.pretty && self.written > 0 {
            self.writer.write_all(b"\n")?;
        }
        self.writer.write_all(b"]")?;
        self.writer.flush()?;

        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Header;
    use csv::StringRecord;
    use std::str;

    fn sample_records() -> Vec<Record> {
        let header = Header::from_row(&StringRecord::from(vec!["name", "city"]));

        [["alice", "Paris"], ["bob", "Lyon \"centre\""]]
            .into_iter()
            .map(|row| Record::from_row(&header, &StringRecord::from(row.to_vec())).unwrap())
            .collect()
    }

    fn render(records: &[Record], pretty: bool) -> String {
        let mut output = Vec::new();

        let mut writer = JsonArrayWriter::new(&mut output, pretty).unwrap();
        for record in records {
            writer.write_record(record).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), records.len());

        str::from_utf8(&output).unwrap().to_string()
    }

    #[test]
    fn test_compact_output_matches_serde_json() {
        let records = sample_records();
        assert_eq!(
            render(&records, false),
            serde_json::to_string(&records).unwrap()
        );
    }

    #[test]
    fn test_pretty_output_matches_serde_json() {
        let records = sample_records();
        let output = render(&records, true);

        println!("JSON Output:\n{}", output);

        assert_eq!(output, serde_json::to_string_pretty(&records).unwrap());
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        assert_eq!(render(&[], false), "[]");
        assert_eq!(render(&[], true), "[]");
    }

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("data/people.csv")),
            PathBuf::from("data/people.json")
        );
        assert_eq!(
            derive_output_path(Path::new("archive.2024.csv")),
            PathBuf::from("archive.2024.json")
        );
        assert_eq!(
            derive_output_path(Path::new("data/.csv")),
            PathBuf::from("data/.json")
        );
    }
}
