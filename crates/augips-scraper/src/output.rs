//! CSV output for scraped location records.

use std::path::{Path, PathBuf};

use augips_core::LocationRecord;

use crate::error::ScraperError;

/// File name for a company's output: lower-cased, spaces replaced by `_`,
/// suffixed with `_locations.csv`.
#[must_use]
pub fn output_file_name(company_name: &str) -> String {
    format!(
        "{}_locations.csv",
        company_name.to_lowercase().replace(' ', "_")
    )
}

/// Full output path for a company inside `data_dir`.
#[must_use]
pub fn output_path(data_dir: &Path, company_name: &str) -> PathBuf {
    data_dir.join(output_file_name(company_name))
}

/// Write `records` to `path` as CSV with a header row, replacing any
/// existing file. Parent directories are created as needed.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the directory cannot be created and
/// [`ScraperError::Csv`] if the file cannot be written.
pub fn write_csv(path: &Path, records: &[LocationRecord]) -> Result<usize, ScraperError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = records.len(), "wrote CSV");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_slugged_company() {
        assert_eq!(output_file_name("AutoZone"), "autozone_locations.csv");
        assert_eq!(
            output_file_name("NAPA Auto Parts"),
            "napa_auto_parts_locations.csv"
        );
        assert_eq!(
            output_file_name("O'Reilly Auto Parts"),
            "o'reilly_auto_parts_locations.csv"
        );
    }

    #[test]
    fn output_path_joins_data_dir() {
        let path = output_path(Path::new("data"), "Simple Test");
        assert_eq!(path, PathBuf::from("data/simple_test_locations.csv"));
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let records = vec![
            LocationRecord::sample(
                "Test Store #1",
                "123 Test St",
                "Testville",
                "TS",
                "12345",
                "35.1234",
                "-90.5678",
            )
            .with_company("Simple Test"),
            LocationRecord {
                store_name: Some("Sparse".to_string()),
                ..LocationRecord::default()
            },
        ];

        let written = write_csv(&path, &records).unwrap();
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "store_name,address,city,state,zip_code,latitude,longitude,company_name"
        );
        assert_eq!(
            lines[1],
            "Test Store #1,123 Test St,Testville,TS,12345,35.1234,-90.5678,Simple Test"
        );
        assert_eq!(lines[2], "Sparse,,,,,,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![LocationRecord {
            store_name: Some("IKEA London".to_string()),
            address: Some("2 Drury Way, North Circular Road".to_string()),
            ..LocationRecord::default()
        }];

        write_csv(&path, &records).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: Vec<LocationRecord> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(
            parsed[0].address.as_deref(),
            Some("2 Drury Way, North Circular Road")
        );
    }
}
