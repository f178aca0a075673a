//! CSV persistence of per-seed outcomes
//!
//! One row per seed URL, two columns, written once after the whole batch has
//! been processed. The extracted-info column holds the model's raw response
//! (or the failure string for seeds that never produced one).

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// The terminal result for one seed URL
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeedOutcome {
    /// The seed URL this row describes
    #[serde(rename = "URL")]
    pub url: String,

    /// Raw extractor output, or a failure string
    #[serde(rename = "Extracted Info")]
    pub extracted_info: String,
}

/// Write all outcomes to a CSV file at `path`, headers included
pub fn write_csv(path: &Path, outcomes: &[SeedOutcome]) -> Result<()> {
    // Headers are written explicitly so an empty batch still yields them
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(["URL", "Extracted Info"])?;
    for outcome in outcomes {
        writer.serialize(outcome)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = outcomes.len(), "results written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let outcomes = vec![
            SeedOutcome {
                url: "https://example.com".to_string(),
                extracted_info: "Mission: chairs\nAwards: Not Provided".to_string(),
            },
            SeedOutcome {
                url: "https://other.example.com".to_string(),
                extracted_info: "Failed to fetch content.".to_string(),
            },
        ];

        write_csv(&path, &outcomes).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert!(written.starts_with("URL,Extracted Info\n"));
        // Embedded newline forces quoting of the whole field
        assert!(written.contains("\"Mission: chairs\nAwards: Not Provided\""));
        assert!(written.contains("Failed to fetch content."));
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn empty_batch_still_writes_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv(&path, &[]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim_end(), "URL,Extracted Info");
    }
}
