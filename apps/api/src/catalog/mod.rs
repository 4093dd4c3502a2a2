//! Career catalog, loaded once at startup from CSV and read-only afterwards.

pub mod stream_filter;

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::models::CareerRecord;

/// Columns every catalog file must carry. A missing one aborts the load.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Title",
    "Description",
    "Stream",
    "Skills",
    "Technology Skills",
    "Education",
];

/// The full set of careers, in file order. Position in `records` is the
/// tie-breaker for every ranking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CareerRecord>,
    stream_keys: Vec<String>,
}

impl Catalog {
    pub fn new(records: Vec<CareerRecord>) -> Self {
        let stream_keys = records.iter().map(CareerRecord::stream_key).collect();
        Self {
            records,
            stream_keys,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading career catalog from {}", path.display());

        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open catalog file {}", path.display()))?;
        let catalog = Self::from_reader(file)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;

        if catalog.is_empty() {
            warn!("Career catalog {} has no rows", path.display());
        } else {
            info!("Career catalog loaded: {} careers", catalog.len());
        }
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(false)
            .from_reader(reader);

        let headers = reader.headers().context("Catalog has no header row")?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *column) {
                bail!("Catalog is missing required column '{column}'");
            }
        }

        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<CareerRecord>().enumerate() {
            let record = row.with_context(|| format!("Malformed catalog row {}", line + 2))?;
            records.push(record);
        }

        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[CareerRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&CareerRecord> {
        self.records.get(position)
    }

    /// Canonical stream of the record at `position`.
    pub fn stream_key(&self, position: usize) -> &str {
        &self.stream_keys[position]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub mod test_support {
    use super::Catalog;
    use crate::models::CareerRecord;

    pub fn career(title: &str, stream: &str, text: &str, tech: &str, education: &str) -> CareerRecord {
        CareerRecord {
            title: title.to_string(),
            description: text.to_string(),
            stream: stream.to_string(),
            skills: String::new(),
            technology_skills: tech.to_string(),
            education: education.to_string(),
        }
    }

    /// Small mixed-stream catalog shared by ranking and routing tests.
    pub fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            career(
                "Data Analyst",
                "CSE",
                "analyse data and build dashboards with python and sql",
                "python, sql, excel, tableau",
                "6",
            ),
            career(
                "Software Engineer",
                "CSE",
                "design and build software applications and apis",
                "java python git docker",
                "6",
            ),
            career(
                "Embedded Engineer",
                "ECE",
                "program microcontrollers and embedded circuits",
                "c, embedded c, matlab",
                "7",
            ),
            career(
                "Accountant",
                "Accounts",
                "prepare financial statements, audits and tax filings",
                "tally, excel, gst",
                "6",
            ),
            career(
                "Graphic Designer",
                "Arts",
                "create visual designs, branding and illustrations",
                "photoshop illustrator figma",
                "n/a",
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Title,Description,Stream,Skills,Technology Skills,Education\n";

    #[test]
    fn test_loads_rows_in_file_order() {
        let csv = format!(
            "{HEADER}Data Analyst,Analyses data,CSE,critical thinking,\"python, sql\",6\n\
             Accountant,Keeps books,Accounts,numeracy,tally,7\n"
        );
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].title, "Data Analyst");
        assert_eq!(catalog.records()[0].technology_skills, "python, sql");
        assert_eq!(catalog.stream_key(1), "ACCOUNTS");
    }

    #[test]
    fn test_empty_cells_become_empty_strings() {
        let csv = format!("{HEADER}Data Analyst,,CSE,,,\n");
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        let record = &catalog.records()[0];
        assert!(record.description.is_empty());
        assert!(record.education.is_empty());
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let csv = "Title,Description,Stream,Skills,Education\nA,B,CSE,x,6\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(
            err.to_string().contains("Technology Skills"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_header_only_catalog_is_empty() {
        let catalog = Catalog::from_reader(HEADER.as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "Title,Description,Stream,Skills,Technology Skills,Education,Salary\n\
                   Analyst,d,CSE,s,t,6,1000\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}Web Developer,Builds sites,CSE,design,html css,6\n").unwrap();
        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.records()[0].title, "Web Developer");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::from_path(dir.path().join("nope.csv"));
        assert!(result.is_err());
    }
}
