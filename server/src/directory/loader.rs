use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::model::{CountryReference, CountryVisaRecord};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} contains no usable records", path.display())]
    Empty { path: PathBuf },
}

/// Reads the visa data file. Fails on a missing or malformed file, and when
/// no record survives screening.
pub fn load_records(path: &Path) -> Result<Vec<CountryVisaRecord>, LoadError> {
    let raw = read(path)?;
    parse_records(path, &raw)
}

pub fn load_reference(path: &Path) -> Result<Vec<CountryReference>, LoadError> {
    let raw = read(path)?;
    parse_list(path, &raw)
}

pub(super) fn parse_records(path: &Path, raw: &str) -> Result<Vec<CountryVisaRecord>, LoadError> {
    let parsed: Vec<CountryVisaRecord> = parse_list(path, raw)?;
    let total = parsed.len();
    let records = parsed
        .into_iter()
        .filter(CountryVisaRecord::has_name)
        .collect::<Vec<_>>();
    if records.len() < total {
        warn!(
            "{}: skipped {} record(s) without a local or English name",
            path.display(),
            total - records.len()
        );
    }
    if records.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }
    debug!("{}: {} record(s)", path.display(), records.len());
    Ok(records)
}

fn parse_list<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<Vec<T>, LoadError> {
    serde_json::from_str(raw).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("visa.json")
    }

    #[test]
    fn parses_a_flat_array() {
        let records = parse_records(
            path(),
            r#"[{"code": "JP", "nameEnglish": "Japan"}, {"code": "KR", "nameLocal": "韓國"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code.as_deref(), Some("KR"));
    }

    #[test]
    fn empty_array_is_an_error() {
        let err = parse_records(path(), "[]").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
        assert_eq!(err.to_string(), "visa.json contains no usable records");
    }

    #[test]
    fn nameless_records_are_dropped() {
        let records = parse_records(
            path(),
            r#"[{"code": "XX"}, {"code": "JP", "nameEnglish": "Japan"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code.as_deref(), Some("JP"));

        let err = parse_records(path(), r#"[{"code": "XX"}]"#).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn mixed_key_spellings_do_not_fail_the_file() {
        let records = parse_records(
            path(),
            r#"[
                {"code": "JP", "name": "Japan", "nameLocal": "日本"},
                {"code": "KR", "nameEnglish": "Korea", "name_en": "South Korea"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name_local.as_deref(), Some("日本"));
        assert_eq!(records[1].name_english.as_deref(), Some("Korea"));
    }

    #[test]
    fn malformed_documents_are_errors() {
        for raw in ["{", r#"{"countries": []}"#, r#"[{"nameEnglish": 12}]"#] {
            let err = parse_records(path(), raw).unwrap_err();
            assert!(matches!(err, LoadError::Parse { .. }), "{raw}");
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_records(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read does/not/exist.json"));
    }

    #[test]
    fn reference_entries_keep_order() {
        let reference: Vec<CountryReference> = parse_list(
            Path::new("countries.json"),
            r#"[{"code": "MN", "name_en": "Mongolia", "name_zh": "蒙古"}, {"code": "PE", "name_en": "Peru"}]"#,
        )
        .unwrap();
        assert_eq!(reference.len(), 2);
        assert_eq!(reference[0].name_local.as_deref(), Some("蒙古"));
        assert_eq!(reference[1].name_english.as_deref(), Some("Peru"));
    }
}
