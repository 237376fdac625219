//! In-memory visa directory.
//!
//! Built once from the static data files and read-only afterwards. An empty
//! record list is the degraded state: every query answers
//! [`DirectoryError::DataUnavailable`] until the process is restarted with
//! valid data.

use std::collections::HashSet;

use tracing::{error, info, warn};

use crate::{config, utils::text};

pub mod loader;
pub mod lookup;
pub mod model;

pub use lookup::{Lookup, VisaView};
pub use model::{CountryReference, CountryVisaRecord};

use lookup::Tier;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DirectoryError {
    #[error("visa data unavailable")]
    DataUnavailable,
    #[error("missing query parameter '{0}'")]
    InvalidQuery(&'static str),
    #[error("no country matches '{0}'")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct Directory {
    records: Vec<CountryVisaRecord>,
    regions: Vec<String>,
    reference: Vec<CountryReference>,
}

impl Directory {
    pub fn new(records: Vec<CountryVisaRecord>, reference: Vec<CountryReference>) -> Self {
        let mut seen = HashSet::new();
        let regions = records
            .iter()
            .filter_map(|r| text::non_blank(r.region.as_deref()))
            .filter(|region| seen.insert(*region))
            .map(str::to_owned)
            .collect();
        Self {
            records,
            regions,
            reference,
        }
    }

    /// Loads both data files. Failures are logged here, once; a broken visa
    /// file leaves the directory degraded, a broken reference file only
    /// disables the placeholder fallback.
    pub fn load(cfg: &config::Data) -> Self {
        let records = match loader::load_records(&cfg.records) {
            Ok(records) => records,
            Err(err) => {
                error!("Visa data unavailable, serving errors until restart: {}", err);
                Vec::new()
            }
        };
        let reference = match &cfg.reference {
            Some(path) => loader::load_reference(path).unwrap_or_else(|err| {
                warn!("Country reference disabled: {}", err);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let directory = Self::new(records, reference);
        if !directory.is_degraded() {
            info!(
                "Loaded {} record(s) in {} region(s), {} reference entries",
                directory.records.len(),
                directory.regions.len(),
                directory.reference.len()
            );
        }
        directory
    }

    pub fn is_degraded(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn reference_count(&self) -> usize {
        self.reference.len()
    }

    pub fn list_all(&self) -> Result<&[CountryVisaRecord], DirectoryError> {
        self.ensure_loaded()?;
        Ok(&self.records)
    }

    /// Distinct regions in first-seen order.
    pub fn list_regions(&self) -> Result<&[String], DirectoryError> {
        self.ensure_loaded()?;
        Ok(&self.regions)
    }

    /// Records whose region equals `region` byte for byte. An empty or absent
    /// region selects everything.
    pub fn filter_by_region(
        &self,
        region: Option<&str>,
    ) -> Result<Vec<&CountryVisaRecord>, DirectoryError> {
        self.ensure_loaded()?;
        Ok(match region.filter(|r| !r.is_empty()) {
            Some(region) => self
                .records
                .iter()
                .filter(|r| r.region.as_deref() == Some(region))
                .collect(),
            None => self.records.iter().collect(),
        })
    }

    /// Resolves a country by code, English name, local name and finally the
    /// reference table. First match in load order wins within each tier.
    pub fn find_by_country(&self, query: Option<&str>) -> Result<Lookup<'_>, DirectoryError> {
        self.ensure_loaded()?;
        let key = query
            .map(text::fold)
            .filter(|key| !key.is_empty())
            .ok_or(DirectoryError::InvalidQuery("country"))?;

        for tier in Tier::ALL {
            let found = self
                .records
                .iter()
                .find(|record| tier.key(record).is_some_and(|v| text::fold(v) == key));
            if let Some(record) = found {
                return Ok(Lookup::Record(record));
            }
        }

        self.reference
            .iter()
            .find(|country| {
                [&country.name_english, &country.name_local, &country.code]
                    .into_iter()
                    .flatten()
                    .any(|v| text::fold(v) == key)
            })
            .map(Lookup::Placeholder)
            .ok_or_else(|| DirectoryError::NotFound(query.unwrap_or_default().trim().to_owned()))
    }

    fn ensure_loaded(&self) -> Result<(), DirectoryError> {
        if self.is_degraded() {
            Err(DirectoryError::DataUnavailable)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, english: &str, local: &str, region: &str) -> CountryVisaRecord {
        CountryVisaRecord {
            code: Some(code.to_owned()),
            name_english: Some(english.to_owned()),
            name_local: Some(local.to_owned()),
            region: Some(region.to_owned()),
            visa_requirement: Some("Visa-free".to_owned()),
            stay_days: Some("90".to_owned()),
            ..Default::default()
        }
    }

    fn sample() -> Directory {
        Directory::new(
            vec![
                record("JP", "Japan", "日本", "Asia-Pacific"),
                record("FR", "France", "法國", "Europe"),
                record("KR", "South Korea", "韓國", "Asia-Pacific"),
                record("DE", "Germany", "德國", "Europe"),
            ],
            vec![CountryReference {
                code: Some("MN".to_owned()),
                name_english: Some("Mongolia".to_owned()),
                name_local: Some("蒙古".to_owned()),
                region: Some("Asia-Pacific".to_owned()),
            }],
        )
    }

    #[test]
    fn list_all_keeps_load_order() {
        let directory = sample();
        let codes = directory
            .list_all()
            .unwrap()
            .iter()
            .map(|r| r.code.as_deref().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(codes, ["JP", "FR", "KR", "DE"]);
    }

    #[test]
    fn regions_are_distinct_and_non_empty() {
        let mut records = sample().records;
        records.push(record("XX", "Nowhere", "無", ""));
        records.push(CountryVisaRecord {
            name_english: Some("Regionless".to_owned()),
            ..Default::default()
        });
        let directory = Directory::new(records, Vec::new());
        assert_eq!(directory.list_regions().unwrap(), ["Asia-Pacific", "Europe"]);
    }

    #[test]
    fn filter_is_exact() {
        let directory = sample();
        let europe = directory.filter_by_region(Some("Europe")).unwrap();
        assert_eq!(europe.len(), 2);
        assert!(europe.iter().all(|r| r.region.as_deref() == Some("Europe")));

        assert!(directory.filter_by_region(Some("europe")).unwrap().is_empty());
        assert!(directory.filter_by_region(Some("Antarctica")).unwrap().is_empty());
    }

    #[test]
    fn empty_filter_returns_everything() {
        let directory = sample();
        assert_eq!(directory.filter_by_region(None).unwrap().len(), 4);
        assert_eq!(directory.filter_by_region(Some("")).unwrap().len(), 4);
    }

    #[test]
    fn find_ignores_case_and_surrounding_whitespace() {
        let directory = sample();
        for query in [" Japan ", "japan", "JAPAN", "jp", "日本"] {
            match directory.find_by_country(Some(query)).unwrap() {
                Lookup::Record(r) => assert_eq!(r.code.as_deref(), Some("JP"), "{query}"),
                other => panic!("{query}: {other:?}"),
            }
        }
    }

    #[test]
    fn code_tier_wins_over_name_tier() {
        let directory = Directory::new(
            vec![
                record("XJ", "JP", "假", "Nowhere"),
                record("JP", "Japan", "日本", "Asia-Pacific"),
            ],
            Vec::new(),
        );
        let Lookup::Record(found) = directory.find_by_country(Some("jp")).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(found.name_english.as_deref(), Some("Japan"));
    }

    #[test]
    fn first_record_wins_within_a_tier() {
        let directory = Directory::new(
            vec![
                record("JP", "Japan", "日本", "Asia-Pacific"),
                record("JP", "Japan (duplicate)", "日本", "Asia-Pacific"),
            ],
            Vec::new(),
        );
        let Lookup::Record(found) = directory.find_by_country(Some("JP")).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(found.name_english.as_deref(), Some("Japan"));
    }

    #[test]
    fn no_diacritic_folding() {
        let directory = Directory::new(
            vec![record("CI", "Côte d'Ivoire", "象牙海岸", "Africa")],
            Vec::new(),
        );
        assert!(directory.find_by_country(Some("côte d'ivoire")).is_ok());
        assert_eq!(
            directory.find_by_country(Some("Cote d'Ivoire")),
            Err(DirectoryError::NotFound("Cote d'Ivoire".to_owned()))
        );
    }

    #[test]
    fn reference_table_yields_placeholder() {
        let directory = sample();
        for query in ["Mongolia", " mn", "蒙古"] {
            let lookup = directory.find_by_country(Some(query)).unwrap();
            assert!(matches!(lookup, Lookup::Placeholder(_)), "{query}");
            assert!(!lookup.is_verified());
        }
    }

    #[test]
    fn visa_records_shadow_the_reference_table() {
        let mut directory = sample();
        directory.reference.push(CountryReference {
            code: Some("JP".to_owned()),
            name_english: Some("Japan".to_owned()),
            ..Default::default()
        });
        assert!(directory.find_by_country(Some("japan")).unwrap().is_verified());
    }

    #[test]
    fn missing_query_is_invalid() {
        let directory = sample();
        for query in [None, Some(""), Some("   ")] {
            assert_eq!(
                directory.find_by_country(query),
                Err(DirectoryError::InvalidQuery("country"))
            );
        }
    }

    #[test]
    fn unknown_country_is_not_found() {
        assert_eq!(
            sample().find_by_country(Some(" Atlantis ")),
            Err(DirectoryError::NotFound("Atlantis".to_owned()))
        );
    }

    #[test]
    fn degraded_directory_refuses_every_query() {
        let directory = Directory::new(Vec::new(), sample().reference);
        assert!(directory.is_degraded());
        assert_eq!(directory.list_all(), Err(DirectoryError::DataUnavailable));
        assert_eq!(directory.list_regions(), Err(DirectoryError::DataUnavailable));
        assert_eq!(
            directory.filter_by_region(Some("Europe")),
            Err(DirectoryError::DataUnavailable)
        );
        assert_eq!(
            directory.find_by_country(Some("Mongolia")),
            Err(DirectoryError::DataUnavailable)
        );
        assert_eq!(
            directory.find_by_country(None),
            Err(DirectoryError::DataUnavailable)
        );
    }

    #[test]
    fn load_degrades_on_missing_file() {
        let directory = Directory::load(&config::Data {
            records: "does/not/exist.json".into(),
            reference: None,
        });
        assert!(directory.is_degraded());
        assert_eq!(directory.reference_count(), 0);
    }

    const VISA_JSON: &str = r#"[
        {"code": "JP", "nameEnglish": "Japan", "nameLocal": "日本", "region": "Asia-Pacific"},
        {"code": "FR", "nameEnglish": "France", "nameLocal": "法國", "region": "Europe"},
        {"code": "KR", "nameEnglish": "South Korea", "nameLocal": "韓國", "region": "Asia-Pacific"}
    ]"#;

    fn write_data(dir: &tempfile::TempDir, visa: &str, countries: &str) -> config::Data {
        let records = dir.path().join("visa.json");
        let reference = dir.path().join("countries.json");
        std::fs::write(&records, visa).unwrap();
        std::fs::write(&reference, countries).unwrap();
        config::Data {
            records,
            reference: Some(reference),
        }
    }

    #[test]
    fn load_reads_both_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = write_data(
            &dir,
            VISA_JSON,
            r#"[{"code": "MN", "name_en": "Mongolia", "name_zh": "蒙古"}]"#,
        );

        let directory = Directory::load(&cfg);
        assert!(!directory.is_degraded());
        assert_eq!(directory.record_count(), 3);
        assert_eq!(directory.reference_count(), 1);
        assert_eq!(directory.list_regions().unwrap(), ["Asia-Pacific", "Europe"]);
        assert!(!directory.find_by_country(Some("mongolia")).unwrap().is_verified());
    }

    #[test]
    fn broken_reference_only_disables_the_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = write_data(&dir, VISA_JSON, "{ not json");

        let directory = Directory::load(&cfg);
        assert!(!directory.is_degraded());
        assert_eq!(directory.record_count(), 3);
        assert_eq!(directory.reference_count(), 0);
        assert!(directory.find_by_country(Some("jp")).unwrap().is_verified());
        assert_eq!(
            directory.find_by_country(Some("Mongolia")),
            Err(DirectoryError::NotFound("Mongolia".to_owned()))
        );
    }

    #[test]
    fn missing_reference_only_disables_the_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut cfg = write_data(&dir, VISA_JSON, "[]");
        cfg.reference = Some(dir.path().join("absent.json"));

        let directory = Directory::load(&cfg);
        assert!(!directory.is_degraded());
        assert_eq!(directory.reference_count(), 0);
    }

    #[test]
    fn malformed_visa_file_degrades() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = write_data(&dir, "[{", r#"[{"code": "MN", "name_en": "Mongolia"}]"#);

        let directory = Directory::load(&cfg);
        assert!(directory.is_degraded());
        assert_eq!(directory.reference_count(), 1);
        assert_eq!(directory.list_all(), Err(DirectoryError::DataUnavailable));
    }
}
