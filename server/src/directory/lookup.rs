use super::model::{CountryReference, CountryVisaRecord};
use crate::utils::text::non_blank;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_REQUIREMENT: &str = "unknown (verify with the official source)";
pub const PLACEHOLDER_PROCESS: &str =
    "Check the official website or contact the local embassy or consulate.";
pub const PLACEHOLDER_DOCUMENTS: &str = "Prepare documents as required by the official source.";

/// Outcome of a single-country lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// Documented entry from the visa data file.
    Record(&'a CountryVisaRecord),
    /// Country known to the reference table but missing from the visa data.
    Placeholder(&'a CountryReference),
}

/// Record fields tried in order when resolving a country query.
#[derive(Debug, Clone, Copy)]
pub(super) enum Tier {
    Code,
    English,
    Local,
}

impl Tier {
    pub(super) const ALL: [Tier; 3] = [Tier::Code, Tier::English, Tier::Local];

    pub(super) fn key(self, record: &CountryVisaRecord) -> Option<&str> {
        match self {
            Tier::Code => record.code.as_deref(),
            Tier::English => record.name_english.as_deref(),
            Tier::Local => record.name_local.as_deref(),
        }
    }
}

/// Flat rendition of a lookup with every gap filled by [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq)]
pub struct VisaView {
    pub verified: bool,
    pub code: Option<String>,
    pub country_name: String,
    pub region: String,
    pub visa_requirement: String,
    pub stay_days: String,
    pub notes: String,
    pub process: String,
    pub documents: String,
    pub fee: String,
    pub official_link: String,
}

impl Lookup<'_> {
    pub fn is_verified(&self) -> bool {
        matches!(self, Lookup::Record(_))
    }

    pub fn view(&self) -> VisaView {
        match *self {
            Lookup::Record(record) => VisaView {
                verified: true,
                code: owned(record.code.as_deref()),
                country_name: country_name(
                    record.name_local.as_deref(),
                    record.name_english.as_deref(),
                    record.code.as_deref(),
                ),
                region: or_na(record.region.as_deref()),
                visa_requirement: or_na(record.visa_requirement.as_deref()),
                stay_days: or_na(record.stay_days.as_deref()),
                notes: or_na(record.notes.as_deref()),
                process: or_na(record.process.as_deref()),
                documents: or_na(record.documents.as_deref()),
                fee: or_na(record.fee.as_deref()),
                official_link: or_na(record.official_link.as_deref()),
            },
            Lookup::Placeholder(country) => VisaView {
                verified: false,
                code: owned(country.code.as_deref()),
                country_name: country_name(
                    country.name_local.as_deref(),
                    country.name_english.as_deref(),
                    country.code.as_deref(),
                ),
                region: or_na(country.region.as_deref()),
                visa_requirement: UNKNOWN_REQUIREMENT.to_owned(),
                stay_days: NOT_AVAILABLE.to_owned(),
                notes: NOT_AVAILABLE.to_owned(),
                process: PLACEHOLDER_PROCESS.to_owned(),
                documents: PLACEHOLDER_DOCUMENTS.to_owned(),
                fee: NOT_AVAILABLE.to_owned(),
                official_link: NOT_AVAILABLE.to_owned(),
            },
        }
    }
}

fn country_name(local: Option<&str>, english: Option<&str>, code: Option<&str>) -> String {
    or_na(non_blank(local).or(non_blank(english)).or(code))
}

fn or_na(value: Option<&str>) -> String {
    non_blank(value).unwrap_or(NOT_AVAILABLE).to_owned()
}

fn owned(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_owned)
}
