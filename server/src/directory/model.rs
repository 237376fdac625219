use serde::{Deserialize, Deserializer};

/// One country's visa entry in the canonical schema.
///
/// Older data files spelled several keys differently (`name_en`,
/// `countryNameEn`, `regionZh`, snake_case visa fields). Every spelling is
/// read on its own and merged by [`first_present`], so a record carrying two
/// spellings of the same field still loads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct CountryVisaRecord {
    pub id: Option<String>,
    pub name_local: Option<String>,
    pub name_english: Option<String>,
    pub code: Option<String>,
    pub region: Option<String>,
    pub visa_requirement: Option<String>,
    pub stay_days: Option<String>,
    pub notes: Option<String>,
    pub process: Option<String>,
    pub documents: Option<String>,
    pub fee: Option<String>,
    pub official_link: Option<String>,
}

impl CountryVisaRecord {
    pub fn has_name(&self) -> bool {
        [&self.name_local, &self.name_english]
            .into_iter()
            .flatten()
            .any(|name| !name.trim().is_empty())
    }
}

/// Entry of the lightweight countries table: enough to recognise a country
/// that has no visa entry yet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawIdentity")]
pub struct CountryReference {
    pub code: Option<String>,
    pub name_english: Option<String>,
    pub name_local: Option<String>,
    pub region: Option<String>,
}

/// Name, code and region keys under every spelling seen in data files.
#[derive(Deserialize)]
struct RawIdentity {
    #[serde(default, rename = "nameLocal")]
    name_local: Option<String>,
    #[serde(default, rename = "name_local")]
    name_local_snake: Option<String>,
    #[serde(default)]
    name_zh: Option<String>,
    #[serde(default, rename = "countryNameZh")]
    country_name_zh: Option<String>,
    #[serde(default)]
    name: Option<String>,

    #[serde(default, rename = "nameEnglish")]
    name_english: Option<String>,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default, rename = "countryNameEn")]
    country_name_en: Option<String>,

    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    iso2: Option<String>,
    #[serde(default, rename = "countryCode")]
    country_code: Option<String>,

    #[serde(default)]
    region: Option<String>,
    #[serde(default, rename = "regionZh")]
    region_zh: Option<String>,
    #[serde(default, rename = "region_zh")]
    region_zh_snake: Option<String>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(flatten)]
    identity: RawIdentity,

    #[serde(default, deserialize_with = "loose_text")]
    id: Option<String>,
    #[serde(default, rename = "visaRequirement")]
    visa_requirement: Option<String>,
    #[serde(default, rename = "visa_requirement")]
    visa_requirement_snake: Option<String>,
    #[serde(default)]
    visa: Option<String>,
    #[serde(default, rename = "stayDays", deserialize_with = "loose_text")]
    stay_days: Option<String>,
    #[serde(default, rename = "stay_days", deserialize_with = "loose_text")]
    stay_days_snake: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    process: Option<String>,
    #[serde(default)]
    documents: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    fee: Option<String>,
    #[serde(default, rename = "officialLink")]
    official_link: Option<String>,
    #[serde(default, rename = "official_link")]
    official_link_snake: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl From<RawIdentity> for CountryReference {
    fn from(raw: RawIdentity) -> Self {
        Self {
            code: first_present([raw.code, raw.iso2, raw.country_code]),
            name_english: first_present([raw.name_english, raw.name_en, raw.country_name_en]),
            name_local: first_present([
                raw.name_local,
                raw.name_local_snake,
                raw.name_zh,
                raw.country_name_zh,
                raw.name,
            ]),
            region: first_present([raw.region, raw.region_zh, raw.region_zh_snake]),
        }
    }
}

impl From<RawRecord> for CountryVisaRecord {
    fn from(raw: RawRecord) -> Self {
        let identity = CountryReference::from(raw.identity);
        Self {
            id: raw.id,
            name_local: identity.name_local,
            name_english: identity.name_english,
            code: identity.code,
            region: identity.region,
            visa_requirement: first_present([
                raw.visa_requirement,
                raw.visa_requirement_snake,
                raw.visa,
            ]),
            stay_days: first_present([raw.stay_days, raw.stay_days_snake]),
            notes: raw.notes,
            process: raw.process,
            documents: raw.documents,
            fee: raw.fee,
            official_link: first_present([
                raw.official_link,
                raw.official_link_snake,
                raw.link,
            ]),
        }
    }
}

/// First spelling carrying a non-blank value, in precedence order.
fn first_present<const N: usize>(spellings: [Option<String>; N]) -> Option<String> {
    spellings
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

// stay days, fees and ids show up both as strings and as bare numbers
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<LooseText>::deserialize(deserializer)?.map(|value| match value {
            LooseText::Text(text) => text,
            LooseText::Number(number) => number.to_string(),
            LooseText::Flag(flag) => flag.to_string(),
        }),
    )
}
