use std::sync::Arc;

use super::prelude::*;
use crate::directory::{CountryVisaRecord, Directory, VisaView};
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    Enum, Object, OpenApi,
};
use tracing::debug;

pub struct Api {
    directory: Arc<Directory>,
}

pub fn api(directory: &Arc<Directory>) -> Api {
    Api {
        directory: directory.clone(),
    }
}

#[OpenApi(tag = "super::Tags::Visas")]
impl Api {
    /// Visa records, optionally restricted to one region
    #[oai(path = "/visas", method = "get")]
    async fn visas(&self, region: Query<Option<String>>) -> Result<Json<Vec<VisaRecord>>> {
        let records = self
            .directory
            .filter_by_region(region.0.as_deref())
            .map_err(ApiError::from)?;
        Ok(Json(records.into_iter().map(VisaRecord::from).collect()))
    }

    /// Visa information for one country, by code or name
    #[oai(path = "/visa", method = "get")]
    async fn visa(&self, country: Query<Option<String>>) -> Result<Json<VisaInfo>> {
        self.lookup(country.0.as_deref())
    }

    /// Visa information for one country, by code or name
    #[oai(path = "/visa/:country", method = "get")]
    async fn visa_by_path(&self, country: Path<String>) -> Result<Json<VisaInfo>> {
        self.lookup(Some(country.0.as_str()))
    }
}

impl Api {
    fn lookup(&self, country: Option<&str>) -> Result<Json<VisaInfo>> {
        let found = self
            .directory
            .find_by_country(country)
            .map_err(ApiError::from)?;
        if !found.is_verified() {
            debug!("Placeholder answer for '{}'", country.unwrap_or_default());
        }
        Ok(Json(found.view().into()))
    }
}

#[derive(Object)]
#[oai(rename_all = "camelCase", skip_serializing_if_is_none = true)]
struct VisaRecord {
    id: Option<String>,
    name_local: Option<String>,
    name_english: Option<String>,
    code: Option<String>,
    region: Option<String>,
    visa_requirement: Option<String>,
    stay_days: Option<String>,
    notes: Option<String>,
    process: Option<String>,
    documents: Option<String>,
    fee: Option<String>,
    official_link: Option<String>,
}

impl From<&CountryVisaRecord> for VisaRecord {
    fn from(record: &CountryVisaRecord) -> Self {
        Self {
            id: record.id.clone(),
            name_local: record.name_local.clone(),
            name_english: record.name_english.clone(),
            code: record.code.clone(),
            region: record.region.clone(),
            visa_requirement: record.visa_requirement.clone(),
            stay_days: record.stay_days.clone(),
            notes: record.notes.clone(),
            process: record.process.clone(),
            documents: record.documents.clone(),
            fee: record.fee.clone(),
            official_link: record.official_link.clone(),
        }
    }
}

/// Whether the answer comes from the visa data or is a stand-in for a
/// country without an entry.
#[derive(Enum)]
#[oai(rename_all = "lowercase")]
enum Kind {
    Verified,
    Placeholder,
}

#[derive(Object)]
#[oai(rename_all = "camelCase", skip_serializing_if_is_none = true)]
struct VisaInfo {
    kind: Kind,
    code: Option<String>,
    country_name: String,
    region: String,
    visa_requirement: String,
    stay_days: String,
    notes: String,
    process: String,
    documents: String,
    fee: String,
    official_link: String,
}

impl From<VisaView> for VisaInfo {
    fn from(view: VisaView) -> Self {
        Self {
            kind: if view.verified {
                Kind::Verified
            } else {
                Kind::Placeholder
            },
            code: view.code,
            country_name: view.country_name,
            region: view.region,
            visa_requirement: view.visa_requirement,
            stay_days: view.stay_days,
            notes: view.notes,
            process: view.process,
            documents: view.documents,
            fee: view.fee,
            official_link: view.official_link,
        }
    }
}
