use std::sync::Arc;

use super::prelude::*;
use crate::directory::{CountryVisaRecord, Directory};
use poem_openapi::{payload::Json, Object, OpenApi};

pub struct Api {
    directory: Arc<Directory>,
}

pub fn api(directory: &Arc<Directory>) -> Api {
    Api {
        directory: directory.clone(),
    }
}

#[OpenApi(tag = "super::Tags::Countries")]
impl Api {
    /// Countries
    #[oai(path = "/countries", method = "get")]
    async fn countries(&self) -> Result<Json<Vec<CountrySummary>>> {
        let records = self.directory.list_all().map_err(ApiError::from)?;
        Ok(Json(records.iter().map(CountrySummary::from).collect()))
    }
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
struct CountrySummary {
    name_local: Option<String>,
    name_english: Option<String>,
    region: Option<String>,
}

impl From<&CountryVisaRecord> for CountrySummary {
    fn from(record: &CountryVisaRecord) -> Self {
        Self {
            name_local: record.name_local.clone(),
            name_english: record.name_english.clone(),
            region: record.region.clone(),
        }
    }
}
