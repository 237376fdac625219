use std::sync::Arc;

use super::prelude::*;
use crate::directory::Directory;
use poem_openapi::{payload::Json, OpenApi};

pub struct Api {
    directory: Arc<Directory>,
}

pub fn api(directory: &Arc<Directory>) -> Api {
    Api {
        directory: directory.clone(),
    }
}

#[OpenApi(tag = "super::Tags::Regions")]
impl Api {
    /// Distinct regions
    #[oai(path = "/regions", method = "get")]
    async fn regions(&self) -> Result<Json<Vec<String>>> {
        let regions = self.directory.list_regions().map_err(ApiError::from)?;
        Ok(Json(regions.to_vec()))
    }
}
