use std::sync::Arc;

use crate::directory::Directory;
use poem_openapi::{payload::Json, Enum, Object, OpenApi};

pub struct Api {
    directory: Arc<Directory>,
}

pub fn api(directory: &Arc<Directory>) -> Api {
    Api {
        directory: directory.clone(),
    }
}

#[OpenApi(tag = "super::Tags::Status")]
impl Api {
    /// Service status
    #[oai(path = "/status", method = "get")]
    async fn status(&self) -> Json<Status> {
        let directory = &self.directory;
        Json(Status {
            status: if directory.is_degraded() {
                Health::Degraded
            } else {
                Health::Ok
            },
            records: directory.record_count(),
            regions: directory.region_count(),
            references: directory.reference_count(),
        })
    }
}

#[derive(Enum)]
#[oai(rename_all = "lowercase")]
enum Health {
    Ok,
    Degraded,
}

#[derive(Object)]
struct Status {
    status: Health,
    records: usize,
    regions: usize,
    references: usize,
}
