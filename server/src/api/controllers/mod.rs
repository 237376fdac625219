pub(super) mod countries;
pub(super) mod regions;
pub(super) mod status;
pub(super) mod visas;

mod prelude {
    pub use crate::api::api_error::ApiError;
    pub use poem::Result;
}

#[derive(poem_openapi::Tags)]
pub enum Tags {
    Countries,
    Regions,
    Visas,
    Status,
}
