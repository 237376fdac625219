use std::sync::Arc;

use poem::{
    get, handler, http::StatusCode, middleware::CatchPanic, middleware::Cors, Endpoint,
    EndpointExt, IntoEndpoint, Middleware, Route,
};
use poem_openapi::OpenApiService;
use tracing::error;

use crate::{config, directory::Directory};

pub mod api_error;
pub mod controllers;
pub mod trace_error;

pub fn routes(directory: Directory) -> impl IntoEndpoint {
    let directory = &Arc::new(directory);
    use controllers::*;
    let controllers = (
        countries::api(directory),
        regions::api(directory),
        visas::api(directory),
        status::api(directory),
    );

    let cfg = config::get();
    let prefix = &cfg.api.prefix;

    let api = OpenApiService::new(controllers, &cfg.api.name, "1.0").url_prefix(prefix);
    let mut route = Route::new().at("/", get(index));
    if cfg.debug.swagger {
        route = route.nest("/swagger", api.swagger_ui());
    }

    route
        .nest(prefix, api)
        .with_if(cfg.api.cors, Cors::new())
        .with(catch_panic())
        .with(trace_error::TraceError)
}

#[handler]
fn index() -> &'static str {
    "Visa directory is running"
}

fn catch_panic<E: Endpoint>() -> impl Middleware<E> {
    CatchPanic::new().with_handler(|err| {
        error!("{:?}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
