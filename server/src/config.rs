use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::metadata::LevelFilter;

lazy_static! {
    static ref CONFIG: Config = new();
}

pub fn get() -> &'static Config {
    &CONFIG
}

fn new() -> Config {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("VISA_").split("_"))
        .extract()
        .expect("config")
}

#[derive(Deserialize, Serialize, Default)]
pub struct Config {
    pub api: Api,
    pub data: Data,
    pub debug: Debug,
}

#[derive(Deserialize, Serialize)]
pub struct Api {
    pub address: IpAddr,
    pub port: u16,
    pub prefix: String,
    pub name: String,
    pub cors: bool,
}

/// Locations of the static data files, relative to the working directory.
#[derive(Deserialize, Serialize)]
pub struct Data {
    pub records: PathBuf,
    pub reference: Option<PathBuf>,
}

#[derive(Deserialize, Serialize)]
pub struct Debug {
    pub log: Log,
    pub swagger: bool,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Log {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Log> for LevelFilter {
    fn from(value: Log) -> Self {
        match value {
            Log::Error => LevelFilter::ERROR,
            Log::Warn => LevelFilter::WARN,
            Log::Info => LevelFilter::INFO,
            Log::Debug => LevelFilter::DEBUG,
            Log::Trace => LevelFilter::TRACE,
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self {
            address: Ipv4Addr::new(127, 0, 0, 1).into(),
            port: 3000,
            prefix: "/api".to_owned(),
            name: "Visa Directory".to_owned(),
            cors: true,
        }
    }
}

impl Default for Data {
    fn default() -> Self {
        Self {
            records: PathBuf::from("data/visa.json"),
            reference: Some(PathBuf::from("data/countries.json")),
        }
    }
}

impl Default for Debug {
    fn default() -> Self {
        Self {
            log: Log::Info,
            swagger: false,
        }
    }
}
