use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://teknologia-backend-mysql.onrender.com";

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub page_size: usize,
    pub download_filename: String,
    pub download_dir: String,
    // 0 keeps reqwest's own default
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix("RESUMEDROP").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("page_size", 5)?
            .set_default("download_filename", "resume.pdf")?
            .set_default("download_dir", ".")?
            .set_default("request_timeout_secs", 0)?
            .add_source(env)
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        s.base_url = s.base_url.trim_end_matches('/').to_string();
        if s.page_size == 0 {
            s.page_size = 5;
        }
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
