use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then `TRIVIA_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("database_path", "trivia.db")?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
