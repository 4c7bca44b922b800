use anyhow::Result;
use clap_serde_derive::ClapSerde;
use serde::Deserialize;

#[derive(ClapSerde, Deserialize, Debug)]
pub struct Config {
    /// The address the listener binds to
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub(crate) address: String,

    /// The port the listener binds to
    #[arg(short, long, env, default_value = "8080")]
    pub(crate) port: u16,

    /// Directory holding the built frontend, served at the root path
    #[arg(short, long, env, default_value = "frontend/dist")]
    pub(crate) frontend_dir: String,

    /// Image file returned by the image encode endpoint
    #[arg(short, long, env, default_value = "example.png")]
    pub(crate) image_file: String,

    /// Origin allowed by the CORS policy, `*` allows any origin
    #[arg(long, env, default_value = "*")]
    pub(crate) cors_origin: String,

    /// OTLP collector endpoint for traces and metrics
    #[arg(long, env)]
    pub(crate) otel_endpoint: Option<String>,

    /// Log to the console even when exporting telemetry
    #[arg(long, env)]
    pub(crate) console: bool,
}

impl Config {
    pub fn from_toml(path: &str) -> Result<Self> {
        let str = std::fs::read_to_string(path)?;
        let config = toml::from_str(&str)?;
        Ok(config)
    }
}
