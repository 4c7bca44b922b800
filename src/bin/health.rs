use std::env;
use std::error;
use std::process::exit;

use reqwest::Url;

/// Probes the service's /health route, for use as a container health check.
fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = env::args().collect();
    let base = match args.get(1) {
        Some(base) => base,
        None => {
            eprintln!("usage: alien_translator_health <base url>");
            exit(2);
        }
    };

    let url = Url::parse(base)?.join("health")?;
    let res = reqwest::blocking::get(url)?;
    if !res.status().is_success() {
        eprintln!("health check failed with status {}", res.status());
        exit(1);
    }

    Ok(())
}
