use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use clap_serde_derive::ClapSerde;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, Span};

use crate::config::Config;
use crate::error::{ApiResult, HttpErrorResponse, TranslatorError};
use crate::translate::{DecodeResponse, EncodeTextResponse, HealthResponse};

mod config;
mod error;
mod telemetry;
mod translate;

#[cfg(unix)]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env, default_value = "AlienTranslator.toml")]
    config_file: String,

    /// Configuration options
    #[command(flatten)]
    pub opt_config: <Config as ClapSerde>::Opt,
}

#[derive(Clone)]
struct AppState {
    image_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let config = match Config::from_toml(&args.config_file) {
        Ok(conf) => conf.merge(args.opt_config),
        Err(err) => {
            if args.config_file == "AlienTranslator.toml" {
                Config::default().merge(args.opt_config)
            } else {
                exit_err!(
                    1,
                    "Failed to read configuration file {} with error: {}",
                    args.config_file,
                    err
                );
            }
        }
    };
    telemetry::init_telemetry(&config.otel_endpoint, config.console)?;

    let router = router(&config)?;
    let listener = TcpListener::bind(format!("{}:{}", config.address, config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Serving frontend from {}", config.frontend_dir);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(config: &Config) -> Result<Router> {
    let state = AppState {
        image_file: PathBuf::from(&config.image_file),
    };

    let api_router = Router::new()
        .route("/decode", post(handle_decode))
        .route("/encode/text", post(handle_encode_text))
        .route("/encode/image", post(handle_encode_image));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response, latency: Duration, _span: &Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Ok(Router::new()
        .nest("/api/v1", api_router)
        .route("/health", get(handle_health))
        .fallback_service(ServeDir::new(&config.frontend_dir))
        .layer(trace_layer)
        .layer(cors_layer(&config.cors_origin)?)
        .with_state(state))
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let cors = if origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    };
    Ok(cors)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

// The request body is intentionally not extracted: any body, including a
// malformed one, gets the same response.
#[axum_macros::debug_handler]
async fn handle_decode() -> (StatusCode, Json<DecodeResponse>) {
    (StatusCode::OK, Json(DecodeResponse::sample()))
}

#[axum_macros::debug_handler]
async fn handle_encode_text() -> (StatusCode, Json<EncodeTextResponse>) {
    (StatusCode::OK, Json(EncodeTextResponse::sample()))
}

#[axum_macros::debug_handler(state = AppState)]
async fn handle_encode_image(State(state): State<AppState>) -> ApiResult<Response> {
    let bytes = match tokio::fs::read(&state.image_file).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => bail_api!(
            StatusCode::NOT_FOUND,
            "Image file {} not found",
            state.image_file.display()
        ),
        Err(err) => return Err(err.into()),
    };

    let content_type = image_content_type(&state.image_file);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

#[axum_macros::debug_handler]
async fn handle_health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

// As per https://developer.mozilla.org/en-US/docs/Web/Media/Formats/Image_types
fn image_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[macro_export]
macro_rules! exit_err {
    ($code:expr, $fmt:expr $(, $arg:expr)*) => {{
        eprintln!($fmt $(, $arg)*);
        std::process::exit($code);
    }};
}
