use actix_web::{web, App, HttpServer};
use cowbull_webhook::config::EngineConfig;
use cowbull_webhook::infra::state::build_state;
use cowbull_webhook::middleware::request_trace::RequestTrace;
use cowbull_webhook::middleware::structured_logger::StructuredLogger;
use cowbull_webhook::middleware::trace_span::TraceSpan;
use cowbull_webhook::{routes, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("WEBHOOK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("WEBHOOK_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ WEBHOOK_PORT must be a valid port number");
            std::process::exit(1);
        });

    let engine_config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.detail());
            std::process::exit(1);
        }
    };

    println!("🚀 Starting cowbull webhook on http://{}:{}", host, port);

    let app_state = match build_state().with_engine_config(engine_config).build() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(state = ?app_state, "game engine client ready");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
