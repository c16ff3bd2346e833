use crate::observability::METRICS;
use crate::webhooks::github::http_server::handle_github_webhook;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use octorelay::delivery::{DeliveryError, MattermostClient};
use octorelay::utils::repository_filter::RepositoryFilter;
use octorelay::{AppConfig, Dispatcher, Formatter};

/// Shared, read-only state for every request.
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub delivery: MattermostClient,
    pub repository_filter: RepositoryFilter,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, DeliveryError> {
        Ok(Self {
            dispatcher: Dispatcher::new(Formatter::from_config(config), config.output_mode),
            delivery: MattermostClient::new(&config.webhook_url, config.delivery.clone())?,
            repository_filter: config.repository_filter.clone(),
        })
    }
}

pub async fn run_http_server(state: AppState, port: u16) -> std::io::Result<()> {
    tracing::info!("Starting HTTP server on port {}", port);

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(health)
            .service(metrics)
            .service(handle_github_webhook)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[get("/health")]
async fn health() -> impl Responder {
    tracing::debug!("Health check");
    "I'm ok"
}

#[get("/metrics")]
async fn metrics() -> HttpResponse {
    HttpResponse::Ok().json(METRICS.snapshot())
}
