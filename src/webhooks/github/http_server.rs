use super::utils::parse_webhook_payload;
use crate::http_server::AppState;
use crate::observability::METRICS;
use actix_web::{post, web, HttpRequest, HttpResponse};
use octorelay::delivery::MattermostClient;
use octorelay::{EventKind, Notification};
use serde_json::{json, Value};

/// Receives GitHub webhooks.
///
/// Every event we do not fail on is answered `200`; the body says whether a
/// notification was queued (`accepted`) or the event was dropped (`ignored`).
#[post("/github")]
pub async fn handle_github_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    METRICS.increment_webhooks();

    let event_name = match req
        .headers()
        .get("x-github-event")
        .and_then(|v| v.to_str().ok())
    {
        Some(name) => name,
        None => {
            tracing::warn!("Request without X-GitHub-Event header");
            return HttpResponse::BadRequest().finish();
        }
    };
    tracing::info!("Event name: {}", event_name);

    if event_name == "ping" {
        tracing::info!("Ping event");
        return HttpResponse::Ok().body("pong");
    }

    let kind = match EventKind::parse(event_name) {
        Some(kind) => kind,
        None => {
            tracing::debug!("Ignoring unhandled event: {}", event_name);
            METRICS.increment_ignored();
            return ignored();
        }
    };

    let payload: Value = match parse_webhook_payload(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Failed to parse {} event: {}", kind, e);
            return HttpResponse::BadRequest().json(json!({
                "error": "invalid_body",
                "message": e.to_string(),
            }));
        }
    };

    // Without a repository there is nothing to filter on; dispatch reports it.
    let repository = payload
        .pointer("/repository/full_name")
        .and_then(Value::as_str);
    if let Some(repository) = repository {
        if !state.repository_filter.should_process(repository) {
            tracing::info!("Filtered out {} event for repository: {}", kind, repository);
            METRICS.increment_ignored();
            return ignored();
        }
    }

    let notification = match state.dispatcher.dispatch(kind, &payload) {
        Ok(notification) => notification,
        Err(e) => {
            tracing::warn!(
                "Failed to format {} event from {}: {}",
                kind,
                repository.unwrap_or("<unknown>"),
                e
            );
            METRICS.increment_format_errors();
            return HttpResponse::UnprocessableEntity().json(json!({
                "error": e.kind(),
                "message": e.to_string(),
            }));
        }
    };

    let state = state.clone();
    actix_web::rt::spawn(async move {
        deliver(&state.delivery, kind, notification).await;
    });

    HttpResponse::Ok().json(json!({"status": "accepted"}))
}

fn ignored() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "ignored"}))
}

async fn deliver(client: &MattermostClient, kind: EventKind, notification: Notification) {
    match client.send(&notification).await {
        Ok(()) => {
            METRICS.increment_messages_sent();
            tracing::info!("Delivered {} notification", kind);
        }
        Err(e) => {
            METRICS.increment_delivery_failures();
            tracing::error!("Delivery failed for {} notification: {}", kind, e);
        }
    }
}
