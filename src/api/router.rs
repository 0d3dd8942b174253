use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, availability, blocker, capacity, garage, health, service, settings};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Garages
        .route("/api/v1/garages", post(garage::create_garage).get(garage::get_current_garage).put(garage::update_garage))
        .route("/api/v1/garages/by-slug/{slug}", get(garage::get_garage_by_slug))
        .route("/api/v1/{garage_id}/shop-hours", put(garage::update_shop_hours))

        // Scheduling configuration
        .route("/api/v1/{garage_id}/capacity/{mode}", get(capacity::get_capacity).put(capacity::upsert_capacity))
        .route("/api/v1/{garage_id}/misc-settings", get(settings::get_misc_settings).put(settings::upsert_misc_settings))
        .route("/api/v1/{garage_id}/calendar-notes", get(settings::get_calendar_notes).put(settings::upsert_calendar_notes))
        .route("/api/v1/{garage_id}/blockers", get(blocker::list_blockers).post(blocker::create_blocker))
        .route("/api/v1/{garage_id}/blockers/{blocker_id}", put(blocker::update_blocker).delete(blocker::delete_blocker))
        .route("/api/v1/{garage_id}/services", get(service::list_services).post(service::create_service))
        .route("/api/v1/{garage_id}/services/{service_id}", delete(service::delete_service))

        // Availability
        .route("/api/v1/{garage_id}/availability/{mode}", get(availability::get_availability))
        .route("/api/v1/public/{slug}/availability/{mode}", get(availability::get_public_availability))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        garage_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
