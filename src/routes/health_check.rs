use actix_web::HttpResponse;
use chrono::SecondsFormat;
use chrono::Utc;
use serde_json::json;

/// `GET /api/health`
///
/// Liveness only; does not touch the email provider.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
