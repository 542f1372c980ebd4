//! Contact-capture endpoint.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use rand::Rng;

use crate::dto::{ContactRequest, ContactResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Fallback rate-limit key when no forwarding header is present.
const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the rate-limit key from proxy-supplied headers.
///
/// Distinct users behind one proxy share a key and therefore a counter;
/// the limiter tolerates that by design.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Generates a tracking id of the form `sub_<unix-millis>_<suffix>`.
fn submission_id() -> String {
    const ID_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let mut rng = rand::thread_rng();
    let suffix: String = (0..7)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect();

    format!("sub_{millis}_{suffix}")
}

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    // Rate limit before the body is even considered.
    let key = client_key(&headers);
    let allowed = {
        let mut limiter = state
            .limiter
            .lock()
            .map_err(|_| AppError::Internal("rate limiter lock poisoned".to_string()))?;
        limiter.check(&key)
    };
    if !allowed {
        return Err(AppError::RateLimited);
    }

    let Json(contact) =
        body.map_err(|_| AppError::BadRequest("Invalid JSON in request body".to_string()))?;
    contact.validate().map_err(AppError::Validation)?;

    let submission_id = submission_id();
    tracing::info!("new submission {submission_id} from {}", contact.email);

    match &state.notifier {
        Some(notifier) => {
            // The submission is already captured in the logs; a delivery
            // failure must not fail the request.
            if let Err(e) = notifier.send_lead(&submission_id, &contact).await {
                tracing::error!("failed to deliver lead notification: {e:#}");
            }
        }
        None => {
            tracing::warn!(
                "no lead webhook configured, submission {submission_id} captured in logs only"
            );
        }
    }

    Ok(Json(ContactResponse {
        message: "Discovery request captured and sent".to_string(),
        submission_id,
    }))
}
