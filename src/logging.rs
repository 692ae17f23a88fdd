//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};

/// The number of body bytes to include in a log line before truncating.
const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = extract_parts_and_body_text_from_request(request).await;
    log_body("Received request", &format!("{} {}", parts.method, parts.uri), &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = extract_parts_and_body_text_from_response(response).await;
    log_body("Sending response", &parts.status.to_string(), &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn extract_parts_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_parts_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

fn log_body(direction: &str, summary: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{direction}: {summary}\nbody: {}...", truncate(body));
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{direction}: {summary}\nbody: {body:?}");
    }
}

/// The first [LOG_BODY_LENGTH_LIMIT] bytes of `body`, backed off to the
/// nearest character boundary.
fn truncate(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::{LOG_BODY_LENGTH_LIMIT, truncate};

    #[test]
    fn truncate_respects_character_boundaries() {
        // A multi-byte character straddles the truncation limit.
        let body = format!("{}é and more", "x".repeat(LOG_BODY_LENGTH_LIMIT - 1));

        let truncated = truncate(&body);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(body.starts_with(truncated));
    }
}
