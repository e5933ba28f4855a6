// src/utils/session.rs

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};

use crate::{config::SESSION_COOKIE_NAME, quiz::SessionId};

/// Extracts the session id from the `Cookie` header, if present and well formed.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .and_then(|(_, value)| value.trim().parse().ok())
}

fn session_cookie(id: SessionId) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE_NAME, id
    ))
    .ok()
}

/// Axum Middleware: Quiz Session.
///
/// Reads the session cookie and injects the `SessionId` into the request
/// extensions. Requests without a valid cookie get a fresh id, which is sent
/// back with `Set-Cookie`.
pub async fn session_middleware(mut req: Request<Body>, next: Next) -> Response {
    let (session_id, issued) = match session_from_headers(req.headers()) {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };

    req.extensions_mut().insert(session_id);
    let mut response = next.run(req).await;

    if issued {
        match session_cookie(session_id) {
            Some(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            None => tracing::warn!("Could not encode session cookie for {}", session_id),
        }
    }

    response
}
