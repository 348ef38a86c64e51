use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::features::sessions::store::{SessionState, SessionStore};

const SESSION_COOKIE: &str = "sid";

/// Handle to the current request's session, inserted into request
/// extensions by [`session_middleware`].
#[derive(Clone)]
pub struct SessionContext {
    pub id: Uuid,
    store: SessionStore,
}

impl SessionContext {
    pub(crate) fn new(id: Uuid, store: SessionStore) -> Self {
        Self { id, store }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.store.update(self.id, |state| state.clone()).await
    }

    /// Apply a closure to this session's state atomically.
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        self.store.update(self.id, f).await
    }
}

/// Resolve the `sid` cookie into a [`SessionContext`] and make it
/// available to handlers via request extensions. Issues the cookie on
/// the response when the request arrived without one.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut req: Request,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_session_id);

    let (session_id, issued) = store.resolve(presented).await;

    req.extensions_mut()
        .insert(SessionContext::new(session_id, store));

    let mut response = next.run(req).await;

    if issued {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session_id
        );
        // A UUID cookie value is always a valid header value
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    }

    response
}

fn extract_session_id(cookie_header: &str) -> Option<Uuid> {
    cookie_header
        .split(';')
        .filter_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .find_map(|value| Uuid::parse_str(value.trim()).ok())
}
