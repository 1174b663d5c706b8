use crate::errors::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

pub const SESSION_COOKIE: &str = "weight_session";
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const MAX_SESSIONS: usize = 1024;

/// Decides whether a submitted password opens a session.
pub trait Authenticator: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}

/// One shared plaintext password for every visitor. A placeholder, not a
/// security boundary.
pub struct SharedPassword {
    password: String,
}

impl SharedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl Authenticator for SharedPassword {
    fn verify(&self, candidate: &str) -> bool {
        !self.password.is_empty() && candidate == self.password
    }
}

/// Live session tokens with their issue time. Tokens expire after `ttl`;
/// past `capacity` the oldest token is dropped.
#[derive(Debug)]
pub struct SessionStore {
    tokens: HashMap<String, Instant>,
    ttl: Duration,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SESSION_TTL, MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            tokens: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn issue(&mut self) -> String {
        self.prune_expired();
        while self.tokens.len() >= self.capacity {
            let Some(oldest) = self
                .tokens
                .iter()
                .min_by_key(|(_, issued)| **issued)
                .map(|(token, _)| token.clone())
            else {
                break;
            };
            self.tokens.remove(&oldest);
        }

        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), Instant::now());
        token
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens
            .get(token)
            .is_some_and(|issued| issued.elapsed() < self.ttl)
    }

    pub fn revoke(&mut self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }

    fn prune_expired(&mut self) {
        let ttl = self.ttl;
        self.tokens.retain(|_, issued| issued.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_TTL.as_secs()
    )
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

pub async fn is_authenticated(state: &AppState, headers: &HeaderMap) -> bool {
    match session_token(headers) {
        Some(token) => state.sessions.lock().await.contains(token),
        None => false,
    }
}

/// Rejects requests without a live session before any handler runs.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !is_authenticated(&state, request.headers()).await {
        debug!(path = %request.uri().path(), "rejected request without session");
        return Err(AppError::unauthorized());
    }
    Ok(next.run(request).await)
}
