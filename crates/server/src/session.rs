//! Signed session cookies.
//!
//! A token is `base64(user.exp) + "." + hex(sha256(secret.user.exp))`,
//! carried in an HttpOnly `session` cookie. Stateless: the server keeps no
//! session table, so a restart invalidates nothing and logout is purely
//! client-side cookie clearing.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;

/// Session lifetime: one day.
const SESSION_TTL_SECS: u64 = 86_400;

/// Cookie name carrying the token.
pub const SESSION_COOKIE: &str = "session";

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn sign(secret: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b".");
    hasher.update(payload.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Mint a signed token for a user.
pub fn mint_token(username: &str, secret: &str) -> String {
    mint_token_at(username, secret, now_unix() + SESSION_TTL_SECS)
}

fn mint_token_at(username: &str, secret: &str, expires_at: u64) -> String {
    let payload = format!("{}.{}", username, expires_at);
    format!("{}.{}", B64.encode(&payload), sign(secret, &payload))
}

/// Compare two signatures without short-circuiting on the first mismatch,
/// so timing reveals nothing about how much of a forgery matched. The
/// length itself is public (hex sha256 is always 64 chars).
fn signatures_match(expected: &str, provided: &str) -> bool {
    if expected.len() != provided.len() {
        return false;
    }
    expected
        .bytes()
        .zip(provided.bytes())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Verify a token: signature must match and the expiry must be in the
/// future. Returns the username.
pub fn verify_token(token: &str, secret: &str) -> Option<String> {
    let (encoded, signature) = token.rsplit_once('.')?;
    let payload = String::from_utf8(B64.decode(encoded).ok()?).ok()?;
    if !signatures_match(&sign(secret, &payload), signature) {
        return None;
    }

    // Usernames may contain dots; the expiry never does.
    let (username, expires_at) = payload.rsplit_once('.')?;
    let expires_at: u64 = expires_at.parse().ok()?;
    if expires_at <= now_unix() {
        return None;
    }
    Some(username.to_string())
}

/// Set-Cookie value carrying a fresh token.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE, token, SESSION_TTL_SECS
    )
}

/// Set-Cookie value that clears the session.
pub fn clear_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", SESSION_COOKIE)
}

/// The authenticated user, extracted from the session cookie.
///
/// Present in a handler's arguments means the request carried a valid,
/// unexpired session; everything else gets a 401.
pub struct SessionUser(pub String);

#[axum::async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Auth("missing session".to_string()))?;

        let token = cookies
            .split(';')
            .find_map(|part| part.trim().strip_prefix("session="))
            .ok_or_else(|| ApiError::Auth("missing session".to_string()))?;

        verify_token(token, &state.auth.session_secret)
            .map(SessionUser)
            .ok_or_else(|| ApiError::Auth("invalid or expired session".to_string()))
    }
}
