//! One-shot flash messages carried in a cookie
//!
//! A handler that redirects stores its messages in the `flash` cookie; the
//! next page rendered shows them and clears the cookie.

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::convert::Infallible;
use tracing::warn;

pub const FLASH_COOKIE: &str = "flash";

/// Cookie header that removes the flash cookie
pub const CLEAR_FLASH: &str = "flash=; Path=/; Max-Age=0";

/// Messages pending display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    messages: Vec<String>,
}

impl Flash {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Decode the flash cookie value; anything unreadable is dropped
    fn decode(value: &str) -> Self {
        let messages = URL_SAFE_NO_PAD
            .decode(value)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Vec<String>>(&bytes).ok());

        match messages {
            Some(messages) => Self { messages },
            None => {
                warn!("Discarding unreadable flash cookie");
                Self::default()
            }
        }
    }

    fn encode(&self) -> String {
        let json = serde_json::to_vec(&self.messages).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode()
        )
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == FLASH_COOKIE && !value.is_empty())
            .map(|(_, value)| value.to_string());

        Ok(cookie.map(|value| Flash::decode(&value)).unwrap_or_default())
    }
}

/// Redirect to `to`, carrying `flash` to the next page
pub fn redirect_with(to: &str, flash: &Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    if !flash.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&flash.set_cookie()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(cookie: &str) -> Flash {
        let (mut parts, _) = Request::builder()
            .header(COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        Flash::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_flash_survives_redirect() {
        let mut flash = Flash::default();
        flash.push("Venue The Musical Hop was successfully listed!");

        let response = redirect_with("/venues/1", &flash);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let pair = set_cookie.split(';').next().unwrap();

        let read = extract(&format!("theme=dark; {}", pair)).await;
        assert_eq!(read, flash);
    }

    #[tokio::test]
    async fn test_garbage_cookie_is_ignored() {
        assert!(extract("flash=%%%not-base64").await.is_empty());
        assert!(extract("flash=").await.is_empty());
    }

    #[test]
    fn test_empty_flash_sets_no_cookie() {
        let response = redirect_with("/", &Flash::default());
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}
