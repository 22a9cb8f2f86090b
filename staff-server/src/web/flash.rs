//! Flash notices
//!
//! A one-shot message set on a redirect and shown by the next rendered view.
//! Carried in the `flash` cookie as URL-safe base64 JSON.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use super::cookies;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a cookie value; anything malformed is dropped
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        cookies::read(headers, FLASH_COOKIE).and_then(Self::decode)
    }

    /// `Set-Cookie` value carrying this notice
    pub fn to_cookie(&self) -> String {
        cookies::set(FLASH_COOKIE, &self.encode(), None, false)
    }
}
