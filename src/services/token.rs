//! Short token generation
//!
//! Tokens are `length` random bytes from the thread-local CSPRNG, encoded with
//! the URL-safe base64 alphabet and cut to exactly `length` characters. The
//! encoding of `n` bytes is always at least `n` characters long, so the cut
//! never reaches the padding and every character is in `[A-Za-z0-9_-]`.
//!
//! Each character carries about 6 bits, so an 8-character token has roughly
//! 48 bits of entropy. Uniqueness against the store is the caller's job.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use crate::config::MAX_TOKEN_LENGTH;
use crate::errors::{Result, SurlError};

/// 生成指定长度的随机短码
pub fn generate_token(length: usize) -> String {
    let bytes: Vec<u8> = (0..length).map(|_| rand::random::<u8>()).collect();
    let mut encoded = URL_SAFE.encode(&bytes);
    encoded.truncate(length);
    encoded
}

/// 是否为合法的短码字符
#[inline]
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Fixed-length token generator
#[derive(Debug, Clone, Copy)]
pub struct TokenGenerator {
    length: usize,
}

impl TokenGenerator {
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 || length > MAX_TOKEN_LENGTH {
            return Err(SurlError::config(format!(
                "Token length must be between 1 and {}, got {}",
                MAX_TOKEN_LENGTH, length
            )));
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> String {
        generate_token(self.length)
    }
}
