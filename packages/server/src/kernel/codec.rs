//! AES-256-GCM implementation of `BaseIdentifierCodec`.
//!
//! Token layout (before URL-safe base64): `nonce (12) || ciphertext || tag (16)`.
//! A fresh random nonce per call makes tokens for the same member differ.

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

use crate::common::{CoreError, CoreResult, MemberNo};
use crate::kernel::BaseIdentifierCodec;

/// Associated data bound into every token; blobs sealed for any other purpose
/// under the same key never open as member tokens.
const TOKEN_AAD: &[u8] = b"member_no:v1";

pub struct AesGcmIdentifierCodec {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl AesGcmIdentifierCodec {
    /// Create a codec from a raw 32-byte key.
    pub fn new(key_bytes: &[u8]) -> Result<Self> {
        let unbound = UnboundKey::new(&AES_256_GCM, key_bytes)
            .map_err(|_| anyhow!("member token key must be exactly 32 bytes"))?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    /// Create a codec from a hex-encoded 32-byte key (64 hex characters).
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let bytes = hex::decode(hex_key.trim()).context("member token key must be hex")?;
        Self::new(&bytes)
    }
}

impl BaseIdentifierCodec for AesGcmIdentifierCodec {
    fn encode(&self, member_no: &MemberNo) -> CoreResult<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CoreError::Internal(anyhow!("system random source unavailable")))?;

        let mut sealed = member_no.as_str().as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::from(TOKEN_AAD),
                &mut sealed,
            )
            .map_err(|_| CoreError::Internal(anyhow!("failed to seal member token")))?;

        let mut token = Vec::with_capacity(NONCE_LEN + sealed.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&sealed);

        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    fn decode(&self, token: &str) -> CoreResult<MemberNo> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| CoreError::InvalidToken)?;

        if bytes.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(CoreError::InvalidToken);
        }

        let (nonce_bytes, sealed) = bytes.split_at(NONCE_LEN);
        let nonce =
            Nonce::try_assume_unique_for_key(nonce_bytes).map_err(|_| CoreError::InvalidToken)?;

        let mut in_out = sealed.to_vec();
        let plain = self
            .key
            .open_in_place(nonce, Aad::from(TOKEN_AAD), &mut in_out)
            .map_err(|_| CoreError::InvalidToken)?;

        let member_no = std::str::from_utf8(plain).map_err(|_| CoreError::InvalidToken)?;
        Ok(MemberNo::from(member_no))
    }
}
