//! Session token: a compact binary form of [`SessionProgress`].
//!
//! ```text
//! +------+---------+------------------+
//! | PTMS | version | postcard payload |
//! | 4 B  |   1 B   |     variable     |
//! +------+---------+------------------+
//! ```

use crate::error::FormatError;
use crate::session::SessionProgress;

/// Header magic.
pub const TOKEN_MAGIC: [u8; 4] = *b"PTMS";

/// Current token version.
pub const TOKEN_VERSION: u8 = 1;

const HEADER_LEN: usize = TOKEN_MAGIC.len() + 1;

/// Encode session progress into a token.
pub fn encode_session(session: &SessionProgress) -> Result<Vec<u8>, FormatError> {
    let payload = postcard::to_stdvec(session)?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&TOKEN_MAGIC);
    bytes.push(TOKEN_VERSION);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a token produced by [`encode_session`].
pub fn decode_session(bytes: &[u8]) -> Result<SessionProgress, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::Truncated(bytes.len()));
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);
    if header[..TOKEN_MAGIC.len()] != TOKEN_MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = header[TOKEN_MAGIC.len()];
    if version != TOKEN_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    Ok(postcard::from_bytes(payload)?)
}
