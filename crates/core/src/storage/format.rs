use crate::errors::CoreError;

use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN};

/// Magic bytes identifying a ZiFÓLIO ledger file.
pub const MAGIC: &[u8; 4] = b"ZFLO";

/// Current container version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + len(8)
pub const HEADER_SIZE: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

/// Serialize header and ciphertext into one buffer.
///
/// ```text
/// [ZFLO 4B] [version u16 LE] [memory u32 LE] [time u32 LE] [lanes u32 LE]
/// [salt 16B] [nonce 12B] [ciphertext_len u64 LE] [ciphertext ..]
/// ```
pub fn encode(envelope: &Envelope, ciphertext: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&envelope.version.to_le_bytes());
    buf.extend_from_slice(&envelope.kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&envelope.kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&envelope.kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(&envelope.salt);
    buf.extend_from_slice(&envelope.nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(ciphertext);
    buf
}

/// Parse a container, returning the header and a borrowed ciphertext slice.
/// Trailing bytes after the declared ciphertext are ignored.
pub fn decode(data: &[u8]) -> Result<(Envelope, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(format!(
            "File is {} bytes, shorter than the {HEADER_SIZE}-byte header",
            data.len()
        )));
    }
    let mut reader = Reader { data, pos: 0 };

    if reader.take::<4>()? != *MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not a ZiFÓLIO ledger file".into(),
        ));
    }

    let version = u16::from_le_bytes(reader.take()?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: u32::from_le_bytes(reader.take()?),
        time_cost: u32::from_le_bytes(reader.take()?),
        parallelism: u32::from_le_bytes(reader.take()?),
    };
    kdf_params.check_bounds()?;

    let salt = reader.take::<SALT_LEN>()?;
    let nonce = reader.take::<NONCE_LEN>()?;
    let declared = u64::from_le_bytes(reader.take()?);

    let remaining = data.len() - reader.pos;
    let len = usize::try_from(declared)
        .ok()
        .filter(|&len| len <= remaining)
        .ok_or_else(|| {
            CoreError::InvalidFileFormat(format!(
                "File truncated: header declares {declared} bytes of ciphertext, {remaining} present"
            ))
        })?;

    let ciphertext = &data[reader.pos..reader.pos + len];
    Ok((
        Envelope {
            version,
            kdf_params,
            salt,
            nonce,
        },
        ciphertext,
    ))
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let end = self.pos + N;
        let bytes: [u8; N] = self
            .data
            .get(self.pos..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat(format!("Unexpected end of header at byte {}", self.pos)))?;
        self.pos = end;
        Ok(bytes)
    }
}
