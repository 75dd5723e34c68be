//! Single-line session records that let a later run pick up where one ended.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wave_arena_core::{Progress, WaveNumber};

const RECORD_DOMAIN: &str = "wave-arena";
const RECORD_VERSION: &str = "v1";
const FIELD_DELIMITER: char = ':';

/// Progress and wave reached by a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionRecord {
    /// Waves cleared across all sessions.
    pub(crate) progress: Progress,
    /// Wave the session ended on.
    pub(crate) wave: WaveNumber,
}

impl SessionRecord {
    /// Encodes the record as `wave-arena:v1:<json>`.
    pub(crate) fn encode(&self) -> Result<String, SessionFileError> {
        let json = serde_json::to_string(self).map_err(SessionFileError::InvalidPayload)?;
        Ok(format!("{RECORD_DOMAIN}:{RECORD_VERSION}:{json}"))
    }

    /// Decodes a record previously produced by [`SessionRecord::encode`].
    pub(crate) fn decode(value: &str) -> Result<Self, SessionFileError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SessionFileError::EmptyRecord);
        }

        let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
        let domain = parts.next().ok_or(SessionFileError::MissingVersion)?;
        let version = parts.next().ok_or(SessionFileError::MissingVersion)?;
        let payload = parts.next().ok_or(SessionFileError::MissingPayload)?;

        if domain != RECORD_DOMAIN {
            return Err(SessionFileError::InvalidPrefix(domain.to_owned()));
        }
        if version != RECORD_VERSION {
            return Err(SessionFileError::UnsupportedVersion(version.to_owned()));
        }

        let record: Self =
            serde_json::from_str(payload).map_err(SessionFileError::InvalidPayload)?;
        if record.wave.get() == 0 {
            return Err(SessionFileError::ZeroWave);
        }
        Ok(record)
    }
}

/// Errors that can occur while reading or writing session records.
#[derive(Debug, Error)]
pub(crate) enum SessionFileError {
    /// The record was empty or contained only whitespace.
    #[error("session record was empty")]
    EmptyRecord,
    /// The record did not contain a version segment.
    #[error("session record is missing the version")]
    MissingVersion,
    /// The record did not contain a payload segment.
    #[error("session record is missing the payload")]
    MissingPayload,
    /// The record used an unexpected prefix.
    #[error("session prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The record used an unsupported version identifier.
    #[error("session version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The payload could not be (de)serialised.
    #[error("could not parse session payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// Waves are numbered from one.
    #[error("session record names wave 0")]
    ZeroWave,
}
