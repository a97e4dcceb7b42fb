//! JSON codec for the durable snapshot record.
//!
//! Layout: `{"notes": [...], "tags": [...], "categories": [...]}` with
//! camelCase fields and RFC 3339 UTC timestamps. There is no version field.

use crate::state::NotesState;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum StateCodecError {
    Encode(serde_json::Error),
    /// Record is not valid JSON or does not have the snapshot shape.
    Decode(serde_json::Error),
}

impl Display for StateCodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode notes state: {err}"),
            Self::Decode(err) => write!(f, "malformed notes state record: {err}"),
        }
    }
}

impl Error for StateCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

pub fn encode_state(state: &NotesState) -> Result<String, StateCodecError> {
    serde_json::to_string(state).map_err(StateCodecError::Encode)
}

pub fn decode_state(raw: &str) -> Result<NotesState, StateCodecError> {
    serde_json::from_str(raw).map_err(StateCodecError::Decode)
}
