//! Single-line save strings: `frostbite:v1:<base64 json>`.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use frostbite_core::GameState;

const SAVE_DOMAIN: &str = "frostbite";
const SAVE_VERSION: &str = "v1";
const FIELD_DELIMITER: char = ':';

/// Identifier prefix emitted before the encoded save payload.
pub const SAVE_HEADER: &str = "frostbite:v1";

/// Errors that can occur while encoding or decoding save strings.
#[derive(Debug, thiserror::Error)]
pub enum SaveTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("save string was empty")]
    EmptyPayload,
    /// The encoded save did not contain a version segment.
    #[error("save string is missing the version")]
    MissingVersion,
    /// The encoded save did not include the payload segment.
    #[error("save string is missing the payload")]
    MissingPayload,
    /// The encoded save used an unexpected prefix segment.
    #[error("save prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded save used an unsupported version identifier.
    #[error("save version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode save payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The payload could not be converted to or from JSON.
    #[error("could not parse save payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Encodes a game state into a single-line save string.
pub fn encode_save(state: &GameState) -> Result<String, SaveTransferError> {
    let json = serde_json::to_vec(state)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SAVE_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes a game state from its save string representation.
pub fn decode_save(value: &str) -> Result<GameState, SaveTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SaveTransferError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().unwrap_or_default();
    let version = parts.next().ok_or(SaveTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(SaveTransferError::MissingPayload)?;

    if domain != SAVE_DOMAIN {
        return Err(SaveTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SAVE_VERSION {
        return Err(SaveTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostbite_core::{Direction, EnemyState, Location, PlayerState};

    fn sample_state() -> GameState {
        GameState {
            level_number: 3,
            total_score: 450,
            players: vec![PlayerState {
                score: 150,
                location: Location::new(4, 2),
                alive: true,
                facing: (1, 0),
            }],
            collected_fruits: vec![0, 2],
            fruit_locations: vec![Location::new(1, 1), Location::new(6, 3), Location::new(2, 5)],
            enemies: vec![EnemyState {
                location: Location::new(7, 7),
                heading: Direction::Left,
            }],
            remaining_millis: 42_000,
            ticks: 78,
            ice_walls: vec![Location::new(5, 2), Location::new(6, 2)],
            extinguished_campfires: Vec::new(),
        }
    }

    #[test]
    fn encoded_saves_are_single_line_and_decode() {
        let state = sample_state();
        let encoded = encode_save(&state).expect("state encodes");
        assert!(encoded.starts_with(&format!("{SAVE_HEADER}:")));
        assert!(!encoded.contains('\n'));

        let decoded = decode_save(&format!("  {encoded}\n")).expect("save decodes");
        assert_eq!(decoded, state);
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(matches!(
            decode_save("  \n"),
            Err(SaveTransferError::EmptyPayload)
        ));
    }

    #[test]
    fn foreign_prefixes_are_rejected() {
        assert!(matches!(
            decode_save("snowman:v1:e30"),
            Err(SaveTransferError::InvalidPrefix(prefix)) if prefix == "snowman"
        ));
        assert!(matches!(
            decode_save("frostbite"),
            Err(SaveTransferError::MissingVersion)
        ));
        assert!(matches!(
            decode_save("frostbite:v1"),
            Err(SaveTransferError::MissingPayload)
        ));
    }

    #[test]
    fn future_versions_are_rejected() {
        assert!(matches!(
            decode_save("frostbite:v2:e30"),
            Err(SaveTransferError::UnsupportedVersion(version)) if version == "v2"
        ));
    }

    #[test]
    fn corrupt_payloads_are_rejected() {
        assert!(matches!(
            decode_save("frostbite:v1:***"),
            Err(SaveTransferError::InvalidEncoding(_))
        ));
        let not_a_save = STANDARD_NO_PAD.encode(br#"{"level_number":"three"}"#);
        assert!(matches!(
            decode_save(&format!("frostbite:v1:{not_a_save}")),
            Err(SaveTransferError::InvalidPayload(_))
        ));
    }
}
