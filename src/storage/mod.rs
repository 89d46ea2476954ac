//! Storage module for saving and loading director state
//!
//! Saves are JSON documents that carry the state together with a digest of
//! the script it belongs to, so a save cannot be resumed against a different
//! script.

use crate::types::{script::Script, state::State};
use serde::{Deserialize, Serialize};

/// On-disk save layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// md5 of the script's canonical JSON
    pub script_digest: String,
    pub state: State,
}

/// Fingerprint of a script
pub fn script_digest(script: &Script) -> anyhow::Result<String> {
    let canonical = serde_json::to_vec(script)?;
    Ok(format!("{:x}", md5::compute(canonical)))
}

/// Save state to bytes using JSON serialization
pub fn save(script: &Script, state: &State) -> anyhow::Result<Vec<u8>> {
    let data = SaveData {
        script_digest: script_digest(script)?,
        state: state.clone(),
    };
    let json = serde_json::to_string_pretty(&data)?;
    Ok(json.into_bytes())
}

/// Load state from bytes, checking it was saved for this script
pub fn load(script: &Script, bytes: &[u8]) -> anyhow::Result<State> {
    let json = String::from_utf8(bytes.to_vec())?;
    let data: SaveData = serde_json::from_str(&json)?;

    let expected = script_digest(script)?;
    if data.script_digest != expected {
        anyhow::bail!(
            "save belongs to a different script (digest {}, expected {})",
            data.script_digest,
            expected
        );
    }
    Ok(data.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::director::Director;
    use crate::types::script::{ResultCategory, Speaker, Step};

    fn script() -> Script {
        Script::new(vec![
            Step::say(Speaker::Ivan, "Sit down."),
            Step::say(Speaker::Ivan, "Deal."),
            Step::End,
        ])
    }

    #[test]
    fn save_then_load_restores_state() {
        let mut director = Director::new(script());
        director.advance();
        director.set_result(ResultCategory::Draw);

        let bytes = save(director.script(), director.state()).unwrap();
        let restored = load(&script(), &bytes).unwrap();

        assert_eq!(&restored, director.state());
        assert_eq!(restored.position, 1);
        assert_eq!(restored.last_result(), Some(ResultCategory::Draw));
    }

    #[test]
    fn save_keeps_out_of_range_position() {
        let state = State::at(-4);
        let bytes = save(&script(), &state).unwrap();
        assert_eq!(load(&script(), &bytes).unwrap(), state);
    }

    #[test]
    fn load_rejects_other_script() {
        let bytes = save(&script(), &State::new()).unwrap();
        let other = Script::new(vec![Step::End]);

        let err = load(&other, &bytes).unwrap_err();
        assert!(err.to_string().contains("different script"));
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        assert_eq!(script_digest(&script()).unwrap(), script_digest(&script()).unwrap());
        assert_ne!(
            script_digest(&script()).unwrap(),
            script_digest(&Script::default()).unwrap()
        );
    }

    #[test]
    fn load_invalid_data_returns_error() {
        let result = load(&script(), b"invalid json data");
        assert!(result.is_err());
    }
}
