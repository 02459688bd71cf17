use serde::Deserialize;
use web_time::Duration;

use crate::ai::search::LOOKAHEAD_DEPTH;

pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Options accepted from the host page. Missing fields take defaults, so
/// `{}` (or no object at all) gives a regular game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Alternate capture rule, see `Rules`.
    pub weird: bool,
    /// How long an agent waits for further opponent moves before replying.
    pub debounce_ms: u64,
    pub lookahead_depth: u32,
    /// Fixed seed for the agents' tie-break; time based when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            weird: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            lookahead_depth: LOOKAHEAD_DEPTH,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn weird(weird: bool) -> Self {
        Self {
            weird,
            ..Self::default()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.debounce(), Duration::from_millis(600));
        assert!(!config.weird);
    }

    #[test]
    fn fields_are_camel_case() {
        let json = r#"{"weird": true, "debounceMs": 0, "lookaheadDepth": 1, "seed": 42}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config,
            GameConfig {
                weird: true,
                debounce_ms: 0,
                lookahead_depth: 1,
                seed: Some(42),
            }
        );
    }

    #[test]
    fn wrong_types_are_rejected() {
        let parsed = serde_json::from_str::<GameConfig>(r#"{"debounceMs": "soon"}"#);

        assert!(parsed.is_err());
    }
}
