//! Tunable level rules.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::HazardPolicy;

const DEFAULT_TICK_MILLIS: u64 = 1_000;
const DEFAULT_MAX_ICE_LINE: u32 = 32;
const MIN_TICK_MILLIS: u64 = 1;

/// Rules applied to every level built with this configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Countdown time consumed by each call to `advance`, in milliseconds.
    pub tick_millis: u64,
    /// Longest ice line a single action may place.
    pub max_ice_line: u32,
    /// Effects applied when players touch hazards.
    pub hazards: HazardPolicy,
}

impl LevelConfig {
    /// Countdown time consumed by a single tick, never less than 1 ms.
    #[must_use]
    pub const fn tick(&self) -> Duration {
        if self.tick_millis == 0 {
            Duration::from_millis(MIN_TICK_MILLIS)
        } else {
            Duration::from_millis(self.tick_millis)
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            tick_millis: DEFAULT_TICK_MILLIS,
            max_ice_line: DEFAULT_MAX_ICE_LINE,
            hazards: HazardPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tick_still_consumes_time() {
        let config = LevelConfig {
            tick_millis: 0,
            ..LevelConfig::default()
        };
        assert_eq!(config.tick(), Duration::from_millis(1));
        assert_eq!(LevelConfig::default().tick(), Duration::from_secs(1));
    }
}
