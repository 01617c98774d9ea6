use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Slow,
    Speed,
    Grow,
    Score,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Slow,
        PowerUpKind::Speed,
        PowerUpKind::Grow,
        PowerUpKind::Score,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Slow => "slow",
            PowerUpKind::Speed => "speed",
            PowerUpKind::Grow => "grow",
            PowerUpKind::Score => "score",
        }
    }
}

/// What picking up one power-up does. `delay_delta_ms` is applied to the move
/// delay on pickup (positive slows the snake down) and reversed when the
/// power expires; score and growth are one-shot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerEffect {
    pub score_bonus: u32,
    pub delay_delta_ms: i32,
    pub growth: u32,
}

/// Per-kind effect table. Kept as data so embedders can rebalance power-ups
/// from configuration instead of code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerPolicy {
    pub slow: PowerEffect,
    pub speed: PowerEffect,
    pub grow: PowerEffect,
    pub score: PowerEffect,
}

impl PowerPolicy {
    pub fn effect(&self, kind: PowerUpKind) -> PowerEffect {
        match kind {
            PowerUpKind::Slow => self.slow,
            PowerUpKind::Speed => self.speed,
            PowerUpKind::Grow => self.grow,
            PowerUpKind::Score => self.score,
        }
    }
}

impl Default for PowerPolicy {
    fn default() -> Self {
        Self {
            slow: PowerEffect {
                score_bonus: 1,
                delay_delta_ms: 80,
                growth: 0,
            },
            speed: PowerEffect {
                score_bonus: 1,
                delay_delta_ms: -60,
                growth: 0,
            },
            grow: PowerEffect {
                score_bonus: 1,
                delay_delta_ms: 0,
                growth: 3,
            },
            score: PowerEffect {
                score_bonus: 20,
                delay_delta_ms: 0,
                growth: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_lookup_matches_kind() {
        let policy = PowerPolicy::default();
        assert_eq!(policy.effect(PowerUpKind::Slow).delay_delta_ms, 80);
        assert_eq!(policy.effect(PowerUpKind::Speed).delay_delta_ms, -60);
        assert_eq!(policy.effect(PowerUpKind::Grow).growth, 3);
        assert_eq!(policy.effect(PowerUpKind::Score).score_bonus, 20);
    }

    #[test]
    fn test_policy_survives_yaml_round_trip() {
        let policy = PowerPolicy::default();
        let encoded = serde_yaml_ng::to_string(&policy).unwrap();
        let decoded: PowerPolicy = serde_yaml_ng::from_str(&encoded).unwrap();
        assert_eq!(decoded, policy);
    }
}
