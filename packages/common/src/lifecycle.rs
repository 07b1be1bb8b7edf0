use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a plugin or rule component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentLifecycleState {
    /// Running and accepting messages.
    Active,
    /// Registered but not processing anything.
    Suspended,
}

impl ComponentLifecycleState {
    /// All possible state values.
    pub const ALL: &'static [ComponentLifecycleState] = &[Self::Active, Self::Suspended];

    /// Returns the string representation (SCREAMING_SNAKE_CASE), as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for ComponentLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Newly registered components stay suspended until activated.
impl Default for ComponentLifecycleState {
    fn default() -> Self {
        Self::Suspended
    }
}

/// Error when parsing an invalid state string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStateError {
    invalid: String,
}

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid state '{}'. Valid values: {}",
            self.invalid,
            ComponentLifecycleState::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStateError {}

impl FromStr for ComponentLifecycleState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseStateError {
                invalid: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_as_str() {
        for state in ComponentLifecycleState::ALL {
            let json = serde_json::to_string(state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
            let parsed: ComponentLifecycleState = serde_json::from_str(&json).unwrap();
            assert_eq!(*state, parsed);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ACTIVE".parse::<ComponentLifecycleState>().unwrap(),
            ComponentLifecycleState::Active
        );
        assert!("active".parse::<ComponentLifecycleState>().is_err());
    }

    #[test]
    fn test_parse_error_lists_valid_values() {
        let err = "PAUSED".parse::<ComponentLifecycleState>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state 'PAUSED'. Valid values: ACTIVE, SUSPENDED"
        );
    }
}
