use std::fmt;
use std::str::FromStr;

use crate::llm::GenerationConfig;

/// The two behaviours the assistant can run with.
///
/// `Compact` sends a short prompt with capped output, needs the API key at
/// startup and drops replies it cannot split. `Strict` spells out buffer and
/// overlap rules, uses the service's default generation settings, checks the
/// key per request and files unsplittable replies under `Por asignar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Compact,
    Strict,
}

/// What to do with a reply that has no `|` delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Discard,
    Sentinel,
}

impl Variant {
    pub fn fallback(self) -> Fallback {
        match self {
            Variant::Compact => Fallback::Discard,
            Variant::Strict => Fallback::Sentinel,
        }
    }

    pub fn generation_config(self) -> Option<GenerationConfig> {
        match self {
            Variant::Compact => Some(GenerationConfig {
                max_output_tokens: 100,
                temperature: 0.5,
            }),
            Variant::Strict => None,
        }
    }

    /// Whether a missing API key stops the server before it starts
    pub fn requires_credential_at_startup(self) -> bool {
        matches!(self, Variant::Compact)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Compact => f.write_str("compact"),
            Variant::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Variant::Compact),
            "strict" => Ok(Variant::Strict),
            _ => Err(format!("unknown variant: {s:?} (expected compact or strict)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_variant() {
        let variant = Variant::Compact;
        assert_eq!(variant.fallback(), Fallback::Discard);
        assert!(variant.requires_credential_at_startup());

        let config = variant.generation_config().unwrap();
        assert_eq!(config.max_output_tokens, 100);
        assert_eq!(config.temperature, 0.5);
    }

    #[test]
    fn test_strict_variant() {
        let variant = Variant::Strict;
        assert_eq!(variant.fallback(), Fallback::Sentinel);
        assert!(!variant.requires_credential_at_startup());
        assert!(variant.generation_config().is_none());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("compact".parse::<Variant>().unwrap(), Variant::Compact);
        assert_eq!("Strict".parse::<Variant>().unwrap(), Variant::Strict);
        assert!("loose".parse::<Variant>().is_err());
    }

    #[test]
    fn test_default_is_compact() {
        assert_eq!(Variant::default(), Variant::Compact);
        assert_eq!(Variant::default().to_string(), "compact");
    }
}
