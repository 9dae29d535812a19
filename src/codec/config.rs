//! Decoder configuration.

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Environment variable read by [`CodecConfig::from_env`].
pub const KEY_MATCHING_ENV: &str = "DISCORD_CODEC_KEY_MATCHING";

/// Options for decoding payloads.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CodecConfig {
    /// How object keys are matched against an entity's wire keys.
    pub key_matching: KeyMatching,
}

impl CodecConfig {
    /// Read the configuration from the environment.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyMatchingParseError`] if [`KEY_MATCHING_ENV`] is set to
    /// something other than `exact` or `lenient`.
    pub fn from_env() -> Result<Self, KeyMatchingParseError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(KEY_MATCHING_ENV) {
            config.key_matching = value.parse()?;
        }

        Ok(config)
    }
}

/// Strategy for resolving an object key to a field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum KeyMatching {
    /// Only byte-exact matches resolve; everything else is skipped.
    Exact,
    /// Exact matches first, then a case-insensitive match that ignores
    /// non-letter characters, so `requireColons` resolves to
    /// `require_colons`.
    #[default]
    Lenient,
}

impl FromStr for KeyMatching {
    type Err = KeyMatchingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "lenient" => Ok(Self::Lenient),
            _ => Err(KeyMatchingParseError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Provided value is not a known [`KeyMatching`] strategy.
#[derive(Debug)]
pub struct KeyMatchingParseError {
    value: String,
}

impl KeyMatchingParseError {
    /// Value that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for KeyMatchingParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "unknown key matching `{}`, expected `exact` or `lenient`",
            self.value
        )
    }
}

impl Error for KeyMatchingParseError {}

#[cfg(test)]
mod tests {
    use super::{CodecConfig, KeyMatching, KEY_MATCHING_ENV};

    #[test]
    fn default_is_lenient() {
        assert_eq!(CodecConfig::default().key_matching, KeyMatching::Lenient);
    }

    #[test]
    fn parse_strategy() {
        assert_eq!("exact".parse::<KeyMatching>().unwrap(), KeyMatching::Exact);
        assert_eq!(" Lenient ".parse::<KeyMatching>().unwrap(), KeyMatching::Lenient);

        let err = "fuzzy".parse::<KeyMatching>().unwrap_err();
        assert_eq!(err.value(), "fuzzy");
        assert_eq!(
            err.to_string(),
            "unknown key matching `fuzzy`, expected `exact` or `lenient`"
        );
    }

    #[test]
    fn from_env() {
        std::env::set_var(KEY_MATCHING_ENV, "exact");
        assert_eq!(CodecConfig::from_env().unwrap().key_matching, KeyMatching::Exact);

        std::env::set_var(KEY_MATCHING_ENV, "loose");
        let err = CodecConfig::from_env().unwrap_err();
        assert_eq!(err.value(), "loose");

        std::env::remove_var(KEY_MATCHING_ENV);
        assert_eq!(CodecConfig::from_env().unwrap(), CodecConfig::default());
    }
}
