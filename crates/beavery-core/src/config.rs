//! Environment lookups for service configuration.
//!
//! Configuration is read once at startup. [`Env`] wraps the lookup function so
//! config structs can be built from the real process environment or from a
//! fixed map in tests.

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Source of configuration values.
pub struct Env<F> {
    lookup: F,
}

fn process_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Env<fn(&str) -> Option<String>> {
    /// Read from the process environment.
    pub fn process() -> Self {
        Self {
            lookup: process_var,
        }
    }
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn from_fn(lookup: F) -> Self {
        Self { lookup }
    }

    /// Value of `key`, treating blank values as unset.
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    pub fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_owned())
    }

    /// Parse `key` into `T`, falling back to `default` when unset.
    pub fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(key) {
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                message: e.to_string(),
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Env<impl Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Env::from_fn(move |k| map.get(k).cloned())
    }

    #[test]
    fn should_return_required_value() {
        let env = env(&[("SUPABASE_URL", "https://x.supabase.co")]);
        assert_eq!(env.required("SUPABASE_URL").unwrap(), "https://x.supabase.co");
    }

    #[test]
    fn should_treat_blank_value_as_missing() {
        let env = env(&[("SUPABASE_URL", "   ")]);
        assert!(matches!(
            env.required("SUPABASE_URL"),
            Err(ConfigError::Missing("SUPABASE_URL"))
        ));
    }

    #[test]
    fn should_fall_back_to_default_port() {
        let env = env(&[]);
        assert_eq!(env.parse_or("PORT", 3001u16).unwrap(), 3001);
    }

    #[test]
    fn should_reject_unparsable_port() {
        let env = env(&[("PORT", "eighty")]);
        let err = env.parse_or("PORT", 3001u16).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
