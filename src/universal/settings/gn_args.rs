//! GN build arguments and their `--args=` encoding.

use std::collections::BTreeMap;
use std::fmt;

use super::Arch;

/// GN argument key carrying the target architecture.
pub const TARGET_CPU: &str = "target_cpu";

/// Value of a single GN build argument.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum GnValue {
    /// Rendered as a quoted GN string
    Str(String),
    /// Rendered as `true`/`false`
    Bool(bool),
    /// Rendered as a bare integer
    Int(i64),
}

impl fmt::Display for GnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Embedded quotes are passed through as-is; GN decides what they mean.
            GnValue::Str(s) => write!(f, "\"{}\"", s),
            GnValue::Bool(b) => write!(f, "{}", b),
            GnValue::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for GnValue {
    fn from(value: &str) -> Self {
        GnValue::Str(value.to_string())
    }
}

impl From<String> for GnValue {
    fn from(value: String) -> Self {
        GnValue::Str(value)
    }
}

impl From<bool> for GnValue {
    fn from(value: bool) -> Self {
        GnValue::Bool(value)
    }
}

impl From<i64> for GnValue {
    fn from(value: i64) -> Self {
        GnValue::Int(value)
    }
}

/// Arguments passed to `gn gen`, shared by every architecture build.
///
/// Entries iterate in key order, so encoding is deterministic. Per-architecture
/// builds never mutate a shared instance: [`BuildConfiguration::for_arch`]
/// returns an independent copy with `target_cpu` set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildConfiguration {
    args: BTreeMap<String, GnValue>,
}

impl BuildConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<GnValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if let GnValue::Str(s) = &value {
            if s.contains('"') {
                log::warn!(
                    "GN argument {} contains a quote character and is passed unescaped: {}",
                    key,
                    s
                );
            }
        }
        self.args.insert(key, value);
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<GnValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Looks up an argument.
    pub fn get(&self, key: &str) -> Option<&GnValue> {
        self.args.get(key)
    }

    /// Copy of this configuration targeting `arch`.
    pub fn for_arch(&self, arch: Arch) -> Self {
        self.clone().with(TARGET_CPU, arch.as_str())
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GnValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no arguments are set.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Encodes the configuration as the single `--args=...` argument of `gn gen`.
pub fn encode_gn_args(config: &BuildConfiguration) -> String {
    let body = config
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ");
    format!("--args={}", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_value_kind() {
        let config = BuildConfiguration::new()
            .with("is_debug", true)
            .with("target_cpu", "arm64")
            .with("ios_enable_code_signing", false)
            .with("symbol_level", 1i64);

        assert_eq!(
            encode_gn_args(&config),
            "--args=ios_enable_code_signing=false is_debug=true symbol_level=1 target_cpu=\"arm64\""
        );
    }

    #[test]
    fn empty_configuration_encodes_bare_flag() {
        assert_eq!(encode_gn_args(&BuildConfiguration::new()), "--args=");
    }

    #[test]
    fn quotes_are_not_escaped() {
        let config = BuildConfiguration::new().with("name", "a\"b");
        assert_eq!(encode_gn_args(&config), "--args=name=\"a\"b\"");
    }

    #[test]
    fn for_arch_leaves_original_untouched() {
        let base = BuildConfiguration::new().with("is_debug", true);
        let arm = base.for_arch(Arch::Arm);

        assert_eq!(base.get(TARGET_CPU), None);
        assert_eq!(arm.get(TARGET_CPU), Some(&GnValue::from("arm")));
        assert_eq!(arm.get("is_debug"), Some(&GnValue::Bool(true)));
    }
}
