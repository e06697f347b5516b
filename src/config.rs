//! Optional TOML configuration, generalized from the teacher's
//! per-section `serde::Deserialize` config with field-level defaults
//! down to the handful of knobs this simulator actually has: the
//! divergence cycle cap and whether out-of-contract accesses are
//! fatal (strict mode).

use serde::Deserialize;

const DEFAULT_DIVERGENCE_CAP: u64 = 200_000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_divergence_cap")]
    pub divergence_cap: u64,

    #[serde(default)]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            divergence_cap: DEFAULT_DIVERGENCE_CAP,
            strict: false,
        }
    }
}

fn default_divergence_cap() -> u64 {
    DEFAULT_DIVERGENCE_CAP
}

impl Config {
    /// Loads a config from a TOML file. Missing fields fall back to the
    /// defaults above, so any subset of keys is valid.
    pub fn load(path: &str) -> Result<Config, String> {
        let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
        toml::from_str(&text).map_err(|e| format!("{}: {}", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_file() {
        let cfg = Config::default();
        assert_eq!(cfg.divergence_cap, DEFAULT_DIVERGENCE_CAP);
        assert!(!cfg.strict);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("strict = true").unwrap();
        assert!(cfg.strict);
        assert_eq!(cfg.divergence_cap, DEFAULT_DIVERGENCE_CAP);
    }
}
