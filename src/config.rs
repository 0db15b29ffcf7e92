//! Configuration types and parsing for the password recovery tool

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Main configuration structure for a recovery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Target string to recover
    pub target: String,

    /// Character set preset to enumerate
    pub charset: CharsetPreset,

    /// Maximum candidate length; lengths 1..=max_length are searched in order
    pub max_length: usize,

    /// Optional wordlist scanned before the combinatorial search
    #[serde(default)]
    pub wordlist: Option<PathBuf>,

    /// Number of worker threads
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,

    /// Candidates evaluated per inner batch
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
}

/// The four supported character set presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CharsetPreset {
    /// Decimal digits
    Digits,
    /// Lowercase and uppercase ASCII letters
    Letters,
    /// Letters and digits
    Alphanumeric,
    /// All printable ASCII including symbols
    Printable,
}

/// An ordered, deduplicated symbol table
///
/// Fixed for the duration of a search; its size is the radix of the
/// index-to-candidate mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    symbols: Vec<u8>,
}

/// Default functions for serde
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_batch_size() -> u64 {
    crate::DEFAULT_BATCH_SIZE
}

impl CharsetPreset {
    /// The symbols of this preset, in enumeration order
    pub fn symbols(self) -> &'static str {
        match self {
            CharsetPreset::Digits => "0123456789",
            CharsetPreset::Letters => "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharsetPreset::Alphanumeric => {
                "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
            }
            CharsetPreset::Printable => {
                "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789\
                 !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"
            }
        }
    }
}

impl Charset {
    /// Build a charset from a preset
    pub fn from_preset(preset: CharsetPreset) -> Self {
        Self::from_symbols(preset.symbols().bytes())
    }

    /// Build a charset from raw symbols, dropping duplicates while keeping
    /// first-occurrence order
    pub fn from_symbols(symbols: impl IntoIterator<Item = u8>) -> Self {
        let mut seen = [false; 256];
        let mut out = Vec::new();
        for b in symbols {
            if !seen[b as usize] {
                seen[b as usize] = true;
                out.push(b);
            }
        }
        Self { symbols: out }
    }

    /// Number of symbols; the radix of the index mapping
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol for a single digit value. Callers must keep `digit < len()`.
    pub fn symbol(&self, digit: usize) -> u8 {
        self.symbols[digit]
    }

    /// The symbols in enumeration order
    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }
}

impl SearchConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate the configuration, failing before any search state exists
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget.into());
        }

        if self.max_length == 0 {
            return Err(ConfigError::InvalidMaxLength(self.max_length).into());
        }

        if self.num_threads == 0 {
            return Err(ConfigError::InvalidThreadCount(self.num_threads).into());
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size).into());
        }

        Ok(())
    }

    /// Materialize the configured charset
    pub fn charset(&self) -> Charset {
        Charset::from_preset(self.charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecoveryError;

    fn base_config() -> SearchConfig {
        SearchConfig {
            target: "0042".to_string(),
            charset: CharsetPreset::Digits,
            max_length: 4,
            wordlist: None,
            num_threads: 2,
            batch_size: 1000,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_max_length() {
        let config = SearchConfig {
            max_length: 0,
            ..base_config()
        };
        match config.validate() {
            Err(RecoveryError::Config(ConfigError::InvalidMaxLength(0))) => {}
            other => panic!("unexpected validation result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_target() {
        let config = SearchConfig {
            target: String::new(),
            ..base_config()
        };
        assert!(matches!(
            config.validate(),
            Err(RecoveryError::Config(ConfigError::EmptyTarget))
        ));
    }

    #[test]
    fn test_rejects_zero_threads_and_batch() {
        let config = SearchConfig {
            num_threads: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());

        let config = SearchConfig {
            batch_size: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "target": "secret",
            "charset": "letters",
            "max_length": 6
        }"#;
        let config = SearchConfig::from_json(json).unwrap();
        assert_eq!(config.target, "secret");
        assert_eq!(config.charset, CharsetPreset::Letters);
        assert!(config.num_threads > 0);
        assert_eq!(config.batch_size, crate::DEFAULT_BATCH_SIZE);
        assert!(config.wordlist.is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_charset() {
        let json = r#"{
            "target": "secret",
            "charset": "hieroglyphs",
            "max_length": 6
        }"#;
        assert!(matches!(
            SearchConfig::from_json(json),
            Err(RecoveryError::Json(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");

        let mut config = base_config();
        config.wordlist = Some(PathBuf::from("words.txt"));
        config.to_file(&path).unwrap();

        let loaded = SearchConfig::from_file(&path).unwrap();
        assert_eq!(loaded.target, config.target);
        assert_eq!(loaded.charset, config.charset);
        assert_eq!(loaded.max_length, config.max_length);
        assert_eq!(loaded.wordlist, config.wordlist);
    }

    #[test]
    fn test_preset_sizes() {
        assert_eq!(Charset::from_preset(CharsetPreset::Digits).len(), 10);
        assert_eq!(Charset::from_preset(CharsetPreset::Letters).len(), 52);
        assert_eq!(Charset::from_preset(CharsetPreset::Alphanumeric).len(), 62);
        assert_eq!(Charset::from_preset(CharsetPreset::Printable).len(), 94);
    }

    #[test]
    fn test_charset_dedup_keeps_order() {
        let charset = Charset::from_symbols(*b"abcabca");
        assert_eq!(charset.as_bytes(), b"abc");
        assert_eq!(charset.len(), 3);
        assert_eq!(charset.symbol(1), b'b');
    }
}
