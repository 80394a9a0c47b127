//! Module configuration with TOML file support.

use alloy_primitives::{Address, U256};
use gate_crypto::{question_id, question_id_with_min_bond, QuestionParams};
use gate_types::QuestionId;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::variant::{ModuleVariant, QuestionIdScheme, VariantKind};

/// Minimum seconds between the end of the cooldown and answer expiration.
pub const MIN_EXPIRATION_WINDOW_SECS: u32 = 60;

/// Default question template: a boolean question about a proposal's
/// transaction batch.
pub const DEFAULT_TEMPLATE: &str = r#"{"title": "Did the Snapshop proposal with the id %s pass the execution of the array of Module transactions that have the hash 0x%s? The hash is the keccak of the concatenation of the individual EIP-712 hashes of the Module transactions.", "lang": "en", "type": "bool", "category": "DAO proposal"}"#;

/// Configuration of one module instance.
///
/// Can be loaded from a TOML file via [`ModuleConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Account allowed to change configuration and invalidate proposals.
    pub owner: Address,

    /// The controlled account; the only caller allowed to announce readiness.
    pub avatar: Address,

    /// Account the approved transactions are executed against.
    pub target: Address,

    /// Oracle instance. Bound into bonded question ids.
    pub oracle: Address,

    /// The module's own address: verifying contract of the signing domain
    /// and asker of every question.
    pub module: Address,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Seconds the oracle waits for a new answer before finalizing.
    #[serde(default = "default_timeout")]
    pub timeout: u32,

    /// Seconds between finalization (or announcement) and execution.
    #[serde(default = "default_cooldown")]
    pub cooldown: u32,

    /// Seconds after finalization an accepted answer stays valid; `0` means
    /// forever.
    #[serde(default)]
    pub answer_expiration: u32,

    #[serde(default)]
    pub minimum_bond: U256,

    #[serde(default = "default_template")]
    pub template: U256,

    #[serde(default)]
    pub arbitrator: Address,

    #[serde(default)]
    pub variant: VariantKind,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_chain_id() -> u64 {
    1
}

fn default_timeout() -> u32 {
    172_800
}

fn default_cooldown() -> u32 {
    172_800
}

fn default_template() -> U256 {
    U256::from(0x2c)
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ModuleConfig {
    /// A config with the default timing parameters.
    pub fn new(owner: Address, avatar: Address, target: Address, oracle: Address, module: Address) -> Self {
        Self {
            owner,
            avatar,
            target,
            oracle,
            module,
            chain_id: default_chain_id(),
            timeout: default_timeout(),
            cooldown: default_cooldown(),
            answer_expiration: 0,
            minimum_bond: U256::ZERO,
            template: default_template(),
            arbitrator: Address::ZERO,
            variant: VariantKind::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn module_variant(&self) -> ModuleVariant {
        self.variant.into()
    }

    /// The id the oracle assigns to `question` asked with retry `nonce`
    /// under the current question parameters.
    pub fn question_id(&self, question: &str, nonce: U256) -> QuestionId {
        let params = QuestionParams {
            template: self.template,
            arbitrator: self.arbitrator,
            timeout: self.timeout,
            opening_ts: 0,
            nonce,
        };
        match self.module_variant().question_ids {
            QuestionIdScheme::Explicit => question_id(&params, question, self.module),
            QuestionIdScheme::MinBond => question_id_with_min_bond(
                &params,
                question,
                self.minimum_bond,
                self.oracle,
                self.module,
            ),
        }
    }

    /// Check every invariant a freshly set-up module must hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner == Address::ZERO {
            return Err(ConfigError::ZeroOwner);
        }
        if self.avatar == Address::ZERO {
            return Err(ConfigError::ZeroAvatar);
        }
        if self.target == Address::ZERO {
            return Err(ConfigError::ZeroTarget);
        }
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        check_expiration_window(self.cooldown, self.answer_expiration)
    }
}

/// A non-zero expiration must leave at least
/// [`MIN_EXPIRATION_WINDOW_SECS`] after the cooldown ends.
pub fn check_expiration_window(cooldown: u32, expiration: u32) -> Result<(), ConfigError> {
    if expiration == 0 {
        return Ok(());
    }
    match expiration.checked_sub(cooldown) {
        Some(window) if window >= MIN_EXPIRATION_WINDOW_SECS => Ok(()),
        _ => Err(ConfigError::ExpirationWindowTooShort {
            cooldown,
            expiration,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        owner = "0x1111111111111111111111111111111111111111"
        avatar = "0x2222222222222222222222222222222222222222"
        target = "0x2222222222222222222222222222222222222222"
        oracle = "0x4444444444444444444444444444444444444444"
        module = "0x5555555555555555555555555555555555555555"
    "#;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ModuleConfig::from_toml_str(MINIMAL).expect("should parse");
        assert_eq!(config.timeout, 172_800);
        assert_eq!(config.cooldown, 172_800);
        assert_eq!(config.answer_expiration, 0);
        assert_eq!(config.minimum_bond, U256::ZERO);
        assert_eq!(config.template, U256::from(0x2c));
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.variant, VariantKind::Bonded);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = format!(
            "{MINIMAL}\ntimeout = 42\ncooldown = 23\nanswer_expiration = 120\nvariant = \"plain\"\nminimum_bond = \"0x3e8\"\n"
        );
        let config = ModuleConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.timeout, 42);
        assert_eq!(config.cooldown, 23);
        assert_eq!(config.answer_expiration, 120);
        assert_eq!(config.variant, VariantKind::Plain);
        assert_eq!(config.minimum_bond, U256::from(1000));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ModuleConfig::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(3),
            Address::repeat_byte(4),
            Address::repeat_byte(5),
        );
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = ModuleConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let config = ModuleConfig::from_toml_file(file.path()).expect("should load");
        assert_eq!(config.owner, Address::repeat_byte(0x11));
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = ModuleConfig::from_toml_file("/nonexistent/module.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let result = ModuleConfig::from_toml_str("owner = \"0x1111111111111111111111111111111111111111\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_zero_addresses_and_timeout() {
        let base = ModuleConfig::from_toml_str(MINIMAL).unwrap();

        let mut config = base.clone();
        config.avatar = Address::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroAvatar)));

        let mut config = base.clone();
        config.target = Address::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTarget)));

        let mut config = base;
        config.timeout = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn question_id_follows_variant_and_parameters() {
        let mut config = ModuleConfig::from_toml_str(MINIMAL).unwrap();
        let bonded = config.question_id("q", U256::ZERO);
        assert_ne!(bonded, config.question_id("q", U256::from(1)));

        config.minimum_bond = U256::from(5);
        assert_ne!(bonded, config.question_id("q", U256::ZERO));

        config.variant = VariantKind::Plain;
        let plain = config.question_id("q", U256::ZERO);
        config.minimum_bond = U256::ZERO;
        assert_eq!(plain, config.question_id("q", U256::ZERO));
        config.timeout = 7;
        assert_ne!(plain, config.question_id("q", U256::ZERO));
    }

    #[test]
    fn expiration_window() {
        assert!(check_expiration_window(23, 0).is_ok());
        assert!(check_expiration_window(23, 83).is_ok());
        assert!(matches!(
            check_expiration_window(23, 82),
            Err(ConfigError::ExpirationWindowTooShort { .. })
        ));
        // Expiration before the cooldown ends is never valid.
        assert!(check_expiration_window(100, 50).is_err());
    }

    #[test]
    fn default_template_is_a_bool_question() {
        assert!(DEFAULT_TEMPLATE.contains("\"type\": \"bool\""));
        assert!(DEFAULT_TEMPLATE.contains("%s"));
    }
}
