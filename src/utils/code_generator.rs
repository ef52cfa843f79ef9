//! Short code generation and alias validation.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::error::AppError;

/// Alphabet for generated codes: 62 alphanumeric characters.
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Extra characters added to the code when every regular attempt collided.
pub const FALLBACK_EXTRA_LENGTH: usize = 3;

pub const ALIAS_MIN_LENGTH: usize = 2;
pub const MAX_CODE_LENGTH: usize = 30;

/// Aliases that would be shadowed by fixed routes.
const RESERVED_ALIASES: &[&str] = &["api", "health"];

static CODE_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex is valid"));

/// Parameters for random code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSettings {
    /// Length of a regular generated code.
    pub length: usize,
    /// Number of pre-checked candidates before falling back to a longer code.
    pub max_attempts: usize,
}

impl CodeSettings {
    pub fn fallback_length(&self) -> usize {
        self.length + FALLBACK_EXTRA_LENGTH
    }
}

impl Default for CodeSettings {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Generates a random alphanumeric code of `length` characters.
///
/// Uses the thread-local RNG; codes are identifiers, not secrets.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Validates a user-supplied alias.
///
/// # Rules
///
/// - Length: 2-30 characters
/// - Allowed characters: ASCII letters, digits, hyphen, underscore
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::InvalidAlias`] naming the first rule violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    let length = alias.chars().count();
    if !(ALIAS_MIN_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
        return Err(AppError::invalid_alias(
            alias,
            format!(
                "must be {}-{} characters, got {}",
                ALIAS_MIN_LENGTH, MAX_CODE_LENGTH, length
            ),
        ));
    }

    if let Some(bad) = alias
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(AppError::invalid_alias(
            alias,
            format!(
                "disallowed character '{}': only letters, digits, '-' and '_' are allowed",
                bad
            ),
        ));
    }

    if RESERVED_ALIASES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(alias))
    {
        return Err(AppError::invalid_alias(alias, "this alias is reserved"));
    }

    Ok(())
}

/// Returns true if `code` could name a stored link.
///
/// Used by the resolver to reject garbage before touching the store.
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() <= MAX_CODE_LENGTH && CODE_CHARS_REGEX.is_match(code)
}
