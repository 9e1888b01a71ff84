//! Input sanity validation
//!
//! Screens a single free-text field for SQL-injection shaped content before it
//! reaches the storage layer. Storage always uses parameterized queries, so this
//! is an early warning for the user, not the injection defense itself.
//!
//! # Overview
//!
//! Rules run in a fixed order and the first match wins:
//! 1. Empty input is safe
//! 2. Comment syntax (`--`, `/*`, `*/`, `#`)
//! 3. SQL keywords as whole words
//! 4. Quote, logical operator, quote
//! 5. Semicolons
//! 6. Tautologies and `OR `/`AND ` anywhere
//!
//! # Example
//!
//! ```
//! use forum_core::validator::{validate, RejectionKind, ValidationResult};
//!
//! assert!(validate("john_doe").is_safe());
//! assert_eq!(
//!     validate("admin' OR '1'='1"),
//!     ValidationResult::Rejected(RejectionKind::QuotePattern)
//! );
//! ```

mod rules;

pub use rules::{
    CommentSyntaxRule, InjectionRule, KeywordRule, LogicInjectionRule, QuoteLogicRule,
    SemicolonRule, COMMENT_TOKENS, SQL_KEYWORDS,
};

use crate::config::ValidationConfig;
use crate::error::{ForumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

static DEFAULT_VALIDATOR: LazyLock<InputValidator> = LazyLock::new(InputValidator::new);

/// Validate with the default rule chain
pub fn validate(input: &str) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(input)
}

/// Validate a value that may be absent; absence is safe
pub fn validate_optional(input: Option<&str>) -> ValidationResult {
    DEFAULT_VALIDATOR.validate_optional(input)
}

/// Category of a rejected input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionKind {
    CommentSyntax,
    Keyword,
    QuotePattern,
    Semicolon,
    LogicPattern,
}

impl RejectionKind {
    /// Stable, human-readable reason shown to users
    pub fn reason(&self) -> &'static str {
        match self {
            RejectionKind::CommentSyntax => "SQL comment syntax detected",
            RejectionKind::Keyword => "SQL keyword detected",
            RejectionKind::QuotePattern => "Suspicious quote pattern detected",
            RejectionKind::Semicolon => "Invalid character (;) detected",
            RejectionKind::LogicPattern => "Suspicious SQL logic pattern detected",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Outcome of validating one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Safe,
    Rejected(RejectionKind),
}

impl ValidationResult {
    pub fn is_safe(&self) -> bool {
        matches!(self, ValidationResult::Safe)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_safe()
    }

    /// Rejection category, if rejected
    pub fn kind(&self) -> Option<RejectionKind> {
        match self {
            ValidationResult::Safe => None,
            ValidationResult::Rejected(kind) => Some(*kind),
        }
    }

    /// Rejection reason text, if rejected
    pub fn reason(&self) -> Option<&'static str> {
        self.kind().map(|kind| kind.reason())
    }

    /// Turn a rejection into an error for callers that want `?`
    pub fn into_result(self) -> Result<()> {
        match self {
            ValidationResult::Safe => Ok(()),
            ValidationResult::Rejected(kind) => Err(ForumError::Rejected(kind.reason().to_string())),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Safe => f.write_str("Safe"),
            ValidationResult::Rejected(kind) => write!(f, "Rejected: {}", kind),
        }
    }
}

/// A rejected field from a multi-field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRejection {
    /// Name of the offending field
    pub field: String,
    /// Why it was rejected
    pub kind: RejectionKind,
}

impl fmt::Display for FieldRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Ordered chain of injection rules
pub struct InputValidator {
    rules: Vec<Box<dyn InjectionRule>>,
    log_rejections: bool,
}

impl InputValidator {
    /// Create a validator with the standard rule chain
    pub fn new() -> Self {
        let mut validator = Self {
            rules: Vec::new(),
            log_rejections: true,
        };

        // Cheap checks first; order decides which reason is reported
        validator.register(Box::new(CommentSyntaxRule));
        validator.register(Box::new(KeywordRule));
        validator.register(Box::new(QuoteLogicRule));
        validator.register(Box::new(SemicolonRule));
        validator.register(Box::new(LogicInjectionRule));

        validator
    }

    /// Create a validator honoring the given configuration
    pub fn from_config(config: &ValidationConfig) -> Self {
        let mut validator = Self::new();
        validator.log_rejections = config.log_rejections;
        validator
    }

    /// Append a rule to the end of the chain
    pub fn register(&mut self, rule: Box<dyn InjectionRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classify one input
    pub fn validate(&self, input: &str) -> ValidationResult {
        if input.is_empty() {
            return ValidationResult::Safe;
        }

        for rule in &self.rules {
            if rule.matches(input) {
                let kind = rule.kind();
                if self.log_rejections {
                    warn!(rule = rule.name(), reason = kind.reason(), "Rejected input");
                }
                debug!(rule = rule.name(), len = input.len(), "Rejected input");
                return ValidationResult::Rejected(kind);
            }
        }

        ValidationResult::Safe
    }

    /// Classify a value that may be absent
    pub fn validate_optional(&self, input: Option<&str>) -> ValidationResult {
        match input {
            Some(input) => self.validate(input),
            None => ValidationResult::Safe,
        }
    }

    /// Validate named fields in order, returning the first rejection
    pub fn validate_fields(&self, fields: &[(&str, &str)]) -> Option<FieldRejection> {
        fields.iter().find_map(|(name, value)| {
            self.validate(value).kind().map(|kind| FieldRejection {
                field: name.to_string(),
                kind,
            })
        })
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}
