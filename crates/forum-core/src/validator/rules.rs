//! Individual injection-screening rules
//!
//! Each rule is a pure predicate over the raw input. Rules know nothing about
//! their position in the chain; `InputValidator` owns the ordering.

use super::RejectionKind;
use regex::Regex;
use std::sync::LazyLock;

/// Comment introducers, matched case-sensitively as plain substrings
pub const COMMENT_TOKENS: &[&str] = &["--", "/*", "*/", "#"];

/// Keywords matched case-insensitively as whole words
pub const SQL_KEYWORDS: &[&str] = &[
    "UNION", "SELECT", "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "EXEC",
    "EXECUTE", "SCRIPT", "DECLARE", "ORDER BY", "HAVING", "GROUP BY", "CASE", "WHEN",
];

static KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = SQL_KEYWORDS
        .iter()
        .map(|kw| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives)).expect("keyword pattern is valid")
});

static QUOTE_LOGIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)['"]\s*(?:OR|AND|XOR)\s*['"]"#).expect("quote pattern is valid")
});

// OR/AND followed by 1=1, a quoted equality, or a boolean literal.
static LOGIC_COMPARISON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:OR|AND)\s*(?:1\s*=\s*1|'.*'\s*=\s*'.*'|TRUE|FALSE)")
        .expect("logic comparison pattern is valid")
});

static LOGIC_CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:OR|AND)\s+.*=").expect("logic condition pattern is valid")
});

/// A single screening rule
pub trait InjectionRule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Rejection reported when this rule matches
    fn kind(&self) -> RejectionKind;

    /// Whether the input trips this rule
    fn matches(&self, input: &str) -> bool;
}

/// Flags `--`, `/*`, `*/` and `#`
#[derive(Debug, Default)]
pub struct CommentSyntaxRule;

impl InjectionRule for CommentSyntaxRule {
    fn name(&self) -> &str {
        "comment-syntax"
    }

    fn kind(&self) -> RejectionKind {
        RejectionKind::CommentSyntax
    }

    fn matches(&self, input: &str) -> bool {
        COMMENT_TOKENS.iter().any(|token| input.contains(token))
    }
}

/// Flags SQL keywords appearing as whole words, in any case
#[derive(Debug, Default)]
pub struct KeywordRule;

impl InjectionRule for KeywordRule {
    fn name(&self) -> &str {
        "keyword"
    }

    fn kind(&self) -> RejectionKind {
        RejectionKind::Keyword
    }

    fn matches(&self, input: &str) -> bool {
        KEYWORD_PATTERN.is_match(input)
    }
}

/// Flags a quote, a logical operator and another quote, e.g. `' OR '`
#[derive(Debug, Default)]
pub struct QuoteLogicRule;

impl InjectionRule for QuoteLogicRule {
    fn name(&self) -> &str {
        "quote-logic"
    }

    fn kind(&self) -> RejectionKind {
        RejectionKind::QuotePattern
    }

    fn matches(&self, input: &str) -> bool {
        QUOTE_LOGIC_PATTERN.is_match(input)
    }
}

/// Flags the statement separator
#[derive(Debug, Default)]
pub struct SemicolonRule;

impl InjectionRule for SemicolonRule {
    fn name(&self) -> &str {
        "semicolon"
    }

    fn kind(&self) -> RejectionKind {
        RejectionKind::Semicolon
    }

    fn matches(&self, input: &str) -> bool {
        input.contains(';')
    }
}

/// Flags tautologies and logic injection
///
/// The last check rejects any input containing `OR ` or `AND `, which also
/// catches ordinary prose such as "for example" or "rock AND roll".
#[derive(Debug, Default)]
pub struct LogicInjectionRule;

impl LogicInjectionRule {
    fn has_logic_comparison(input: &str) -> bool {
        LOGIC_COMPARISON_PATTERN.is_match(input)
    }

    fn has_logic_condition(input: &str) -> bool {
        LOGIC_CONDITION_PATTERN.is_match(input)
    }

    fn has_standalone_operator(input: &str) -> bool {
        let upper = input.to_uppercase();
        upper.contains("OR ") || upper.contains("AND ")
    }
}

impl InjectionRule for LogicInjectionRule {
    fn name(&self) -> &str {
        "logic-injection"
    }

    fn kind(&self) -> RejectionKind {
        RejectionKind::LogicPattern
    }

    fn matches(&self, input: &str) -> bool {
        Self::has_logic_comparison(input)
            || Self::has_logic_condition(input)
            || Self::has_standalone_operator(input)
    }
}
