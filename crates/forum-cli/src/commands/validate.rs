//! Validate command
//!
//! Screen text for SQL-injection shaped content.

use anyhow::{bail, Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::io::BufRead;

use super::AppContext;
use forum_core::validator::{InputValidator, RejectionKind, ValidationResult};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Text to check
    #[arg(required_unless_present = "stdin")]
    pub inputs: Vec<String>,

    /// Read one input per line from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One line of JSON output
#[derive(Debug, Serialize)]
struct Verdict<'a> {
    input: &'a str,
    safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<RejectionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

impl<'a> Verdict<'a> {
    fn new(input: &'a str, result: ValidationResult) -> Self {
        Self {
            input,
            safe: result.is_safe(),
            kind: result.kind(),
            reason: result.reason(),
        }
    }
}

/// Execute the validate command
pub fn execute(args: ValidateArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let mut inputs = args.inputs;
    if args.stdin {
        for line in std::io::stdin().lock().lines() {
            inputs.push(line.context("Failed to read stdin")?);
        }
    }

    let validator = InputValidator::from_config(&ctx.config.validation);
    let results: Vec<_> = inputs
        .iter()
        .map(|input| (input.as_str(), validator.validate(input)))
        .collect();

    if args.json {
        let verdicts: Vec<_> = results
            .iter()
            .map(|(input, result)| Verdict::new(input, *result))
            .collect();
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
    } else {
        for (input, result) in &results {
            match result.reason() {
                None => println!("{} {:?}", "✓ safe".green(), input),
                Some(reason) => println!("{} {:?}: {}", "✗ rejected".red(), input, reason),
            }
        }
    }

    let rejected = results.iter().filter(|(_, r)| r.is_rejected()).count();
    if rejected > 0 {
        bail!("{} of {} inputs rejected", rejected, results.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_json() {
        let verdict = Verdict::new("a;b", ValidationResult::Rejected(RejectionKind::Semicolon));
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["safe"], false);
        assert_eq!(json["kind"], "semicolon");
        assert_eq!(json["reason"], "Invalid character (;) detected");

        let verdict = Verdict::new("ok", ValidationResult::Safe);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["safe"], true);
        assert!(json.get("reason").is_none());
    }
}
