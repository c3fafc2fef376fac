// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Resolves parsed terms against the dataset schema and aggregates
//! every finding into one [`ValidationResult`].
//!
//! This is the crate's sole validation entry point. It never fails:
//! any input, however malformed, yields a result value, so the UI
//! always has something to render and never has to catch.

use serde::{Deserialize, Serialize};

use crate::common::{ErrorCode, Finding, FindingKind};
use crate::fixer;
use crate::parser::{self, ParseOutcome};
use crate::schema::Schema;

/// The outcome of validating one formula against one schema snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub has_errors: bool,
    pub findings: Vec<Finding>,
    /// Unknown variable names, de-duplicated, in encounter order
    /// (response side first, then predictors, line by line).
    pub unknown_vars: Vec<String>,
    /// The auto-fix output: syntax and invalid-element problems
    /// normalized away. Always computed; equals the whitespace-
    /// normalized original when the input is already clean.
    pub fixed_equation: String,
    /// The drop-unknown output: only fully-resolved terms, original
    /// order. `None` when there is nothing to drop or no repaired
    /// formula can be offered.
    pub drop_unknown: Option<String>,
    pub original_equation: String,
}

impl ValidationResult {
    pub fn has_syntax_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.kind() == FindingKind::Syntax)
    }

    pub fn has_invalid_elements(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.kind() == FindingKind::InvalidElement)
    }

    pub fn has_unknown_vars(&self) -> bool {
        !self.unknown_vars.is_empty()
    }
}

/// Validate a raw formula string against a schema snapshot.
pub fn parse(raw: &str, schema: &Schema) -> ValidationResult {
    let outcome = parser::parse_formula(raw);

    let mut findings = outcome.findings.clone();
    for parsed in &outcome.lines {
        findings.extend(parsed.findings.iter().cloned());
    }

    let unknown_vars = resolve(&outcome, schema);
    for name in &unknown_vars {
        findings.push(Finding::new(ErrorCode::UnknownVariable, Some(name.clone())));
    }

    let fixed_equation = if outcome.fixed_fallback {
        raw.trim().to_string()
    } else {
        fixer::fix_syntax(&outcome)
    };

    let drop_unknown = if unknown_vars.is_empty() || outcome.fixed_fallback {
        None
    } else {
        fixer::drop_unknown(&outcome, schema)
    };

    ValidationResult {
        has_errors: !findings.is_empty(),
        findings,
        unknown_vars,
        fixed_equation,
        drop_unknown,
        original_equation: raw.to_string(),
    }
}

/// Look up every well-formed component name in the schema; collect the
/// misses in encounter order, reported once each across all lines.
fn resolve(outcome: &ParseOutcome, schema: &Schema) -> Vec<String> {
    let mut unknown: Vec<String> = vec![];

    for parsed in &outcome.lines {
        let Some(eqn) = &parsed.equation else {
            continue;
        };
        for side in [&eqn.response, &eqn.predictors] {
            for term in &side.terms {
                for component in term.components() {
                    let name = component.name.as_str();
                    if parser::is_valid_name(name)
                        && !schema.contains(name)
                        && !unknown.iter().any(|u| u == name)
                    {
                        unknown.push(name.to_string());
                    }
                }
            }
        }
    }

    unknown
}
