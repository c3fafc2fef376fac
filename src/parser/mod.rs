// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Splits raw formula text into equation lines, sides, and terms.
//!
//! The splitter works purely on text: it never consults the schema.
//! Every structural problem it finds becomes a [`Finding`] value; the
//! resulting term structure is still built wherever possible so the
//! fixer and resolver can operate on partially-broken input.

use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;
use unicode_xid::UnicodeXID;

use crate::ast::{EquationLine, InteractionOp, InteractionTerm, ParsedSide, SimpleTerm, Term};
use crate::common::{
    ErrorCode, Finding, MAX_EQUATION_LINES, MAX_TERMS_PER_SIDE, MULTI_EQUATION_THRESHOLD, SEPARATOR,
};

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Response,
    Predictor,
}

/// Result of parsing one non-empty input line.
pub(crate) struct LineParse {
    /// 1-based line number in the raw input.
    pub line: usize,
    /// Present iff the line contained exactly one separator.
    pub equation: Option<EquationLine>,
    pub findings: Vec<Finding>,
}

/// Result of parsing the whole raw input, before schema resolution.
pub(crate) struct ParseOutcome {
    pub lines: Vec<LineParse>,
    /// Findings not attributable to a single line.
    pub findings: Vec<Finding>,
    /// True when more than `MULTI_EQUATION_THRESHOLD` lines carry a
    /// separator (a VARX-style simultaneous system).
    pub multi: bool,
    /// True when no structural fix is possible and `fixed_equation`
    /// must fall back to the trimmed original.
    pub fixed_fallback: bool,
}

pub(crate) fn parse_formula(raw: &str) -> ParseOutcome {
    let kept: Vec<(usize, &str)> = raw
        .split('\n')
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty())
        .collect();

    if kept.len() > MAX_EQUATION_LINES {
        return ParseOutcome {
            lines: vec![],
            findings: vec![Finding::new(
                ErrorCode::TooManyEquations,
                Some(kept.len().to_string()),
            )],
            multi: false,
            fixed_fallback: true,
        };
    }

    let separator_lines = kept
        .iter()
        .filter(|(_, text)| text.contains(SEPARATOR))
        .count();

    if separator_lines == 0 {
        return ParseOutcome {
            lines: vec![],
            findings: vec![Finding::new(ErrorCode::MissingSeparator, None)],
            multi: false,
            fixed_fallback: true,
        };
    }

    let multi = separator_lines > MULTI_EQUATION_THRESHOLD;

    let mut lines: Vec<LineParse> = Vec::with_capacity(kept.len());
    let mut fixed_fallback = false;
    for (line_no, text) in kept {
        let mut parsed = parse_line(line_no, text);
        if multi {
            for finding in parsed.findings.iter_mut() {
                finding.line = Some(line_no);
            }
        }
        if parsed
            .findings
            .iter()
            .any(|f| f.code == ErrorCode::TooManyTerms)
        {
            fixed_fallback = true;
        }
        lines.push(parsed);
    }

    ParseOutcome {
        lines,
        findings: vec![],
        multi,
        fixed_fallback,
    }
}

fn parse_line(line_no: usize, text: &str) -> LineParse {
    let separators = text.matches(SEPARATOR).count();

    if separators == 0 {
        return LineParse {
            line: line_no,
            equation: None,
            findings: vec![Finding::new(ErrorCode::MissingSeparator, None)],
        };
    }
    if separators > 1 {
        return LineParse {
            line: line_no,
            equation: None,
            findings: vec![Finding::new(
                ErrorCode::ExtraSeparator,
                Some(separators.to_string()),
            )],
        };
    }

    // exactly one separator
    let (response_text, predictor_text) = text
        .split_once(SEPARATOR)
        .unwrap_or((text, ""));

    let mut findings = vec![];
    let response = parse_side(response_text, Side::Response, &mut findings);
    let predictors = parse_side(predictor_text, Side::Predictor, &mut findings);

    LineParse {
        line: line_no,
        equation: Some(EquationLine {
            response,
            predictors,
            line: line_no,
        }),
        findings,
    }
}

fn parse_side(text: &str, side: Side, findings: &mut Vec<Finding>) -> ParsedSide {
    if text.trim().is_empty() {
        findings.push(Finding::new(ErrorCode::EmptySide, None));
        return ParsedSide::default();
    }

    let tokens: Vec<&str> = text.split('+').collect();
    if tokens.len() > MAX_TERMS_PER_SIDE {
        findings.push(Finding::new(
            ErrorCode::TooManyTerms,
            Some(tokens.len().to_string()),
        ));
        return ParsedSide::default();
    }

    let mut terms: Vec<Term> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            findings.push(Finding::new(ErrorCode::EmptyTerm, None));
            continue;
        }
        if let Some(term) = classify_token(token, side, findings) {
            terms.push(term);
        }
    }

    ParsedSide::new(terms)
}

/// Parse one `+`-delimited token into a term.
///
/// Any `*` makes the token a `Cross` interaction (expandable at
/// emission); `:` alone makes it a pre-formed `Colon` interaction.
/// Component names are kept verbatim; rule violations are reported as
/// findings and sorted out later by the fixer and resolver.
fn classify_token(token: &str, side: Side, findings: &mut Vec<Finding>) -> Option<Term> {
    let has_star = token.contains('*');
    let has_colon = token.contains(':');

    if !has_star && !has_colon {
        findings.extend(check_name(token));
        return Some(Term::Simple(SimpleTerm::new(token)));
    }

    // interactions are only meaningful among predictors
    if side == Side::Response {
        findings.push(Finding::new(
            ErrorCode::ResponseInteraction,
            Some(token.to_string()),
        ));
    }

    let op = if has_star {
        InteractionOp::Cross
    } else {
        InteractionOp::Colon
    };

    let mut components: SmallVec<[SimpleTerm; 2]> = SmallVec::new();
    for component in token.split(['*', ':']) {
        let component = component.trim();
        if component.is_empty() {
            findings.push(Finding::new(ErrorCode::EmptyTerm, Some(token.to_string())));
            continue;
        }
        findings.extend(check_name(component));
        components.push(SimpleTerm::new(component));
    }

    match components.len() {
        0 => None,
        1 => Some(Term::Simple(components.into_iter().next().unwrap())),
        _ => Some(Term::Interaction(InteractionTerm { components, op })),
    }
}

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"^\d+(\.\d+)?$").unwrap();
}

/// Check one component name against the token alphabet.
///
/// Accepted names start with an identifier-start character or `_` and
/// continue with identifier-continue characters or `.` (so `x1` and
/// `x.1` are fine). A bare number is a `NumericLiteral`, a name that
/// merely starts with a digit (`1x`) is a `LeadingDigit`, and
/// everything else out-of-alphabet is an `InvalidCharacter` finding
/// carrying the offending character set.
fn check_name(name: &str) -> Vec<Finding> {
    let mut findings = vec![];

    if NUMBER_RE.is_match(name) {
        findings.push(Finding::new(
            ErrorCode::NumericLiteral,
            Some(name.to_string()),
        ));
        return findings;
    }

    let first = match name.chars().next() {
        Some(c) => c,
        None => return findings,
    };

    if first.is_ascii_digit() {
        findings.push(Finding::new(ErrorCode::LeadingDigit, Some(name.to_string())));
    }

    let mut bad: Vec<char> = name.chars().filter(|&c| !is_name_continue(c)).collect();
    // a leading `.` (or other continue-only character) can't start a name
    if !first.is_ascii_digit() && !is_name_start(first) && is_name_continue(first) {
        bad.push(first);
    }
    if !bad.is_empty() {
        bad.sort_unstable();
        bad.dedup();
        let detail: String = bad
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        findings.push(Finding::new(ErrorCode::InvalidCharacter, Some(detail)));
    }

    findings
}

pub(crate) fn is_numeric_literal(s: &str) -> bool {
    NUMBER_RE.is_match(s)
}

pub(crate) fn is_name_start(c: char) -> bool {
    UnicodeXID::is_xid_start(c) || c == '_'
}

pub(crate) fn is_name_continue(c: char) -> bool {
    UnicodeXID::is_xid_continue(c) || c == '.'
}

/// True iff `name` is a well-formed variable reference on its own.
/// Only names passing this check are ever resolved against the schema.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start(c) => {}
        _ => return false,
    }
    chars.all(is_name_continue)
}
