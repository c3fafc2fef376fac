// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use super::*;
use crate::ast::{InteractionOp, Term};

fn single_equation(raw: &str) -> EquationLine {
    let outcome = parse_formula(raw);
    assert_eq!(1, outcome.lines.len(), "expected one line for '{raw}'");
    outcome.lines[0]
        .equation
        .clone()
        .unwrap_or_else(|| panic!("expected a parsed equation for '{raw}'"))
}

fn term_names(term: &Term) -> Vec<&str> {
    term.components().iter().map(|c| c.name.as_str()).collect()
}

fn codes(findings: &[Finding]) -> Vec<ErrorCode> {
    findings.iter().map(|f| f.code).collect()
}

// ============================================================================
// Equation splitting
// ============================================================================

#[test]
fn test_basic_equation() {
    let eqn = single_equation("y ~ x1 + x2");
    assert_eq!(1, eqn.response.terms.len());
    assert_eq!(vec!["y"], term_names(&eqn.response.terms[0]));
    assert_eq!(2, eqn.predictors.terms.len());
    assert_eq!(vec!["x1"], term_names(&eqn.predictors.terms[0]));
    assert_eq!(vec!["x2"], term_names(&eqn.predictors.terms[1]));

    let outcome = parse_formula("y ~ x1 + x2");
    assert!(outcome.lines[0].findings.is_empty());
    assert!(!outcome.multi);
    assert!(!outcome.fixed_fallback);
}

#[test]
fn test_multi_response() {
    let eqn = single_equation("y1 + y2 ~ x");
    assert_eq!(2, eqn.response.terms.len());
}

#[test]
fn test_no_separator_anywhere() {
    let outcome = parse_formula("x1 + x2");
    assert!(outcome.lines.is_empty());
    assert_eq!(vec![ErrorCode::MissingSeparator], codes(&outcome.findings));
    assert!(outcome.fixed_fallback);
}

#[test]
fn test_empty_input() {
    let outcome = parse_formula("");
    assert!(outcome.lines.is_empty());
    assert_eq!(vec![ErrorCode::MissingSeparator], codes(&outcome.findings));
}

#[test]
fn test_two_separators_one_line() {
    let outcome = parse_formula("y ~ x ~ z");
    assert!(outcome.lines[0].equation.is_none());
    assert_eq!(
        vec![ErrorCode::ExtraSeparator],
        codes(&outcome.lines[0].findings)
    );
}

#[test]
fn test_multi_equation_mode_threshold() {
    // exactly MULTI_EQUATION_THRESHOLD separator lines: single mode
    let outcome = parse_formula("y ~ x");
    assert!(!outcome.multi);

    // one more crosses the threshold
    let outcome = parse_formula("y1 ~ a\ny2 ~ b");
    assert!(outcome.multi);
    assert_eq!(2, outcome.lines.len());
}

#[test]
fn test_multi_equation_line_attribution() {
    let outcome = parse_formula("y1 ~ a\ny2 ~ b ~ c");
    assert!(outcome.multi);
    assert!(outcome.lines[0].findings.is_empty());
    let finding = &outcome.lines[1].findings[0];
    assert_eq!(ErrorCode::ExtraSeparator, finding.code);
    assert_eq!(Some(2), finding.line);
}

#[test]
fn test_single_mode_has_no_line_attribution() {
    let outcome = parse_formula("y ~ x + 2");
    let finding = &outcome.lines[0].findings[0];
    assert_eq!(ErrorCode::NumericLiteral, finding.code);
    assert_eq!(None, finding.line);
}

#[test]
fn test_blank_lines_dropped() {
    let outcome = parse_formula("\n\n  y ~ x  \n\n");
    assert_eq!(1, outcome.lines.len());
    assert!(!outcome.multi);
    // line numbers refer to the raw input
    assert_eq!(3, outcome.lines[0].line);
}

#[test]
fn test_separatorless_line_in_multi_system() {
    let outcome = parse_formula("y1 ~ a\njunk\ny2 ~ b");
    assert!(outcome.multi);
    assert!(outcome.lines[1].equation.is_none());
    let finding = &outcome.lines[1].findings[0];
    assert_eq!(ErrorCode::MissingSeparator, finding.code);
    assert_eq!(Some(2), finding.line);
}

// ============================================================================
// Caps
// ============================================================================

#[test]
fn test_too_many_equation_lines() {
    let raw = (0..=MAX_EQUATION_LINES)
        .map(|i| format!("y{i} ~ x"))
        .collect::<Vec<String>>()
        .join("\n");
    let outcome = parse_formula(&raw);
    assert!(outcome.lines.is_empty());
    assert_eq!(vec![ErrorCode::TooManyEquations], codes(&outcome.findings));
    assert!(outcome.fixed_fallback);
}

#[test]
fn test_too_many_terms_on_one_side() {
    let rhs = vec!["x"; MAX_TERMS_PER_SIDE + 1].join(" + ");
    let outcome = parse_formula(&format!("y ~ {rhs}"));
    let eqn = outcome.lines[0].equation.as_ref().unwrap();
    assert!(eqn.predictors.is_empty());
    assert_eq!(
        vec![ErrorCode::TooManyTerms],
        codes(&outcome.lines[0].findings)
    );
    assert!(outcome.fixed_fallback);
}

// ============================================================================
// Term classification
// ============================================================================

#[test]
fn test_star_interaction() {
    let eqn = single_equation("y ~ x1*x2");
    match &eqn.predictors.terms[0] {
        Term::Interaction(t) => {
            assert_eq!(InteractionOp::Cross, t.op);
            assert_eq!(2, t.components.len());
        }
        other => panic!("expected interaction, got {other:?}"),
    }
}

#[test]
fn test_colon_interaction() {
    let eqn = single_equation("y ~ x1:x2");
    match &eqn.predictors.terms[0] {
        Term::Interaction(t) => assert_eq!(InteractionOp::Colon, t.op),
        other => panic!("expected interaction, got {other:?}"),
    }
}

#[test]
fn test_mixed_star_colon_token() {
    // any * makes the whole token expandable
    let eqn = single_equation("y ~ a*b:c");
    match &eqn.predictors.terms[0] {
        Term::Interaction(t) => {
            assert_eq!(InteractionOp::Cross, t.op);
            assert_eq!(vec!["a", "b", "c"], term_names(&eqn.predictors.terms[0]));
        }
        other => panic!("expected interaction, got {other:?}"),
    }
}

#[test]
fn test_interaction_on_response_flagged() {
    let outcome = parse_formula("y1*y2 ~ x");
    assert_eq!(
        vec![ErrorCode::ResponseInteraction],
        codes(&outcome.lines[0].findings)
    );
    // components are still captured for remediation
    let eqn = outcome.lines[0].equation.as_ref().unwrap();
    assert_eq!(vec!["y1", "y2"], term_names(&eqn.response.terms[0]));
}

#[test]
fn test_dangling_component_degrades_interaction() {
    let outcome = parse_formula("y ~ x*");
    assert_eq!(
        vec![ErrorCode::EmptyTerm],
        codes(&outcome.lines[0].findings)
    );
    let eqn = outcome.lines[0].equation.as_ref().unwrap();
    assert_eq!(Term::Simple(SimpleTerm::new("x")), eqn.predictors.terms[0]);
}

#[test]
fn test_empty_token_between_plusses() {
    let outcome = parse_formula("y ~ x1 + + x2");
    assert_eq!(
        vec![ErrorCode::EmptyTerm],
        codes(&outcome.lines[0].findings)
    );
    let eqn = outcome.lines[0].equation.as_ref().unwrap();
    assert_eq!(2, eqn.predictors.terms.len());
}

#[test]
fn test_empty_predictor_side() {
    let outcome = parse_formula("y ~");
    assert_eq!(
        vec![ErrorCode::EmptySide],
        codes(&outcome.lines[0].findings)
    );
}

#[test]
fn test_empty_response_side() {
    let outcome = parse_formula("~ x1 + x2");
    assert_eq!(
        vec![ErrorCode::EmptySide],
        codes(&outcome.lines[0].findings)
    );
}

// ============================================================================
// Token alphabet
// ============================================================================

#[test]
fn test_accepted_names() {
    for name in ["x1", "x.1", "wage_gap", "_hidden", "τ", "Δx"] {
        assert!(check_name(name).is_empty(), "expected '{name}' accepted");
        assert!(is_valid_name(name), "expected '{name}' valid");
    }
}

#[test]
fn test_numeric_literal() {
    for token in ["2", "2.5", "100"] {
        let findings = check_name(token);
        assert_eq!(vec![ErrorCode::NumericLiteral], codes(&findings));
        assert_eq!(Some(token.to_string()), findings[0].detail);
    }
}

#[test]
fn test_leading_digit() {
    let findings = check_name("1x");
    assert_eq!(vec![ErrorCode::LeadingDigit], codes(&findings));
}

#[test]
fn test_invalid_characters_reported_as_set() {
    let findings = check_name("x-1(");
    assert_eq!(vec![ErrorCode::InvalidCharacter], codes(&findings));
    assert_eq!(Some("( -".to_string()), findings[0].detail);
}

#[test]
fn test_invalid_characters_deduplicated() {
    let findings = check_name("a--b--c");
    assert_eq!(Some("-".to_string()), findings[0].detail);
}

#[test]
fn test_leading_dot_rejected() {
    let findings = check_name(".x");
    assert_eq!(vec![ErrorCode::InvalidCharacter], codes(&findings));
    assert!(!is_valid_name(".x"));
}

#[test]
fn test_internal_space_is_invalid_character() {
    let findings = check_name("x y");
    assert_eq!(vec![ErrorCode::InvalidCharacter], codes(&findings));
}

#[test]
fn test_is_numeric_literal() {
    assert!(is_numeric_literal("42"));
    assert!(is_numeric_literal("4.2"));
    assert!(!is_numeric_literal("x42"));
    assert!(!is_numeric_literal("4.2.1"));
}
