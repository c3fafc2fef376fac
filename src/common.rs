// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The response/predictor separator in a model formula.
pub const SEPARATOR: char = '~';

/// More than this many separator-bearing lines puts us in
/// multi-equation (simultaneous system) mode.
pub const MULTI_EQUATION_THRESHOLD: usize = 1;

/// Upper bound on equation lines processed in one call.
pub const MAX_EQUATION_LINES: usize = 128;

/// Upper bound on `+`-separated tokens on one side of an equation.
pub const MAX_TERMS_PER_SIDE: usize = 512;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    NoError, // will never be produced
    MissingSeparator,
    ExtraSeparator,
    InvalidCharacter,
    EmptyTerm,
    EmptySide,
    ResponseInteraction,
    TooManyEquations,
    TooManyTerms,
    NumericLiteral,
    LeadingDigit,
    UnknownVariable,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            MissingSeparator => "missing_separator",
            ExtraSeparator => "extra_separator",
            InvalidCharacter => "invalid_character",
            EmptyTerm => "empty_term",
            EmptySide => "empty_side",
            ResponseInteraction => "response_interaction",
            TooManyEquations => "too_many_equations",
            TooManyTerms => "too_many_terms",
            NumericLiteral => "numeric_literal",
            LeadingDigit => "leading_digit",
            UnknownVariable => "unknown_variable",
        };

        write!(f, "{name}")
    }
}

/// The three remediation categories surfaced to the caller.
///
/// Syntax and InvalidElement findings are both repaired by the
/// auto-fix path; UnknownVariable findings only by explicit removal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    Syntax,
    InvalidElement,
    UnknownVariable,
}

impl ErrorCode {
    pub fn kind(&self) -> FindingKind {
        use ErrorCode::*;
        match self {
            NumericLiteral | LeadingDigit => FindingKind::InvalidElement,
            UnknownVariable => FindingKind::UnknownVariable,
            _ => FindingKind::Syntax,
        }
    }
}

/// One problem discovered during validation.
///
/// `line` is a 1-based source line, attached to Syntax and
/// InvalidElement findings in multi-equation mode only; unknown
/// variables are reported once across the whole system.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    pub code: ErrorCode,
    pub detail: Option<String>,
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(code: ErrorCode, detail: Option<String>) -> Self {
        Finding {
            code,
            detail,
            line: None,
        }
    }

    pub fn kind(&self) -> FindingKind {
        self.code.kind()
    }

    pub(crate) fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.line, &self.detail) {
            (Some(line), Some(details)) => write!(f, "line {line}:{} -- {details}", self.code),
            (Some(line), None) => write!(f, "line {line}:{}", self.code),
            (None, Some(details)) => write!(f, "{} -- {details}", self.code),
            (None, None) => write!(f, "{}", self.code),
        }
    }
}

#[test]
fn test_finding_display() {
    let finding = Finding::new(ErrorCode::NumericLiteral, Some("2.5".to_string()));
    assert_eq!("numeric_literal -- 2.5", format!("{finding}"));

    let finding = Finding::new(ErrorCode::MissingSeparator, None).at_line(Some(3));
    assert_eq!("line 3:missing_separator", format!("{finding}"));
}

#[test]
fn test_error_code_kinds() {
    assert_eq!(FindingKind::Syntax, ErrorCode::InvalidCharacter.kind());
    assert_eq!(FindingKind::Syntax, ErrorCode::ExtraSeparator.kind());
    assert_eq!(FindingKind::InvalidElement, ErrorCode::NumericLiteral.kind());
    assert_eq!(FindingKind::InvalidElement, ErrorCode::LeadingDigit.kind());
    assert_eq!(
        FindingKind::UnknownVariable,
        ErrorCode::UnknownVariable.kind()
    );
}
