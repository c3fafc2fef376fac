// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The two remediation transforms.
//!
//! Both are pure functions of the parsed structure and both are
//! idempotent: running either on its own output changes nothing. They
//! are never blended -- the caller offers them to the user separately
//! so it stays visible which part of the input was discarded.

use smallvec::SmallVec;

use crate::ast::{self, EquationLine, InteractionOp, InteractionTerm, ParsedSide, SimpleTerm, Term};
use crate::parser::{self, ParseOutcome};
use crate::schema::Schema;

/// Re-emit the formula with character-level and numeric-literal
/// problems scrubbed out of every term.
///
/// Unknown variables are left alone here. Lines whose response side
/// scrubs away entirely (and lines that never parsed) are omitted.
pub(crate) fn fix_syntax(outcome: &ParseOutcome) -> String {
    let mut emitted: Vec<String> = Vec::with_capacity(outcome.lines.len());

    for parsed in &outcome.lines {
        let Some(eqn) = &parsed.equation else {
            continue;
        };

        // an interaction typed on the response side becomes a plain
        // multi-response list; that is the only fix dropping no names
        let mut response: Vec<Term> = vec![];
        for term in &eqn.response.terms {
            for component in term.components() {
                if let Some(name) = scrub_name(&component.name) {
                    response.push(Term::Simple(SimpleTerm::new(name)));
                }
            }
        }
        if response.is_empty() {
            continue;
        }

        let predictors: Vec<Term> = eqn.predictors.terms.iter().filter_map(scrub_term).collect();

        emitted.push(ast::print_equation(&EquationLine {
            response: ParsedSide::new(response),
            predictors: ParsedSide::new(predictors),
            line: eqn.line,
        }));
    }

    emitted.join("\n")
}

/// Re-emit only the terms whose every component resolved against the
/// schema. A `:` interaction with any unknown factor is dropped whole;
/// a `*` interaction additionally leaves its resolved main effects
/// behind, since the shorthand implied them.
///
/// Returns `None` when no repaired formula can be offered: a response
/// side would become empty, or nothing parsed in the first place.
pub(crate) fn drop_unknown(outcome: &ParseOutcome, schema: &Schema) -> Option<String> {
    let mut emitted: Vec<String> = Vec::with_capacity(outcome.lines.len());

    for parsed in &outcome.lines {
        let Some(eqn) = &parsed.equation else {
            continue;
        };

        let response = keep_resolved(&eqn.response, schema);
        if response.is_empty() {
            // the equation lost its response; no automatic repair
            return None;
        }
        let predictors = keep_resolved(&eqn.predictors, schema);

        emitted.push(ast::print_equation(&EquationLine {
            response,
            predictors,
            line: eqn.line,
        }));
    }

    if emitted.is_empty() {
        None
    } else {
        Some(emitted.join("\n"))
    }
}

fn keep_resolved(side: &ParsedSide, schema: &Schema) -> ParsedSide {
    let mut terms: Vec<Term> = Vec::with_capacity(side.terms.len());
    for term in &side.terms {
        match term {
            Term::Simple(t) => {
                if resolved(&t.name, schema) {
                    terms.push(term.clone());
                }
            }
            Term::Interaction(t) => {
                if t.components.iter().all(|c| resolved(&c.name, schema)) {
                    terms.push(term.clone());
                } else if t.op == InteractionOp::Cross {
                    // `*` implies main effects, and those survive the
                    // loss of the interaction (same outcome as if the
                    // user had typed the expanded form)
                    for c in t.components.iter() {
                        if resolved(&c.name, schema) {
                            terms.push(Term::Simple(c.clone()));
                        }
                    }
                }
            }
        }
    }
    ParsedSide::new(terms)
}

fn resolved(name: &str, schema: &Schema) -> bool {
    parser::is_valid_name(name) && schema.contains(name)
}

/// Drop out-of-alphabet characters from a name; a component that is
/// (or collapses to) a bare number or a leading-digit name is removed
/// wholesale rather than guessed at.
fn scrub_name(name: &str) -> Option<String> {
    if parser::is_valid_name(name) {
        return Some(name.to_string());
    }

    let filtered: String = name
        .chars()
        .filter(|&c| parser::is_name_continue(c))
        .collect();
    if filtered.is_empty() || parser::is_numeric_literal(&filtered) {
        return None;
    }
    match filtered.chars().next() {
        Some(c) if parser::is_name_start(c) => Some(filtered),
        _ => None,
    }
}

fn scrub_term(term: &Term) -> Option<Term> {
    match term {
        Term::Simple(t) => scrub_name(&t.name).map(|name| Term::Simple(SimpleTerm::new(name))),
        Term::Interaction(t) => {
            let components: SmallVec<[SimpleTerm; 2]> = t
                .components
                .iter()
                .filter_map(|c| scrub_name(&c.name).map(SimpleTerm::new))
                .collect();
            match components.len() {
                0 => None,
                1 => Some(Term::Simple(components.into_iter().next().unwrap())),
                _ => Some(Term::Interaction(InteractionTerm {
                    components,
                    op: t.op,
                })),
            }
        }
    }
}
