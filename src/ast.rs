// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Parsed representation of model formulas, plus the canonical emitter.
//!
//! Emission expands `*` shorthand into main effects plus an explicit
//! `:` interaction, so `y ~ x*m` and `y ~ x + m + x:m` re-emit to the
//! same canonical string.

use smallvec::SmallVec;

/// A single variable reference with no interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleTerm {
    pub name: String,
}

impl SimpleTerm {
    pub fn new<S: Into<String>>(name: S) -> Self {
        SimpleTerm { name: name.into() }
    }
}

/// How an interaction was written in the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionOp {
    /// `a*b`: shorthand for main effects plus the interaction.
    Cross,
    /// `a:b`: the interaction alone.
    Colon,
}

/// A product of two or more simple terms.
///
/// Invariant: components are always simple; interactions never nest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionTerm {
    pub components: SmallVec<[SimpleTerm; 2]>,
    pub op: InteractionOp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Simple(SimpleTerm),
    Interaction(InteractionTerm),
}

impl Term {
    /// All simple-term components of this term, in source order.
    pub fn components(&self) -> &[SimpleTerm] {
        match self {
            Term::Simple(term) => std::slice::from_ref(term),
            Term::Interaction(term) => &term.components,
        }
    }
}

/// One side of an equation, preserving left-to-right source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedSide {
    pub terms: Vec<Term>,
}

impl ParsedSide {
    pub fn new(terms: Vec<Term>) -> Self {
        ParsedSide { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// One equation line that contained exactly one separator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquationLine {
    pub response: ParsedSide,
    pub predictors: ParsedSide,
    /// 1-based line number in the raw input.
    pub line: usize,
}

/// The canonical text pieces a term expands to.
///
/// `Cross` interactions expand to each main effect followed by the
/// full `:` interaction; everything else emits a single piece.
fn term_pieces(term: &Term, out: &mut Vec<String>) {
    match term {
        Term::Simple(t) => out.push(t.name.clone()),
        Term::Interaction(t) => {
            let joined = t
                .components
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<&str>>()
                .join(":");
            match t.op {
                InteractionOp::Cross => {
                    for c in t.components.iter() {
                        out.push(c.name.clone());
                    }
                    out.push(joined);
                }
                InteractionOp::Colon => out.push(joined),
            }
        }
    }
}

/// Emit one side in canonical form: pieces joined by ` + `, duplicates
/// elided (first occurrence wins) so expansion never repeats a main
/// effect the user already typed.
pub fn print_side(side: &ParsedSide) -> String {
    let mut pieces: Vec<String> = Vec::with_capacity(side.terms.len());
    for term in &side.terms {
        term_pieces(term, &mut pieces);
    }

    let mut seen: Vec<&str> = Vec::with_capacity(pieces.len());
    let mut unique: Vec<&str> = Vec::with_capacity(pieces.len());
    for piece in &pieces {
        if !seen.contains(&piece.as_str()) {
            seen.push(piece.as_str());
            unique.push(piece.as_str());
        }
    }

    unique.join(" + ")
}

pub fn print_equation(eqn: &EquationLine) -> String {
    let response = print_side(&eqn.response);
    let predictors = print_side(&eqn.predictors);
    if predictors.is_empty() {
        format!("{response} {}", crate::common::SEPARATOR)
    } else {
        format!("{response} {} {predictors}", crate::common::SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn simple(name: &str) -> Term {
        Term::Simple(SimpleTerm::new(name))
    }

    fn interaction(names: &[&str], op: InteractionOp) -> Term {
        Term::Interaction(InteractionTerm {
            components: names.iter().map(|n| SimpleTerm::new(*n)).collect(),
            op,
        })
    }

    #[test]
    fn test_print_simple_side() {
        let side = ParsedSide::new(vec![simple("x1"), simple("x2")]);
        assert_eq!("x1 + x2", print_side(&side));
    }

    #[test]
    fn test_cross_expands() {
        let side = ParsedSide::new(vec![interaction(&["x", "m"], InteractionOp::Cross)]);
        assert_eq!("x + m + x:m", print_side(&side));
    }

    #[test]
    fn test_colon_unchanged() {
        let side = ParsedSide::new(vec![
            simple("x"),
            interaction(&["x", "m"], InteractionOp::Colon),
        ]);
        assert_eq!("x + x:m", print_side(&side));
    }

    #[test]
    fn test_expansion_dedups_against_typed_mains() {
        // y ~ x + m + x*m must not repeat x or m
        let side = ParsedSide::new(vec![
            simple("x"),
            simple("m"),
            interaction(&["x", "m"], InteractionOp::Cross),
        ]);
        assert_eq!("x + m + x:m", print_side(&side));
    }

    #[test]
    fn test_three_way_cross() {
        let side = ParsedSide::new(vec![interaction(&["a", "b", "c"], InteractionOp::Cross)]);
        assert_eq!("a + b + c + a:b:c", print_side(&side));
    }

    #[test]
    fn test_print_equation() {
        let eqn = EquationLine {
            response: ParsedSide::new(vec![simple("y")]),
            predictors: ParsedSide::new(vec![simple("x1"), simple("x2")]),
            line: 1,
        };
        assert_eq!("y ~ x1 + x2", print_equation(&eqn));
    }

    #[test]
    fn test_print_equation_empty_predictors() {
        let eqn = EquationLine {
            response: ParsedSide::new(vec![simple("y")]),
            predictors: ParsedSide::default(),
            line: 1,
        };
        assert_eq!("y ~", print_equation(&eqn));
    }

    #[test]
    fn test_components() {
        let term = interaction(&["a", "b"], InteractionOp::Colon);
        let names: Vec<&str> = term.components().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["a", "b"], names);

        let term = simple("z");
        assert_eq!(1, term.components().len());
    }

    #[test]
    fn test_smallvec_inline_capacity() {
        // two-way interactions are the common case and stay inline
        let components: SmallVec<[SimpleTerm; 2]> = smallvec![
            SimpleTerm::new("a"),
            SimpleTerm::new("b"),
        ];
        assert!(!components.spilled());
    }
}
