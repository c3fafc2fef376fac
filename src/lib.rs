// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Parsing, validation, and remediation of R-style model formulas.
//!
//! The sole inputs are a raw formula string (for example
//! `y ~ x1 + x2 + x1:x2`, or one equation per line for a simultaneous
//! system) and a snapshot of the active dataset's variable [`Schema`].
//! [`parse`] classifies everything wrong with the formula into three
//! independent categories -- syntax errors, invalid elements, unknown
//! variables -- and precomputes the two machine-applicable repairs
//! (normalize the syntax, or drop unresolved terms) without ever
//! mutating the input. [`autocomplete`] serves ranked name completion
//! for the identifier under the caret.
//!
//! Everything here is pure and synchronous: no I/O, no shared state
//! between calls, deterministic for a given (formula, schema) pair.
//! Debouncing of keystroke-frequency calls is the caller's problem.

#![forbid(unsafe_code)]

mod ast;
mod autocomplete;
pub mod common;
mod fixer;
mod parser;
mod resolver;
mod schema;

pub use self::autocomplete::{MAX_SUGGESTIONS, autocomplete};
pub use self::common::{ErrorCode, Finding, FindingKind};
pub use self::common::{MAX_EQUATION_LINES, MAX_TERMS_PER_SIDE, MULTI_EQUATION_THRESHOLD};
pub use self::resolver::{ValidationResult, parse};
pub use self::schema::{Schema, VariableType};
