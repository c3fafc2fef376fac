// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The variable schema of the currently selected dataset.
//!
//! Owned and refreshed by the dataset subsystem; the parser only ever
//! reads an immutable snapshot of it, and must behave sensibly when no
//! dataset has been loaded yet (an empty schema).

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Numeric,
    Categorical,
    Ordinal,
    Binary,
    Text,
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            VariableType::Numeric => "numeric",
            VariableType::Categorical => "categorical",
            VariableType::Ordinal => "ordinal",
            VariableType::Binary => "binary",
            VariableType::Text => "text",
        };
        write!(f, "{name}")
    }
}

/// Column names (and optionally their semantic types) known to exist
/// in the active dataset.
///
/// Names are stored in sorted order: autocomplete tie-breaking relies
/// on stable, alphabetical iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    names: BTreeSet<String>,
    types: HashMap<String, VariableType>,
}

impl Schema {
    pub fn new() -> Schema {
        Default::default()
    }

    pub fn from_names<I, S>(names: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema {
            names: names.into_iter().map(|n| n.into()).collect(),
            types: HashMap::new(),
        }
    }

    pub fn from_typed<I, S>(vars: I) -> Schema
    where
        I: IntoIterator<Item = (S, VariableType)>,
        S: Into<String>,
    {
        let types: HashMap<String, VariableType> = vars
            .into_iter()
            .map(|(name, ty)| (name.into(), ty))
            .collect();
        let names = types.keys().cloned().collect();
        Schema { names, types }
    }

    /// Add a variable, optionally with its semantic type.
    pub fn insert<S: Into<String>>(&mut self, name: S, ty: Option<VariableType>) {
        let name = name.into();
        if let Some(ty) = ty {
            self.types.insert(name.clone(), ty);
        }
        self.names.insert(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn var_type(&self, name: &str) -> Option<VariableType> {
        self.types.get(name).copied()
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
