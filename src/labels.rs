use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lexer::{lex, Line};
use crate::pseudo::expansion_length;

/// Label name -> index of the concrete instruction it precedes, counted over the
/// expanded instruction stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelKV {
    pub index: usize,
    pub name: String,
}

impl LabelTable {
    /// First pass: walk the source once and bind every label declaration.
    pub fn resolve<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut labels = HashMap::new();
        let mut index = 0usize;
        for line in lines {
            match lex(line.as_ref()) {
                Line::Blank => {}
                Line::Label(name) => {
                    if let Some(prev) = labels.insert(name.clone(), index) {
                        warn!(label = %name, prev, index, "label redeclared, later declaration wins");
                    }
                }
                Line::Instr(t) => index += expansion_length(&t),
            }
        }
        debug!(labels = labels.len(), instructions = index, "label pass complete");
        Self { labels }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries sorted by index then name, for export.
    pub fn entries(&self) -> Vec<LabelKV> {
        let mut out: Vec<LabelKV> = self
            .labels
            .iter()
            .map(|(name, index)| LabelKV {
                index: *index,
                name: name.clone(),
            })
            .collect();
        out.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
        out
    }
}
