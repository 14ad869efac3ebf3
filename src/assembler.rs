//! Two-pass driver: label pass, then expand / classify / encode / emit.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::classify;
use crate::emit::Sink;
use crate::encoder::{encode, EncodeCtx, Word};
use crate::error::{AsmError, ErrorKind};
use crate::labels::LabelTable;
use crate::lexer::{lex, Line, Tokens};
use crate::pseudo::{expand, expansion_length};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostics {
    /// Stop at the first faulty line.
    #[default]
    FailFast,
    /// Keep encoding to report every faulty line; nothing is emitted after the first.
    CollectAll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub diagnostics: Diagnostics,
    /// Reject registers above r15 and immediates that do not fit their field.
    pub strict_operands: bool,
}

pub struct Assembler {
    pub cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    /// Assemble `lines` into `sink`. Returns the label table built by the first pass.
    pub fn assemble_into<S: AsRef<str>, K: Sink>(&self, lines: &[S], sink: &mut K) -> Result<LabelTable, AsmError> {
        let labels = LabelTable::resolve(lines);
        let mut index = 0usize;
        let mut errors = Vec::new();

        for (n, raw) in lines.iter().enumerate() {
            let line_no = n + 1;
            let tokens = match lex(raw.as_ref()) {
                Line::Blank | Line::Label(_) => continue,
                Line::Instr(t) => t,
            };
            let concrete = match expand(&tokens) {
                Some(expanded) => {
                    debug!(line = line_no, mnemonic = %tokens.mnemonic, words = expanded.len(), "expanded pseudo-instruction");
                    expanded
                        .iter()
                        .filter_map(|l| match lex(l) {
                            Line::Instr(t) => Some(t),
                            _ => None,
                        })
                        .collect()
                }
                None => vec![tokens.clone()],
            };
            debug_assert_eq!(concrete.len(), expansion_length(&tokens));

            for t in &concrete {
                match self.encode_one(t, &labels, index) {
                    Ok(word) => {
                        trace!(index, %word, "encoded");
                        if errors.is_empty() {
                            sink.emit(word)?;
                        }
                    }
                    Err(kind) => {
                        let err = AsmError::at(line_no, kind);
                        if self.cfg.diagnostics == Diagnostics::FailFast {
                            return Err(err);
                        }
                        errors.push(err);
                    }
                }
                index += 1;
            }
        }

        match errors.len() {
            0 => {
                debug!(words = index, labels = labels.len(), "assembly complete");
                Ok(labels)
            }
            1 => Err(errors.remove(0)),
            _ => Err(AsmError::Many(errors)),
        }
    }

    fn encode_one(&self, t: &Tokens, labels: &LabelTable, index: usize) -> Result<Word, ErrorKind> {
        let class = classify(&t.mnemonic)?;
        let ctx = EncodeCtx {
            labels,
            index,
            strict: self.cfg.strict_operands,
        };
        encode(&class, &t.operands, &ctx)
    }
}

/// Assemble with the default configuration, one binary string per concrete instruction.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, AsmError> {
    let mut out: Vec<String> = Vec::new();
    Assembler::new(AsmConfig::default()).assemble_into(lines, &mut out)?;
    Ok(out)
}

/// Convenience over [`assemble`] for a whole source text.
pub fn assemble_str(source: &str) -> Result<Vec<String>, AsmError> {
    let lines: Vec<&str> = source.lines().collect();
    assemble(&lines)
}
