//! Mnemonic -> instruction format.
//!
//! Several families share a leading letter with each other and with plain ALU
//! mnemonics (`sub` vs `seq`, `jal` vs `jne`), so rules are tried in order and
//! exact-match exclusions are checked before the prefix.

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::instructions::{condition_code, func_code, lookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    RegisterRegister,
    RegisterImmediate,
    MemoryOrCall,
    ConditionalSet,
    ConditionalJump,
    ConditionalBranch,
    ShiftImmediate,
}

impl Format {
    /// Operand tokens the format consumes.
    pub fn arity(self) -> usize {
        match self {
            Format::ConditionalSet | Format::ConditionalJump | Format::ConditionalBranch => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub format: Format,
    pub mnemonic: &'a str,
    /// 4-bit condition code for the conditional families.
    pub cond: Option<u8>,
}

struct Rule {
    exact: &'static [&'static str],
    prefix: Option<char>,
    exclude: &'static [&'static str],
    format: Format,
}

const RULES: &[Rule] = &[
    Rule {
        exact: &["load", "stor", "jal"],
        prefix: None,
        exclude: &[],
        format: Format::MemoryOrCall,
    },
    Rule {
        exact: &[],
        prefix: Some('s'),
        exclude: &["stor", "sub", "subi"],
        format: Format::ConditionalSet,
    },
    Rule {
        exact: &[],
        prefix: Some('j'),
        exclude: &["jal"],
        format: Format::ConditionalJump,
    },
    Rule {
        exact: &[],
        prefix: Some('b'),
        exclude: &[],
        format: Format::ConditionalBranch,
    },
    Rule {
        exact: &["lshi", "ashui"],
        prefix: None,
        exclude: &[],
        format: Format::ShiftImmediate,
    },
];

impl Rule {
    /// `Some(cond)` on a match; the inner option is the condition code for prefix rules.
    fn apply(&self, mnemonic: &str) -> Option<Option<u8>> {
        if self.exact.contains(&mnemonic) {
            return Some(None);
        }
        let marker = self.prefix?;
        if self.exclude.contains(&mnemonic) {
            return None;
        }
        let rest = mnemonic.strip_prefix(marker)?;
        condition_code(rest).map(Some)
    }
}

pub fn classify(mnemonic: &str) -> Result<Classified<'_>, ErrorKind> {
    for rule in RULES {
        if let Some(cond) = rule.apply(mnemonic) {
            return Ok(Classified {
                format: rule.format,
                mnemonic,
                cond,
            });
        }
    }
    let format = if func_code(mnemonic).is_some() {
        Format::RegisterRegister
    } else if lookup(mnemonic).is_some() {
        Format::RegisterImmediate
    } else {
        return Err(ErrorKind::UnknownMnemonic(mnemonic.to_string()));
    };
    Ok(Classified {
        format,
        mnemonic,
        cond: None,
    })
}
