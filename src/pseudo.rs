//! Pseudo-instruction expansion.
//!
//! Each rule pairs a recognizer with a template of concrete lines. `{0}`, `{1}`, ...
//! in a template are replaced with the pseudo-instruction's operands. The label
//! pass and the encoding pass both size a line through [`expansion_length`], so
//! they always agree on how many words a pseudo-instruction occupies.

use crate::lexer::Tokens;

/// Register loaded with the call target.
pub const SCRATCH_REG: u8 = 14;
/// Register receiving the return address.
pub const LINK_REG: u8 = 15;

pub struct PseudoRule {
    pub name: &'static str,
    pub matches: fn(&Tokens) -> bool,
    pub template: &'static [&'static str],
}

fn is_call(t: &Tokens) -> bool {
    t.mnemonic == "jal" && t.operands.len() == 1
}

pub const RULES: &[PseudoRule] = &[PseudoRule {
    name: "call",
    matches: is_call,
    template: &["lui {0} r14", "addi {0} r14", "jal r15 r14"],
}];

pub fn find(t: &Tokens) -> Option<&'static PseudoRule> {
    RULES.iter().find(|r| (r.matches)(t))
}

/// Number of concrete instructions `t` occupies once expanded.
pub fn expansion_length(t: &Tokens) -> usize {
    find(t).map_or(1, |r| r.template.len())
}

/// Concrete lines replacing `t`, or `None` when `t` is already concrete.
pub fn expand(t: &Tokens) -> Option<Vec<String>> {
    let rule = find(t)?;
    let lines = rule
        .template
        .iter()
        .map(|line| {
            t.operands
                .iter()
                .enumerate()
                .fold((*line).to_string(), |acc, (i, op)| {
                    acc.replace(&format!("{{{i}}}"), op)
                })
        })
        .collect();
    Some(lines)
}
