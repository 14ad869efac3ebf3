//! Field encoder: one classified instruction -> one 16-bit word.
//!
//! Every word is four 4-bit fields, F1 in bits 15..12 down to F4 in bits 3..0.
//! Immediates and branch offsets share F3+F4 as one byte.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{Classified, Format};
use crate::error::ErrorKind;
use crate::instructions::{func_code, lookup, shift_kind, BCOND, JCOND, SCOND};
use crate::labels::LabelTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(pub u16);

impl Word {
    pub fn from_fields(f1: u8, f2: u8, f3: u8, f4: u8) -> Self {
        let nib = |v: u8| (v & 0xF) as u16;
        Word((nib(f1) << 12) | (nib(f2) << 8) | (nib(f3) << 4) | nib(f4))
    }

    pub fn from_byte(f1: u8, f2: u8, byte: u8) -> Self {
        Self::from_fields(f1, f2, byte >> 4, byte & 0xF)
    }

    /// `[F1, F2, F3, F4]`, most significant first.
    pub fn fields(self) -> [u8; 4] {
        let w = self.0;
        [
            (w >> 12) as u8 & 0xF,
            (w >> 8) as u8 & 0xF,
            (w >> 4) as u8 & 0xF,
            w as u8 & 0xF,
        ]
    }

    /// F3 and F4 together.
    pub fn low_byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

/// Everything besides the instruction itself that feeds its encoding.
#[derive(Debug, Clone, Copy)]
pub struct EncodeCtx<'a> {
    pub labels: &'a LabelTable,
    /// Index of this instruction in the expanded stream.
    pub index: usize,
    /// Reject out-of-range values instead of truncating them.
    pub strict: bool,
}

fn malformed(token: &str, expected: &'static str) -> ErrorKind {
    ErrorKind::MalformedOperand {
        token: token.to_string(),
        expected,
    }
}

fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One marker letter then decimal digits, e.g. `r3`.
pub fn parse_register(token: &str, strict: bool) -> Result<u8, ErrorKind> {
    const EXPECTED: &str = "register such as r3";
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(malformed(token, EXPECTED)),
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(token, EXPECTED));
    }
    let n: u32 = digits.parse().map_err(|_| malformed(token, EXPECTED))?;
    if strict && n > 15 {
        return Err(malformed(token, "register r0..r15"));
    }
    Ok((n & 0xF) as u8)
}

enum Operand<'t> {
    Int(i64),
    Label(&'t str),
}

fn parse_value(token: &str) -> Result<Operand<'_>, ErrorKind> {
    if let Ok(v) = token.parse::<i64>() {
        return Ok(Operand::Int(v));
    }
    if is_label_name(token) {
        Ok(Operand::Label(token))
    } else {
        Err(malformed(token, "integer or label"))
    }
}

fn label_index(labels: &LabelTable, name: &str) -> Result<i64, ErrorKind> {
    labels
        .get(name)
        .map(|i| i as i64)
        .ok_or_else(|| ErrorKind::UnresolvedLabel(name.to_string()))
}

/// Two's-complement truncation to 8 bits.
fn to_byte(token: &str, v: i64, range: std::ops::RangeInclusive<i64>, strict: bool) -> Result<u8, ErrorKind> {
    if strict && !range.contains(&v) {
        return Err(malformed(token, "value that fits in 8 bits"));
    }
    Ok((v & 0xFF) as u8)
}

pub fn encode(class: &Classified<'_>, operands: &[String], ctx: &EncodeCtx<'_>) -> Result<Word, ErrorKind> {
    let arity = class.format.arity();
    if operands.len() < arity {
        return Err(ErrorKind::MissingOperand {
            mnemonic: class.mnemonic.to_string(),
            expected: arity,
            found: operands.len(),
        });
    }
    if ctx.strict && operands.len() > arity {
        return Err(malformed(&operands[arity], "end of line"));
    }
    let reg = |i: usize| parse_register(&operands[i], ctx.strict);
    let cond = || {
        class
            .cond
            .ok_or_else(|| ErrorKind::UnknownMnemonic(class.mnemonic.to_string()))
    };
    let desc = || {
        lookup(class.mnemonic).ok_or_else(|| ErrorKind::UnknownMnemonic(class.mnemonic.to_string()))
    };

    let word = match class.format {
        Format::RegisterRegister => {
            let d = desc()?;
            let func = func_code(class.mnemonic)
                .ok_or_else(|| ErrorKind::UnknownMnemonic(class.mnemonic.to_string()))?;
            Word::from_fields(d.opcode, reg(1)?, func, reg(0)?)
        }
        Format::RegisterImmediate => {
            let d = desc()?;
            let tok = &operands[0];
            let v = match parse_value(tok)? {
                Operand::Int(v) => v,
                Operand::Label(name) => label_index(ctx.labels, name)?,
            };
            Word::from_byte(d.opcode, reg(1)?, to_byte(tok, v, -128..=255, ctx.strict)?)
        }
        Format::MemoryOrCall => {
            let d = desc()?;
            let func = d.func.unwrap_or_default();
            Word::from_fields(d.opcode, reg(0)?, func, reg(1)?)
        }
        Format::ConditionalSet => {
            let func = SCOND.func.unwrap_or_default();
            Word::from_fields(SCOND.opcode, reg(0)?, func, cond()?)
        }
        Format::ConditionalJump => {
            let func = JCOND.func.unwrap_or_default();
            Word::from_fields(JCOND.opcode, cond()?, func, reg(0)?)
        }
        Format::ConditionalBranch => {
            let tok = &operands[0];
            let disp = match parse_value(tok)? {
                Operand::Int(v) => v,
                Operand::Label(name) => label_index(ctx.labels, name)? - ctx.index as i64,
            };
            Word::from_byte(BCOND.opcode, cond()?, to_byte(tok, disp, -128..=127, ctx.strict)?)
        }
        Format::ShiftImmediate => {
            let d = desc()?;
            let kind = shift_kind(class.mnemonic)
                .ok_or_else(|| ErrorKind::UnknownMnemonic(class.mnemonic.to_string()))?;
            let tok = &operands[0];
            let amount: i64 = tok.parse().map_err(|_| malformed(tok, "integer shift amount"))?;
            let magnitude = amount.unsigned_abs();
            if ctx.strict && magnitude > 15 {
                return Err(malformed(tok, "shift amount -15..15"));
            }
            let sign = u8::from(amount < 0);
            Word::from_fields(d.opcode, reg(1)?, (kind << 1) | sign, (magnitude & 0xF) as u8)
        }
    };
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn enc(line: &str, labels: &LabelTable, index: usize) -> Result<Word, ErrorKind> {
        let mut parts = line.split_whitespace();
        let mn = parts.next().unwrap();
        let ops: Vec<String> = parts.map(String::from).collect();
        let class = classify(mn)?;
        encode(&class, &ops, &EncodeCtx { labels, index, strict: false })
    }

    #[test]
    fn fields_pack_most_significant_first() {
        let w = Word::from_fields(0b0001, 0b0010, 0b0011, 0b0100);
        assert_eq!(w.0, 0x1234);
        assert_eq!(w.fields(), [1, 2, 3, 4]);
        assert_eq!(w.to_string(), "0001001000110100");
    }

    #[test]
    fn register_register_puts_dest_in_f2() {
        let t = LabelTable::default();
        assert_eq!(enc("add r1 r2", &t, 0).unwrap().to_string(), "0000001001010001");
    }

    #[test]
    fn negative_immediate_wraps_like_unsigned() {
        let t = LabelTable::default();
        assert_eq!(enc("addi -5 r3", &t, 0), enc("addi 251 r3", &t, 0));
        assert_eq!(enc("addi -5 r3", &t, 0).unwrap().low_byte(), 0xFB);
    }

    #[test]
    fn shift_uses_sign_and_magnitude() {
        let t = LabelTable::default();
        // lshi: kind 000, ashui: kind 001
        assert_eq!(enc("lshi 3 r2", &t, 0).unwrap().to_string(), "1000001000000011");
        assert_eq!(enc("lshi -3 r2", &t, 0).unwrap().to_string(), "1000001000010011");
        assert_eq!(enc("ashui -1 r7", &t, 0).unwrap().to_string(), "1000011100110001");
        assert!(matches!(
            enc("lshi four r2", &t, 0),
            Err(ErrorKind::MalformedOperand { .. })
        ));
    }

    #[test]
    fn branch_offset_is_relative_to_current_index() {
        let t = LabelTable::resolve(&["top:", "add r1 r2", "add r1 r2", "add r1 r2"]);
        let w = enc("bne top", &t, 3).unwrap();
        assert_eq!(w.low_byte() as i8, -3);
        assert_eq!(w.fields()[1], 0b0001);
    }

    #[test]
    fn registers_truncate_unless_strict() {
        assert_eq!(parse_register("r17", false), Ok(1));
        assert!(parse_register("r17", true).is_err());
        assert!(parse_register("r", false).is_err());
        assert!(parse_register("3", false).is_err());
        assert!(parse_register("rx", false).is_err());
    }

    #[test]
    fn too_few_operands() {
        let t = LabelTable::default();
        assert_eq!(
            enc("add r1", &t, 0),
            Err(ErrorKind::MissingOperand { mnemonic: "add".into(), expected: 2, found: 1 })
        );
        assert!(matches!(enc("seq", &t, 0), Err(ErrorKind::MissingOperand { .. })));
    }
}
