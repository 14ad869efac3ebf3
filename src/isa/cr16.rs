use crate::classify::Format;
use crate::decoder::{Decoded, Decoder};
use crate::encoder::Word;
use crate::instructions::{condition_name, BCOND, JCOND, RTYPE_OP, SCOND, SHIFT_KINDS, TABLE};

/// Inverse of the encoder tables for the 16-bit CR16 subset.
pub struct Cr16Decoder;

impl Cr16Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Cr16Decoder {
    fn default() -> Self {
        Self::new()
    }
}

const SHIFT_OP: u8 = 0b1000;

fn with_func(op: u8, f3: u8) -> Option<&'static str> {
    TABLE
        .iter()
        .find(|d| d.opcode == op && d.func == Some(f3))
        .map(|d| d.mnemonic)
}

impl Decoder for Cr16Decoder {
    fn decode(&self, word: Word) -> Option<Decoded> {
        let [op, f2, f3, f4] = word.fields();
        let byte = word.low_byte();

        if op == SCOND.opcode && Some(f3) == SCOND.func {
            let mut d = Decoded::new(Format::ConditionalSet, format!("s{}", condition_name(f4)?), op);
            d.func = Some(f3);
            d.rd = f2;
            d.cond = Some(f4);
            return Some(d);
        }
        if op == JCOND.opcode && Some(f3) == JCOND.func {
            let mut d = Decoded::new(Format::ConditionalJump, format!("j{}", condition_name(f2)?), op);
            d.func = Some(f3);
            d.cond = Some(f2);
            d.rd = f4;
            return Some(d);
        }
        if op == BCOND.opcode {
            let mut d = Decoded::new(Format::ConditionalBranch, format!("b{}", condition_name(f2)?), op);
            d.cond = Some(f2);
            d.imm = byte as i8 as i16;
            return Some(d);
        }
        if op == SHIFT_OP {
            // lshi/ashui use F3 = kind:3 | sign:1; lsh/ashu function codes sit above that range
            if let Some((mn, _)) = SHIFT_KINDS.iter().find(|(_, k)| *k == f3 >> 1) {
                let mut d = Decoded::new(Format::ShiftImmediate, *mn, op);
                d.rd = f2;
                d.imm = if f3 & 1 == 1 { -(f4 as i16) } else { f4 as i16 };
                return Some(d);
            }
        }
        if op == RTYPE_OP || op == SHIFT_OP {
            let mut d = Decoded::new(Format::RegisterRegister, with_func(op, f3)?, op);
            d.func = Some(f3);
            d.rd = f2;
            d.rs = f4;
            return Some(d);
        }
        if let Some(mn) = with_func(op, f3) {
            let mut d = Decoded::new(Format::MemoryOrCall, mn, op);
            d.func = Some(f3);
            d.rs = f2;
            d.rd = f4;
            return Some(d);
        }
        let desc = TABLE.iter().find(|d| d.opcode == op && d.func.is_none())?;
        let mut d = Decoded::new(Format::RegisterImmediate, desc.mnemonic, op);
        d.rd = f2;
        d.imm = byte as i8 as i16;
        Some(d)
    }
}
