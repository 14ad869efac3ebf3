//! Fixed ISA tables: opcodes, function codes, shift kinds and condition codes.
//!
//! Every value here is a 4-bit field (shift kinds are 3 bits) and the tables
//! never change at runtime.

/// Opcode shared by every register-register ALU operation.
pub const RTYPE_OP: u8 = 0b0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u8,
    /// Secondary field for register-register and memory families.
    pub func: Option<u8>,
}

const fn rr(mnemonic: &'static str, opcode: u8, func: u8) -> InstrDesc {
    InstrDesc { mnemonic, opcode, func: Some(func) }
}

const fn ri(mnemonic: &'static str, opcode: u8) -> InstrDesc {
    InstrDesc { mnemonic, opcode, func: None }
}

pub const TABLE: &[InstrDesc] = &[
    rr("add", RTYPE_OP, 0b0101),
    rr("addu", RTYPE_OP, 0b0110),
    rr("mul", RTYPE_OP, 0b1110),
    rr("sub", RTYPE_OP, 0b1001),
    rr("cmp", RTYPE_OP, 0b1011),
    rr("and", RTYPE_OP, 0b0001),
    rr("or", RTYPE_OP, 0b0010),
    rr("xor", RTYPE_OP, 0b0011),
    rr("mov", RTYPE_OP, 0b1101),
    rr("lsh", 0b1000, 0b0100),
    rr("ashu", 0b1000, 0b0110),
    ri("addi", 0b0101),
    ri("subi", 0b1001),
    ri("cmpi", 0b1011),
    ri("andi", 0b0001),
    ri("ori", 0b0010),
    ri("xori", 0b0011),
    ri("movi", 0b1101),
    ri("lui", 0b1111),
    ri("lshi", 0b1000),
    ri("ashui", 0b1000),
    rr("load", 0b0100, 0b0000),
    rr("stor", 0b0100, 0b0100),
    rr("jal", 0b0100, 0b1000),
];

/// Family descriptors for the condition-suffixed mnemonics (`seq`, `jne`, `bgt`, ...).
pub const SCOND: InstrDesc = rr("scond", 0b0100, 0b1101);
pub const JCOND: InstrDesc = rr("jcond", 0b0100, 0b1100);
pub const BCOND: InstrDesc = ri("bcond", 0b1100);

/// Shift-by-immediate kinds, placed in the top three bits of F3.
pub const SHIFT_KINDS: &[(&str, u8)] = &[("lshi", 0b000), ("ashui", 0b001)];

pub const CONDITIONS: [(&str, u8); 16] = [
    ("eq", 0b0000),
    ("ne", 0b0001),
    ("cs", 0b0010),
    ("cc", 0b0011),
    ("hi", 0b0100),
    ("ls", 0b0101),
    ("gt", 0b0110),
    ("le", 0b0111),
    ("fs", 0b1000),
    ("fc", 0b1001),
    ("lo", 0b1010),
    ("hs", 0b1011),
    ("lt", 0b1100),
    ("ge", 0b1101),
    ("uc", 0b1110),
    ("nv", 0b1111),
];

pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

/// Function code of a register-register or memory mnemonic, if it has one.
pub fn func_code(mnemonic: &str) -> Option<u8> {
    lookup(mnemonic).and_then(|d| d.func)
}

pub fn condition_code(name: &str) -> Option<u8> {
    CONDITIONS.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

pub fn condition_name(code: u8) -> Option<&'static str> {
    CONDITIONS.iter().find(|(_, c)| *c == code).map(|(n, _)| *n)
}

pub fn shift_kind(mnemonic: &str) -> Option<u8> {
    SHIFT_KINDS.iter().find(|(n, _)| *n == mnemonic).map(|(_, k)| *k)
}
