use serde::{Deserialize, Serialize};

use crate::classify::Format;
use crate::encoder::Word;

/// Fields recovered from one encoded word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub format: Format,
    pub mnemonic: String,
    pub opcode: u8,
    pub func: Option<u8>,
    pub rd: u8,
    pub rs: u8,
    pub cond: Option<u8>,
    /// F3+F4 for immediates and branch offsets, the signed amount for shifts.
    pub imm: i16,
}

impl Decoded {
    pub(crate) fn new(format: Format, mnemonic: impl Into<String>, opcode: u8) -> Self {
        Self {
            format,
            mnemonic: mnemonic.into(),
            opcode,
            func: None,
            rd: 0,
            rs: 0,
            cond: None,
            imm: 0,
        }
    }
}

pub trait Decoder {
    fn decode(&self, word: Word) -> Option<Decoded>;
}
