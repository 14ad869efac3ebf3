pub mod assembler;
pub mod classify;
pub mod decoder;
pub mod disasm;
pub mod emit;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod labels;
pub mod lexer;
pub mod pseudo;

pub mod isa {
    pub mod cr16; // 16-bit CR16 teaching subset
}

pub use assembler::{assemble, assemble_str, AsmConfig, Assembler, Diagnostics};
pub use emit::{Sink, TextSink};
pub use encoder::Word;
pub use error::{AsmError, ErrorKind};
pub use labels::LabelTable;
