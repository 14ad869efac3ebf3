use crate::classify::Format;
use crate::decoder::Decoded;

/// Render a decoded word in the syntax the assembler accepts.
pub fn fmt_decoded(d: &Decoded) -> String {
    match d.format {
        // source register first for both; for memory ops `rs` holds F2
        Format::RegisterRegister | Format::MemoryOrCall => format!("{} r{} r{}", d.mnemonic, d.rs, d.rd),
        Format::RegisterImmediate | Format::ShiftImmediate => format!("{} {} r{}", d.mnemonic, d.imm, d.rd),
        Format::ConditionalSet | Format::ConditionalJump => format!("{} r{}", d.mnemonic, d.rd),
        Format::ConditionalBranch => format!("{} {}", d.mnemonic, d.imm),
    }
}
