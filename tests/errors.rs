use std::io;

use cr16_rs::{assemble, assemble_str, AsmConfig, AsmError, Assembler, ErrorKind, Sink, Word};

fn kind_of(src: &str) -> ErrorKind {
    let err = assemble_str(src).unwrap_err();
    err.kind().cloned().unwrap_or_else(|| panic!("no single cause: {err}"))
}

#[test]
fn unknown_mnemonic() {
    assert_eq!(kind_of("foo r1 r2"), ErrorKind::UnknownMnemonic("foo".into()));
    assert_eq!(kind_of("bzz label"), ErrorKind::UnknownMnemonic("bzz".into()));
}

#[test]
fn unresolved_label() {
    assert_eq!(kind_of("beq nosuchlabel"), ErrorKind::UnresolvedLabel("nosuchlabel".into()));
    assert_eq!(kind_of("movi nowhere r1"), ErrorKind::UnresolvedLabel("nowhere".into()));
}

#[test]
fn call_to_missing_label_reports_the_call_line() {
    let err = assemble_str("add r1 r2\n\njal missing\n").unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.kind(), Some(&ErrorKind::UnresolvedLabel("missing".into())));
}

#[test]
fn malformed_operands() {
    assert!(matches!(kind_of("add r1 x2y"), ErrorKind::MalformedOperand { .. }));
    assert!(matches!(kind_of("add 1 r2"), ErrorKind::MalformedOperand { .. }));
    assert!(matches!(kind_of("addi 1.5 r2"), ErrorKind::MalformedOperand { .. }));
    assert!(matches!(kind_of("lshi two r2"), ErrorKind::MalformedOperand { .. }));
}

#[test]
fn missing_operands() {
    assert_eq!(
        kind_of("addi 4"),
        ErrorKind::MissingOperand { mnemonic: "addi".into(), expected: 2, found: 1 }
    );
    assert!(matches!(kind_of("jeq"), ErrorKind::MissingOperand { .. }));
}

#[test]
fn error_line_numbers_count_source_lines() {
    let err = assemble(&["start:", "", "add r1 r2", "mov r1"]).unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(err.to_string().starts_with("line 4:"));
}

#[test]
fn strict_mode_rejects_what_lenient_truncates() {
    let strict = Assembler::new(AsmConfig { strict_operands: true, ..AsmConfig::default() });
    let mut out: Vec<Word> = Vec::new();
    assert!(strict.assemble_into(&["add r1 r16"], &mut out).is_err());
    assert!(strict.assemble_into(&["addi 300 r1"], &mut out).is_err());
    assert!(strict.assemble_into(&["lshi 16 r1"], &mut out).is_err());
    assert!(strict.assemble_into(&["seq r1 r2"], &mut out).is_err());
    assert!(out.is_empty());

    // r16 wraps to r0 without bounds checking
    assert_eq!(assemble(&["add r1 r16"]).unwrap(), assemble(&["add r1 r0"]).unwrap());
}

struct BrokenSink;

impl Sink for BrokenSink {
    fn emit(&mut self, _word: Word) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

#[test]
fn sink_failure_is_a_resource_error() {
    let asm = Assembler::new(AsmConfig::default());
    let err = asm.assemble_into(&["add r1 r2"], &mut BrokenSink).unwrap_err();
    assert!(matches!(err, AsmError::Resource(_)));
    assert!(err.kind().is_none());
}
