use cr16_rs::{assemble_str, LabelTable};
use pretty_assertions::assert_eq;

#[test]
fn forward_branch_offset() {
    let out = assemble_str("start:\nbeq label1\nlabel1:\nadd r1 r2\n").unwrap();
    assert_eq!(out, vec!["1100000000000001", "0000001001010001"]);
}

#[test]
fn backward_branch_is_negative() {
    let src = "top:\nadd r1 r2\nadd r1 r2\nblt top\n";
    let out = assemble_str(src).unwrap();
    // index 2 -> index 0
    let offset = u8::from_str_radix(&out[2][8..], 2).unwrap() as i8;
    assert_eq!(offset, -2);
    assert_eq!(&out[2][..8], "11001100");
}

#[test]
fn pc_relative_offset_equals_index_difference() {
    let mut src = String::from("jal far\n");
    for _ in 0..5 {
        src.push_str("mov r1 r2\n");
    }
    src.push_str("here:\nbgt here\nbgt there\nmov r0 r0\nthere:\nfar:\nmov r0 r0\n");
    let out = assemble_str(&src).unwrap();
    // jal expands to 3, so `here` is index 8
    assert_eq!(&out[8][8..], "00000000");
    assert_eq!(&out[9][8..], "00000010");
}

#[test]
fn immediate_label_resolves_to_absolute_index() {
    let src = "movi data r1\nadd r1 r2\nadd r1 r2\ndata:\nmov r0 r0\n";
    let out = assemble_str(src).unwrap();
    assert_eq!(out[0], "1101000100000011");
}

#[test]
fn call_pseudo_shifts_following_labels_by_three() {
    let t = LabelTable::resolve(&["add r1 r2", "jal myfunc", "after:", "myfunc:", "add r1 r2"]);
    // the call starts at index 1
    assert_eq!(t.get("after"), Some(1 + 3));
    assert_eq!(t.get("myfunc"), Some(4));
}

#[test]
fn call_pseudo_expands_to_three_words() {
    let src = "main:\nmovi 5 r1\njal func\nafter:\nbne main\nfunc:\nadd r1 r2\njuc r15\n";
    let out = assemble_str(src).unwrap();
    assert_eq!(
        out,
        vec![
            "1101000100000101", // movi 5 r1
            "1111111000000101", // lui func r14
            "0101111000000101", // addi func r14
            "0100111110001110", // jal r15 r14
            "1100000111111100", // bne main: 0 - 4
            "0000001001010001", // add r1 r2
            "0100111011001111", // juc r15
        ]
    );
}

#[test]
fn labels_are_case_insensitive() {
    let out = assemble_str("Loop:\nbuc LOOP\n").unwrap();
    assert_eq!(out, vec!["1100111000000000"]);
}

#[test]
fn label_entries_export() {
    let t = LabelTable::resolve(&["main:", "jal f", "f:", "add r1 r2"]);
    let json = serde_json::to_string(&t.entries()).unwrap();
    assert_eq!(json, r#"[{"index":0,"name":"main"},{"index":3,"name":"f"}]"#);
}
