use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use cr16_rs::classify::Format;
use cr16_rs::decoder::Decoder;
use cr16_rs::disasm::fmt_decoded;
use cr16_rs::isa::cr16::Cr16Decoder;

use crate::model::Image;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub bits: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Instruction index a branch lands on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_label: Option<String>,
}

/// Decode every word of `img` in order. `labels` maps instruction index -> name.
pub fn build_listing(img: &Image, labels: &HashMap<usize, String>) -> Vec<Entry> {
    let dec = Cr16Decoder::new();
    img.words
        .iter()
        .enumerate()
        .map(|(index, &word)| {
            let decoded = dec.decode(word);
            let text = match &decoded {
                Some(d) => fmt_decoded(d),
                None => format!(".word {word}"),
            };
            let target = decoded
                .filter(|d| d.format == Format::ConditionalBranch)
                .and_then(|d| usize::try_from(index as i64 + d.imm as i64).ok());
            Entry {
                index,
                bits: word.to_string(),
                text,
                label: labels.get(&index).cloned(),
                target,
                target_label: target.and_then(|t| labels.get(&t).cloned()),
            }
        })
        .collect()
}

pub fn render_text(entries: &[Entry], show_bits: bool) -> String {
    let mut buf = String::new();
    for e in entries {
        if let Some(l) = &e.label {
            let _ = writeln!(buf, "{l}:");
        }
        let _ = write!(buf, "{:>5}: ", e.index);
        if show_bits {
            let _ = write!(buf, "{}  ", e.bits);
        }
        let _ = write!(buf, "{}", e.text);
        match (&e.target_label, e.target) {
            (Some(name), _) => { let _ = write!(buf, "    ; -> {name}"); }
            (None, Some(t)) => { let _ = write!(buf, "    ; -> {t}"); }
            _ => {}
        }
        buf.push('\n');
    }
    buf
}
