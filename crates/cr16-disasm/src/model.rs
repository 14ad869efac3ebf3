use anyhow::Result;
use std::path::Path;

use cr16_rs::Word;

/// A machine-code image as emitted by `cr16-asm`: one word per instruction index.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub words: Vec<Word>,
}

impl Image {
    pub fn get(&self, index: usize) -> Option<Word> {
        self.words.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parse text with one 16-character `0`/`1` line per word; blank lines are skipped.
pub fn parse_image(text: &str) -> Result<Image> {
    let mut words = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let t = line.trim();
        if t.is_empty() {
            continue;
        }
        anyhow::ensure!(
            t.len() == 16 && t.bytes().all(|b| b == b'0' || b == b'1'),
            "line {}: expected 16 binary digits, found `{}`",
            n + 1,
            t
        );
        words.push(Word(u16::from_str_radix(t, 2)?));
    }
    Ok(Image { words })
}

pub fn load_image(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path)?;
    parse_image(&text)
}
