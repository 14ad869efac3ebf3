//! Line normalization and tokenizing.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Label(String),
    Instr(Tokens),
}

/// Trim, lowercase and drop `#` / `;` comments.
pub fn normalize(line: &str) -> String {
    let code = match line.find(|c: char| c == '#' || c == ';') {
        Some(p) => &line[..p],
        None => line,
    };
    code.trim().to_lowercase()
}

/// `^[A-Za-z][A-Za-z0-9_]*:$`, returning the name without the colon.
pub fn label_decl(line: &str) -> Option<&str> {
    let name = line.strip_suffix(':')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        .then_some(name)
}

pub fn lex(line: &str) -> Line {
    let s = normalize(line);
    if s.is_empty() {
        return Line::Blank;
    }
    if let Some(name) = label_decl(&s) {
        return Line::Label(name.to_string());
    }
    let mut parts = s.split_whitespace().map(str::to_string);
    // non-empty after trim, so there is always a first word
    let mnemonic = parts.next().unwrap_or_default();
    Line::Instr(Tokens {
        mnemonic,
        operands: parts.collect(),
    })
}
