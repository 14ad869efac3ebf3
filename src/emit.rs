use std::io::{self, Write};

use crate::encoder::Word;

/// Receives encoded words one at a time, in program order.
pub trait Sink {
    fn emit(&mut self, word: Word) -> io::Result<()>;
}

impl Sink for Vec<Word> {
    fn emit(&mut self, word: Word) -> io::Result<()> {
        self.push(word);
        Ok(())
    }
}

impl Sink for Vec<String> {
    fn emit(&mut self, word: Word) -> io::Result<()> {
        self.push(word.to_string());
        Ok(())
    }
}

/// Writes each word as a newline-terminated line of sixteen `0`/`1` characters.
pub struct TextSink<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn emit(&mut self, word: Word) -> io::Result<()> {
        writeln!(self.out, "{word}")?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sink_writes_one_line_per_word() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(Word(0x0251)).unwrap();
        sink.emit(Word(0xFFFF)).unwrap();
        assert_eq!(sink.written(), 2);
        let bytes = sink.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "0000001001010001\n1111111111111111\n"
        );
    }
}
