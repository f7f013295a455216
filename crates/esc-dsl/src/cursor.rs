//! A line cursor over level source text that skips blank lines.

use std::ops::Range;

/// One trimmed source line and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line content with surrounding whitespace removed.
    pub text: &'a str,
    /// Byte offset of the trimmed content in the source.
    pub start: usize,
}

impl Line<'_> {
    /// Byte range of the trimmed content.
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    /// Whether the whole line is `keyword`, ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.text.eq_ignore_ascii_case(keyword)
    }

    /// Whether the line begins with `prefix`, ignoring ASCII case.
    pub fn starts_with_keyword(&self, prefix: &str) -> bool {
        self.text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}

/// Walks the non-blank lines of a source string, front to back.
///
/// Every read skips blank lines; nothing ever moves backwards.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    end: usize,
}

impl<'a> LineCursor<'a> {
    /// Split `source` into trimmed, non-blank lines.
    pub fn new(source: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0;
        for raw in source.split_inclusive('\n') {
            let leading = raw.len() - raw.trim_start().len();
            let text = raw.trim();
            if !text.is_empty() {
                lines.push(Line {
                    text,
                    start: offset + leading,
                });
            }
            offset += raw.len();
        }
        Self {
            lines,
            pos: 0,
            end: source.len(),
        }
    }

    /// Consume and return the next non-blank line.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let line = self.lines.get(self.pos).copied();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Zero-width span at the end of the source, for end-of-input messages.
    pub fn end_span(&self) -> Range<usize> {
        self.end..self.end
    }
}
