// Mon Oct 19 2026 - Alex

use std::fmt;
use std::fmt::Write as _;

/// Indenting writer for the diagnostic trace.
///
/// Write errors from the sink are dropped: the trace must never change the outcome of
/// a comparison.
pub struct TraceWriter<'a> {
    out: &'a mut dyn fmt::Write,
    indent_width: usize,
    level: usize,
    at_line_start: bool,
}

impl<'a> TraceWriter<'a> {
    pub fn new(out: &'a mut dyn fmt::Write, indent_width: usize) -> Self {
        Self {
            out,
            indent_width,
            level: 0,
            at_line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            let pad = self.level * self.indent_width;
            let _ = write!(self.out, "{:pad$}", "", pad = pad);
            self.at_line_start = false;
        }
        let _ = self.out.write_str(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        let _ = self.out.write_char('\n');
        self.at_line_start = true;
    }

    /// Ends the current line if anything was written on it.
    pub fn finish_line(&mut self) {
        if !self.at_line_start {
            self.write_line("");
        }
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn outdent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }
}
