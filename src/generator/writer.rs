//! C# source writer with indentation tracking.

/// Buffer for building brace-on-its-own-line C# source.
#[derive(Debug)]
pub struct CSharpWriter {
    buffer: String,
    indent_level: usize,
    indent_width: usize,
}

impl CSharpWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_width,
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        for _ in 0..self.indent_level * self.indent_width {
            self.buffer.push(' ');
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line (no trailing whitespace)
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header`, then a braced block on the following lines
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(header);
        self.braced(f);
    }

    /// Write a braced block at the current indentation
    pub fn braced<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line("{");
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }
}
