//! Generator configuration.

use facade_core::lang::marker;

/// Settings for one [`Generator`](super::Generator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Name of the partial method the generated members forward through
    pub accessor_name: String,
    /// Emit the `// <auto-generated/>` header
    pub emit_header: bool,
    /// Emit `#nullable enable` after the header
    pub nullable_directive: bool,
    /// Process candidates on the rayon thread pool
    pub parallel: bool,
    /// Collect skipped candidates in the report
    pub report_skips: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            accessor_name: marker::DEFAULT_ACCESSOR_NAME.to_string(),
            emit_header: true,
            nullable_directive: true,
            parallel: false,
            report_skips: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_accessor_name(mut self, name: impl Into<String>) -> Self {
        self.accessor_name = name.into();
        self
    }

    pub fn with_header(mut self, emit: bool) -> Self {
        self.emit_header = emit;
        self
    }

    pub fn with_nullable_directive(mut self, emit: bool) -> Self {
        self.nullable_directive = emit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_report_skips(mut self, report: bool) -> Self {
        self.report_skips = report;
        self
    }
}
