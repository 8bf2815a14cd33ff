use thiserror::Error;

/// Source location information for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolve a byte offset inside `text` to a line/column pair.
    ///
    /// Offsets past the end of `text` resolve to the position just after its last character.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = &text[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors raised at the edges of the lesson engine.
///
/// Rendering and drill extraction are total and never return these; they show up when
/// host options fail to decode or when an internal stage fails and the caller asked to
/// observe it instead of degrading.
#[derive(Debug, Error)]
pub enum LessonError {
    /// Render options supplied by a host could not be decoded.
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),
    /// The HTML sanitizer rejected the rendered markup.
    #[error("Sanitizer error: {0}")]
    Sanitize(String),
    /// A result could not be serialized for the host.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LessonError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}

/// Non-fatal warnings that don't prevent rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A triple-backtick fence was opened but never closed
    UnclosedCodeFence {
        /// Source location where the fence started
        location: SourceLocation,
        /// Surrounding context for the message
        context: String,
    },
    /// The sanitizer removed an element or attribute from the markup
    UnsafeMarkupRemoved {
        /// What was removed, e.g. `<script>` or `onclick`
        description: String,
    },
}

impl ParseWarning {
    /// Get the location of this warning, when it has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseWarning::UnclosedCodeFence { location, .. } => Some(location),
            ParseWarning::UnsafeMarkupRemoved { .. } => None,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedCodeFence { location, context } => {
                write!(f, "Unclosed code fence: {}, near '{}'", location, context)
            }
            ParseWarning::UnsafeMarkupRemoved { description } => {
                write!(f, "Removed unsafe markup: {}", description)
            }
        }
    }
}

/// A failure the renderer recovered from by falling back to escaped output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableError {
    /// Error message
    pub message: String,
}

impl RecoverableError {
    /// Create a new recoverable error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RecoverableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

/// Collection of render diagnostics (warnings and recoverable errors)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ParseWarning>,
    /// List of recoverable errors
    pub errors: Vec<RecoverableError>,
}

impl RenderDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Add a recoverable error to the diagnostics collection
    pub fn add_error(&mut self, error: RecoverableError) {
        self.errors.push(error);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any diagnostics
    pub fn has_any(&self) -> bool {
        self.has_warnings() || self.has_errors()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len() + self.errors.len()
    }

    /// Renders every diagnostic as a display string, warnings first.
    pub fn messages(&self) -> Vec<String> {
        self.warnings
            .iter()
            .map(ToString::to_string)
            .chain(self.errors.iter().map(ToString::to_string))
            .collect()
    }
}
