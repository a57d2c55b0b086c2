// Mon Oct 19 2026 - Alex

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertConfig {
    /// Path label of the root node.
    pub root_label: String,
    /// Caller message carried by every failure.
    pub message: Option<String>,
    /// Render the diagnostic trace and emit it at debug level when no sink is attached.
    pub trace: bool,
    /// Spaces per trace nesting level.
    pub indent_width: usize,
}

impl Default for AssertConfig {
    fn default() -> Self {
        Self {
            root_label: "actual".to_string(),
            message: None,
            trace: false,
            indent_width: 4,
        }
    }
}

impl AssertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_label(mut self, label: &str) -> Self {
        self.root_label = label.to_string();
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.root_label.trim().is_empty() {
            return Err("root_label must not be empty".to_string());
        }
        if self.indent_width == 0 {
            return Err("indent_width must be greater than 0".to_string());
        }
        Ok(())
    }
}
