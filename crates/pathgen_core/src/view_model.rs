use crate::SecondaryTool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A user-facing message shown above the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub secondary_tool: SecondaryTool,
    pub progress: f32,
    pub current_step: String,
    pub is_generating: bool,
    /// The trigger control is disabled while a run is in progress.
    pub generate_enabled: bool,
    pub notices: Vec<Notice>,
    /// Generated messages, one bullet each, in collaborator order.
    pub messages: Vec<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn status_line(&self) -> Option<String> {
        if self.current_step.is_empty() {
            None
        } else {
            Some(format!("Status: {}", self.current_step))
        }
    }

    /// Progress as a whole percentage in `0..=100`.
    pub fn percent(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
