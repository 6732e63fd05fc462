use crate::view_model::{AppViewModel, Notice};
use crate::ProgressState;

/// Which secondary integration receives the generated learning path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondaryTool {
    #[default]
    Drive,
    Notion,
}

impl SecondaryTool {
    pub fn label(self) -> &'static str {
        match self {
            SecondaryTool::Drive => "Drive",
            SecondaryTool::Notion => "Notion",
        }
    }
}

/// Raw form fields as the user entered them.
///
/// Only the endpoint of the selected secondary tool is ever populated:
/// selecting a tool clears the other tool's field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub google_api_key: String,
    pub youtube_url: String,
    secondary_tool: SecondaryTool,
    drive_url: String,
    notion_url: String,
    pub user_goal: String,
}

impl FormState {
    pub fn secondary_tool(&self) -> SecondaryTool {
        self.secondary_tool
    }

    pub fn drive_url(&self) -> Option<&str> {
        match self.secondary_tool {
            SecondaryTool::Drive => Some(&self.drive_url),
            SecondaryTool::Notion => None,
        }
    }

    pub fn notion_url(&self) -> Option<&str> {
        match self.secondary_tool {
            SecondaryTool::Notion => Some(&self.notion_url),
            SecondaryTool::Drive => None,
        }
    }

    /// Endpoint of the currently selected secondary tool.
    pub fn secondary_url(&self) -> &str {
        match self.secondary_tool {
            SecondaryTool::Drive => &self.drive_url,
            SecondaryTool::Notion => &self.notion_url,
        }
    }

    pub(crate) fn select_secondary(&mut self, tool: SecondaryTool) {
        self.secondary_tool = tool;
        match tool {
            SecondaryTool::Drive => self.notion_url.clear(),
            SecondaryTool::Notion => self.drive_url.clear(),
        }
    }

    pub(crate) fn set_secondary_url(&mut self, url: String) {
        match self.secondary_tool {
            SecondaryTool::Drive => self.drive_url = url,
            SecondaryTool::Notion => self.notion_url = url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    form: FormState,
    progress: ProgressState,
    notices: Vec<Notice>,
    messages: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn is_generating(&self) -> bool {
        self.progress.is_generating
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            secondary_tool: self.form.secondary_tool(),
            progress: self.progress.progress,
            current_step: self.progress.current_step.clone(),
            is_generating: self.progress.is_generating,
            generate_enabled: !self.progress.is_generating,
            notices: self.notices.clone(),
            messages: self.messages.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.dirty = true;
        &mut self.form
    }

    /// Clears everything the previous click produced.
    pub(crate) fn clear_results(&mut self) {
        self.notices.clear();
        self.messages.clear();
        self.progress.reset();
        self.dirty = true;
    }

    pub(crate) fn begin_run(&mut self) {
        self.progress.begin();
        self.dirty = true;
    }

    pub(crate) fn apply_status(&mut self, message: &str) {
        self.progress.apply_status(message);
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.dirty = true;
    }

    pub(crate) fn finish_run(&mut self, messages: Vec<String>) {
        self.messages = messages;
        self.progress.is_generating = false;
        self.dirty = true;
    }
}
