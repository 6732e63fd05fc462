/// Milestones recognized in the collaborator's free-text status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    SettingUp,
    IntegrationAdded,
    CreatingAgent,
    Generating,
    Complete,
}

impl ProgressStage {
    /// Classifies a status message by substring containment.
    ///
    /// Patterns are checked in milestone order and the first match wins, so a
    /// message mentioning several milestones maps to the earliest one.
    pub fn classify(message: &str) -> Option<Self> {
        if message.contains("Setting up agent with tools") {
            Some(Self::SettingUp)
        } else if message.contains("Added Google Drive integration")
            || message.contains("Added Notion integration")
        {
            Some(Self::IntegrationAdded)
        } else if message.contains("Creating AI agent") {
            Some(Self::CreatingAgent)
        } else if message.contains("Generating your learning path") {
            Some(Self::Generating)
        } else if message.contains("Learning path generation complete") {
            Some(Self::Complete)
        } else {
            None
        }
    }

    pub fn fraction(self) -> f32 {
        match self {
            Self::SettingUp => 0.1,
            Self::IntegrationAdded => 0.3,
            Self::CreatingAgent => 0.5,
            Self::Generating => 0.7,
            Self::Complete => 1.0,
        }
    }
}

/// Progress record mutated by the status callback during a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
    pub current_step: String,
    pub progress: f32,
    pub is_generating: bool,
}

impl ProgressState {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn begin(&mut self) {
        self.reset();
        self.is_generating = true;
    }

    /// Applies one status message. The step label always tracks the raw text;
    /// progress only moves when the message names a milestone.
    pub(crate) fn apply_status(&mut self, message: &str) {
        self.current_step = message.to_string();
        if let Some(stage) = ProgressStage::classify(message) {
            self.progress = stage.fraction();
            if stage == ProgressStage::Complete {
                self.is_generating = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_pattern_wins() {
        let message = "Creating AI agent after Setting up agent with tools";
        assert_eq!(
            ProgressStage::classify(message),
            Some(ProgressStage::SettingUp)
        );
    }

    #[test]
    fn both_integration_messages_share_a_stage() {
        assert_eq!(
            ProgressStage::classify("Added Notion integration"),
            Some(ProgressStage::IntegrationAdded)
        );
        assert_eq!(
            ProgressStage::classify("Added Google Drive integration"),
            Some(ProgressStage::IntegrationAdded)
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(ProgressStage::classify("creating ai agent"), None);
    }

    #[test]
    fn unmatched_status_only_updates_step() {
        let mut state = ProgressState::default();
        state.begin();
        state.apply_status("Creating AI agent");
        state.apply_status("Calling tool youtube_search");

        assert_eq!(state.current_step, "Calling tool youtube_search");
        assert_eq!(state.progress, 0.5);
        assert!(state.is_generating);
    }
}
