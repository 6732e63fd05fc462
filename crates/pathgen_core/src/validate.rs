use crate::{FormState, GenerateRequest, Notice, SecondaryTool};

/// Checks the form in a fixed order and builds the collaborator request.
///
/// The first failing check wins. A missing goal is reported with warning
/// severity but still prevents the run.
pub fn validate(form: &FormState) -> Result<GenerateRequest, Notice> {
    if form.google_api_key.is_empty() {
        return Err(Notice::error("Please enter your Google API key"));
    }
    if form.youtube_url.is_empty() {
        return Err(Notice::error("YouTube URL is required"));
    }
    let tool = form.secondary_tool();
    if form.secondary_url().is_empty() {
        return Err(Notice::error(format!(
            "Please enter your {} URL",
            tool.label()
        )));
    }
    if form.user_goal.is_empty() {
        return Err(Notice::warning("Please enter your learning goal"));
    }

    let secondary = form.secondary_url().to_string();
    let (drive_url, notion_url) = match tool {
        SecondaryTool::Drive => (Some(secondary), None),
        SecondaryTool::Notion => (None, Some(secondary)),
    };
    Ok(GenerateRequest {
        google_api_key: form.google_api_key.clone(),
        youtube_url: form.youtube_url.clone(),
        drive_url,
        notion_url,
        user_goal: form.user_goal.clone(),
    })
}
