use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pathgen_logging::pathgen_info;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const LEARNING_PATH_FILENAME: &str = "learning_path.md";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file in the same directory, so
/// readers see either the old content or the new one.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Markdown rendering of a generated path: the goal as heading, one bullet
/// per message.
pub fn render_learning_path(goal: &str, messages: &[String]) -> String {
    let mut out = String::from("# Learning path\n\n");
    out.push_str("> ");
    out.push_str(goal.trim());
    out.push_str("\n\n");
    for message in messages {
        let mut lines = message.trim_end().lines();
        if let Some(first) = lines.next() {
            out.push_str("- ");
            out.push_str(first);
            out.push('\n');
        }
        // Continuation lines stay inside the bullet.
        for line in lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

pub fn export_learning_path(
    dir: &Path,
    goal: &str,
    messages: &[String],
) -> Result<PathBuf, PersistError> {
    let content = render_learning_path(goal, messages);
    let path = AtomicFileWriter::new(dir.to_path_buf()).write(LEARNING_PATH_FILENAME, &content)?;
    pathgen_info!(
        "Exported learning path with {} items to {:?}",
        messages.len(),
        path
    );
    Ok(path)
}
