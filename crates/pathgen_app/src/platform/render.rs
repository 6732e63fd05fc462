use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;

use pathgen_core::{AppViewModel, Notice, Severity};
use pathgen_engine::PersistError;

const BAR_WIDTH: usize = 30;

pub fn progress_line(view: &AppViewModel) -> String {
    let filled = (view.progress.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        view.percent()
    )
}

pub fn notice_line(notice: &Notice) -> String {
    let marker = match notice.severity {
        Severity::Success => "✔",
        Severity::Warning => "⚠",
        Severity::Error => "✖",
    };
    format!("{marker} {}", notice.text)
}

pub fn bullet_line(message: &str) -> String {
    format!("• {message}")
}

/// Prints the parts of each view that changed since the previous one.
///
/// Progress, status and notices go to `err`; bullets go to `out` so the
/// learning path can be piped on its own.
pub struct TerminalRenderer<O: Write, E: Write> {
    out: RefCell<O>,
    err: RefCell<E>,
    last: RefCell<AppViewModel>,
}

impl<O: Write, E: Write> TerminalRenderer<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out: RefCell::new(out),
            err: RefCell::new(err),
            last: RefCell::new(AppViewModel::default()),
        }
    }

    pub fn render(&self, view: &AppViewModel) -> io::Result<()> {
        let mut last = self.last.borrow_mut();
        let mut err = self.err.borrow_mut();

        let moved = view.progress != last.progress || view.current_step != last.current_step;
        if moved && !view.current_step.is_empty() {
            let status = view.status_line().unwrap_or_default();
            writeln!(err, "{} {}", progress_line(view), status)?;
        }

        for (index, notice) in view.notices.iter().enumerate() {
            if last.notices.get(index) != Some(notice) {
                writeln!(err, "{}", notice_line(notice))?;
            }
        }

        if view.messages != last.messages {
            let mut out = self.out.borrow_mut();
            for message in &view.messages {
                writeln!(out, "{}", bullet_line(message))?;
            }
            out.flush()?;
        }
        err.flush()?;

        *last = view.clone();
        Ok(())
    }

    pub fn exported(&self, path: &Path) -> io::Result<()> {
        writeln!(self.err.borrow_mut(), "Saved learning path to {}", path.display())
    }

    pub fn export_failed(&self, error: &PersistError) -> io::Result<()> {
        writeln!(
            self.err.borrow_mut(),
            "{}",
            notice_line(&Notice::warning(format!(
                "Could not save learning path: {error}"
            )))
        )
    }

    #[cfg(test)]
    pub fn into_writers(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view(progress: f32, step: &str) -> AppViewModel {
        AppViewModel {
            progress,
            current_step: step.to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(
            progress_line(&view(0.5, "")),
            format!("[{}{}]  50%", "#".repeat(15), "-".repeat(15))
        );
        assert_eq!(
            progress_line(&view(1.0, "")),
            format!("[{}] 100%", "#".repeat(BAR_WIDTH))
        );
    }

    #[test]
    fn only_changes_are_printed() {
        let renderer = TerminalRenderer::new(Vec::new(), Vec::new());
        renderer.render(&view(0.1, "Setting up agent with tools")).unwrap();
        renderer.render(&view(0.1, "Setting up agent with tools")).unwrap();

        let mut done = view(1.0, "Learning path generation complete");
        done.notices = vec![Notice::success("Your learning path is ready!")];
        done.messages = vec!["a".to_string(), "b".to_string()];
        renderer.render(&done).unwrap();
        renderer.render(&done).unwrap();

        let (out, err) = renderer.into_writers();
        assert_eq!(String::from_utf8(out).unwrap(), "• a\n• b\n");
        let err = String::from_utf8(err).unwrap();
        assert_eq!(err.lines().count(), 3);
        assert!(err.contains("Status: Setting up agent with tools"));
        assert!(err.contains("Status: Learning path generation complete"));
        assert!(err.ends_with("✔ Your learning path is ready!\n"));
    }
}
