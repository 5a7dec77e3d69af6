//! Thread-local record of what the CLI is doing, for crash reports.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContext {
    pub command: Option<&'static str>,
    pub snapshot: Option<PathBuf>,
}

thread_local! {
    static CONTEXT: RefCell<ReportContext> = RefCell::new(ReportContext::default());
}

pub fn set_command(command: &'static str) {
    CONTEXT.with(|c| c.borrow_mut().command = Some(command));
}

pub fn set_snapshot(path: &Path) {
    CONTEXT.with(|c| c.borrow_mut().snapshot = Some(path.to_path_buf()));
}

pub fn current_context() -> ReportContext {
    CONTEXT.with(|c| c.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_recorded() {
        set_command("priority");
        set_snapshot(Path::new("snapshot.json"));
        let context = current_context();
        assert_eq!(context.command, Some("priority"));
        assert_eq!(context.snapshot, Some(PathBuf::from("snapshot.json")));
    }

    #[test]
    fn test_context_is_per_thread() {
        set_command("route");
        let other = std::thread::spawn(current_context).join().unwrap();
        assert_eq!(other, ReportContext::default());
    }
}
