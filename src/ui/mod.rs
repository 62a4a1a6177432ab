//! Collaborator contracts for the UI layer
//!
//! The browser host implements these over `window.confirm` and the toast
//! container; tests implement them with closures and recorders.

use crate::sim::{Notice, NoticeKind};

/// Yes/no prompt (resume a saved game, reset statistics)
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Toast sink
pub trait Notifier {
    fn success(&mut self, message: &str, duration_ms: u32);
    fn error(&mut self, message: &str, duration_ms: u32);
    fn info(&mut self, message: &str, duration_ms: u32);
    fn warning(&mut self, message: &str, duration_ms: u32);
}

impl Notice {
    /// Route to the matching notifier method
    pub fn deliver(&self, notifier: &mut impl Notifier) {
        match self.kind {
            NoticeKind::Success => notifier.success(&self.message, self.duration_ms),
            NoticeKind::Error => notifier.error(&self.message, self.duration_ms),
            NoticeKind::Info => notifier.info(&self.message, self.duration_ms),
            NoticeKind::Warning => notifier.warning(&self.message, self.duration_ms),
        }
    }
}

/// Notifier that writes to the log (native host)
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&mut self, message: &str, _duration_ms: u32) {
        log::info!("[success] {message}");
    }

    fn error(&mut self, message: &str, _duration_ms: u32) {
        log::error!("[error] {message}");
    }

    fn info(&mut self, message: &str, _duration_ms: u32) {
        log::info!("[info] {message}");
    }

    fn warning(&mut self, message: &str, _duration_ms: u32) {
        log::warn!("[warning] {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(&'static str, String, u32)>);

    impl Notifier for Recorder {
        fn success(&mut self, message: &str, duration_ms: u32) {
            self.0.push(("success", message.to_string(), duration_ms));
        }
        fn error(&mut self, message: &str, duration_ms: u32) {
            self.0.push(("error", message.to_string(), duration_ms));
        }
        fn info(&mut self, message: &str, duration_ms: u32) {
            self.0.push(("info", message.to_string(), duration_ms));
        }
        fn warning(&mut self, message: &str, duration_ms: u32) {
            self.0.push(("warning", message.to_string(), duration_ms));
        }
    }

    #[test]
    fn test_deliver_routes_by_kind() {
        let mut recorder = Recorder::default();
        Notice::new(NoticeKind::Warning, "Wrong move! Try again.", 2000).deliver(&mut recorder);
        Notice::new(NoticeKind::Success, "Level 1 completed!", 1000).deliver(&mut recorder);

        assert_eq!(
            recorder.0,
            vec![
                ("warning", "Wrong move! Try again.".to_string(), 2000),
                ("success", "Level 1 completed!".to_string(), 1000),
            ]
        );
    }

    #[test]
    fn test_closure_confirm() {
        let mut asked = Vec::new();
        let mut confirm = |q: &str| {
            asked.push(q.to_string());
            true
        };
        assert!(confirm.confirm("Continue?"));
        assert_eq!(asked, vec!["Continue?".to_string()]);
    }
}
