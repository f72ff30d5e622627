//! Output surface for sponsor listings and confirmations.
//!
//! The flows render through this trait instead of printing directly, so
//! the same logic drives the console binary and the recording view used in
//! tests.

/// Where sponsor listings and user-visible confirmations land.
pub trait SponsorView: Send + Sync {
    /// Replace the rendered sponsor list wholesale.  Callers only invoke
    /// this after a successful fetch, so partial or stale entries never
    /// linger.
    fn replace_sponsors(&self, entries: Vec<String>);

    /// Surface a user-visible confirmation message.
    fn confirm(&self, message: &str);
}

/// Writes listings and confirmations to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleView;

impl SponsorView for ConsoleView {
    fn replace_sponsors(&self, entries: Vec<String>) {
        if entries.is_empty() {
            println!("(no sponsors yet)");
            return;
        }
        for entry in entries {
            println!("{entry}");
        }
    }

    fn confirm(&self, message: &str) {
        println!("{message}");
    }
}

/// Captures everything rendered, for assertions.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingView {
    renders: std::sync::Mutex<Vec<Vec<String>>>,
    confirmations: std::sync::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "testing"))]
impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every full-list replacement so far, in order.
    pub fn renders(&self) -> Vec<Vec<String>> {
        self.renders.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recent rendering, if any.
    pub fn last_render(&self) -> Option<Vec<String>> {
        self.renders().last().cloned()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(any(test, feature = "testing"))]
impl SponsorView for RecordingView {
    fn replace_sponsors(&self, entries: Vec<String>) {
        self.renders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entries);
    }

    fn confirm(&self, message: &str) {
        self.confirmations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
