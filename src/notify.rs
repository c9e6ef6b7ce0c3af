//! Snackbar notifications
//!
//! A snackbar is a transient, non-blocking message reporting the outcome of
//! an action. Components emit them through the [`Notifier`] trait; the host
//! decides how they are shown.

use owo_colors::OwoColorize;
use parking_lot::Mutex;

/// Severity of a snackbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarKind {
    /// Informational message
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
    /// Success message
    Success,
}

impl SnackbarKind {
    fn label(&self) -> &'static str {
        match self {
            SnackbarKind::Info => "info",
            SnackbarKind::Warning => "warning",
            SnackbarKind::Error => "error",
            SnackbarKind::Success => "success",
        }
    }
}

/// A snackbar notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    pub title: String,
    pub subtitle: Option<String>,
    pub kind: SnackbarKind,
    /// Render with muted colors
    pub is_low_contrast: bool,
}

impl Snackbar {
    pub fn new(title: impl Into<String>, kind: SnackbarKind) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            kind,
            is_low_contrast: false,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, SnackbarKind::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title, SnackbarKind::Error)
    }

    pub fn with_subtitle(mut self, subtitle: Option<String>) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn low_contrast(mut self) -> Self {
        self.is_low_contrast = true;
        self
    }

    /// Single-line plain text rendering, e.g. `[error] Title: subtitle`
    pub fn plain_text(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!("[{}] {}: {}", self.kind.label(), self.title, subtitle),
            None => format!("[{}] {}", self.kind.label(), self.title),
        }
    }
}

/// Notification host
pub trait Notifier: Send + Sync {
    /// Show a snackbar. Fire-and-forget.
    fn show_snackbar(&self, snackbar: Snackbar);
}

/// Prints snackbars to stderr, colored by kind
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_snackbar(&self, snackbar: Snackbar) {
        let text = snackbar.plain_text();
        let line = match (snackbar.kind, snackbar.is_low_contrast) {
            (_, true) => text.dimmed().to_string(),
            (SnackbarKind::Info, false) => text.cyan().to_string(),
            (SnackbarKind::Warning, false) => text.yellow().to_string(),
            (SnackbarKind::Error, false) => text.red().to_string(),
            (SnackbarKind::Success, false) => text.green().to_string(),
        };
        eprintln!("{line}");
    }
}

/// Keeps every snackbar it is asked to show
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<Snackbar>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all snackbars shown so far, oldest first
    pub fn shown(&self) -> Vec<Snackbar> {
        self.shown.lock().clone()
    }

    pub fn last(&self) -> Option<Snackbar> {
        self.shown.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.shown.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn show_snackbar(&self, snackbar: Snackbar) {
        self.shown.lock().push(snackbar);
    }
}
