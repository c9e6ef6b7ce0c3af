//! Navigation requests and the edit-patient trigger
//!
//! URLs handed to a [`Navigator`] may contain the `${openmrsSpaBase}` and
//! `${openmrsBase}` placeholders; the navigator resolves them against its own
//! configured paths.

use parking_lot::Mutex;
use std::fmt;

use crate::error::{CareQueueError, Result};
use crate::i18n::Translator;

/// Placeholder for the single-page-app base path
pub const SPA_BASE_PLACEHOLDER: &str = "${openmrsSpaBase}";

/// Placeholder for the server base path
pub const BASE_PLACEHOLDER: &str = "${openmrsBase}";

/// A navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub to: String,
}

/// Navigation host. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavigationTarget);
}

/// Base paths substituted into navigation templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePaths {
    pub base: String,
    pub spa_base: String,
}

impl Default for BasePaths {
    fn default() -> Self {
        Self {
            base: "/openmrs".to_string(),
            spa_base: "/openmrs/spa".to_string(),
        }
    }
}

/// Replace the base-path placeholders in `template`.
///
/// A trailing `/` on a base is dropped so `${openmrsSpaBase}/x` never yields `//x`.
pub fn interpolate_url(template: &str, paths: &BasePaths) -> String {
    template
        .replace(SPA_BASE_PLACEHOLDER, paths.spa_base.trim_end_matches('/'))
        .replace(BASE_PLACEHOLDER, paths.base.trim_end_matches('/'))
}

/// Edit screen URL template for a patient
pub fn edit_patient_url(patient_uuid: &str) -> String {
    format!("{SPA_BASE_PLACEHOLDER}/patient/{patient_uuid}/edit")
}

/// Resolves targets and prints the final URL to stdout
#[derive(Debug, Clone, Default)]
pub struct ConsoleNavigator {
    paths: BasePaths,
}

impl ConsoleNavigator {
    pub fn new(paths: BasePaths) -> Self {
        Self { paths }
    }

    pub fn resolve(&self, target: &NavigationTarget) -> String {
        interpolate_url(&target.to, &self.paths)
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, target: NavigationTarget) {
        let url = self.resolve(&target);
        tracing::info!(template = %target.to, %url, "navigating");
        println!("{url}");
    }
}

/// Keeps every navigation request it receives
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<NavigationTarget>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> Vec<NavigationTarget> {
        self.targets.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        self.targets.lock().push(target);
    }
}

type Callback = Box<dyn Fn() + Send + Sync>;

/// Control that opens a patient's edit screen
pub struct NavigationTrigger {
    patient_uuid: String,
    on_transition: Option<Callback>,
}

impl NavigationTrigger {
    /// Create a trigger for the given patient. The identifier must not be blank.
    pub fn new(patient_uuid: impl Into<String>) -> Result<Self> {
        let patient_uuid = patient_uuid.into();
        if patient_uuid.trim().is_empty() {
            return Err(CareQueueError::InvalidPatientId(patient_uuid));
        }
        Ok(Self {
            patient_uuid,
            on_transition: None,
        })
    }

    /// Callback run after the navigation request, e.g. to close an overflow menu
    pub fn with_on_transition(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_transition = Some(Box::new(callback));
        self
    }

    pub fn patient_uuid(&self) -> &str {
        &self.patient_uuid
    }

    pub fn target(&self) -> NavigationTarget {
        NavigationTarget {
            to: edit_patient_url(&self.patient_uuid),
        }
    }

    pub fn label(&self, translator: &dyn Translator) -> String {
        translator.t("editPatientDetails", "Edit patient details")
    }

    /// Request navigation, then run the completion callback if one was given.
    pub fn activate(&self, navigator: &dyn Navigator) {
        navigator.navigate(self.target());
        if let Some(callback) = &self.on_transition {
            callback();
        }
    }
}

impl fmt::Debug for NavigationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationTrigger")
            .field("patient_uuid", &self.patient_uuid)
            .field("on_transition", &self.on_transition.is_some())
            .finish()
    }
}
