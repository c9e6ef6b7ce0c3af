//! Modal configuration for the confirm flow

use crate::i18n::Translator;
use crate::types::{QueueActionKind, QueueEntry};

/// Placeholder in the remove-from-queue instruction replaced by the entry's display name
const PATIENT_PLACEHOLDER: &str = "{{patient}}";

/// What a confirm modal shows and what it does when confirmed.
///
/// Read-only for the lifetime of the flow.
#[derive(Debug, Clone)]
pub struct ModalParams<A> {
    pub modal_title: String,
    pub modal_instruction: String,
    pub submit_button_text: String,
    pub submit_success_title: String,
    pub submit_success_text: String,
    pub submit_failure_title: String,
    /// Show only the instruction in the body, without the entry's display name
    pub is_removing_patient_from_queue: bool,
    pub submit_action: A,
}

impl<A> ModalParams<A> {
    /// Preset parameters for one of the standard queue actions
    pub fn preset(
        kind: QueueActionKind,
        t: &dyn Translator,
        entry: &QueueEntry,
        submit_action: A,
    ) -> Self {
        match kind {
            QueueActionKind::Void => Self::void_entry(t, submit_action),
            QueueActionKind::End => Self::end_entry(t, entry, submit_action),
            QueueActionKind::UndoTransition => Self::undo_transition(t, submit_action),
        }
    }

    /// Parameters for voiding (deleting) a queue entry
    pub fn void_entry(t: &dyn Translator, submit_action: A) -> Self {
        Self {
            modal_title: t.t("voidQueueEntry", "Void queue entry?"),
            modal_instruction: t.t(
                "voidQueueEntryInstruction",
                "Voiding removes this entry from the queue history. This cannot be undone.",
            ),
            submit_button_text: t.t("void", "Void"),
            submit_success_title: t.t("queueEntryVoided", "Queue entry voided"),
            submit_success_text: t.t(
                "queueEntryVoidedSuccessfully",
                "Queue entry voided successfully",
            ),
            submit_failure_title: t.t("queueEntryVoidFailed", "Error voiding queue entry"),
            is_removing_patient_from_queue: false,
            submit_action,
        }
    }

    /// Parameters for ending a queue entry, i.e. removing the patient from the queue
    pub fn end_entry(t: &dyn Translator, entry: &QueueEntry, submit_action: A) -> Self {
        let instruction = t
            .t(
                "endQueueEntryInstruction",
                "{{patient}} will be removed from the queue.",
            )
            .replace(PATIENT_PLACEHOLDER, &entry.display);

        Self {
            modal_title: t.t("removePatientFromQueue", "Remove patient from queue?"),
            modal_instruction: instruction,
            submit_button_text: t.t("remove", "Remove"),
            submit_success_title: t.t("patientRemoved", "Patient removed"),
            submit_success_text: t.t(
                "patientRemovedSuccessfully",
                "Patient removed from queue successfully",
            ),
            submit_failure_title: t.t(
                "patientRemoveFailed",
                "Error removing patient from queue",
            ),
            is_removing_patient_from_queue: true,
            submit_action,
        }
    }

    /// Parameters for undoing an entry's last transition
    pub fn undo_transition(t: &dyn Translator, submit_action: A) -> Self {
        Self {
            modal_title: t.t("undoTransition", "Undo transition?"),
            modal_instruction: t.t(
                "undoTransitionInstruction",
                "The entry will return to the queue and status it had before its last transition.",
            ),
            submit_button_text: t.t("undo", "Undo"),
            submit_success_title: t.t("transitionUndone", "Transition undone"),
            submit_success_text: t.t(
                "queueEntryTransitionUndoneSuccessfully",
                "Queue entry transition undone successfully",
            ),
            submit_failure_title: t.t(
                "queueEntryTransitionUndoFailed",
                "Error undoing transition",
            ),
            is_removing_patient_from_queue: false,
            submit_action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::FallbackTranslator;

    #[test]
    fn test_void_preset() {
        let params = ModalParams::void_entry(&FallbackTranslator, ());
        assert_eq!(params.modal_title, "Void queue entry?");
        assert_eq!(params.submit_button_text, "Void");
        assert_eq!(params.submit_failure_title, "Error voiding queue entry");
        assert!(!params.is_removing_patient_from_queue);
    }

    #[test]
    fn test_end_preset_names_patient() {
        let entry = QueueEntry::new("e-1", "John Doe");
        let params = ModalParams::end_entry(&FallbackTranslator, &entry, ());
        assert_eq!(
            params.modal_instruction,
            "John Doe will be removed from the queue."
        );
        assert!(params.is_removing_patient_from_queue);
    }

    #[test]
    fn test_preset_dispatch() {
        let entry = QueueEntry::new("e-1", "John Doe");
        let t = FallbackTranslator;
        assert_eq!(
            ModalParams::preset(QueueActionKind::Void, &t, &entry, ()).submit_button_text,
            "Void"
        );
        assert_eq!(
            ModalParams::preset(QueueActionKind::End, &t, &entry, ()).submit_button_text,
            "Remove"
        );
        assert_eq!(
            ModalParams::preset(QueueActionKind::UndoTransition, &t, &entry, ()).submit_button_text,
            "Undo"
        );
    }

    #[test]
    fn test_presets_use_translator() {
        let shouting = |key: &str, _fallback: &str| key.to_uppercase();
        let params = ModalParams::undo_transition(&shouting, ());
        assert_eq!(params.modal_title, "UNDOTRANSITION");
        assert_eq!(params.submit_success_title, "TRANSITIONUNDONE");
    }
}
