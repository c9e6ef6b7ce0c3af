//! The confirm/cancel state machine

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use super::action::{ActionOutcome, SubmitAction, SubmitError};
use super::params::ModalParams;
use crate::i18n::Translator;
use crate::notify::{Notifier, Snackbar};
use crate::store::QueueRefresher;
use crate::types::QueueEntry;

/// Whether a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Submitting,
}

/// Result of one confirm activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Success snackbar shown, entries refreshed, flow closed
    Succeeded(ActionOutcome),
    /// Error snackbar shown, flow still open and idle
    Failed(SubmitError),
    /// Confirm was disabled (already submitting, or the flow is closed)
    Ignored,
}

/// Host services the flow reports to
#[derive(Clone)]
pub struct FlowServices {
    pub notifier: Arc<dyn Notifier>,
    pub refresher: Arc<dyn QueueRefresher>,
    pub translator: Arc<dyn Translator>,
}

impl fmt::Debug for FlowServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowServices").finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct FlowState {
    phase: FlowPhase,
    open: bool,
}

/// Sets the flow to `Submitting` on creation and back to `Idle` on drop,
/// whichever way the attempt ends.
struct BusyGuard<'s> {
    state: &'s Mutex<FlowState>,
}

impl<'s> BusyGuard<'s> {
    fn acquire(state: &'s Mutex<FlowState>) -> Option<Self> {
        let mut s = state.lock();
        if !s.open || s.phase == FlowPhase::Submitting {
            return None;
        }
        s.phase = FlowPhase::Submitting;
        Some(Self { state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().phase = FlowPhase::Idle;
    }
}

type Callback = Box<dyn Fn() + Send + Sync>;

/// Confirm modal for a single queue entry.
///
/// At most one submission runs at a time: confirm is disabled while a
/// submission is in flight. Cancel is always available and never aborts an
/// in-flight submission; its outcome is still reported when it settles.
pub struct ConfirmActionFlow<'e, A> {
    entry: &'e QueueEntry,
    params: ModalParams<A>,
    services: FlowServices,
    state: Mutex<FlowState>,
    on_close: Option<Callback>,
}

impl<'e, A: SubmitAction> ConfirmActionFlow<'e, A> {
    /// Open a flow for `entry`
    pub fn open(entry: &'e QueueEntry, params: ModalParams<A>, services: FlowServices) -> Self {
        Self {
            entry,
            params,
            services,
            state: Mutex::new(FlowState {
                phase: FlowPhase::Idle,
                open: true,
            }),
            on_close: None,
        }
    }

    /// Callback run once when the flow closes, by cancel or by success
    pub fn with_on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn entry(&self) -> &QueueEntry {
        self.entry
    }

    pub fn params(&self) -> &ModalParams<A> {
        &self.params
    }

    pub fn phase(&self) -> FlowPhase {
        self.state.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() == FlowPhase::Submitting
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// Whether the confirm control accepts activation
    pub fn is_confirm_enabled(&self) -> bool {
        let state = self.state.lock();
        state.open && state.phase == FlowPhase::Idle
    }

    pub fn title(&self) -> &str {
        &self.params.modal_title
    }

    /// Modal body: the instruction alone when removing a patient from the
    /// queue, otherwise the entry's display name followed by the instruction
    pub fn body_lines(&self) -> Vec<&str> {
        if self.params.is_removing_patient_from_queue {
            vec![self.params.modal_instruction.as_str()]
        } else {
            vec![
                self.entry.display.as_str(),
                self.params.modal_instruction.as_str(),
            ]
        }
    }

    pub fn confirm_label(&self) -> &str {
        &self.params.submit_button_text
    }

    pub fn cancel_label(&self) -> String {
        self.services.translator.t("cancel", "Cancel")
    }

    /// Close without side effects
    pub fn cancel(&self) {
        tracing::debug!(entry = %self.entry.uuid, "confirm flow cancelled");
        self.close();
    }

    /// Run the submit action and report its outcome.
    ///
    /// Success shows a low-contrast success snackbar, refreshes the queue
    /// entries and closes the flow, in that order. Any failure shows an error
    /// snackbar and leaves the flow open so the user can retry or cancel.
    pub async fn confirm(&self) -> ConfirmOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.state) else {
            tracing::debug!(entry = %self.entry.uuid, "confirm ignored");
            return ConfirmOutcome::Ignored;
        };

        tracing::debug!(entry = %self.entry.uuid, "submitting queue entry action");
        let result = self
            .params
            .submit_action
            .submit(self.entry)
            .await
            .and_then(ActionOutcome::into_result);

        match result {
            Ok(outcome) => {
                tracing::info!(entry = %self.entry.uuid, status = outcome.status, "queue entry action succeeded");
                self.services.notifier.show_snackbar(
                    Snackbar::success(&self.params.submit_success_title)
                        .with_subtitle(Some(self.params.submit_success_text.clone()))
                        .low_contrast(),
                );
                self.services.refresher.mutate_queue_entries();
                self.close();
                ConfirmOutcome::Succeeded(outcome)
            }
            Err(error) => {
                tracing::warn!(entry = %self.entry.uuid, %error, "queue entry action failed");
                let subtitle = error.user_message(self.services.translator.as_ref());
                self.services.notifier.show_snackbar(
                    Snackbar::error(&self.params.submit_failure_title).with_subtitle(subtitle),
                );
                ConfirmOutcome::Failed(error)
            }
        }
    }

    fn close(&self) {
        let was_open = std::mem::replace(&mut self.state.lock().open, false);
        if was_open && let Some(callback) = &self.on_close {
            callback();
        }
    }
}

impl<A> fmt::Debug for ConfirmActionFlow<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmActionFlow")
            .field("entry", &self.entry.uuid)
            .field("title", &self.params.modal_title)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
