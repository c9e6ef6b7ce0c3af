use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use carequeue::navigation::{NavigationTarget, NavigationTrigger, RecordingNavigator};
use carequeue::notify::RecordingNotifier;
use carequeue::{
    ActionOutcome, ConfirmActionFlow, ConfirmOutcome, FallbackTranslator, FlowServices, FnAction,
    ModalParams, QueueEntry, SnackbarKind, SubmitError,
};

struct Host {
    notifier: Arc<RecordingNotifier>,
    refreshes: Arc<AtomicUsize>,
}

impl Host {
    fn new() -> Self {
        Host {
            notifier: Arc::new(RecordingNotifier::new()),
            refreshes: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn services(&self) -> FlowServices {
        let refreshes = self.refreshes.clone();
        FlowServices {
            notifier: self.notifier.clone(),
            refresher: Arc::new(move || {
                refreshes.fetch_add(1, Ordering::SeqCst);
            }),
            translator: Arc::new(FallbackTranslator),
        }
    }

    fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn test_remove_patient_succeeds() {
    let host = Host::new();
    let entry = QueueEntry::new("e-1", "John Doe");
    let action = FnAction(|_: QueueEntry| async { Ok::<_, SubmitError>(ActionOutcome::new(204)) });
    let params = ModalParams::end_entry(&FallbackTranslator, &entry, action);
    let flow = ConfirmActionFlow::open(&entry, params, host.services());

    assert_eq!(flow.body_lines(), vec!["John Doe will be removed from the queue."]);

    let outcome = flow.confirm().await;

    assert_eq!(outcome, ConfirmOutcome::Succeeded(ActionOutcome::new(204)));
    let snackbar = host.notifier.last().unwrap();
    assert_eq!(snackbar.kind, SnackbarKind::Success);
    assert!(snackbar.is_low_contrast);
    assert_eq!(snackbar.title, "Patient removed");
    assert_eq!(host.refreshes(), 1);
    assert!(!flow.is_open());
}

#[tokio::test]
async fn test_server_error_keeps_modal_open() {
    let host = Host::new();
    let entry = QueueEntry::new("e-1", "John Doe");
    let action = FnAction(|_: QueueEntry| async { Ok::<_, SubmitError>(ActionOutcome::new(500)) });
    let params = ModalParams::void_entry(&FallbackTranslator, action);
    let flow = ConfirmActionFlow::open(&entry, params, host.services());

    let outcome = flow.confirm().await;

    assert_eq!(outcome, ConfirmOutcome::Failed(SubmitError::UnexpectedStatus(500)));
    let snackbar = host.notifier.last().unwrap();
    assert_eq!(snackbar.kind, SnackbarKind::Error);
    assert_eq!(snackbar.title, "Error voiding queue entry");
    assert_eq!(snackbar.subtitle.as_deref(), Some("Unexpected Server Response"));
    assert_eq!(host.refreshes(), 0);
    assert!(flow.is_open());
    assert!(flow.is_confirm_enabled());
}

#[tokio::test]
async fn test_network_failure_then_cancel() {
    let host = Host::new();
    let entry = QueueEntry::new("e-1", "John Doe");
    let action = FnAction(|_: QueueEntry| async {
        Err::<ActionOutcome, _>(SubmitError::rejected("network down"))
    });
    let params = ModalParams::undo_transition(&FallbackTranslator, action);
    let closes = Arc::new(AtomicUsize::new(0));
    let counter = closes.clone();
    let flow = ConfirmActionFlow::open(&entry, params, host.services()).with_on_close(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    flow.confirm().await;

    let snackbar = host.notifier.last().unwrap();
    assert_eq!(snackbar.title, "Error undoing transition");
    assert_eq!(snackbar.subtitle.as_deref(), Some("network down"));
    assert!(flow.is_open());
    assert!(!flow.is_busy());

    flow.cancel();
    flow.cancel();

    assert!(!flow.is_open());
    assert_eq!(closes.load(Ordering::SeqCst), 1);
    assert_eq!(host.notifier.len(), 1);
    assert_eq!(host.refreshes(), 0);
}

#[test]
fn test_edit_patient_trigger() {
    let navigator = RecordingNavigator::new();
    let done = Arc::new(AtomicUsize::new(0));
    let counter = done.clone();
    let trigger = NavigationTrigger::new("p-1")
        .unwrap()
        .with_on_transition(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    assert_eq!(trigger.label(&FallbackTranslator), "Edit patient details");
    trigger.activate(&navigator);

    assert_eq!(
        navigator.targets(),
        vec![NavigationTarget {
            to: "${openmrsSpaBase}/patient/p-1/edit".to_string()
        }]
    );
    assert_eq!(done.load(Ordering::SeqCst), 1);
}
