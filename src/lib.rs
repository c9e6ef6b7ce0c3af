pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod i18n;
pub mod navigation;
pub mod notify;
pub mod store;
pub mod types;

pub use api::{QueueAction, QueueClient};
pub use config::{Config, Credentials};
pub use confirm::{
    ActionOutcome, ConfirmActionFlow, ConfirmOutcome, FlowPhase, FlowServices, FnAction,
    ModalParams, SubmitAction, SubmitError,
};
pub use error::{CareQueueError, Result};
pub use i18n::{FallbackTranslator, Translator};
pub use navigation::{NavigationTarget, NavigationTrigger, Navigator};
pub use notify::{Notifier, Snackbar, SnackbarKind};
pub use store::{QueueRefresher, QueueSource, QueueStore};
pub use types::{QueueActionKind, QueueEntry};
