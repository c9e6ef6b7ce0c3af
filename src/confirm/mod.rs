//! Confirm-then-submit flow for queue entry actions.
//!
//! One flow backs every queue action that needs nothing from the user beyond a
//! yes/no: voiding an entry, ending it, and undoing its last transition. The
//! action itself is injected through [`ModalParams::submit_action`].

mod action;
mod flow;
mod params;

pub use action::{ActionOutcome, FnAction, SUCCESS_STATUS, SubmitAction, SubmitError};
pub use flow::{ConfirmActionFlow, ConfirmOutcome, FlowPhase, FlowServices};
pub use params::ModalParams;
