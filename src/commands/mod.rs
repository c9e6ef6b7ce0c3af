mod config;
pub mod interactive;
mod navigate;
mod queue;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use navigate::cmd_edit_patient;
pub use queue::{cmd_list, cmd_queue_action, format_entry_line};
