use clap::{Parser, Subcommand};

use crate::types::QueueActionKind;

#[derive(Parser)]
#[command(name = "carequeue")]
#[command(about = "Service queue actions against an EMR server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a patient's edit screen
    EditPatient {
        /// Patient UUID
        #[arg(value_parser = parse_patient_uuid)]
        patient_uuid: String,
    },

    /// List active queue entries
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Void (delete) a queue entry
    Void {
        /// Queue entry UUID
        #[arg(value_parser = parse_entry_uuid)]
        entry_uuid: String,

        /// Confirm without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove a patient from the queue by ending their entry
    End {
        /// Queue entry UUID
        #[arg(value_parser = parse_entry_uuid)]
        entry_uuid: String,

        /// Confirm without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Undo a queue entry's last transition
    UndoTransition {
        /// Queue entry UUID
        #[arg(value_parser = parse_entry_uuid)]
        entry_uuid: String,

        /// Confirm without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (server.base_url, server.spa_base, auth.username, auth.password)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            cmd_config_get, cmd_config_set, cmd_config_show, cmd_edit_patient, cmd_list,
            cmd_queue_action,
        };

        match self {
            Commands::EditPatient { patient_uuid } => cmd_edit_patient(&patient_uuid),
            Commands::List { json } => cmd_list(json).await,
            Commands::Void { entry_uuid, yes } => {
                cmd_queue_action(QueueActionKind::Void, &entry_uuid, yes).await
            }
            Commands::End { entry_uuid, yes } => {
                cmd_queue_action(QueueActionKind::End, &entry_uuid, yes).await
            }
            Commands::UndoTransition { entry_uuid, yes } => {
                cmd_queue_action(QueueActionKind::UndoTransition, &entry_uuid, yes).await
            }
            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
                ConfigAction::Get { key } => cmd_config_get(&key),
            },
        }
    }
}

fn parse_uuid(s: &str, field_name: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(format!("{field_name} cannot be empty"));
    }

    uuid::Uuid::parse_str(trimmed)
        .map(|u| u.hyphenated().to_string())
        .map_err(|_| format!("Invalid {field_name} '{s}'. Must be a UUID"))
}

fn parse_patient_uuid(s: &str) -> Result<String, String> {
    parse_uuid(s, "patient UUID")
}

fn parse_entry_uuid(s: &str) -> Result<String, String> {
    parse_uuid(s, "queue entry UUID")
}
