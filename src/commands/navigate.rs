use crate::config::Config;
use crate::error::Result;
use crate::navigation::{ConsoleNavigator, NavigationTrigger};

/// Print the edit-screen URL for a patient
pub fn cmd_edit_patient(patient_uuid: &str) -> Result<()> {
    let config = Config::load()?;
    let navigator = ConsoleNavigator::new(config.base_paths()?);

    let trigger = NavigationTrigger::new(patient_uuid)?
        .with_on_transition(|| tracing::debug!("edit-patient navigation complete"));
    trigger.activate(&navigator);

    Ok(())
}
