//! Backend commands queued from UI to backend worker.

use shared::form::FormState;

pub enum BackendCommand {
    /// Submit a snapshot of the form as it was when the button was pressed.
    Submit { form: FormState },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit",
        }
    }
}
