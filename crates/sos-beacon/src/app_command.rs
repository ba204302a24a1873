/// Commands sent from the console handler to the main application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Run one SOS alert end-to-end.
    TriggerAlert,
    /// Start the ambient audio recording session.
    StartRecording,
    /// Stop the ambient audio recording session.
    StopRecording,
    /// Register an emergency contact.
    AddContact {
        /// Display name of the contact.
        name: String,
        /// Phone number of the contact.
        number: String,
    },
    /// Log the registered contacts.
    ListContacts,
    /// Request application shutdown.
    Shutdown,
}
