use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

// LogPublisher writes every domain event to the structured log as json.
#[derive(Debug)]
pub struct LogPublisher {
    branch_id: String,
}

impl LogPublisher {
    pub fn new(branch_id: &str) -> Self {
        Self {
            branch_id: branch_id.to_string(),
        }
    }

    fn render(&self, event: &DomainEvent) -> LibraryResult<String> {
        Ok(serde_json::to_string(event)?)
    }
}

impl EventPublisher for LogPublisher {
    fn publish(&mut self, event: &DomainEvent) -> Result<(), LibraryError> {
        let json = self.render(event)?;
        info!(branch = %self.branch_id, name = %event.name, key = %event.key, event = %json, "domain event");
        Ok(())
    }
}
