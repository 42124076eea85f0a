use std::cell::RefCell;
use std::rc::Rc;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// MemoryPublisher records events in process. Clones share the same buffer, so a
// handle kept by the caller sees everything published through the catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryPublisher {
    events: Rc<RefCell<Vec<DomainEvent>>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventPublisher for MemoryPublisher {
    fn publish(&mut self, event: &DomainEvent) -> Result<(), LibraryError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::MemoryPublisher;

    #[test]
    fn test_should_share_published_events() {
        let publisher = MemoryPublisher::new();
        let mut boxed: Box<dyn EventPublisher> = Box::new(publisher.clone());
        assert!(publisher.is_empty());
        let event = DomainEvent::issued("book_issued", "lending", "1", &HashMap::new(), &1).expect("build event");
        boxed.publish(&event).expect("should publish");
        assert_eq!(1, publisher.len());
        assert_eq!(DomainEventType::Issued, publisher.events()[0].kind);
    }
}
