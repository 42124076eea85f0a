use crate::gateway::events::EventPublisher;
use crate::gateway::logs::LogPublisher;
use crate::gateway::memory::MemoryPublisher;
use crate::gateway::GatewayPublisherVia;

pub fn create_publisher(via: GatewayPublisherVia, branch_id: &str) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Logs => {
            Box::new(LogPublisher::new(branch_id))
        }
        GatewayPublisherVia::Memory => {
            Box::new(MemoryPublisher::new())
        }
    }
}
