pub type ActorId = u32;
pub type ComponentId = u32;
pub type EventType = u32;
pub type MessageType = u32;
pub type ViewId = u32;
