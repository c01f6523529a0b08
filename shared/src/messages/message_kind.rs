use crate::{identifier::hash_name, types::MessageType};

/// Every message kind the base protocol understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    ResourceRequest,
    ResourceResponse,
    TriggerEvent,
    CreateViewRendererRequest,
    CreateViewRendererResponse,
    DestroyViewRendererRequest,
    DestroyViewRendererResponse,
    GameOptionsRequest,
    GameOptionsResponse,
    LoadGame,
    WorkerStatus,
}

impl MessageKind {
    pub const ALL: [MessageKind; 11] = [
        MessageKind::ResourceRequest,
        MessageKind::ResourceResponse,
        MessageKind::TriggerEvent,
        MessageKind::CreateViewRendererRequest,
        MessageKind::CreateViewRendererResponse,
        MessageKind::DestroyViewRendererRequest,
        MessageKind::DestroyViewRendererResponse,
        MessageKind::GameOptionsRequest,
        MessageKind::GameOptionsResponse,
        MessageKind::LoadGame,
        MessageKind::WorkerStatus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::ResourceRequest => "ResourceRequest",
            MessageKind::ResourceResponse => "ResourceResponse",
            MessageKind::TriggerEvent => "TriggerEvent",
            MessageKind::CreateViewRendererRequest => "CreateViewRendererRequest",
            MessageKind::CreateViewRendererResponse => "CreateViewRendererResponse",
            MessageKind::DestroyViewRendererRequest => "DestroyViewRendererRequest",
            MessageKind::DestroyViewRendererResponse => "DestroyViewRendererResponse",
            MessageKind::GameOptionsRequest => "GameOptionsRequest",
            MessageKind::GameOptionsResponse => "GameOptionsResponse",
            MessageKind::LoadGame => "LoadGame",
            MessageKind::WorkerStatus => "WorkerStatus",
        }
    }

    /// Wire id, hashed from the kind's name
    pub fn id(self) -> MessageType {
        hash_name(self.name())
    }

    pub fn from_id(id: MessageType) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }
}
