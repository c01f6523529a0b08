use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    events::event::EventEnvelope,
    messages::{error::MessageError, message_kind::MessageKind},
    types::{EventType, MessageType, ViewId},
};

const TYPE_FIELD: &str = "type";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub name: String,
}

/// Answer to a [`ResourceRequest`], correlated by resource name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResourceResponse {
    pub fn ok(name: &str, data: Value) -> Self {
        Self {
            name: name.to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            data: None,
            error: Some(error),
        }
    }
}

/// Injects an event into the receiving context's EventService
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub event_type: EventType,
    #[serde(default)]
    pub data: Value,
}

impl From<EventEnvelope> for TriggerEvent {
    fn from(envelope: EventEnvelope) -> Self {
        Self {
            event_type: envelope.event_type,
            data: envelope.data,
        }
    }
}

impl From<TriggerEvent> for EventEnvelope {
    fn from(trigger: TriggerEvent) -> Self {
        Self {
            event_type: trigger.event_type,
            data: trigger.data,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRendererRequest {
    pub view_id: ViewId,
    pub view_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRendererResponse {
    pub view_id: ViewId,
    pub success: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameOptionsRequest {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameOptionsResponse {
    #[serde(default)]
    pub options: Value,
}

/// Asks the logic context to build every actor listed in a level resource
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadGame {
    pub resource: String,
}

/// First message a worker sends after booting
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerStatus {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A typed envelope exchanged between the logic and render contexts.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    ResourceRequest(ResourceRequest),
    ResourceResponse(ResourceResponse),
    TriggerEvent(TriggerEvent),
    CreateViewRendererRequest(ViewRendererRequest),
    CreateViewRendererResponse(ViewRendererResponse),
    DestroyViewRendererRequest(ViewRendererRequest),
    DestroyViewRendererResponse(ViewRendererResponse),
    GameOptionsRequest(GameOptionsRequest),
    GameOptionsResponse(GameOptionsResponse),
    LoadGame(LoadGame),
    WorkerStatus(WorkerStatus),
}

/// Outcome of reading an envelope off the wire
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Known(Message),
    /// A type id the base protocol does not know. Not an error: a game layer
    /// may understand it.
    Unknown {
        type_id: MessageType,
        envelope: Value,
    },
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::ResourceRequest(_) => MessageKind::ResourceRequest,
            Message::ResourceResponse(_) => MessageKind::ResourceResponse,
            Message::TriggerEvent(_) => MessageKind::TriggerEvent,
            Message::CreateViewRendererRequest(_) => MessageKind::CreateViewRendererRequest,
            Message::CreateViewRendererResponse(_) => MessageKind::CreateViewRendererResponse,
            Message::DestroyViewRendererRequest(_) => MessageKind::DestroyViewRendererRequest,
            Message::DestroyViewRendererResponse(_) => MessageKind::DestroyViewRendererResponse,
            Message::GameOptionsRequest(_) => MessageKind::GameOptionsRequest,
            Message::GameOptionsResponse(_) => MessageKind::GameOptionsResponse,
            Message::LoadGame(_) => MessageKind::LoadGame,
            Message::WorkerStatus(_) => MessageKind::WorkerStatus,
        }
    }

    /// Writes `{ "type": <id>, ...fields }`
    pub fn encode(&self) -> Result<Value, MessageError> {
        let payload = match self {
            Message::ResourceRequest(inner) => serde_json::to_value(inner),
            Message::ResourceResponse(inner) => serde_json::to_value(inner),
            Message::TriggerEvent(inner) => serde_json::to_value(inner),
            Message::CreateViewRendererRequest(inner) => serde_json::to_value(inner),
            Message::CreateViewRendererResponse(inner) => serde_json::to_value(inner),
            Message::DestroyViewRendererRequest(inner) => serde_json::to_value(inner),
            Message::DestroyViewRendererResponse(inner) => serde_json::to_value(inner),
            Message::GameOptionsRequest(inner) => serde_json::to_value(inner),
            Message::GameOptionsResponse(inner) => serde_json::to_value(inner),
            Message::LoadGame(inner) => serde_json::to_value(inner),
            Message::WorkerStatus(inner) => serde_json::to_value(inner),
        }
        .map_err(|err| MessageError::Encode {
            kind: self.kind().name().to_string(),
            reason: err.to_string(),
        })?;

        let mut fields = match payload {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.insert(TYPE_FIELD.to_string(), Value::from(self.kind().id()));
        Ok(Value::Object(fields))
    }

    /// Reads an envelope. Unknown type ids are returned untouched as
    /// [`Decoded::Unknown`].
    pub fn decode(envelope: Value) -> Result<Decoded, MessageError> {
        let Value::Object(fields) = &envelope else {
            return Err(MessageError::NotAnObject);
        };
        let type_id = fields
            .get(TYPE_FIELD)
            .and_then(Value::as_u64)
            .and_then(|id| MessageType::try_from(id).ok())
            .ok_or(MessageError::MissingType)?;

        let Some(kind) = MessageKind::from_id(type_id) else {
            return Ok(Decoded::Unknown { type_id, envelope });
        };

        let message = match kind {
            MessageKind::ResourceRequest => Message::ResourceRequest(read(kind, &envelope)?),
            MessageKind::ResourceResponse => Message::ResourceResponse(read(kind, &envelope)?),
            MessageKind::TriggerEvent => Message::TriggerEvent(read(kind, &envelope)?),
            MessageKind::CreateViewRendererRequest => {
                Message::CreateViewRendererRequest(read(kind, &envelope)?)
            }
            MessageKind::CreateViewRendererResponse => {
                Message::CreateViewRendererResponse(read(kind, &envelope)?)
            }
            MessageKind::DestroyViewRendererRequest => {
                Message::DestroyViewRendererRequest(read(kind, &envelope)?)
            }
            MessageKind::DestroyViewRendererResponse => {
                Message::DestroyViewRendererResponse(read(kind, &envelope)?)
            }
            MessageKind::GameOptionsRequest => Message::GameOptionsRequest(read(kind, &envelope)?),
            MessageKind::GameOptionsResponse => {
                Message::GameOptionsResponse(read(kind, &envelope)?)
            }
            MessageKind::LoadGame => Message::LoadGame(read(kind, &envelope)?),
            MessageKind::WorkerStatus => Message::WorkerStatus(read(kind, &envelope)?),
        };

        Ok(Decoded::Known(message))
    }
}

fn read<T: DeserializeOwned>(kind: MessageKind, envelope: &Value) -> Result<T, MessageError> {
    T::deserialize(envelope).map_err(|err| MessageError::Malformed {
        kind: kind.name().to_string(),
        reason: err.to_string(),
    })
}
