use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tandem_shared::{hash_name, ComponentId};

/// Declarative actor description: `{ "type": ..., "components": [...] }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}

/// One component entry: `{ "type": <component name>, ...fields }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    #[serde(rename = "type", default)]
    pub component_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ComponentDescriptor {
    pub fn new(component_type: &str, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        Self {
            component_type: component_type.to_string(),
            fields,
        }
    }

    pub fn component_id(&self) -> ComponentId {
        hash_name(&self.component_type)
    }

    /// Payload handed to the component initializer
    pub fn data(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
