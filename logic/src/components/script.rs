use std::{any::Any, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    actor::{
        component::{read_data, ActorComponent, ComponentBase, ComponentContext},
        error::ComponentError,
    },
    script::registry::Script,
};

#[derive(Default, Deserialize)]
struct ScriptData {
    script: Option<String>,
    /// Inline data handed to the script
    data: Option<Value>,
    /// Resource whose contents are handed to the script instead
    resource: Option<String>,
}

/// Delegates per-tick behavior to a script from the
/// [`ScriptRegistry`](crate::ScriptRegistry).
pub struct ScriptComponent {
    base: ComponentBase,
    script_name: String,
    script: Option<Box<dyn Script>>,
}

impl Default for ScriptComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptComponent {
    pub const NAME: &'static str = "ScriptComponent";

    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            script_name: String::new(),
            script: None,
        }
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn is_loaded(&self) -> bool {
        self.script.is_some()
    }
}

#[async_trait(?Send)]
impl ActorComponent for ScriptComponent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    async fn initialize(
        &mut self,
        data: &Value,
        context: &ComponentContext,
    ) -> Result<(), ComponentError> {
        let data: ScriptData = read_data(Self::NAME, data)?;
        let script_name = match data.script {
            Some(script_name) => script_name,
            None if !self.script_name.is_empty() => self.script_name.clone(),
            None => {
                return Err(ComponentError::InvalidData {
                    name: Self::NAME.to_string(),
                    reason: "missing 'script' field".to_string(),
                })
            }
        };

        let script_data = match data.resource {
            Some(resource) => context.resources.get_resource(&resource).await?,
            None => data.data.unwrap_or(Value::Null),
        };

        let mut script = context.scripts.load(&script_name)?;
        script.initialize(context.actor_id, &script_data)?;

        if let Some(mut previous) = self.script.replace(script) {
            previous.destroy();
        }
        self.script_name = script_name;
        Ok(())
    }

    fn update(&mut self, delta: Duration) {
        if let Some(script) = self.script.as_mut() {
            script.update(delta);
        }
    }

    fn destroy(&mut self) {
        if let Some(mut script) = self.script.take() {
            script.destroy();
        }
    }

    fn snapshot(&self) -> Value {
        json!({ "script": self.script_name })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
