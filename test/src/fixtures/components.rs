use std::{any::Any, cell::RefCell, rc::Rc, time::Duration};

use async_trait::async_trait;
use serde_json::{json, Value};

use tandem_logic::{ActorComponent, ComponentBase, ComponentContext, ComponentError};

pub type ProbeLog = Rc<RefCell<Vec<String>>>;

/// Records every lifecycle hook it receives
pub struct ProbeComponent {
    base: ComponentBase,
    log: ProbeLog,
    label: String,
}

impl ProbeComponent {
    pub const NAME: &'static str = "ProbeComponent";

    pub fn new(log: ProbeLog) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            log,
            label: String::new(),
        }
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{}", hook, self.label));
    }
}

#[async_trait(?Send)]
impl ActorComponent for ProbeComponent {
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
        _context: &ComponentContext,
    ) -> Result<(), ComponentError> {
        if let Some(label) = data.get("label").and_then(Value::as_str) {
            self.label = label.to_string();
        }
        self.record("initialize");
        Ok(())
    }

    fn post_initialize(&mut self) {
        self.record("post_initialize");
    }

    fn update(&mut self, _delta: Duration) {
        self.record("update");
    }

    fn changed(&mut self) {
        self.record("changed");
    }

    fn destroy(&mut self) {
        self.record("destroy");
    }

    fn snapshot(&self) -> Value {
        json!({ "label": self.label })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
