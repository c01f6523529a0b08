use std::{collections::HashMap, time::Duration};

use log::{error, warn};

use tandem_shared::{hash_name, ActorId, ComponentId, ComponentSnapshot};

use crate::actor::{
    component::{snapshot_of, ActorComponent, ExclusiveSlot},
    descriptor::ActorDescriptor,
};

/// A game object: an id, a type tag and the components it owns.
///
/// Components are kept in attach order, which is also their update order.
pub struct Actor {
    id: ActorId,
    actor_type: String,
    order: Vec<ComponentId>,
    components: HashMap<ComponentId, Box<dyn ActorComponent>>,
    /// Slots held by components that are out for an override
    reserved: Vec<ExclusiveSlot>,
}

impl Actor {
    pub fn new(id: ActorId) -> Self {
        Self {
            id,
            actor_type: String::new(),
            order: Vec::new(),
            components: HashMap::new(),
            reserved: Vec::new(),
        }
    }

    /// Reads the shell fields of a descriptor. Returns false if it has no
    /// type.
    pub fn initialise(&mut self, descriptor: &ActorDescriptor) -> bool {
        match descriptor.actor_type.as_deref() {
            Some(actor_type) if !actor_type.is_empty() => {
                self.actor_type = actor_type.to_string();
                true
            }
            _ => {
                error!("Actor {} descriptor is missing a 'type' field", self.id);
                false
            }
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    // Components

    /// Attaches a component and takes ownership of it. A component with the
    /// same id is displaced and handed back.
    pub fn add_component(
        &mut self,
        mut component: Box<dyn ActorComponent>,
    ) -> Option<Box<dyn ActorComponent>> {
        let id = component.id();
        component.set_owner(Some(self.id));
        if !self.order.contains(&id) {
            self.order.push(id);
        }

        let mut displaced = self.components.insert(id, component)?;
        warn!(
            "Component '{}' replaced an existing one on actor {}",
            displaced.name(),
            self.id
        );
        displaced.set_owner(None);
        Some(displaced)
    }

    pub fn get_component(&self, id: ComponentId) -> Option<&dyn ActorComponent> {
        self.components.get(&id).map(|component| &**component)
    }

    pub fn get_component_mut(&mut self, id: ComponentId) -> Option<&mut dyn ActorComponent> {
        self.components.get_mut(&id).map(|component| &mut **component)
    }

    pub fn get_component_by_name(&self, name: &str) -> Option<&dyn ActorComponent> {
        self.get_component(hash_name(name))
    }

    /// Typed access by component name
    pub fn component<T: ActorComponent>(&self, name: &str) -> Option<&T> {
        self.get_component_by_name(name)?.downcast_ref::<T>()
    }

    pub fn has_component(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Components in attach order
    pub fn components(&self) -> impl Iterator<Item = &dyn ActorComponent> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.components.get(id).map(|component| &**component))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Whether an attached component, or one still being overridden,
    /// occupies the slot
    pub fn occupies(&self, slot: ExclusiveSlot) -> bool {
        self.reserved.contains(&slot)
            || self
                .components
                .values()
                .any(|component| component.exclusive_slot() == Some(slot))
    }

    /// Holds a slot until `release_slot`, even while no attached component
    /// occupies it
    pub fn reserve_slot(&mut self, slot: ExclusiveSlot) {
        self.reserved.push(slot);
    }

    pub fn release_slot(&mut self, slot: ExclusiveSlot) {
        if let Some(index) = self.reserved.iter().position(|held| *held == slot) {
            self.reserved.swap_remove(index);
        }
    }

    /// Detaches a component for out-of-line work. Its place in the update
    /// order is kept until it is restored or removed.
    pub fn take_component(&mut self, id: ComponentId) -> Option<Box<dyn ActorComponent>> {
        self.components.remove(&id)
    }

    pub fn restore_component(&mut self, component: Box<dyn ActorComponent>) {
        if let Some(mut displaced) = self.add_component(component) {
            displaced.destroy();
        }
    }

    // Lifecycle

    pub fn post_initialise(&mut self) {
        for id in &self.order {
            if let Some(component) = self.components.get_mut(id) {
                component.post_initialize();
            }
        }
    }

    pub fn update(&mut self, delta: Duration) {
        for id in &self.order {
            if let Some(component) = self.components.get_mut(id) {
                component.update(delta);
            }
        }
    }

    /// Destroys every component in attach order and empties the actor
    pub fn destroy(&mut self) {
        for id in self.order.drain(..) {
            if let Some(mut component) = self.components.remove(&id) {
                component.destroy();
                component.set_owner(None);
            }
        }
        for (_, mut component) in self.components.drain() {
            component.destroy();
            component.set_owner(None);
        }
        self.reserved.clear();
    }

    pub fn snapshot(&self) -> Vec<ComponentSnapshot> {
        self.components().map(snapshot_of).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, cell::Cell, rc::Rc};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::actor::{
        component::{ComponentBase, ComponentContext},
        error::ComponentError,
    };

    /// Counts its destroy calls
    struct Probe {
        base: ComponentBase,
        name: &'static str,
        destroyed: Rc<Cell<u32>>,
    }

    impl Probe {
        fn boxed(name: &'static str, destroyed: &Rc<Cell<u32>>) -> Box<dyn ActorComponent> {
            Box::new(Self {
                base: ComponentBase::new(name),
                name,
                destroyed: destroyed.clone(),
            })
        }
    }

    #[async_trait(?Send)]
    impl ActorComponent for Probe {
        fn name(&self) -> &'static str {
            self.name
        }
        fn base(&self) -> &ComponentBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }
        async fn initialize(
            &mut self,
            _data: &Value,
            _context: &ComponentContext,
        ) -> Result<(), ComponentError> {
            Ok(())
        }
        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
        fn snapshot(&self) -> Value {
            json!({ "probe": self.name })
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn initialise_requires_type() {
        let mut actor = Actor::new(1);
        assert!(!actor.initialise(&ActorDescriptor::default()));
        assert!(actor.initialise(&ActorDescriptor {
            actor_type: Some("ball".to_string()),
            components: Vec::new(),
        }));
        assert_eq!(actor.actor_type(), "ball");
    }

    #[test]
    fn destroy_runs_every_hook_once() {
        let destroyed = Rc::new(Cell::new(0));
        let mut actor = Actor::new(3);
        for name in ["A", "B", "C"] {
            actor.add_component(Probe::boxed(name, &destroyed));
        }
        assert_eq!(actor.component_count(), 3);

        actor.destroy();
        assert_eq!(destroyed.get(), 3);
        assert_eq!(actor.component_count(), 0);
        assert_eq!(actor.components().count(), 0);

        actor.destroy();
        assert_eq!(destroyed.get(), 3);
    }

    #[test]
    fn add_sets_owner_and_keeps_order() {
        let destroyed = Rc::new(Cell::new(0));
        let mut actor = Actor::new(9);
        actor.add_component(Probe::boxed("First", &destroyed));
        actor.add_component(Probe::boxed("Second", &destroyed));

        let names: Vec<&str> = actor.components().map(|component| component.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(
            actor.get_component_by_name("second").and_then(|c| c.owner()),
            Some(9)
        );
    }

    #[test]
    fn reserved_slot_is_occupied_until_released() {
        let mut actor = Actor::new(4);
        assert!(!actor.occupies(ExclusiveSlot::Camera));

        actor.reserve_slot(ExclusiveSlot::Camera);
        assert!(actor.occupies(ExclusiveSlot::Camera));
        assert!(!actor.occupies(ExclusiveSlot::Light));

        actor.release_slot(ExclusiveSlot::Camera);
        assert!(!actor.occupies(ExclusiveSlot::Camera));
    }

    #[test]
    fn taken_component_keeps_its_update_slot() {
        let destroyed = Rc::new(Cell::new(0));
        let mut actor = Actor::new(2);
        actor.add_component(Probe::boxed("First", &destroyed));
        actor.add_component(Probe::boxed("Second", &destroyed));

        let first = actor.take_component(hash_name("First")).unwrap();
        assert_eq!(actor.components().count(), 1);
        actor.restore_component(first);

        let names: Vec<&str> = actor.components().map(|component| component.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(destroyed.get(), 0);
    }
}
