use std::{collections::HashMap, time::Duration};

use tandem_shared::ActorId;

use crate::actor::actor::Actor;

/// The live actors of one logic instance, in creation order.
#[derive(Default)]
pub struct ActorRegistry {
    order: Vec<ActorId>,
    actors: HashMap<ActorId, Actor>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands the actor back if its id is already taken
    pub fn insert(&mut self, actor: Actor) -> Result<(), Actor> {
        let id = actor.id();
        if self.actors.contains_key(&id) {
            return Err(actor);
        }
        self.order.push(id);
        self.actors.insert(id, actor);
        Ok(())
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(actor)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Ids in creation order
    pub fn ids(&self) -> &[ActorId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn update(&mut self, delta: Duration) {
        for id in &self.order {
            if let Some(actor) = self.actors.get_mut(id) {
                actor.update(delta);
            }
        }
    }

    /// Removes every actor, in creation order
    pub fn drain(&mut self) -> Vec<Actor> {
        let actors = &mut self.actors;
        self.order
            .drain(..)
            .filter_map(|id| actors.remove(&id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_is_handed_back() {
        let mut registry = ActorRegistry::new();
        assert!(registry.insert(Actor::new(4)).is_ok());
        let rejected = registry.insert(Actor::new(4)).unwrap_err();
        assert_eq!(rejected.id(), 4);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removal_keeps_remaining_order() {
        let mut registry = ActorRegistry::new();
        for id in [3, 1, 2] {
            registry.insert(Actor::new(id)).ok();
        }
        registry.remove(1);
        assert_eq!(registry.ids(), &[3, 2]);
        let drained: Vec<ActorId> = registry.drain().iter().map(Actor::id).collect();
        assert_eq!(drained, vec![3, 2]);
        assert!(registry.is_empty());
    }
}
