use std::collections::HashMap;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// MemoryRepository keeps entities keyed by their caller-assigned id for the
// lifetime of the process.
#[derive(Debug)]
pub struct MemoryRepository<Entity> {
    label: String,
    records: HashMap<i64, Entity>,
}

impl<Entity: Identifiable + Clone> MemoryRepository<Entity> {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            records: HashMap::new(),
        }
    }
}

impl<Entity: Identifiable + Clone> Repository<Entity> for MemoryRepository<Entity> {
    fn create(&mut self, entity: Entity) -> LibraryResult<usize> {
        let id = entity.id();
        if self.records.contains_key(&id) {
            return Err(LibraryError::duplicate_key(
                format!("Error: {} with ID {} already exists.", self.label, id).as_str()));
        }
        self.records.insert(id, entity);
        Ok(1)
    }

    fn update(&mut self, entity: &Entity) -> LibraryResult<usize> {
        match self.records.get_mut(&entity.id()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(1)
            }
            None => {
                Err(LibraryError::not_found(format!("{} not found.", self.label).as_str()))
            }
        }
    }

    fn get(&self, id: i64) -> LibraryResult<&Entity> {
        self.records.get(&id).ok_or_else(|| LibraryError::not_found(
            format!("{} not found.", self.label).as_str()))
    }

    fn exists(&self, id: i64) -> bool {
        self.records.contains_key(&id)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Entity> + '_> {
        Box::new(self.records.values())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
