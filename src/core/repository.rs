pub mod memory_repository;

use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;

pub trait Repository<Entity: Identifiable> {
    // create an entity, failing on an existing id
    fn create(&mut self, entity: Entity) -> LibraryResult<usize>;

    // updates an existing entity
    fn update(&mut self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    fn get(&self, id: i64) -> LibraryResult<&Entity>;

    fn exists(&self, id: i64) -> bool {
        self.get(id).is_ok()
    }

    // all entities in storage order, which is unspecified
    fn iter(&self) -> Box<dyn Iterator<Item = &Entity> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
