use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;
use crate::users::domain::model::UserEntity;

pub fn create_user_repository() -> Box<dyn Repository<UserEntity>> {
    Box::new(MemoryRepository::<UserEntity>::new("User"))
}
