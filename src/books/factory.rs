use crate::books::domain::model::BookEntity;
use crate::core::repository::memory_repository::MemoryRepository;
use crate::core::repository::Repository;

pub fn create_book_repository() -> Box<dyn Repository<BookEntity>> {
    Box::new(MemoryRepository::<BookEntity>::new("Book"))
}
