use crate::core::domain::Identifiable;

pub mod model;

pub trait User: Identifiable {
    fn has_borrowed(&self, book_id: i64) -> bool;
    fn borrowed_count(&self) -> usize;
}
