//! API handlers for the catalog endpoints

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod health;
pub mod openapi;
