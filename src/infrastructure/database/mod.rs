mod memory_repository;
mod mongo_repository;


pub use memory_repository::create_memory_repository;
pub use mongo_repository::create_mongo_repository;
