pub mod memory;
pub mod repository;

pub use memory::InMemoryProductRepository;
pub use repository::{ProductRepository, SeaOrmProductRepository};
