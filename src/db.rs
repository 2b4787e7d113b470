pub mod supplier_repo;
pub use supplier_repo::{PgSupplierRepository, SupplierRepository};
pub mod memory_repo;
pub use memory_repo::InMemorySupplierRepository;
