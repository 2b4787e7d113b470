pub mod auth;
pub mod supplier_service;
pub use supplier_service::SupplierService;
