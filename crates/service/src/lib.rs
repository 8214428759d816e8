//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;

pub mod geo;
pub mod document_rules;
pub mod photo;

pub mod document_type_service;
pub mod payment_type_service;
pub mod payment_status_service;
pub mod category_service;
pub mod brand_service;
pub mod supplier_service;
pub mod employee_service;

#[cfg(test)]
pub mod test_support;
