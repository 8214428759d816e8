pub mod errors;
pub mod db;

// Reference data, consumed read-only via foreign keys
pub mod country;
pub mod region;
pub mod province;
pub mod district;
pub mod role;

// Catalog entities
pub mod document_type;
pub mod payment_type;
pub mod payment_status;
pub mod category;
pub mod brand;

// Business entities
pub mod supplier;
pub mod employee;

#[cfg(test)]
mod tests;
