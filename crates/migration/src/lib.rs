//! Migrator registering table migrations in dependency order.
//! Reference data first (geo, roles), then catalogs, then business
//! entities. Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_country;
mod m20240101_000002_create_region;
mod m20240101_000003_create_province;
mod m20240101_000004_create_district;
mod m20240101_000005_create_role;
mod m20240101_000006_create_document_type;
mod m20240101_000007_create_payment_type;
mod m20240101_000008_create_payment_status;
mod m20240101_000009_create_category;
mod m20240101_000010_create_brand;
mod m20240101_000011_create_supplier;
mod m20240101_000012_create_employee;
mod m20240101_000100_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_country::Migration),
            Box::new(m20240101_000002_create_region::Migration),
            Box::new(m20240101_000003_create_province::Migration),
            Box::new(m20240101_000004_create_district::Migration),
            Box::new(m20240101_000005_create_role::Migration),
            Box::new(m20240101_000006_create_document_type::Migration),
            Box::new(m20240101_000007_create_payment_type::Migration),
            Box::new(m20240101_000008_create_payment_status::Migration),
            Box::new(m20240101_000009_create_category::Migration),
            Box::new(m20240101_000010_create_brand::Migration),
            Box::new(m20240101_000011_create_supplier::Migration),
            Box::new(m20240101_000012_create_employee::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000100_add_indexes::Migration),
        ]
    }
}
