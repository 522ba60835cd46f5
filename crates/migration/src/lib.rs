pub use sea_orm_migration::prelude::*;

mod m20251018_add_enrollment_indexes;
mod m20251018_create_enrollment_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_create_enrollment_tables::Migration),
            Box::new(m20251018_add_enrollment_indexes::Migration),
        ]
    }
}
