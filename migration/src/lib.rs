pub use sea_orm_migration::prelude::*;

mod m20260115_000001_initial;
mod m20260210_000002_add_prize_position;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_initial::Migration),
            Box::new(m20260210_000002_add_prize_position::Migration),
        ]
    }
}
