use sea_orm_migration::{MigrationTrait, MigratorTrait, async_trait::async_trait};

mod m001_create_quest_created;
mod m002_create_photo_submitted;
mod m003_create_submissions_selected;
mod m004_create_quest_completed;
mod m005_create_quest_cancelled;
mod m006_create_platform_fee_updated;
mod m007_create_blockchain;

pub(crate) struct Migrator;

#[async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_quest_created::Migration),
            Box::new(m002_create_photo_submitted::Migration),
            Box::new(m003_create_submissions_selected::Migration),
            Box::new(m004_create_quest_completed::Migration),
            Box::new(m005_create_quest_cancelled::Migration),
            Box::new(m006_create_platform_fee_updated::Migration),
            Box::new(m007_create_blockchain::Migration),
        ]
    }
}
