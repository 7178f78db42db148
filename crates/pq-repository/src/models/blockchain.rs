#![allow(unreachable_pub)]

use sea_orm::{
    entity::prelude::{DeriveRelation, EnumIter},
    prelude::{
        ActiveModelBehavior, DateTimeUtc, DeriveEntityModel, DerivePrimaryKey, PrimaryKeyTrait,
    },
};

/// Indexing cursor per (chain, contract address).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blockchain")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub blockchain_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub contract_address: String,
    pub last_checked_block: i64,
    pub last_checked_timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
