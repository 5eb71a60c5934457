//! Post entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Board post row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    /// Store-assigned id
    #[sea_orm(primary_key)]
    pub post_id: i32,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
