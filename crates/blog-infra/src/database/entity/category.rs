//! Category entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{Category, NewCategory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewCategory> for ActiveModel {
    fn from(category: NewCategory) -> Self {
        Self {
            title: Set(category.title),
            ..Default::default()
        }
    }
}
