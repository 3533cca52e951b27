//! Like entity for SeaORM. The migration puts a unique index on `(user_id, post_id)`.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{Like, NewLike};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub status: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Like {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            post_id: model.post_id,
            status: model.status,
        }
    }
}

impl From<NewLike> for ActiveModel {
    fn from(like: NewLike) -> Self {
        Self {
            user_id: Set(like.user_id),
            post_id: Set(like.post_id),
            status: Set(like.status),
            ..Default::default()
        }
    }
}
