//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub views_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            user_id: model.user_id,
            category_id: model.category_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
            views_count: model.views_count,
        }
    }
}

/// Insert model; id, timestamps and the view counter come from column defaults.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            title: Set(post.title),
            description: Set(post.description),
            image_url: Set(post.image_url),
            user_id: Set(post.user_id),
            category_id: Set(post.category_id),
            ..Default::default()
        }
    }
}
