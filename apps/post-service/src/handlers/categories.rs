//! Category endpoints.

use actix_web::{HttpResponse, web};
use blog_core::domain::Category;
use blog_core::services::ListCategoriesParams;
use blog_shared::dto::{
    CategoryListResponse, CategoryRequest, CategoryResponse, ListCategoriesQuery,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        created_at: category.created_at.to_rfc3339(),
    }
}

pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state.categories.create(body.into_inner().title).await?;
    Ok(HttpResponse::Created().json(category_response(category)))
}

pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let category = state.categories.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category_response(category)))
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListCategoriesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = state
        .categories
        .list(ListCategoriesParams {
            page: query.page,
            limit: query.limit,
            search: query.search,
        })
        .await?;

    Ok(HttpResponse::Ok().json(CategoryListResponse {
        categories: page.items.into_iter().map(category_response).collect(),
        count: page.total,
    }))
}

pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .update(path.into_inner(), body.into_inner().title)
        .await?;
    Ok(HttpResponse::Ok().json(category_response(category)))
}

pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    state.categories.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
