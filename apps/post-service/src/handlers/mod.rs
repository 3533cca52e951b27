//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod likes;
mod posts;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create))
                        .route("", web::get().to(posts::list))
                        .route("/{id}", web::get().to(posts::get))
                        .route("/{id}", web::put().to(posts::update))
                        .route("/{id}", web::delete().to(posts::delete)),
                )
                .service(
                    web::scope("/categories")
                        .route("", web::post().to(categories::create))
                        .route("", web::get().to(categories::list))
                        .route("/{id}", web::get().to(categories::get))
                        .route("/{id}", web::put().to(categories::update))
                        .route("/{id}", web::delete().to(categories::delete)),
                )
                .service(
                    web::scope("/comments")
                        .route("", web::post().to(comments::create))
                        .route("", web::get().to(comments::list))
                        .route("/{id}", web::get().to(comments::get))
                        .route("/{id}", web::put().to(comments::update))
                        .route("/{id}", web::delete().to(comments::delete)),
                )
                .service(
                    web::scope("/likes")
                        .route("", web::post().to(likes::vote))
                        .route("", web::get().to(likes::get))
                        .route("/count", web::get().to(likes::count)),
                ),
        )
        .default_service(web::to(not_implemented));
}

/// Fallback for every unknown route.
async fn not_implemented() -> AppResult<HttpResponse> {
    Err(AppError::Unimplemented)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(err.to_string()).into()
}
