//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    CategoryRepository, CommentRepository, LikeRepository, PostRepository, UserDirectory,
};
use blog_core::services::{CategoryService, CommentService, LikeService, PostService};
use blog_infra::database::DatabaseConfig;
use blog_infra::{
    HttpUserDirectory, IdentityConfig, InMemoryCategoryRepository, InMemoryCommentRepository,
    InMemoryLikeRepository, InMemoryPostRepository, InMemoryUserDirectory,
};

#[cfg(feature = "postgres")]
use sea_orm::DbConn;

#[cfg(feature = "postgres")]
use blog_infra::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLikeRepository,
    PostgresPostRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub categories: Arc<CategoryService>,
    pub comments: Arc<CommentService>,
    pub likes: Arc<LikeService>,
    /// Storage backend in use, reported by the health check.
    pub storage: &'static str,
}

/// The four repositories behind the services.
struct Repositories {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
    storage: &'static str,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            likes: Arc::new(InMemoryLikeRepository::new()),
            storage: "memory",
        }
    }

    /// Postgres repositories over `conn`. A schema that cannot be migrated
    /// is not served; storage falls back to memory as on a failed connect.
    #[cfg(feature = "postgres")]
    async fn postgres(conn: DbConn, run_migrations: bool) -> Self {
        if run_migrations {
            use migration::{Migrator, MigratorTrait};

            match Migrator::up(&conn, None).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Failed to apply database migrations. Using in-memory fallback."
                    );
                    return Self::in_memory();
                }
            }
        }

        Self {
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
            likes: Arc::new(PostgresLikeRepository::new(conn)),
            storage: "postgres",
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, identity: Option<&IdentityConfig>) -> Self {
        let repos = Self::repositories(db_config).await;
        let users = Self::user_directory(identity);

        tracing::info!(storage = repos.storage, "Application state initialized");
        Self::from_parts(repos, users)
    }

    /// In-memory state around the given directory.
    pub fn in_memory(users: Arc<dyn UserDirectory>) -> Self {
        Self::from_parts(Repositories::in_memory(), users)
    }

    fn from_parts(repos: Repositories, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            posts: Arc::new(PostService::new(repos.posts)),
            categories: Arc::new(CategoryService::new(repos.categories)),
            comments: Arc::new(CommentService::new(repos.comments, users)),
            likes: Arc::new(LikeService::new(repos.likes)),
            storage: repos.storage,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(db_config: Option<&DatabaseConfig>) -> Repositories {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Repositories::in_memory();
        };

        let conn = match blog_infra::database::connect(config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Repositories::in_memory();
            }
        };

        Repositories::postgres(conn, config.run_migrations).await
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_db_config: Option<&DatabaseConfig>) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Repositories::in_memory()
    }

    fn user_directory(identity: Option<&IdentityConfig>) -> Arc<dyn UserDirectory> {
        let Some(config) = identity else {
            tracing::warn!(
                "Identity service not configured. Comment authors cannot be resolved."
            );
            return Arc::new(InMemoryUserDirectory::new());
        };

        match HttpUserDirectory::new(config.clone()) {
            Ok(directory) => {
                tracing::info!(url = %config.base_url, "Identity service client ready");
                Arc::new(directory)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build identity client. Using empty directory.");
                Arc::new(InMemoryUserDirectory::new())
            }
        }
    }
}

#[cfg(all(test, feature = "postgres"))]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    #[tokio::test]
    async fn failed_migration_falls_back_to_memory() {
        // No prepared results: the first migration statement errors.
        let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repos = Repositories::postgres(conn, true).await;
        assert_eq!(repos.storage, "memory");
    }

    #[tokio::test]
    async fn connection_is_used_without_migrations() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repos = Repositories::postgres(conn, false).await;
        assert_eq!(repos.storage, "postgres");
    }
}
