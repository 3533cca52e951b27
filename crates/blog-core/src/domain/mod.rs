//! Domain entities - the core business objects.

mod category;
mod comment;
mod like;
mod pagination;
mod post;
mod user;

pub use category::{Category, CategoryFilter, NewCategory};
pub use comment::{Comment, CommentFilter, CommentWithAuthor, NewComment};
pub use like::{Like, LikeCounts, LikeVote, NewLike, ToggleAction, VoteState};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, Pagination, SortOrder};
pub use post::{NewPost, Post, PostChanges, PostFilter};
pub use user::UserProfile;
