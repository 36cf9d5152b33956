pub mod post_repo;
pub mod preference_repo;
pub mod shared_feed_repo;
pub mod user_repo;

pub use post_repo::PostRepo;
pub use preference_repo::PreferenceRepo;
pub use shared_feed_repo::SharedFeedRepo;
pub use user_repo::UserRepo;
