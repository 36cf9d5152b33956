pub mod post;
pub mod preference;
pub mod shared_feed;
pub mod user;
