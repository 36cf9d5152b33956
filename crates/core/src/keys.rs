//! Cache and blob key builders.
//!
//! The image cache key is the composite `(user, prompt)` string that
//! memoizes completed generations; presence of an entry short-circuits
//! job submission entirely.

/// Cache key memoizing a completed generation for one `(user, prompt)` pair.
pub fn image_cache_key(user_id: &str, prompt: &str) -> String {
    format!("image:{user_id}:{prompt}")
}

/// Cache key mirroring a shared-feed snapshot for fast anonymous reads.
pub fn feed_cache_key(feed_id: &str) -> String {
    format!("feed:{feed_id}")
}

/// Per-user, time-suffixed blob key for a re-uploaded generation output.
pub fn blob_key(user_id: &str, unix_millis: i64) -> String {
    format!("ai-images/{user_id}/{unix_millis}.png")
}
