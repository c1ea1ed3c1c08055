//! Cache Entry Module
//!
//! A single in-memory cache entry with an absolute expiry.

use std::time::Duration;

use tokio::time::Instant;

/// Lifetime used when `now + ttl` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A serialized value together with the instant it stops being readable.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Instant at which the entry expires
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    ///
    /// A TTL too large for the clock is capped at roughly a century.
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_not_expired_before_ttl() {
        let entry = CacheEntry::new("value".to_string(), Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(59)).await;

        assert!(!entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_at_boundary() {
        let entry = CacheEntry::new("value".to_string(), Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(60)).await;

        assert!(entry.is_expired(), "Entry should be expired at boundary");
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_is_immediately_expired() {
        let entry = CacheEntry::new("value".to_string(), Duration::ZERO);
        assert!(entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_ttl_is_capped() {
        let entry = CacheEntry::new("value".to_string(), Duration::from_secs(u64::MAX));

        tokio::time::advance(Duration::from_secs(365 * 24 * 60 * 60)).await;

        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() > Duration::from_secs(90 * 365 * 24 * 60 * 60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_duration_ttl_does_not_panic() {
        let entry = CacheEntry::new("value".to_string(), Duration::MAX);
        assert!(!entry.is_expired());
    }
}
