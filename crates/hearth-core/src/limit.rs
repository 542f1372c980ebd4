//! Fixed-window request rate limiting.
//!
//! Caps the number of accepted requests per client identifier within a
//! fixed window. The window resets entirely once it has elapsed, so a
//! client can burst up to twice the limit across a window boundary; this
//! approximation is the intended contract, not an oversight.
//!
//! State is held in process memory for the process lifetime. Each process
//! instance keeps its own map, so the effective limit multiplies with the
//! number of instances. [`RateLimiter::check`] is the seam where a shared
//! counter store would slot in if that ever matters.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-client request counter for the current window.
#[derive(Debug, Clone)]
struct ClientRecord {
    count: u32,
    window_start: Instant,
}

/// In-memory fixed-window rate limiter keyed by client identifier.
///
/// The limiter is agnostic to how keys are derived; distinct users behind
/// one proxy may share a key and therefore a counter. Construct one at
/// process start and thread it through request handling.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use hearth_core::RateLimiter;
///
/// let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
/// assert!(limiter.check("1.2.3.4"));
/// assert!(limiter.check("1.2.3.4"));
/// assert!(!limiter.check("1.2.3.4"));
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: HashMap<String, ClientRecord>,
}

impl RateLimiter {
    /// Creates a limiter allowing `limit` requests per `window` per key.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: HashMap::new(),
        }
    }

    /// Decides whether a request from `key` may proceed.
    ///
    /// The counter increments whenever the request is allowed, regardless
    /// of whether the guarded operation later succeeds. A denied request
    /// does not mutate the record.
    pub fn check(&mut self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&mut self, key: &str, now: Instant) -> bool {
        if let Some(record) = self.clients.get_mut(key) {
            if now.duration_since(record.window_start) <= self.window {
                if record.count >= self.limit {
                    return false;
                }
                record.count += 1;
                return true;
            }
        }

        // First request from this key, or the window has elapsed.
        self.clients.insert(
            key.to_string(),
            ClientRecord {
                count: 1,
                window_start: now,
            },
        );
        true
    }

    /// Drops records whose window has elapsed.
    ///
    /// Records are otherwise never removed, so a long-running process
    /// should call this periodically to keep the map bounded.
    pub fn purge_expired(&mut self) {
        self.purge_expired_at(Instant::now());
    }

    fn purge_expired_at(&mut self, now: Instant) {
        let window = self.window;
        self.clients
            .retain(|_, record| now.duration_since(record.window_start) <= window);
    }

    /// Number of client keys currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn allows_up_to_limit_then_denies() {
        let mut limiter = RateLimiter::new(5, WINDOW);
        let now = Instant::now();

        let results: Vec<bool> = (0..6).map(|_| limiter.check_at("1.2.3.4", now)).collect();
        assert_eq!(results, [true, true, true, true, true, false]);
    }

    #[test]
    fn denied_request_does_not_mutate_record() {
        let mut limiter = RateLimiter::new(2, WINDOW);
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(limiter.check_at("a", start));

        // Repeated denials within the window never open the gate, and the
        // window start stays pinned to the first request.
        for i in 1..10 {
            let now = start + Duration::from_secs(i);
            assert!(!limiter.check_at("a", now));
        }
    }

    #[test]
    fn window_reset_starts_a_fresh_count() {
        let mut limiter = RateLimiter::new(5, WINDOW);
        let start = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("1.2.3.4", start));
        }
        assert!(!limiter.check_at("1.2.3.4", start));

        let later = start + WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at("1.2.3.4", later));
        // Count restarted from 1, so four more fit in the new window.
        for _ in 0..4 {
            assert!(limiter.check_at("1.2.3.4", later));
        }
        assert!(!limiter.check_at("1.2.3.4", later));
    }

    #[test]
    fn window_boundary_is_exclusive() {
        // Reset requires strictly more than the window to have elapsed.
        let mut limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();
        assert!(limiter.check_at("k", start));
        assert!(!limiter.check_at("k", start + WINDOW));
        assert!(limiter.check_at("k", start + WINDOW + Duration::from_millis(1)));
    }

    #[test]
    fn keys_have_independent_counters() {
        let mut limiter = RateLimiter::new(5, WINDOW);
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("A", now));
        }
        assert!(!limiter.check_at("A", now));
        assert!(limiter.check_at("B", now));
    }

    #[test]
    fn colliding_keys_share_a_counter() {
        let mut limiter = RateLimiter::new(2, WINDOW);
        let now = Instant::now();

        // Two "users" behind the same proxy IP.
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(!limiter.check_at("10.0.0.1", now));
    }

    #[test]
    fn purge_drops_only_expired_records() {
        let mut limiter = RateLimiter::new(5, WINDOW);
        let start = Instant::now();

        limiter.check_at("old", start);
        limiter.check_at("fresh", start + Duration::from_secs(59));
        assert_eq!(limiter.tracked_clients(), 2);

        limiter.purge_expired_at(start + WINDOW + Duration::from_secs(1));
        assert_eq!(limiter.tracked_clients(), 1);

        // The surviving record still enforces its count.
        for _ in 0..4 {
            assert!(limiter.check_at("fresh", start + Duration::from_secs(59)));
        }
        assert!(!limiter.check_at("fresh", start + Duration::from_secs(59)));
    }

    #[test]
    fn purge_on_empty_map_is_a_no_op() {
        let mut limiter = RateLimiter::new(5, WINDOW);
        limiter.purge_expired();
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn zero_limit_denies_after_first_window_insert() {
        // Degenerate configuration: the first request still creates the
        // record (count = 1) and is allowed; everything after is denied.
        let mut limiter = RateLimiter::new(0, WINDOW);
        let now = Instant::now();
        assert!(limiter.check_at("k", now));
        assert!(!limiter.check_at("k", now));
    }
}
