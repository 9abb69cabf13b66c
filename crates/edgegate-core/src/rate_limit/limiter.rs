//! Fixed Window Rate Limiter
//!
//! In-memory fixed-window counters keyed by (client IP, limit class).
//! A counter is replaced wholesale once its window has elapsed; within a
//! window the read-check-increment runs as one critical section, so
//! concurrent bursts cannot exceed the configured ceiling. Counters are
//! process-local and reset on restart by design.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use super::policy::{RateLimitClass, RateLimitPolicy, resolve_policy};
use crate::prelude::*;

/// Outcome of a check-and-consume call
#[derive(Debug, Clone, Copy)]
pub struct RateLimitVerdict {
	pub allowed: bool,
	pub class: RateLimitClass,
	pub limit: u32,
	pub remaining: u32,
	/// Time until the current window resets
	pub retry_after: Duration,
}

/// Injectable limiter boundary. The in-memory tier below is the
/// single-instance default; multi-instance deployments can back this with
/// a shared store.
pub trait RateLimiterApi: Send + Sync {
	/// Resolve the policy for `path`, then atomically check and consume
	/// one request for `(ip, class)`.
	fn check_and_consume(&self, ip: &str, path: &str) -> EgResult<RateLimitVerdict>;
}

struct WindowCounter {
	count: u32,
	window_reset_at: Instant,
}

type Key = (Box<str>, RateLimitClass);

pub struct FixedWindowLimiter {
	counters: Mutex<LruCache<Key, WindowCounter>>,
}

impl FixedWindowLimiter {
	/// `capacity` bounds tracked keys; the LRU evicts cold counters, which
	/// at worst resets limits for the evicted key.
	pub fn new(capacity: usize) -> Self {
		let cap = NonZeroUsize::new(capacity)
			.or(NonZeroUsize::new(100_000))
			.unwrap_or(NonZeroUsize::MIN);
		Self { counters: Mutex::new(LruCache::new(cap)) }
	}

	/// Core window accounting for one key under one lock acquisition.
	fn consume(&self, ip: &str, class: RateLimitClass, policy: RateLimitPolicy) -> RateLimitVerdict {
		let now = Instant::now();
		let key: Key = (ip.into(), class);
		let mut counters = self.counters.lock();

		match counters.get_mut(&key) {
			Some(counter) if now < counter.window_reset_at => {
				if counter.count >= policy.max_requests {
					return RateLimitVerdict {
						allowed: false,
						class,
						limit: policy.max_requests,
						remaining: 0,
						retry_after: counter.window_reset_at - now,
					};
				}
				counter.count += 1;
				RateLimitVerdict {
					allowed: true,
					class,
					limit: policy.max_requests,
					remaining: policy.max_requests - counter.count,
					retry_after: counter.window_reset_at - now,
				}
			}
			_ => {
				// Absent or elapsed: start a fresh window at count=1
				counters.put(
					key,
					WindowCounter { count: 1, window_reset_at: now + policy.window },
				);
				RateLimitVerdict {
					allowed: true,
					class,
					limit: policy.max_requests,
					remaining: policy.max_requests - 1,
					retry_after: policy.window,
				}
			}
		}
	}
}

impl Default for FixedWindowLimiter {
	fn default() -> Self {
		Self::new(100_000)
	}
}

impl RateLimiterApi for FixedWindowLimiter {
	fn check_and_consume(&self, ip: &str, path: &str) -> EgResult<RateLimitVerdict> {
		let (class, matched) = resolve_policy(path);
		if !matched {
			warn!("No rate limit policy for {}, using default class {}", path, class.as_str());
		}
		Ok(self.consume(ip, class, class.policy()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicU32, Ordering};

	const IP: &str = "198.51.100.7";

	fn tiny_policy(max: u32, window_ms: u64) -> RateLimitPolicy {
		RateLimitPolicy { max_requests: max, window: Duration::from_millis(window_ms) }
	}

	#[test]
	fn test_exactly_n_allowed_then_denied() {
		let limiter = FixedWindowLimiter::new(16);
		let policy = tiny_policy(3, 60_000);

		for i in 0..3 {
			let verdict = limiter.consume(IP, RateLimitClass::PasswordReset, policy);
			assert!(verdict.allowed, "request {} should be allowed", i + 1);
			assert_eq!(verdict.remaining, 2 - i);
		}
		let verdict = limiter.consume(IP, RateLimitClass::PasswordReset, policy);
		assert!(!verdict.allowed);
		assert_eq!(verdict.remaining, 0);
		assert!(verdict.retry_after <= policy.window);
	}

	#[test]
	fn test_window_elapse_resets_counter() {
		let limiter = FixedWindowLimiter::new(16);
		let policy = tiny_policy(2, 30);

		assert!(limiter.consume(IP, RateLimitClass::Login, policy).allowed);
		assert!(limiter.consume(IP, RateLimitClass::Login, policy).allowed);
		assert!(!limiter.consume(IP, RateLimitClass::Login, policy).allowed);

		std::thread::sleep(Duration::from_millis(50));

		let verdict = limiter.consume(IP, RateLimitClass::Login, policy);
		assert!(verdict.allowed);
		// Fresh window restarts at count=1
		assert_eq!(verdict.remaining, policy.max_requests - 1);
	}

	#[test]
	fn test_keys_are_independent() {
		let limiter = FixedWindowLimiter::new(16);
		let policy = tiny_policy(1, 60_000);

		assert!(limiter.consume("10.0.0.1", RateLimitClass::Login, policy).allowed);
		assert!(!limiter.consume("10.0.0.1", RateLimitClass::Login, policy).allowed);
		// Different IP, same class
		assert!(limiter.consume("10.0.0.2", RateLimitClass::Login, policy).allowed);
		// Same IP, different class
		assert!(limiter.consume("10.0.0.1", RateLimitClass::Registration, policy).allowed);
	}

	#[test]
	fn test_concurrent_bursts_never_exceed_ceiling() {
		let limiter = Arc::new(FixedWindowLimiter::new(16));
		let policy = tiny_policy(10, 60_000);
		let allowed = Arc::new(AtomicU32::new(0));

		let handles: Vec<_> = (0..4)
			.map(|_| {
				let limiter = Arc::clone(&limiter);
				let allowed = Arc::clone(&allowed);
				std::thread::spawn(move || {
					for _ in 0..10 {
						if limiter.consume(IP, RateLimitClass::Login, policy).allowed {
							allowed.fetch_add(1, Ordering::Relaxed);
						}
					}
				})
			})
			.collect();
		for handle in handles {
			let _ = handle.join();
		}

		// 40 attempts for one key, ceiling 10
		assert_eq!(allowed.load(Ordering::Relaxed), 10);
	}

	#[test]
	fn test_path_resolution_via_api() {
		let limiter = FixedWindowLimiter::new(16);

		let verdict = limiter.check_and_consume(IP, "/forgot-password");
		let verdict = verdict.unwrap();
		assert!(verdict.allowed);
		assert_eq!(verdict.class, RateLimitClass::PasswordReset);
		assert_eq!(verdict.limit, 3);

		// Unmatched auth-sensitive path uses the first table entry
		let verdict = limiter.check_and_consume(IP, "/two-factor");
		let verdict = verdict.unwrap();
		assert_eq!(verdict.class, RateLimitClass::Login);
	}
}

// vim: ts=4
