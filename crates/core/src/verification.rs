//! Phone verification code store
//!
//! Holds one pending code per phone number. The store never reads the
//! clock: every time-dependent call takes `now`, and expired entries stay
//! until the owner calls [`VerificationStore::sweep_expired`] (or a
//! verification attempt finds them expired).
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use foodsave_core::verification::{VerificationStore, VerifyOutcome};
//!
//! let store = VerificationStore::default();
//! let now = Utc::now();
//!
//! store.save("+998901234567", "4821", now).unwrap();
//! assert_eq!(
//!     store.verify("+998901234567", "4821", now),
//!     VerifyOutcome::Verified
//! );
//! ```

use crate::config::VerificationConfig;
use crate::error::{Error, ErrorCode, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use subtle::ConstantTimeEq;

/// Default code lifetime in seconds
pub const DEFAULT_TTL_SECS: i64 = 10 * 60;

/// Default number of failed attempts before a code is locked
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// A pending verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    pub code: String,
    /// Failed attempts so far
    pub attempts: u32,
    pub expires_at: DateTime<Utc>,
}

impl VerificationEntry {
    /// Expired strictly after `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Result of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Code matched; the entry has been consumed
    Verified,
    /// Code did not match
    Mismatch { remaining: u32 },
    /// Code outlived its TTL; the entry has been removed
    Expired,
    /// No code was sent to this phone
    NotFound,
    /// Attempt limit reached; the code can no longer be verified
    TooManyAttempts,
}

/// In-memory store of pending codes keyed by phone number
#[derive(Debug)]
pub struct VerificationStore {
    entries: RwLock<HashMap<String, VerificationEntry>>,
    ttl: Duration,
    max_attempts: u32,
}

impl Default for VerificationStore {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS), DEFAULT_MAX_ATTEMPTS)
    }
}

impl VerificationStore {
    /// Create a store with the given code lifetime and attempt limit
    #[must_use]
    pub fn new(ttl: Duration, max_attempts: u32) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_attempts,
        }
    }

    /// Create a store from the `[verification]` configuration section
    pub fn from_config(config: &VerificationConfig) -> Result<Self> {
        let ttl = i64::try_from(config.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                Error::new(
                    ErrorCode::InvalidConfigValue,
                    format!("verification.ttl_secs out of range: {}", config.ttl_secs),
                )
            })?;
        Ok(Self::new(ttl, config.max_attempts))
    }

    /// Store a fresh code for `phone`, replacing any pending one.
    ///
    /// Returns the expiry instant.
    pub fn save(&self, phone: &str, code: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        if phone.trim().is_empty() {
            return Err(Error::new(ErrorCode::InvalidInput, "phone number is empty"));
        }
        if code.is_empty() {
            return Err(Error::new(ErrorCode::InvalidInput, "verification code is empty"));
        }

        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            Error::new(ErrorCode::VerificationError, "verification code expiry out of range")
        })?;
        let entry = VerificationEntry {
            code: code.to_string(),
            attempts: 0,
            expires_at,
        };
        self.write().insert(phone.to_string(), entry);

        tracing::debug!(%expires_at, "verification code saved");
        Ok(expires_at)
    }

    /// Pending entry for `phone`, expired or not
    pub fn get(&self, phone: &str) -> Option<VerificationEntry> {
        self.read().get(phone).cloned()
    }

    /// Drop the pending entry for `phone`, returning whether one existed
    pub fn remove(&self, phone: &str) -> bool {
        self.write().remove(phone).is_some()
    }

    /// Count a failed attempt, returning the new count
    pub fn increment_attempts(&self, phone: &str) -> Option<u32> {
        self.write().get_mut(phone).map(|entry| {
            entry.attempts += 1;
            entry.attempts
        })
    }

    /// Check a submitted code.
    ///
    /// Order of checks: missing entry, expiry, attempt limit, code. A locked
    /// entry stays locked until it expires or a new code is saved.
    pub fn verify(&self, phone: &str, code: &str, now: DateTime<Utc>) -> VerifyOutcome {
        let mut entries = self.write();

        let Some(entry) = entries.get_mut(phone) else {
            return VerifyOutcome::NotFound;
        };

        if entry.is_expired(now) {
            entries.remove(phone);
            return VerifyOutcome::Expired;
        }

        if entry.attempts >= self.max_attempts {
            return VerifyOutcome::TooManyAttempts;
        }

        if codes_match(&entry.code, code) {
            entries.remove(phone);
            tracing::debug!("verification code accepted");
            return VerifyOutcome::Verified;
        }

        entry.attempts += 1;
        let remaining = self.max_attempts.saturating_sub(entry.attempts);
        tracing::debug!(attempts = entry.attempts, remaining, "verification code rejected");
        VerifyOutcome::Mismatch { remaining }
    }

    /// Remove every entry expired at `now`, returning how many were removed
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "expired verification codes swept");
        }
        removed
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no codes are pending
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned map is still structurally valid, so recover it.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, VerificationEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, VerificationEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn codes_match(expected: &str, submitted: &str) -> bool {
    let (a, b) = (expected.as_bytes(), submitted.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PHONE: &str = "+998901234567";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_save_and_get() {
        let store = VerificationStore::default();
        let expires_at = store.save(PHONE, "1234", t0()).unwrap();

        assert_eq!(expires_at, t0() + Duration::minutes(10));
        let entry = store.get(PHONE).unwrap();
        assert_eq!(entry.code, "1234");
        assert_eq!(entry.attempts, 0);
    }

    #[test]
    fn test_save_rejects_empty_input() {
        let store = VerificationStore::default();
        assert!(store.save("  ", "1234", t0()).is_err());
        assert!(store.save(PHONE, "", t0()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_replaces_pending_code() {
        let store = VerificationStore::default();
        store.save(PHONE, "1111", t0()).unwrap();
        store.increment_attempts(PHONE);
        store.save(PHONE, "2222", t0()).unwrap();

        let entry = store.get(PHONE).unwrap();
        assert_eq!(entry.code, "2222");
        assert_eq!(entry.attempts, 0);
    }

    #[test]
    fn test_verify_consumes_entry() {
        let store = VerificationStore::default();
        store.save(PHONE, "1234", t0()).unwrap();

        assert_eq!(store.verify(PHONE, "1234", t0()), VerifyOutcome::Verified);
        assert!(store.get(PHONE).is_none());
        assert_eq!(store.verify(PHONE, "1234", t0()), VerifyOutcome::NotFound);
    }

    #[test]
    fn test_verify_mismatch_counts_down() {
        let store = VerificationStore::new(Duration::minutes(10), 3);
        store.save(PHONE, "1234", t0()).unwrap();

        assert_eq!(store.verify(PHONE, "0000", t0()), VerifyOutcome::Mismatch { remaining: 2 });
        assert_eq!(store.verify(PHONE, "123", t0()), VerifyOutcome::Mismatch { remaining: 1 });
        assert_eq!(store.verify(PHONE, "12345", t0()), VerifyOutcome::Mismatch { remaining: 0 });
        assert_eq!(store.verify(PHONE, "1234", t0()), VerifyOutcome::TooManyAttempts);
        assert!(store.get(PHONE).is_some());
    }

    #[test]
    fn test_verify_expired() {
        let store = VerificationStore::default();
        store.save(PHONE, "1234", t0()).unwrap();

        let at_expiry = t0() + Duration::minutes(10);
        assert_eq!(store.verify(PHONE, "0000", at_expiry), VerifyOutcome::Mismatch { remaining: 4 });

        let later = at_expiry + Duration::seconds(1);
        assert_eq!(store.verify(PHONE, "1234", later), VerifyOutcome::Expired);
        assert!(store.get(PHONE).is_none());
    }

    #[test]
    fn test_increment_attempts() {
        let store = VerificationStore::default();
        assert_eq!(store.increment_attempts(PHONE), None);

        store.save(PHONE, "1234", t0()).unwrap();
        assert_eq!(store.increment_attempts(PHONE), Some(1));
        assert_eq!(store.increment_attempts(PHONE), Some(2));
    }

    #[test]
    fn test_remove() {
        let store = VerificationStore::default();
        store.save(PHONE, "1234", t0()).unwrap();
        assert!(store.remove(PHONE));
        assert!(!store.remove(PHONE));
    }

    #[test]
    fn test_sweep_expired() {
        let store = VerificationStore::default();
        store.save("+1", "1111", t0()).unwrap();
        store.save("+2", "2222", t0() + Duration::minutes(5)).unwrap();

        assert_eq!(store.sweep_expired(t0() + Duration::minutes(10)), 0);
        assert_eq!(store.sweep_expired(t0() + Duration::minutes(11)), 1);
        assert!(store.get("+1").is_none());
        assert!(store.get("+2").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = VerificationConfig {
            ttl_secs: 60,
            max_attempts: 1,
        };
        let store = VerificationStore::from_config(&config).unwrap();
        store.save(PHONE, "1234", t0()).unwrap();

        assert_eq!(store.get(PHONE).unwrap().expires_at, t0() + Duration::seconds(60));
        assert_eq!(store.verify(PHONE, "0000", t0()), VerifyOutcome::Mismatch { remaining: 0 });
        assert_eq!(store.verify(PHONE, "1234", t0()), VerifyOutcome::TooManyAttempts);
    }

    #[test]
    fn test_from_config_rejects_huge_ttl() {
        let config = VerificationConfig {
            ttl_secs: u64::MAX,
            max_attempts: 5,
        };
        let err = VerificationStore::from_config(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_codes_match_constant_time() {
        assert!(codes_match("1234", "1234"));
        assert!(!codes_match("1234", "1235"));
        assert!(!codes_match("1234", "12345"));
    }
}
