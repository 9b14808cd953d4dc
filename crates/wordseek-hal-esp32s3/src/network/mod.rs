//! Network state the word client needs: is there a usable link, and is the
//! word service answering.

pub mod word_api;

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Wi-Fi station credentials.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

impl WifiConfig {
    pub const fn new(ssid: &'static str, password: &'static str) -> Self {
        Self { ssid, password }
    }
}

/// Shared between the Wi-Fi task (writer of `online`) and the word client.
///
/// `online` means associated with a DHCP lease; requests are refused
/// outright while it is false.
#[derive(Debug)]
pub struct NetworkStatus {
    online: AtomicBool,
    service_failures: AtomicU8,
}

impl NetworkStatus {
    pub const fn new() -> Self {
        Self {
            online: AtomicBool::new(false),
            service_failures: AtomicU8::new(0),
        }
    }

    /// Returns true when the value changed.
    pub fn set_online(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::AcqRel) != online
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Records a request outcome and returns the consecutive failure count.
    pub fn record_service(&self, ok: bool) -> u8 {
        if ok {
            self.service_failures.store(0, Ordering::Release);
            return 0;
        }

        let previous = self
            .service_failures
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                Some(count.saturating_add(1))
            })
            .unwrap_or(u8::MAX);
        previous.saturating_add(1)
    }

    pub fn service_failures(&self) -> u8 {
        self.service_failures.load(Ordering::Acquire)
    }
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Doubling reconnect delay, capped, reset after a successful join.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Backoff {
    min_secs: u64,
    max_secs: u64,
    attempts: u32,
}

impl Backoff {
    pub const fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs,
            max_secs,
            attempts: 0,
        }
    }

    /// Delay before the next attempt; each call counts as a failed attempt.
    pub fn next_delay_secs(&mut self) -> u64 {
        let factor = 1u64.checked_shl(self.attempts).unwrap_or(u64::MAX);
        self.attempts = self.attempts.saturating_add(1);
        self.min_secs.saturating_mul(factor).min(self.max_secs)
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub const fn attempts(&self) -> u32 {
        self.attempts
    }
}
