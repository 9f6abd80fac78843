//! Configuration Module
//!
//! Immutable cache configuration built through a validating builder, plus
//! the settings of the administrative host process loaded from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default maximum number of entries per cache
pub const DEFAULT_MAX_SIZE: usize = 1000;
/// Default TTL value, interpreted in [`DEFAULT_TTL_UNIT`]
pub const DEFAULT_TTL_VALUE: u64 = 5;
/// Default TTL unit
pub const DEFAULT_TTL_UNIT: TimeUnit = TimeUnit::Minutes;
/// Default interval between scheduled sweeps, in minutes
pub const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 1;

// == Time Unit ==
/// Unit a TTL value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Milliseconds in one unit.
    pub const fn millis_per_unit(self) -> u64 {
        match self {
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
        }
    }

    /// Converts `value` of this unit into milliseconds, or `None` on overflow.
    pub fn to_millis(self, value: u64) -> Option<u64> {
        value.checked_mul(self.millis_per_unit())
    }

    /// Converts `value` of this unit into a [`Duration`], or `None` on overflow.
    pub fn to_duration(self, value: u64) -> Option<Duration> {
        self.to_millis(value).map(Duration::from_millis)
    }
}

// == Cache Config ==
/// Immutable configuration of a single cache instance.
///
/// Only obtainable through [`CacheConfig::builder`] (or `Default`), so every
/// value held here has already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    max_size: usize,
    ttl_value: u64,
    ttl_unit: TimeUnit,
    statistics_enabled: bool,
    cleanup_enabled: bool,
    cleanup_interval_minutes: u64,
}

impl CacheConfig {
    /// Returns a builder seeded with the defaults: 1000 entries, 5 minute TTL,
    /// statistics on, cleanup on every minute.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::new()
    }

    /// Loads a config from `CACHE_*` environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum entries (default: 1000)
    /// - `CACHE_TTL_SECONDS` - Default TTL in seconds, 0 disables expiry (default: 300)
    /// - `CACHE_STATISTICS` - `true`/`false` (default: true)
    /// - `CACHE_CLEANUP` - `true`/`false` (default: true)
    /// - `CACHE_CLEANUP_INTERVAL_MINUTES` - Sweep interval (default: 1)
    ///
    /// Unset variables keep their default; set but unparsable or invalid
    /// values are reported as [`CacheError::InvalidArgument`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(max_size) = parse_var::<usize, _>(&lookup, "CACHE_MAX_SIZE")? {
            builder = builder.max_size(max_size)?;
        }
        if let Some(ttl) = parse_var::<u64, _>(&lookup, "CACHE_TTL_SECONDS")? {
            builder = builder.expiration_seconds(ttl)?;
        }
        if let Some(enabled) = parse_var::<bool, _>(&lookup, "CACHE_STATISTICS")? {
            builder = builder.enable_statistics(enabled);
        }
        if let Some(enabled) = parse_var::<bool, _>(&lookup, "CACHE_CLEANUP")? {
            builder = builder.enable_cleanup(enabled);
        }
        if let Some(minutes) = parse_var::<u64, _>(&lookup, "CACHE_CLEANUP_INTERVAL_MINUTES")? {
            builder = builder.cleanup_interval(minutes)?;
        }

        Ok(builder.build())
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl_value(&self) -> u64 {
        self.ttl_value
    }

    pub fn ttl_unit(&self) -> TimeUnit {
        self.ttl_unit
    }

    /// The configured TTL in milliseconds; 0 means entries never expire.
    pub fn expiration_millis(&self) -> u64 {
        // Checked when the builder accepted the pair.
        self.ttl_unit.to_millis(self.ttl_value).unwrap_or(u64::MAX)
    }

    /// The default TTL as a [`Duration`], `None` when expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        match self.expiration_millis() {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn statistics_enabled(&self) -> bool {
        self.statistics_enabled
    }

    pub fn cleanup_enabled(&self) -> bool {
        self.cleanup_enabled
    }

    pub fn cleanup_interval_minutes(&self) -> u64 {
        self.cleanup_interval_minutes
    }

    /// Interval between scheduled sweeps.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_minutes.saturating_mul(60))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfigBuilder::new().build()
    }
}

// == Cache Config Builder ==
/// Fluent builder for [`CacheConfig`].
///
/// Every setter validates its argument immediately; a rejected value is an
/// error at that call, never clamped and never deferred to [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct CacheConfigBuilder {
    max_size: usize,
    ttl_value: u64,
    ttl_unit: TimeUnit,
    statistics_enabled: bool,
    cleanup_enabled: bool,
    cleanup_interval_minutes: u64,
}

impl CacheConfigBuilder {
    fn new() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            ttl_value: DEFAULT_TTL_VALUE,
            ttl_unit: DEFAULT_TTL_UNIT,
            statistics_enabled: true,
            cleanup_enabled: true,
            cleanup_interval_minutes: DEFAULT_CLEANUP_INTERVAL_MINUTES,
        }
    }

    /// Sets the maximum number of entries. Must be positive.
    pub fn max_size(mut self, max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::invalid("max size must be greater than 0"));
        }
        self.max_size = max_size;
        Ok(self)
    }

    /// Sets the default TTL. A value of 0 disables expiry.
    pub fn expiration(mut self, value: u64, unit: TimeUnit) -> Result<Self> {
        if unit.to_millis(value).is_none() {
            return Err(CacheError::invalid(format!(
                "expiration of {} {:?} overflows a millisecond count",
                value, unit
            )));
        }
        self.ttl_value = value;
        self.ttl_unit = unit;
        Ok(self)
    }

    pub fn expiration_millis(self, millis: u64) -> Result<Self> {
        self.expiration(millis, TimeUnit::Milliseconds)
    }

    pub fn expiration_seconds(self, seconds: u64) -> Result<Self> {
        self.expiration(seconds, TimeUnit::Seconds)
    }

    pub fn expiration_minutes(self, minutes: u64) -> Result<Self> {
        self.expiration(minutes, TimeUnit::Minutes)
    }

    pub fn expiration_hours(self, hours: u64) -> Result<Self> {
        self.expiration(hours, TimeUnit::Hours)
    }

    pub fn enable_statistics(mut self, enabled: bool) -> Self {
        self.statistics_enabled = enabled;
        self
    }

    pub fn enable_cleanup(mut self, enabled: bool) -> Self {
        self.cleanup_enabled = enabled;
        self
    }

    /// Sets the sweep interval in minutes. Must be positive.
    pub fn cleanup_interval(mut self, minutes: u64) -> Result<Self> {
        if minutes == 0 {
            return Err(CacheError::invalid(
                "cleanup interval must be greater than 0 minutes",
            ));
        }
        self.cleanup_interval_minutes = minutes;
        Ok(self)
    }

    /// Freezes the builder into an immutable [`CacheConfig`].
    pub fn build(self) -> CacheConfig {
        CacheConfig {
            max_size: self.max_size,
            ttl_value: self.ttl_value,
            ttl_unit: self.ttl_unit,
            statistics_enabled: self.statistics_enabled,
            cleanup_enabled: self.cleanup_enabled,
            cleanup_interval_minutes: self.cleanup_interval_minutes,
        }
    }
}

// == Admin Config ==
/// Settings of the administrative host binary.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Names of the caches registered at startup
    pub cache_names: Vec<String>,
    /// Configuration shared by the startup caches
    pub cache: CacheConfig,
}

impl AdminConfig {
    /// Loads the host configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_NAMES` - Comma separated cache names (default: `default`)
    /// - plus every variable read by [`CacheConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = parse_var::<u16, _>(&lookup, "SERVER_PORT")?.unwrap_or(3000);

        let cache_names: Vec<String> = lookup("CACHE_NAMES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let cache_names = if cache_names.is_empty() {
            vec!["default".to_string()]
        } else {
            cache_names
        };

        Ok(Self {
            server_port,
            cache_names,
            cache: CacheConfig::from_lookup(&lookup)?,
        })
    }
}

// == Utility Functions ==
fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| {
                CacheError::invalid(format!("{} has an unparsable value '{}'", name, raw))
            }),
    }
}
