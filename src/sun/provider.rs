//! Solar position provider with coordinate validation, an override mode
//! and a bounded memoization cache.
//!
//! Repeated runs over the same time range, or several callers sharing a
//! provider, request the same `(location, time)` pairs; the cache
//! amortizes the ephemeris cost across them.

use crate::error::Result;
use crate::location::validate_coordinates;
use crate::sun::ephemeris::{Ephemeris, SolarEphemeris};
use crate::sun::{SolarPosition, SunOverride};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::{debug, trace};

/// Default bound on the number of cached positions.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Cache observability counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
}

/// Key: latitude/longitude bit patterns plus the instant normalized to UTC,
/// so the same moment expressed in different zones shares an entry.
type CacheKey = (u64, u64, String);

fn cache_key(latitude: f64, longitude: f64, time: &DateTime<Tz>) -> CacheKey {
    (
        latitude.to_bits(),
        longitude.to_bits(),
        time.with_timezone(&Utc).to_rfc3339(),
    )
}

/// Bounded LRU map from (location, time) to solar angles.
struct PositionCache {
    capacity: usize,
    map: HashMap<CacheKey, (f64, f64)>,
    order: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl PositionCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    fn get(&mut self, key: &CacheKey) -> Option<(f64, f64)> {
        match self.map.get(key).copied() {
            Some(angles) => {
                self.hits += 1;
                self.touch(key);
                Some(angles)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn insert(&mut self, key: CacheKey, angles: (f64, f64)) {
        while self.map.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                trace!(?oldest, "evicting least-recently-used solar position");
                self.map.remove(&oldest);
            } else {
                break;
            }
        }
        self.map.insert(key.clone(), angles);
        self.order.push_back(key);
    }

    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.map.len(),
            capacity: self.capacity,
        }
    }
}

/// Computes solar positions, caching ephemeris results.
///
/// The cache lives behind a mutex so a caller fanning a time range across
/// threads can share one provider by reference.
pub struct SunPositionProvider {
    ephemeris: Box<dyn Ephemeris>,
    cache: Mutex<PositionCache>,
}

impl Default for SunPositionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SunPositionProvider {
    /// Provider backed by the built-in [`SolarEphemeris`].
    pub fn new() -> Self {
        Self::with_ephemeris(Box::new(SolarEphemeris::new()), DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_ephemeris(Box::new(SolarEphemeris::new()), capacity)
    }

    /// Provider delegating to a caller-supplied ephemeris.
    pub fn with_ephemeris(ephemeris: Box<dyn Ephemeris>, capacity: usize) -> Self {
        Self {
            ephemeris,
            cache: Mutex::new(PositionCache::new(capacity)),
        }
    }

    /// Returns the solar position for a location and time.
    ///
    /// Coordinates are validated first in every mode. An active override
    /// then bypasses the ephemeris and the cache, pairing its fixed
    /// angles with the requested time.
    pub fn position(
        &self,
        latitude: f64,
        longitude: f64,
        time: &DateTime<Tz>,
        sun_override: Option<&SunOverride>,
    ) -> Result<SolarPosition> {
        validate_coordinates(latitude, longitude)?;

        if let Some(o) = sun_override {
            if o.override_position {
                let (azimuth, elevation) = o.fixed_angles()?;
                debug!(azimuth, elevation, "using fixed sun position override");
                return Ok(SolarPosition {
                    azimuth,
                    elevation,
                    time: time.clone(),
                });
            }
        }

        let key = cache_key(latitude, longitude, time);
        let mut cache = self.cache.lock().expect("solar position cache poisoned");
        if let Some((azimuth, elevation)) = cache.get(&key) {
            trace!(latitude, longitude, "solar position cache hit");
            return Ok(SolarPosition {
                azimuth,
                elevation,
                time: time.clone(),
            });
        }
        drop(cache);

        let (azimuth, elevation) = self.ephemeris.position(latitude, longitude, time);
        debug!(
            latitude,
            longitude,
            azimuth,
            elevation,
            time = %time,
            "computed solar position"
        );

        let mut cache = self.cache.lock().expect("solar position cache poisoned");
        cache.insert(key, (azimuth, elevation));
        Ok(SolarPosition {
            azimuth,
            elevation,
            time: time.clone(),
        })
    }

    /// Drops all cached positions and resets the counters.
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .expect("solar position cache poisoned")
            .clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .lock()
            .expect("solar position cache poisoned")
            .stats()
    }

    /// Whether the sun is above the horizon at the given location and time.
    pub fn is_daytime(
        &self,
        latitude: f64,
        longitude: f64,
        time: &DateTime<Tz>,
    ) -> Result<bool> {
        Ok(self
            .position(latitude, longitude, time, None)?
            .is_above_horizon())
    }
}
