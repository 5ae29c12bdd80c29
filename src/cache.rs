//! In-memory caching using moka
//!
//! Provides application-level caching for the tour catalog and coupon
//! lookups. Tours change rarely, so the catalog tolerates short TTLs;
//! coupons are kept briefly so a burst of quote requests while a customer
//! types does not hammer the store.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::db;
use crate::error::Result;
use crate::models::{Coupon, Tour};

const TOUR_LIST_KEY: &str = "tours:active";

/// Application cache holding the tour catalog and coupon lookups
#[derive(Clone)]
pub struct AppCache {
    /// Tours by id
    pub tours: Cache<uuid::Uuid, Arc<Tour>>,
    /// Active tour listing (singleton key)
    pub tour_list: Cache<String, Arc<Vec<Tour>>>,
    /// Coupons by lowercased ref
    pub coupons: Cache<String, Arc<Coupon>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Tours: 500 entries, 10 min TTL, 5 min idle
            tours: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            // Tour listing: 1 entry, 5 min TTL
            tour_list: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Coupons: 200 entries, 5 min TTL (usage counters live in the
            // store; only the discount percent is read from here)
            coupons: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Cache key for a coupon ref
    pub fn coupon_key(code: &str) -> String {
        code.trim().to_lowercase()
    }

    /// Get a tour by id, via cache then database
    pub async fn tour(&self, pool: &PgPool, id: uuid::Uuid) -> Result<Arc<Tour>> {
        if let Some(cached) = self.tours.get(&id).await {
            tracing::debug!("Cache HIT for tour: {}", id);
            return Ok(cached);
        }
        tracing::debug!("Cache MISS for tour: {}", id);
        let tour = Arc::new(db::get_tour(pool, id).await?);
        self.tours.insert(id, tour.clone()).await;
        Ok(tour)
    }

    /// Get the active tour listing, via cache then database
    pub async fn active_tours(&self, pool: &PgPool) -> Result<Arc<Vec<Tour>>> {
        if let Some(cached) = self.tour_list.get(TOUR_LIST_KEY).await {
            return Ok(cached);
        }
        let tours = Arc::new(db::list_active_tours(pool).await?);
        self.tour_list
            .insert(TOUR_LIST_KEY.to_string(), tours.clone())
            .await;
        Ok(tours)
    }

    /// Resolve a coupon code, via cache then database.
    ///
    /// Lookup failures degrade to `None` with a warning rather than
    /// propagating, so a broken coupon read can never block a price quote.
    pub async fn coupon(&self, pool: &PgPool, code: &str) -> Option<Arc<Coupon>> {
        let key = Self::coupon_key(code);
        if key.is_empty() {
            return None;
        }
        if let Some(cached) = self.coupons.get(&key).await {
            return Some(cached);
        }
        match db::find_coupon(pool, code).await {
            Ok(Some(coupon)) => {
                let coupon = Arc::new(coupon);
                self.coupons.insert(key, coupon.clone()).await;
                Some(coupon)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Coupon lookup failed for '{}': {}", key, e);
                None
            }
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tours_size: self.tours.entry_count(),
            tour_list_cached: self.tour_list.entry_count() > 0,
            coupons_size: self.coupons.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.tours.invalidate_all();
        self.tour_list.invalidate_all();
        self.coupons.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub tours_size: u64,
    pub tour_list_cached: bool,
    pub coupons_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match crate::db::list_active_tours(db).await {
        Ok(tours) => {
            for tour in &tours {
                cache.tours.insert(tour.id, Arc::new(tour.clone())).await;
            }
            cache
                .tour_list
                .insert(TOUR_LIST_KEY.to_string(), Arc::new(tours))
                .await;
        }
        Err(e) => warn!("Failed to warm tour cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
