//! Weather acquisition pipeline
//!
//! Orchestrates upstream fetches with a strict three-tier fallback chain and
//! owns the per-query result cache:
//!
//! 1. fresh cache hit (returned verbatim, no upstream traffic)
//! 2. rich tier: the `forecast` endpoint with a 5-day hourly horizon
//! 3. degraded tier: the `current` endpoint plus a synthetic forecast
//! 4. last resort: a bundled static sample payload
//!
//! Each tier transition is terminal for the call; the last tier never fails,
//! so `acquire` is total. Completed fetches only write the cache when no
//! newer request for the same key was issued meanwhile.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use domain::WeatherDocument;
use parking_lot::Mutex;
use tracing::{debug, error, instrument, warn};

use crate::ports::{UpstreamError, WeatherEndpoint, WeatherPort};
use crate::services::synthesizer;

/// Default cache time-to-live
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Warning shown when the forecast had to be synthesized
pub const LIMITED_FORECAST_WARNING: &str =
    "Limited forecast data available on this plan. Showing estimated forecast.";

/// Warning shown when even current conditions were unavailable
pub const SAMPLE_FALLBACK_WARNING: &str = "Unable to load weather data. Showing sample data.";

static SAMPLE_WEATHER: &str = include_str!("sample_weather.json");

/// Result of one acquisition
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredWeather {
    /// The payload to render; always complete enough to display
    pub payload: WeatherDocument,
    /// True when the whole payload is the bundled sample
    pub is_sample: bool,
    /// True when the forecast portion is synthetic or sample data
    pub is_forecast_sample: bool,
    /// Wall-clock time the data was obtained
    pub fetched_at: DateTime<Utc>,
    /// Non-blocking user-facing warning for degraded results
    pub warning: Option<String>,
}

struct CacheEntry {
    result: AcquiredWeather,
    stored_at: Instant,
}

#[derive(Default)]
struct PipelineState {
    cache: HashMap<String, CacheEntry>,
    latest_request: HashMap<String, u64>,
}

/// Tiered weather acquisition service
pub struct WeatherService {
    gateway: Arc<dyn WeatherPort>,
    state: Mutex<PipelineState>,
    ttl: Duration,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service with the default 10-minute cache TTL
    pub fn new(gateway: Arc<dyn WeatherPort>) -> Self {
        Self::with_ttl(gateway, DEFAULT_CACHE_TTL)
    }

    /// Create a service with a custom cache TTL
    pub fn with_ttl(gateway: Arc<dyn WeatherPort>, ttl: Duration) -> Self {
        Self {
            gateway,
            state: Mutex::new(PipelineState::default()),
            ttl,
        }
    }

    /// Cache key for a query: trimmed and lower-cased
    pub fn normalize_query(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Acquire weather for `query`; total, never fails
    ///
    /// Returns the cached result when fresh, otherwise walks the fallback
    /// tiers and stores whatever they produce.
    #[instrument(skip(self))]
    pub async fn acquire(&self, query: &str) -> AcquiredWeather {
        let key = Self::normalize_query(query);

        let ticket = {
            let mut state = self.state.lock();
            if let Some(entry) = state.cache.get(&key) {
                if entry.stored_at.elapsed() < self.ttl {
                    debug!(key = %key, "returning cached weather");
                    return entry.result.clone();
                }
            }
            let sequence = state.latest_request.entry(key.clone()).or_insert(0);
            *sequence += 1;
            *sequence
        };

        let result = self.run_tiers(query).await;
        self.store_if_latest(&key, ticket, result.clone());
        result
    }

    async fn run_tiers(&self, query: &str) -> AcquiredWeather {
        let forecast_params = vec![
            ("forecast_days".to_string(), "5".to_string()),
            ("hourly".to_string(), "1".to_string()),
        ];
        let forecast_error = match self
            .gateway
            .fetch(WeatherEndpoint::Forecast, query, forecast_params)
            .await
        {
            Ok(payload) => {
                return AcquiredWeather {
                    payload,
                    is_sample: false,
                    is_forecast_sample: false,
                    fetched_at: Utc::now(),
                    warning: None,
                };
            },
            Err(e) => e,
        };
        warn!(
            error = %forecast_error,
            "forecast endpoint failed, attempting current weather fallback"
        );

        match self
            .gateway
            .fetch(WeatherEndpoint::Current, query, Vec::new())
            .await
        {
            Ok(mut payload) => {
                payload.forecast = synthesizer::synthesize(&payload, Utc::now().date_naive());
                AcquiredWeather {
                    payload,
                    is_sample: false,
                    is_forecast_sample: true,
                    fetched_at: Utc::now(),
                    warning: Some(LIMITED_FORECAST_WARNING.to_string()),
                }
            },
            Err(current_error) => {
                error!(error = %current_error, "current endpoint failed, serving sample data");
                AcquiredWeather {
                    payload: sample_payload(),
                    is_sample: true,
                    is_forecast_sample: true,
                    fetched_at: Utc::now(),
                    warning: Some(warning_for(&current_error)),
                }
            },
        }
    }

    /// Write the cache unless a newer request for the key was issued
    fn store_if_latest(&self, key: &str, ticket: u64, result: AcquiredWeather) {
        let mut state = self.state.lock();
        let latest = state.latest_request.get(key).copied().unwrap_or(0);
        if ticket == latest {
            state.cache.insert(
                key.to_string(),
                CacheEntry {
                    result,
                    stored_at: Instant::now(),
                },
            );
        } else {
            debug!(key = %key, ticket, latest, "discarding response from superseded request");
        }
    }
}

fn warning_for(error: &UpstreamError) -> String {
    if error.message.trim().is_empty() {
        SAMPLE_FALLBACK_WARNING.to_string()
    } else {
        error.message.clone()
    }
}

/// The bundled last-resort payload
pub fn sample_payload() -> WeatherDocument {
    serde_json::from_str(SAMPLE_WEATHER).unwrap_or_else(|e| {
        error!(error = %e, "bundled sample payload failed to parse");
        WeatherDocument::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockWeatherPort;
    use domain::CurrentConditions;

    fn forecast_document() -> WeatherDocument {
        serde_json::from_str(SAMPLE_WEATHER).unwrap()
    }

    fn current_only_document(temperature: f64) -> WeatherDocument {
        WeatherDocument {
            current: Some(CurrentConditions {
                temperature: Some(temperature),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn upstream_failure() -> UpstreamError {
        UpstreamError::rejected(
            Some(615),
            Some("request_failed".to_string()),
            "Your API request failed.",
        )
    }

    #[test]
    fn normalize_query_trims_and_lowercases() {
        assert_eq!(WeatherService::normalize_query("  Paris "), "paris");
        assert_eq!(WeatherService::normalize_query("NEW YORK"), "new york");
    }

    #[test]
    fn sample_payload_is_complete() {
        let payload = sample_payload();
        assert!(payload.current.is_some());
        assert_eq!(payload.forecast.len(), 5);
        assert!(
            payload
                .current
                .as_ref()
                .and_then(|c| c.air_quality.as_ref())
                .is_some()
        );
    }

    #[tokio::test]
    async fn rich_tier_success_uses_forecast_endpoint_only() {
        let mut gateway = MockWeatherPort::new();
        let doc = forecast_document();
        let returned = doc.clone();
        gateway
            .expect_fetch()
            .withf(|endpoint, query, params| {
                *endpoint == WeatherEndpoint::Forecast
                    && query == "Paris"
                    && params.contains(&("forecast_days".to_string(), "5".to_string()))
                    && params.contains(&("hourly".to_string(), "1".to_string()))
            })
            .times(1)
            .returning(move |_, _, _| Ok(returned.clone()));

        let service = WeatherService::new(Arc::new(gateway));
        let result = service.acquire("Paris").await;

        assert!(!result.is_sample);
        assert!(!result.is_forecast_sample);
        assert!(result.warning.is_none());
        assert_eq!(result.payload, doc);
        assert_eq!(result.payload.forecast.len(), 5);
    }

    #[tokio::test]
    async fn degraded_tier_synthesizes_forecast() {
        let mut gateway = MockWeatherPort::new();
        gateway
            .expect_fetch()
            .withf(|endpoint, _, _| *endpoint == WeatherEndpoint::Forecast)
            .times(1)
            .returning(|_, _, _| Err(upstream_failure()));
        gateway
            .expect_fetch()
            .withf(|endpoint, _, params| {
                *endpoint == WeatherEndpoint::Current && params.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(current_only_document(20.0)));

        let service = WeatherService::new(Arc::new(gateway));
        let result = service.acquire("Paris").await;

        assert!(!result.is_sample);
        assert!(result.is_forecast_sample);
        assert_eq!(result.warning.as_deref(), Some(LIMITED_FORECAST_WARNING));
        assert_eq!(result.payload.forecast.len(), 5);

        // Offset 0 lands on the middle day of the synthesized range.
        let day = result.payload.forecast.values().nth(2).unwrap();
        assert_eq!(day.maxtemp, Some(23.0));
        assert_eq!(day.mintemp, Some(17.0));
        assert_eq!(day.avgtemp, Some(20.0));
    }

    #[tokio::test]
    async fn last_resort_tier_serves_sample() {
        let mut gateway = MockWeatherPort::new();
        gateway
            .expect_fetch()
            .times(2)
            .returning(|_, _, _| Err(upstream_failure()));

        let service = WeatherService::new(Arc::new(gateway));
        let result = service.acquire("Nowhere").await;

        assert!(result.is_sample);
        assert!(result.is_forecast_sample);
        assert_eq!(result.warning.as_deref(), Some("Your API request failed."));
        assert_eq!(result.payload, sample_payload());
    }

    #[tokio::test]
    async fn empty_error_message_gets_generic_warning() {
        let mut gateway = MockWeatherPort::new();
        gateway
            .expect_fetch()
            .times(2)
            .returning(|_, _, _| Err(UpstreamError::transport("")));

        let service = WeatherService::new(Arc::new(gateway));
        let result = service.acquire("Nowhere").await;
        assert_eq!(result.warning.as_deref(), Some(SAMPLE_FALLBACK_WARNING));
    }

    #[tokio::test]
    async fn second_call_within_ttl_hits_cache() {
        let mut gateway = MockWeatherPort::new();
        let doc = forecast_document();
        gateway
            .expect_fetch()
            .times(1)
            .returning(move |_, _, _| Ok(doc.clone()));

        let service = WeatherService::new(Arc::new(gateway));
        let first = service.acquire("Paris").await;
        let second = service.acquire("paris").await;

        // Identical payload and metadata; the mock would panic on a second fetch.
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cached_warning_is_returned_verbatim() {
        let mut gateway = MockWeatherPort::new();
        gateway
            .expect_fetch()
            .times(2)
            .returning(|_, _, _| Err(upstream_failure()));

        let service = WeatherService::new(Arc::new(gateway));
        let first = service.acquire("Nowhere").await;
        let second = service.acquire("Nowhere").await;
        assert_eq!(first.warning, second.warning);
        assert!(second.warning.is_some());
    }

    #[tokio::test]
    async fn expired_entry_refetches_rich_tier() {
        let mut gateway = MockWeatherPort::new();
        let doc = forecast_document();
        gateway
            .expect_fetch()
            .withf(|endpoint, _, _| *endpoint == WeatherEndpoint::Forecast)
            .times(2)
            .returning(move |_, _, _| Ok(doc.clone()));

        let service = WeatherService::with_ttl(Arc::new(gateway), Duration::ZERO);
        service.acquire("Paris").await;
        service.acquire("Paris").await;
    }

    #[tokio::test]
    async fn expiry_retries_rich_tier_even_after_sample_fallback() {
        let mut gateway = MockWeatherPort::new();
        let doc = forecast_document();
        let mut call_count = 0u32;
        gateway.expect_fetch().returning(move |endpoint, _, _| {
            call_count += 1;
            match (call_count, endpoint) {
                // First acquisition: both tiers fail.
                (1 | 2, _) => Err(upstream_failure()),
                // Second acquisition starts at the rich tier again.
                (3, WeatherEndpoint::Forecast) => Ok(doc.clone()),
                _ => Err(UpstreamError::transport("unexpected call")),
            }
        });

        let service = WeatherService::with_ttl(Arc::new(gateway), Duration::ZERO);
        let first = service.acquire("Paris").await;
        assert!(first.is_sample);

        let second = service.acquire("Paris").await;
        assert!(!second.is_sample);
        assert!(!second.is_forecast_sample);
    }

    #[tokio::test]
    async fn superseded_request_does_not_overwrite_cache() {
        use std::sync::atomic::{AtomicU32, Ordering};

        use async_trait::async_trait;
        use tokio::sync::Notify;

        // First fetch blocks until released, so a second request for the
        // same key overtakes it.
        struct GatedGateway {
            first_started: Arc<Notify>,
            release_first: Arc<Notify>,
            calls: AtomicU32,
        }

        #[async_trait]
        impl WeatherPort for GatedGateway {
            async fn fetch(
                &self,
                _endpoint: WeatherEndpoint,
                _query: &str,
                _params: Vec<(String, String)>,
            ) -> Result<WeatherDocument, UpstreamError> {
                match self.calls.fetch_add(1, Ordering::SeqCst) {
                    0 => {
                        self.first_started.notify_one();
                        self.release_first.notified().await;
                        Ok(current_only_document(1.0))
                    },
                    1 => Ok(current_only_document(2.0)),
                    _ => Ok(current_only_document(3.0)),
                }
            }
        }

        let first_started = Arc::new(Notify::new());
        let release_first = Arc::new(Notify::new());
        let gateway = GatedGateway {
            first_started: first_started.clone(),
            release_first: release_first.clone(),
            calls: AtomicU32::new(0),
        };

        let service = Arc::new(WeatherService::with_ttl(
            Arc::new(gateway),
            Duration::from_secs(600),
        ));

        let stale = tokio::spawn({
            let service = service.clone();
            async move { service.acquire("Paris").await }
        });
        first_started.notified().await;

        let fresh = service.acquire("Paris").await;
        release_first.notify_one();
        let stale = stale.await.unwrap();

        // The overtaken request still gets its own result back.
        let temperature = |acquired: &AcquiredWeather| {
            acquired.payload.current.as_ref().unwrap().temperature
        };
        assert_eq!(temperature(&stale), Some(1.0));
        assert_eq!(temperature(&fresh), Some(2.0));

        // The cache holds the newer result, not the stale one, and the
        // lookup is a cache hit (a third fetch would read 3.0).
        let cached = service.acquire("Paris").await;
        assert_eq!(temperature(&cached), Some(2.0));
    }

    #[tokio::test]
    async fn distinct_queries_use_distinct_cache_keys() {
        let mut gateway = MockWeatherPort::new();
        let doc = forecast_document();
        gateway
            .expect_fetch()
            .times(2)
            .returning(move |_, _, _| Ok(doc.clone()));

        let service = WeatherService::new(Arc::new(gateway));
        service.acquire("Paris").await;
        service.acquire("London").await;
    }
}
