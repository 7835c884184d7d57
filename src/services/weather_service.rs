// ============================================================================
// WEATHER SERVICE - Current conditions for the weather card
// ============================================================================
// Two sources: a seeded mock with artificial latency, and Open-Meteo.
// Futures returned here own their data; callers decide whether the result
// is still wanted when it arrives.
// ============================================================================

use std::future::Future;
use std::pin::Pin;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use crate::config::{WeatherConfig, WeatherProviderKind};
use crate::models::{LatLng, WeatherCondition, WeatherReport};

pub type WeatherFuture = Pin<Box<dyn Future<Output = Result<WeatherReport, String>>>>;

/// Random conditions in the ranges the card was designed around.
pub struct MockWeather {
    rng: SmallRng,
    delay_ms: u32,
}

impl MockWeather {
    pub fn new(seed: Option<u64>, delay_ms: u32) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { rng, delay_ms }
    }

    /// Temperature -5..=29 °C, humidity 0..=99 %, wind 0..=29 km/h.
    pub fn generate(&mut self) -> WeatherReport {
        let temperature = self.rng.gen_range(-5..30);
        let condition_index = self.rng.gen_range(0..WeatherCondition::MOCK_CHOICES.len());
        let humidity = self.rng.gen_range(0..100);
        let wind = self.rng.gen_range(0..30);
        WeatherReport::new(
            WeatherCondition::MOCK_CHOICES[condition_index],
            temperature as f64,
            humidity as f64,
            wind as f64,
        )
    }
}

#[derive(Clone)]
pub struct OpenMeteoClient {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: u16,
}

impl OpenMeteoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn forecast_url(&self, at: LatLng) -> String {
        format!(
            "{}?latitude={:.4}&longitude={:.4}&current=temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code&wind_speed_unit=kmh",
            self.base_url, at.lat, at.lng
        )
    }

    pub async fn fetch(&self, at: LatLng) -> Result<WeatherReport, String> {
        let url = self.forecast_url(at);
        log::info!("🌐 [WEATHER] GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        let parsed = response.json::<OpenMeteoResponse>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;
        Ok(parsed.into_report())
    }
}

impl OpenMeteoResponse {
    fn into_report(self) -> WeatherReport {
        let current = self.current;
        WeatherReport::new(
            WeatherCondition::from_wmo_code(current.weather_code, current.wind_speed_10m),
            current.temperature_2m.round(),
            current.relative_humidity_2m,
            current.wind_speed_10m.round(),
        )
    }
}

pub enum WeatherSource {
    Mock(MockWeather),
    OpenMeteo(OpenMeteoClient),
}

impl WeatherSource {
    pub fn from_config(config: &WeatherConfig) -> Self {
        match config.provider {
            WeatherProviderKind::Mock => WeatherSource::Mock(MockWeather::new(config.seed, config.delay_ms)),
            WeatherProviderKind::OpenMeteo => WeatherSource::OpenMeteo(OpenMeteoClient::new(&config.open_meteo_url)),
        }
    }

    pub fn fetch(&mut self, at: LatLng) -> WeatherFuture {
        match self {
            WeatherSource::Mock(mock) => {
                let report = mock.generate();
                let delay = mock.delay_ms;
                Box::pin(async move {
                    TimeoutFuture::new(delay).await;
                    Ok(report)
                })
            }
            WeatherSource::OpenMeteo(client) => {
                let client = client.clone();
                Box::pin(async move { client.fetch(at).await })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_from_open_meteo(body: &str) -> Result<WeatherReport, serde_json::Error> {
        serde_json::from_str::<OpenMeteoResponse>(body).map(OpenMeteoResponse::into_report)
    }

    #[test]
    fn test_mock_stays_in_range() {
        let mut mock = MockWeather::new(Some(7), 0);
        for _ in 0..500 {
            let report = mock.generate();
            assert!((-5.0..=29.0).contains(&report.temperature_c));
            assert!(report.humidity_pct <= 99);
            assert!((0.0..=29.0).contains(&report.wind_kph));
            assert!(WeatherCondition::MOCK_CHOICES.contains(&report.condition));
        }
    }

    #[test]
    fn test_seeded_mock_is_repeatable() {
        let mut a = MockWeather::new(Some(42), 0);
        let mut b = MockWeather::new(Some(42), 0);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_open_meteo_url() {
        let client = OpenMeteoClient::new("https://api.open-meteo.com/v1/forecast/");
        let url = client.forecast_url(LatLng::new(48.8566, 2.3522));
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?latitude=48.8566&longitude=2.3522"));
        assert!(url.contains("weather_code"));
    }

    #[test]
    fn test_open_meteo_parsing() {
        let body = r#"{
            "latitude": 48.86, "longitude": 2.35,
            "current": {
                "time": "2024-05-01T12:00",
                "temperature_2m": 17.6,
                "relative_humidity_2m": 63,
                "wind_speed_10m": 11.2,
                "weather_code": 61
            }
        }"#;
        let report = report_from_open_meteo(body).unwrap();
        assert_eq!(report.condition, WeatherCondition::Rainy);
        assert_eq!(report.temperature_c, 18.0);
        assert_eq!(report.humidity_pct, 63);
        assert_eq!(report.wind_kph, 11.0);

        assert!(report_from_open_meteo(r#"{"current": {}}"#).is_err());
    }

    #[test]
    fn test_source_follows_config() {
        let mut config = WeatherConfig::default();
        assert!(matches!(WeatherSource::from_config(&config), WeatherSource::Mock(_)));
        config.provider = WeatherProviderKind::OpenMeteo;
        assert!(matches!(WeatherSource::from_config(&config), WeatherSource::OpenMeteo(_)));
    }
}
