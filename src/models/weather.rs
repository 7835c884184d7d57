// ============================================================================
// WEATHER - Report shown in the weather card
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
    Unknown,
}

/// Icon when the condition has no entry of its own.
pub const FALLBACK_WEATHER_ICON: &str = "🌤️";

/// Wind speed at which an otherwise clear sky is reported as windy.
const WINDY_THRESHOLD_KPH: f64 = 40.0;

impl WeatherCondition {
    /// Conditions the mock generator draws from.
    pub const MOCK_CHOICES: [WeatherCondition; 5] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Snowy,
        WeatherCondition::Windy,
    ];

    /// WMO weather interpretation code (as returned by Open-Meteo).
    pub fn from_wmo_code(code: u16, wind_kph: f64) -> Self {
        match code {
            0 | 1 if wind_kph >= WINDY_THRESHOLD_KPH => WeatherCondition::Windy,
            0 | 1 => WeatherCondition::Sunny,
            2 | 3 | 45 | 48 => WeatherCondition::Cloudy,
            51..=67 | 80..=82 | 95..=99 => WeatherCondition::Rainy,
            71..=77 | 85 | 86 => WeatherCondition::Snowy,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Snowy => "Snowy",
            WeatherCondition::Windy => "Windy",
            WeatherCondition::Unknown => "Unknown",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀️",
            WeatherCondition::Cloudy => "☁️",
            WeatherCondition::Rainy => "🌧️",
            WeatherCondition::Snowy => "❄️",
            WeatherCondition::Windy => "💨",
            WeatherCondition::Unknown => FALLBACK_WEATHER_ICON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: WeatherCondition,
    pub temperature_c: f64,
    /// 0..=100
    pub humidity_pct: u8,
    /// Never negative
    pub wind_kph: f64,
}

impl WeatherReport {
    /// Clamps humidity into 0..=100 and wind to >= 0.
    pub fn new(condition: WeatherCondition, temperature_c: f64, humidity_pct: f64, wind_kph: f64) -> Self {
        let humidity = if humidity_pct.is_finite() { humidity_pct.round().clamp(0.0, 100.0) } else { 0.0 };
        let wind = if wind_kph.is_finite() { wind_kph.max(0.0) } else { 0.0 };
        Self {
            condition,
            temperature_c,
            humidity_pct: humidity as u8,
            wind_kph: wind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup_falls_back() {
        assert_eq!(WeatherCondition::Sunny.icon(), "☀️");
        assert_eq!(WeatherCondition::from_wmo_code(200, 0.0).icon(), FALLBACK_WEATHER_ICON);
    }

    #[test]
    fn test_wmo_mapping() {
        assert_eq!(WeatherCondition::from_wmo_code(0, 5.0), WeatherCondition::Sunny);
        assert_eq!(WeatherCondition::from_wmo_code(0, 55.0), WeatherCondition::Windy);
        assert_eq!(WeatherCondition::from_wmo_code(3, 55.0), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_wmo_code(63, 0.0), WeatherCondition::Rainy);
        assert_eq!(WeatherCondition::from_wmo_code(75, 0.0), WeatherCondition::Snowy);
        assert_eq!(WeatherCondition::from_wmo_code(200, 0.0), WeatherCondition::Unknown);
    }

    #[test]
    fn test_report_clamps_ranges() {
        let r = WeatherReport::new(WeatherCondition::Rainy, 12.0, 140.0, -3.0);
        assert_eq!(r.humidity_pct, 100);
        assert_eq!(r.wind_kph, 0.0);
    }
}
