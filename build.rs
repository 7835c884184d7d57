use std::env;
use std::fs;
use std::path::Path;

/// Keys read by `AppConfig::from_env` through `option_env!`.
const CONFIG_KEYS: &[&str] = &[
    "ENABLE_LOGGING",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "DEFAULT_MAP_ZOOM",
    "DEFAULT_TILE_STYLE",
    "HEATMAP_RADIUS",
    "HEATMAP_BLUR",
    "HEATMAP_MAX_ZOOM",
    "GEOCODER_ERROR_MESSAGE",
    "WEATHER_PROVIDER",
    "WEATHER_DELAY_MS",
    "WEATHER_REFRESH_SECS",
    "WEATHER_SEED",
    "OPEN_METEO_URL",
];

fn main() {
    // Load KEY=VALUE pairs from .env when present
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !CONFIG_KEYS.contains(&key) {
                        println!("cargo:warning=Unknown key '{}' in .env, ignored", key);
                        continue;
                    }
                    // The real environment wins over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default values. Copy .env.example to .env to override them.");
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-changed=assets/catalog.json");
}
