// ============================================================================
// TILE STYLES - Base map imagery providers
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileStyle {
    #[default]
    Streets,
    Satellite,
    Dark,
    Topo,
    Watercolor,
}

/// Tile source handed to the mapping library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSource {
    /// Contains `{z}`, `{x}` and `{y}` placeholders (and `{s}` for sharded hosts).
    pub url_template: &'static str,
    pub attribution: &'static str,
}

const STREETS: TileSource = TileSource {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
};

const SATELLITE: TileSource = TileSource {
    url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    attribution: "&copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
};

const DARK: TileSource = TileSource {
    url_template: "https://cartodb-basemaps-{s}.global.ssl.fastly.net/dark_all/{z}/{x}/{y}.png",
    attribution: "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a> &copy; <a href=\"http://cartodb.com/attributions\">CartoDB</a>",
};

const TOPO: TileSource = TileSource {
    url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
    attribution: "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a>",
};

const WATERCOLOR: TileSource = TileSource {
    url_template: "https://stamen-tiles-{s}.a.ssl.fastly.net/watercolor/{z}/{x}/{y}.jpg",
    attribution: "Map tiles by <a href=\"http://stamen.com\">Stamen Design</a>, <a href=\"http://creativecommons.org/licenses/by/3.0\">CC BY 3.0</a> &mdash; Map data &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
};

impl TileStyle {
    pub const ALL: [TileStyle; 5] = [
        TileStyle::Streets,
        TileStyle::Satellite,
        TileStyle::Dark,
        TileStyle::Topo,
        TileStyle::Watercolor,
    ];

    /// Unknown values resolve to `Streets`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "streets" => TileStyle::Streets,
            "satellite" => TileStyle::Satellite,
            "dark" => TileStyle::Dark,
            "topo" => TileStyle::Topo,
            "watercolor" => TileStyle::Watercolor,
            other => {
                log::warn!("⚠️ [TILES] Unknown tile style '{}', falling back to streets", other);
                TileStyle::default()
            }
        }
    }

    /// Value used in the `<select>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TileStyle::Streets => "streets",
            TileStyle::Satellite => "satellite",
            TileStyle::Dark => "dark",
            TileStyle::Topo => "topo",
            TileStyle::Watercolor => "watercolor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TileStyle::Streets => "Streets",
            TileStyle::Satellite => "Satellite",
            TileStyle::Dark => "Dark",
            TileStyle::Topo => "Topographic",
            TileStyle::Watercolor => "Watercolor",
        }
    }

    pub fn tile_source(&self) -> TileSource {
        match self {
            TileStyle::Streets => STREETS,
            TileStyle::Satellite => SATELLITE,
            TileStyle::Dark => DARK,
            TileStyle::Topo => TOPO,
            TileStyle::Watercolor => WATERCOLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_xyz_placeholders() {
        for style in TileStyle::ALL {
            let src = style.tile_source();
            for placeholder in ["{z}", "{x}", "{y}"] {
                assert!(src.url_template.contains(placeholder), "{:?} missing {}", style, placeholder);
            }
            assert!(!src.attribution.is_empty());
        }
    }

    #[test]
    fn test_unknown_style_falls_back_to_streets() {
        assert_eq!(TileStyle::parse_or_default("neon"), TileStyle::Streets);
        assert_eq!(TileStyle::parse_or_default(""), TileStyle::Streets);
        assert_eq!(TileStyle::parse_or_default("neon").tile_source(), TileStyle::Streets.tile_source());
    }

    #[test]
    fn test_parse_roundtrips_select_values() {
        for style in TileStyle::ALL {
            assert_eq!(TileStyle::parse_or_default(style.as_str()), style);
        }
        assert_eq!(TileStyle::parse_or_default("SATELLITE"), TileStyle::Satellite);
    }
}
