// ============================================================================
// CATALOG SERVICE - Built-in points of interest
// ============================================================================
// The catalog ships inside the binary; nothing is fetched at runtime.
// ============================================================================

use crate::models::{Category, PointOfInterest};

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Parse a catalog document. Entries with an invalid position are skipped.
pub fn parse_catalog(json: &str) -> Result<Vec<PointOfInterest>, String> {
    let entries: Vec<PointOfInterest> = serde_json::from_str(json)
        .map_err(|e| format!("Parse error: {}", e))?;

    let total = entries.len();
    let catalog: Vec<PointOfInterest> = entries
        .into_iter()
        .filter(|poi| {
            let ok = poi.position.is_valid();
            if !ok {
                log::warn!("⚠️ [CATALOG] Skipping '{}': invalid position", poi.name);
            }
            ok
        })
        .collect();

    let unknown = catalog.iter().filter(|p| p.category == Category::Unknown).count();
    if unknown > 0 {
        log::warn!("⚠️ [CATALOG] {} entries with unknown category, default icon used", unknown);
    }
    log::info!("📚 [CATALOG] {} / {} entries loaded", catalog.len(), total);
    Ok(catalog)
}

pub fn load_catalog() -> Result<Vec<PointOfInterest>, String> {
    parse_catalog(BUNDLED_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = load_catalog().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog[0].name, "London");
        assert!(catalog[0].has_display_radius());
        assert_eq!(catalog[0].facts.len(), 3);

        let pasta = catalog.iter().find(|p| p.name == "Delicious Pasta").unwrap();
        assert_eq!(pasta.category, Category::Food);
        assert!(!pasta.has_display_radius());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let json = r#"[
            {"name": "Nowhere", "position": [123.0, 0.0], "description": "", "category": "LANDMARK"},
            {"name": "Spa", "position": [47.0, 8.0], "description": "Warm", "category": "WELLNESS"}
        ]"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].category, Category::Unknown);
        assert!(catalog[0].facts.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(parse_catalog("{not json").is_err());
    }
}
