// Fixtures shared by unit tests.

use crate::models::{Category, LatLng, PointOfInterest};

pub fn sample_catalog() -> Vec<PointOfInterest> {
    vec![
        PointOfInterest {
            name: "London".to_string(),
            position: LatLng::new(51.505, -0.09),
            description: "The capital of England.".to_string(),
            category: Category::Landmark,
            display_radius: Some(10000.0),
            color: Some("#3388ff".to_string()),
            facts: vec!["Old".to_string()],
            image_url: None,
        },
        PointOfInterest {
            name: "Delicious Pasta".to_string(),
            position: LatLng::new(41.9, 12.51),
            description: "Family run trattoria.".to_string(),
            category: Category::Food,
            display_radius: None,
            color: None,
            facts: Vec::new(),
            image_url: None,
        },
    ]
}
