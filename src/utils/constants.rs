// Marker icon table and sizes (standard Leaflet marker geometry)

use crate::models::Category;

pub const DEFAULT_MARKER_ICON: &str = "https://unpkg.com/leaflet@1.7.1/dist/images/marker-icon.png";
pub const MARKER_SHADOW: &str = "https://unpkg.com/leaflet@1.7.1/dist/images/marker-shadow.png";

pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (1, -34);
pub const MARKER_SHADOW_SIZE: (u32, u32) = (41, 41);

const LANDMARK_ICON: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.7.1/dist/images/marker-icon.png";
const FOOD_ICON: &str = "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-red.png";
const ACTIVITY_ICON: &str = "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-green.png";
const HOTEL_ICON: &str = "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-blue.png";
const USER_ICON: &str = "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-violet.png";

/// Icon URL per category. `Unknown` gets the default icon.
pub fn marker_icon_url(category: Category) -> &'static str {
    match category {
        Category::Landmark => LANDMARK_ICON,
        Category::Food => FOOD_ICON,
        Category::Activity => ACTIVITY_ICON,
        Category::Hotel => HOTEL_ICON,
        Category::User => USER_ICON,
        Category::Unknown => DEFAULT_MARKER_ICON,
    }
}
