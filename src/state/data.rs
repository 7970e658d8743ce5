/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the feed layer and the UI layer.

use std::fmt;

/// Represents a single traffic camera from the feature service
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    /// Unique feature ID (OBJECTID), stable across fetches
    pub id: i64,
    /// Still image URL without any query parameters
    pub image_url: String,
    /// Primary road name (may be empty)
    pub main_road: String,
    /// Cross street, if the service reported one
    pub cross_road: Option<String>,
    /// Short heading label such as "N" or "SB"
    pub direction: Option<String>,
    /// Projected easting (None when the feature has no geometry)
    pub x: Option<f64>,
    /// Projected northing (None when the feature has no geometry)
    pub y: Option<f64>,
}

impl CameraRecord {
    /// Card and viewer title
    pub fn title(&self) -> &str {
        if self.main_road.is_empty() {
            "Unknown Location"
        } else {
            &self.main_road
        }
    }

    /// "at {cross road}", or an empty string when there is none
    pub fn subtitle(&self) -> String {
        match self.cross_road.as_deref() {
            Some(cross) if !cross.is_empty() => format!("at {}", cross),
            _ => String::new(),
        }
    }

    pub fn direction_label(&self) -> &str {
        self.direction.as_deref().unwrap_or("")
    }

    /// Text the search term is matched against: "{main} {cross}"
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.main_road,
            self.cross_road.as_deref().unwrap_or("")
        )
    }
}

/// Order applied to the visible camera list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Alphabetical by main road
    #[default]
    Name,
    /// Highest northing first
    NorthSouth,
    /// Lowest northing first
    SouthNorth,
    /// Lowest easting first
    WestEast,
    /// Highest easting first
    EastWest,
}

impl SortKey {
    /// All options in the order the sort selector lists them
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::NorthSouth,
        SortKey::SouthNorth,
        SortKey::WestEast,
        SortKey::EastWest,
    ];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Name => "Sort by Name",
            SortKey::NorthSouth => "North to South",
            SortKey::SouthNorth => "South to North",
            SortKey::WestEast => "West to East",
            SortKey::EastWest => "East to West",
        };
        f.write_str(label)
    }
}

/// One snapshot download the UI shell has to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub id: i64,
    pub url: String,
}
