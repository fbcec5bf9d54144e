//! Real freight-corridor city coordinates for realistic test fixtures.

use hos_trip_planner::location::Location;

/// A named city with `(lng, lat)` coordinates.
#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub lng: f64,
    pub lat: f64,
}

impl City {
    pub const fn new(name: &'static str, lng: f64, lat: f64) -> Self {
        Self { name, lng, lat }
    }

    pub fn coord(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }

    pub fn location(&self) -> Location {
        Location::new(self.name, self.lng, self.lat)
    }
}

pub const LOS_ANGELES: City = City::new("Los Angeles, CA", -118.2437, 34.0522);
pub const BARSTOW: City = City::new("Barstow, CA", -117.0173, 34.8958);
pub const LAS_VEGAS: City = City::new("Las Vegas, NV", -115.1398, 36.1699);
pub const SALT_LAKE_CITY: City = City::new("Salt Lake City, UT", -111.8910, 40.7608);
pub const DENVER: City = City::new("Denver, CO", -104.9903, 39.7392);
pub const CHICAGO: City = City::new("Chicago, IL", -87.6298, 41.8781);

/// An overland corridor from the Pacific coast to the Midwest.
pub const I80_CORRIDOR: &[City] = &[LOS_ANGELES, BARSTOW, LAS_VEGAS, SALT_LAKE_CITY, DENVER, CHICAGO];
