//! Las Vegas / Henderson visit points for realistic fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

#![allow(dead_code)]

use field_route_planner::point::{GeoPoint, PointKind};

/// Field office used as the default starting point.
pub fn office() -> GeoPoint {
    GeoPoint::new("office", PointKind::Origin, "Field Office", 36.1699, -115.1398)
}

pub fn citizen(id: &str, name: &str, lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(id, PointKind::Citizen, name, lat, lng)
}

pub fn demand(id: &str, name: &str, lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(id, PointKind::Demand, name, lat, lng)
}

/// A morning's worth of visits, listed in no useful order.
pub fn morning_visits() -> Vec<GeoPoint> {
    vec![
        citizen("c-101", "MGM Grand", 36.1023654, -115.1688720).with_address("3799 S Las Vegas Blvd"),
        demand("d-201", "Wynn Las Vegas", 36.1263781, -115.1658180),
        citizen("c-102", "Bellagio", 36.1126, -115.1767),
        demand("d-202", "Longhorn Casino", 36.1070664, -115.0591256),
        citizen("c-103", "Encore at Wynn", 36.1289345, -115.1653620),
        demand("d-203", "Caesars Palace", 36.1162, -115.1745),
        citizen("c-104", "Henderson City Hall", 36.0300, -114.9817),
    ]
}
