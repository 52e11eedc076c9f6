//! Navigation app deep links for a planned tour.

use url::form_urlencoded::byte_serialize;

use crate::point::GeoPoint;
use crate::tour::Tour;

/// Google Maps accepts at most this many intermediate waypoints.
pub const MAX_GOOGLE_WAYPOINTS: usize = 23;

fn lat_lng(point: &GeoPoint) -> String {
    format!("{},{}", point.lat, point.lng)
}

/// Driving directions from `origin` through the tour, ending at its last stop.
pub fn google_maps_url(origin: &GeoPoint, tour: &Tour) -> Option<String> {
    let (destination, intermediate) = tour.points().split_last()?;

    let mut url = format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={}&travelmode=driving",
        lat_lng(origin),
        lat_lng(destination)
    );

    if !intermediate.is_empty() {
        let waypoints = intermediate
            .iter()
            .take(MAX_GOOGLE_WAYPOINTS)
            .map(lat_lng)
            .collect::<Vec<_>>()
            .join("|");
        url.push_str("&waypoints=");
        url.extend(byte_serialize(waypoints.as_bytes()));
    }

    Some(url)
}

/// Waze navigation to the first stop only.
pub fn waze_url(tour: &Tour) -> Option<String> {
    tour.first()
        .map(|stop| format!("https://waze.com/ul?ll={}&navigate=yes", lat_lng(stop)))
}
