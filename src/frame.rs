//! Celestial reference frames and frame-bound sky positions.

use std::fmt;

use crate::units::Quantity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    Fk5,
    Fk4,
    Icrs,
    Galactic,
    GeocentricTrueEcliptic,
}

impl Frame {
    pub fn name(self) -> &'static str {
        match self {
            Frame::Fk5 => "fk5",
            Frame::Fk4 => "fk4",
            Frame::Icrs => "icrs",
            Frame::Galactic => "galactic",
            Frame::GeocentricTrueEcliptic => "geocentrictrueecliptic",
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two angles tied to a celestial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    pub lon: Quantity,
    pub lat: Quantity,
    pub frame: Frame,
}

impl SkyPosition {
    /// Longitude and latitude in degrees.
    pub fn to_degrees(&self) -> (f64, f64) {
        (
            self.lon.to_degrees().unwrap_or(self.lon.value),
            self.lat.to_degrees().unwrap_or(self.lat.value),
        )
    }
}

/// Bundles two angles into a position; `None` unless both are angular.
pub fn make_position(lon: Quantity, lat: Quantity, frame: Frame) -> Option<SkyPosition> {
    (lon.is_angle() && lat.is_angle()).then_some(SkyPosition { lon, lat, frame })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_position_requires_angles() {
        let ra = Quantity::hours(1.0);
        let dec = Quantity::degrees(-30.0);
        let pos = make_position(ra, dec, Frame::Fk5).expect("both are angles");
        assert_eq!(pos.frame, Frame::Fk5);
        let (lon, lat) = pos.to_degrees();
        assert!((lon - 15.0).abs() < 1e-12);
        assert!((lat + 30.0).abs() < 1e-12);

        assert!(make_position(Quantity::dimensionless(1.0), dec, Frame::Icrs).is_none());
    }

    #[test]
    fn test_ecliptic_frame_name() {
        assert_eq!(Frame::GeocentricTrueEcliptic.to_string(), "geocentrictrueecliptic");
    }
}
