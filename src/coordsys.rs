//! # Coordinate Systems
//!
//! Static registry of the coordinate system names a region file may declare.
//! Each system fixes the unit convention of the first two positional fields
//! of every region that follows it, and optionally binds a celestial frame.

use std::fmt;

use crate::frame::Frame;
use crate::units::UnitConvention;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordSystem {
    Fk5,
    J2000,
    Fk4,
    B1950,
    Icrs,
    Galactic,
    Ecliptic,
    Wcs,
    /// One of the alternate WCS systems `wcsa`..`wcsz`.
    WcsAlt(char),
    Physical,
    Image,
    Linear,
    Amplifier,
    Detector,
}

const FIXED_SYSTEMS: &[CoordSystem] = &[
    CoordSystem::Fk5,
    CoordSystem::J2000,
    CoordSystem::Fk4,
    CoordSystem::B1950,
    CoordSystem::Icrs,
    CoordSystem::Galactic,
    CoordSystem::Ecliptic,
    CoordSystem::Wcs,
    CoordSystem::Physical,
    CoordSystem::Image,
    CoordSystem::Linear,
    CoordSystem::Amplifier,
    CoordSystem::Detector,
];

impl CoordSystem {
    /// Looks up a system by name, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<CoordSystem> {
        let lc = name.to_ascii_lowercase();
        match lc.as_str() {
            "fk5" => Some(CoordSystem::Fk5),
            "j2000" => Some(CoordSystem::J2000),
            "fk4" => Some(CoordSystem::Fk4),
            "b1950" => Some(CoordSystem::B1950),
            "icrs" => Some(CoordSystem::Icrs),
            "galactic" => Some(CoordSystem::Galactic),
            "ecliptic" => Some(CoordSystem::Ecliptic),
            "wcs" => Some(CoordSystem::Wcs),
            "physical" => Some(CoordSystem::Physical),
            "image" => Some(CoordSystem::Image),
            "linear" => Some(CoordSystem::Linear),
            "amplifier" => Some(CoordSystem::Amplifier),
            "detector" => Some(CoordSystem::Detector),
            _ => match lc.strip_prefix("wcs").map(str::as_bytes) {
                Some(&[letter]) if letter.is_ascii_lowercase() => {
                    Some(CoordSystem::WcsAlt(letter as char))
                }
                _ => None,
            },
        }
    }

    /// Every recognized system, the 26 alternate WCS systems included.
    pub fn all() -> impl Iterator<Item = CoordSystem> {
        FIXED_SYSTEMS
            .iter()
            .copied()
            .chain(('a'..='z').map(CoordSystem::WcsAlt))
    }

    pub fn name(&self) -> String {
        match self {
            CoordSystem::Fk5 => "fk5".to_string(),
            CoordSystem::J2000 => "j2000".to_string(),
            CoordSystem::Fk4 => "fk4".to_string(),
            CoordSystem::B1950 => "b1950".to_string(),
            CoordSystem::Icrs => "icrs".to_string(),
            CoordSystem::Galactic => "galactic".to_string(),
            CoordSystem::Ecliptic => "ecliptic".to_string(),
            CoordSystem::Wcs => "wcs".to_string(),
            CoordSystem::WcsAlt(letter) => format!("wcs{}", letter),
            CoordSystem::Physical => "physical".to_string(),
            CoordSystem::Image => "image".to_string(),
            CoordSystem::Linear => "linear".to_string(),
            CoordSystem::Amplifier => "amplifier".to_string(),
            CoordSystem::Detector => "detector".to_string(),
        }
    }

    /// Unit conventions for field slots 0 and 1 of a coordinate pair.
    pub fn unit_conventions(&self) -> (UnitConvention, UnitConvention) {
        use UnitConvention::*;
        match self {
            CoordSystem::Fk5 | CoordSystem::J2000 | CoordSystem::Fk4 | CoordSystem::B1950
            | CoordSystem::Icrs => (HourOrDegree, Degree),
            CoordSystem::Galactic | CoordSystem::Ecliptic => (Degree, Degree),
            CoordSystem::Wcs
            | CoordSystem::WcsAlt(_)
            | CoordSystem::Physical
            | CoordSystem::Image
            | CoordSystem::Linear
            | CoordSystem::Amplifier
            | CoordSystem::Detector => (Dimensionless, Dimensionless),
        }
    }

    /// Convention for the coordinate at field position `index`.
    pub fn unit_convention_at(&self, index: usize) -> UnitConvention {
        let (even, odd) = self.unit_conventions();
        if index % 2 == 0 {
            even
        } else {
            odd
        }
    }

    /// The celestial frame this system maps to, if any. `ecliptic` is
    /// served by the geocentric true ecliptic frame.
    pub fn frame(&self) -> Option<Frame> {
        match self {
            CoordSystem::Fk5 | CoordSystem::J2000 => Some(Frame::Fk5),
            CoordSystem::Fk4 | CoordSystem::B1950 => Some(Frame::Fk4),
            CoordSystem::Icrs => Some(Frame::Icrs),
            CoordSystem::Galactic => Some(Frame::Galactic),
            CoordSystem::Ecliptic => Some(Frame::GeocentricTrueEcliptic),
            _ => None,
        }
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{parse_angle, Unit};

    #[test]
    fn test_every_system_round_trips_through_lookup() {
        for system in CoordSystem::all() {
            assert_eq!(CoordSystem::lookup(&system.name()), Some(system), "lookup failed for {}", system);
        }
        assert_eq!(CoordSystem::all().count(), FIXED_SYSTEMS.len() + 26);
    }

    #[test]
    fn test_lookup_rejects_unknown_names() {
        assert_eq!(CoordSystem::lookup("circle"), None);
        assert_eq!(CoordSystem::lookup("wcs1"), None);
        assert_eq!(CoordSystem::lookup("wcsab"), None);
        assert_eq!(CoordSystem::lookup(""), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(CoordSystem::lookup("FK5"), Some(CoordSystem::Fk5));
        assert_eq!(CoordSystem::lookup("WCSB"), Some(CoordSystem::WcsAlt('b')));
    }

    #[test]
    fn test_equatorial_systems_read_hours_only_when_sexagesimal() {
        for name in ["fk5", "fk4", "icrs"] {
            let system = CoordSystem::lookup(name).unwrap();
            let hint = system.unit_convention_at(0);
            assert_eq!(parse_angle("12:30:00", hint).unwrap().unit, Unit::Hour);
            assert_eq!(parse_angle("12.5", hint).unwrap().unit, Unit::Degree);
            assert_eq!(system.unit_convention_at(1), UnitConvention::Degree);
        }
    }

    #[test]
    fn test_unit_convention_table() {
        assert_eq!(CoordSystem::Galactic.unit_conventions(), (UnitConvention::Degree, UnitConvention::Degree));
        assert_eq!(CoordSystem::Ecliptic.unit_conventions(), (UnitConvention::Degree, UnitConvention::Degree));
        assert_eq!(CoordSystem::Image.unit_conventions(), (UnitConvention::Dimensionless, UnitConvention::Dimensionless));
        assert_eq!(CoordSystem::WcsAlt('q').unit_convention_at(3), UnitConvention::Dimensionless);
    }

    #[test]
    fn test_frame_bindings() {
        assert_eq!(CoordSystem::Ecliptic.frame(), Some(Frame::GeocentricTrueEcliptic));
        assert_eq!(CoordSystem::J2000.frame(), Some(Frame::Fk5));
        assert_eq!(CoordSystem::Physical.frame(), None);
        assert_eq!(CoordSystem::Wcs.frame(), None);
    }
}
