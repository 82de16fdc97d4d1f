//! # Field Decoding
//!
//! Splits a region's field list into literal tokens and decodes each one
//! according to the region type's field kinds and the active coordinate
//! system's unit convention. In a frame-bound system the leading coordinate
//! pairs are then merged into sky positions.

use nom::{
    bytes::complete::{take_till1, take_while},
    error::VerboseError,
    multi::many0,
    sequence::preceded,
    IResult,
};

use crate::coordsys::CoordSystem;
use crate::error::RegionError;
use crate::frame::{make_position, Frame, SkyPosition};
use crate::region_types::{FieldKind, RegionTypeSpec};
use crate::units::{parse_angle, parse_quantity, Quantity};

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedField {
    Coordinate(Quantity),
    Length(Quantity),
    Angle(Quantity),
    /// A coordinate pair merged into a frame-bound position.
    Position(SkyPosition),
}

impl ParsedField {
    /// The table kind this field was decoded as; `None` for merged positions.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            ParsedField::Coordinate(_) => Some(FieldKind::Coordinate),
            ParsedField::Length(_) => Some(FieldKind::Length),
            ParsedField::Angle(_) => Some(FieldKind::Angle),
            ParsedField::Position(_) => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            ParsedField::Coordinate(q) | ParsedField::Length(q) | ParsedField::Angle(q) => Some(q),
            ParsedField::Position(_) => None,
        }
    }

    pub fn as_position(&self) -> Option<&SkyPosition> {
        match self {
            ParsedField::Position(p) => Some(p),
            _ => None,
        }
    }
}

/// Decoded fields together with how many literal tokens the payload held.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub fields: Vec<ParsedField>,
    pub token_count: usize,
}

impl Decoded {
    /// Reports a payload whose token count does not fit the region type.
    pub fn field_count_mismatch(&self, spec: &RegionTypeSpec) -> Option<RegionError> {
        if spec.accepts_field_count(self.token_count) {
            return None;
        }
        let head = spec.fixed_head.len();
        let expected = match spec.repeat_unit.filter(|unit| !unit.is_empty()) {
            Some(unit) => {
                let units = self.token_count.saturating_sub(head).div_ceil(unit.len()).max(1);
                head + units * unit.len()
            }
            None => head,
        };
        Some(RegionError::FieldCountMismatch {
            region_type: spec.name.to_string(),
            expected,
            found: self.token_count,
        })
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn parse_tokens(input: &str) -> IResult<&str, Vec<&str>, VerboseError<&str>> {
    many0(preceded(take_while(is_separator), take_till1(is_separator)))(input)
}

/// Splits a field list on commas and whitespace, skipping empty tokens.
pub fn tokenize(payload: &str) -> Vec<&str> {
    parse_tokens(payload)
        .map(|(_, tokens)| tokens)
        .unwrap_or_default()
}

/// Decodes tokens against the field kinds, stopping when either runs out.
pub fn decode_fields(
    tokens: &[&str],
    spec: &RegionTypeSpec,
    system: CoordSystem,
) -> Result<Vec<ParsedField>, RegionError> {
    tokens
        .iter()
        .zip(spec.kinds())
        .enumerate()
        .map(|(index, (literal, kind))| match kind {
            FieldKind::Coordinate => {
                parse_angle(literal, system.unit_convention_at(index)).map(ParsedField::Coordinate)
            }
            FieldKind::Length => parse_quantity(literal).map(ParsedField::Length),
            FieldKind::Angle => parse_quantity(literal).map(ParsedField::Angle),
        })
        .collect()
}

/// Merges the leading angular coordinate pairs into positions in `frame`,
/// keeping every other field after them in order.
pub fn collapse_pairs(fields: Vec<ParsedField>, frame: Frame) -> Vec<ParsedField> {
    let mut merged = Vec::with_capacity(fields.len());
    let mut consumed = 0;
    while let [ParsedField::Coordinate(lon), ParsedField::Coordinate(lat), ..] = &fields[consumed..] {
        match make_position(*lon, *lat, frame) {
            Some(position) => merged.push(ParsedField::Position(position)),
            None => break,
        }
        consumed += 2;
    }
    merged.extend(fields.into_iter().skip(consumed));
    merged
}

/// Tokenizes and decodes a payload under `system`.
pub fn decode(payload: &str, spec: &RegionTypeSpec, system: CoordSystem) -> Result<Decoded, RegionError> {
    let tokens = tokenize(payload);
    let fields = decode_fields(&tokens, spec, system)?;
    let fields = match system.frame() {
        Some(frame) => collapse_pairs(fields, frame),
        None => fields,
    };
    Ok(Decoded {
        fields,
        token_count: tokens.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    fn spec(name: &str) -> &'static RegionTypeSpec {
        RegionTypeSpec::lookup(name).unwrap()
    }

    macro_rules! assert_field {
        ($field:expr, $variant:ident, $value:expr, $unit:expr) => {
            match $field {
                ParsedField::$variant(q) => {
                    assert_eq!(q.unit, $unit, "Unit mismatch for {:?}", q);
                    assert!((q.value - $value).abs() < 1e-9, "Value mismatch: got {}, expected {}", q.value, $value);
                }
                other => panic!("Expected {}, got {:?}", stringify!($variant), other),
            }
        };
    }

    #[test]
    fn test_tokenize_on_commas_and_whitespace() {
        assert_eq!(tokenize("10.0, 20.0, 5\""), vec!["10.0", "20.0", "5\""]);
        assert_eq!(tokenize("  1 2,3 ,4  "), vec!["1", "2", "3", "4"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" , ").is_empty());
    }

    #[test]
    fn test_fixed_arity_types_decode_one_field_per_kind() {
        for name in ["point", "circle", "box", "ellipse", "vector"] {
            let spec = spec(name);
            let arity = spec.arity().unwrap();
            let payload = vec!["1"; arity].join(",");
            let decoded = decode(&payload, spec, CoordSystem::Image).unwrap();
            assert_eq!(decoded.fields.len(), arity, "field count for {}", name);
            let kinds: Vec<_> = decoded.fields.iter().map(|f| f.kind().unwrap()).collect();
            assert_eq!(kinds, spec.kinds().collect::<Vec<_>>(), "kinds for {}", name);
            assert!(decoded.field_count_mismatch(spec).is_none());
        }
    }

    #[test]
    fn test_box_in_image_coordinates() {
        let decoded = decode("4,5,6,7,8", spec("box"), CoordSystem::Image).unwrap();
        assert_field!(&decoded.fields[0], Coordinate, 4.0, Unit::Dimensionless);
        assert_field!(&decoded.fields[1], Coordinate, 5.0, Unit::Dimensionless);
        assert_field!(&decoded.fields[2], Length, 6.0, Unit::Degree);
        assert_field!(&decoded.fields[3], Length, 7.0, Unit::Degree);
        assert_field!(&decoded.fields[4], Angle, 8.0, Unit::Degree);
    }

    #[test]
    fn test_circle_in_fk5_collapses_center() {
        let decoded = decode("10.0, 20.0, 5\"", spec("circle"), CoordSystem::Fk5).unwrap();
        assert_eq!(decoded.fields.len(), 2);
        let center = decoded.fields[0].as_position().expect("center should be a position");
        assert_eq!(center.frame, Frame::Fk5);
        assert_eq!(center.lon, Quantity::degrees(10.0));
        assert_eq!(center.lat, Quantity::degrees(20.0));
        assert_field!(&decoded.fields[1], Length, 5.0, Unit::Arcsecond);
    }

    #[test]
    fn test_polygon_in_galactic_collapses_every_vertex() {
        let decoded = decode("1,2,3,4,5,6", spec("polygon"), CoordSystem::Galactic).unwrap();
        assert_eq!(decoded.fields.len(), 3);
        assert!(decoded.fields.iter().all(|f| f.as_position().map(|p| p.frame) == Some(Frame::Galactic)));
    }

    #[test]
    fn test_odd_polygon_keeps_trailing_coordinate() {
        let decoded = decode("1,2,3,4,5", spec("polygon"), CoordSystem::Icrs).unwrap();
        assert_eq!(decoded.fields.len(), 3);
        assert_field!(&decoded.fields[2], Coordinate, 5.0, Unit::Degree);
        assert_eq!(
            decoded.field_count_mismatch(spec("polygon")),
            Some(RegionError::FieldCountMismatch { region_type: "polygon".to_string(), expected: 6, found: 5 })
        );
    }

    #[test]
    fn test_empty_polygon_is_a_mismatch() {
        let decoded = decode("", spec("polygon"), CoordSystem::Image).unwrap();
        assert!(decoded.fields.is_empty());
        assert_eq!(
            decoded.field_count_mismatch(spec("polygon")),
            Some(RegionError::FieldCountMismatch { region_type: "polygon".to_string(), expected: 2, found: 0 })
        );
    }

    #[test]
    fn test_sexagesimal_pairs_use_hour_then_degree() {
        let decoded = decode("12:30:00, -30:15:00", spec("point"), CoordSystem::Fk4).unwrap();
        let pos = decoded.fields[0].as_position().unwrap();
        assert_eq!(pos.lon.unit, Unit::Hour);
        assert!((pos.lon.value - 12.5).abs() < 1e-9);
        assert_eq!(pos.lat.unit, Unit::Degree);
        assert!((pos.lat.value + 30.25).abs() < 1e-9);
    }

    #[test]
    fn test_ecliptic_positions_use_aliased_frame() {
        let decoded = decode("1,2", spec("point"), CoordSystem::Ecliptic).unwrap();
        assert_eq!(decoded.fields[0].as_position().unwrap().frame, Frame::GeocentricTrueEcliptic);
    }

    #[test]
    fn test_extra_and_missing_tokens_are_truncated() {
        let extra = decode("1,2,3,4", spec("circle"), CoordSystem::Physical).unwrap();
        assert_eq!(extra.fields.len(), 3);
        assert_eq!(extra.token_count, 4);
        assert_eq!(
            extra.field_count_mismatch(spec("circle")),
            Some(RegionError::FieldCountMismatch { region_type: "circle".to_string(), expected: 3, found: 4 })
        );

        let missing = decode("1,2", spec("box"), CoordSystem::Physical).unwrap();
        assert_eq!(missing.fields.len(), 2);
        assert!(missing.field_count_mismatch(spec("box")).is_some());
    }

    #[test]
    fn test_bad_length_suffix_fails_decode() {
        assert_eq!(
            decode("1,2,3q", spec("circle"), CoordSystem::Image),
            Err(RegionError::UnknownUnitSuffix { literal: "3q".to_string(), suffix: 'q' })
        );
    }

    #[test]
    fn test_non_angular_pairs_are_not_collapsed() {
        let fields = vec![
            ParsedField::Coordinate(Quantity::dimensionless(1.0)),
            ParsedField::Coordinate(Quantity::degrees(2.0)),
        ];
        assert_eq!(collapse_pairs(fields.clone(), Frame::Fk5), fields);
    }
}
