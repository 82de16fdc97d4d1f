//! # Units and Angles
//!
//! Parsers turning a single field literal into a [`Quantity`]. Coordinates
//! are resolved with a [`UnitConvention`] hint from the active coordinate
//! system; lengths and angles look at their trailing unit suffix instead.
//! Values are kept in the unit they were written in.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char as nom_char, digit0, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    error::{context, VerboseError},
    number::complete::double,
    sequence::{pair, preceded, tuple},
    Finish, IResult,
};
use std::f64::consts::PI;
use std::fmt;

use crate::error::RegionError;

type UnitResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Degree,
    Hour,
    Arcminute,
    Arcsecond,
    Radian,
    Dimensionless,
}

impl Unit {
    /// Maps a DS9 length/angle suffix to its unit.
    pub fn from_suffix(suffix: char) -> Option<Unit> {
        match suffix {
            '"' => Some(Unit::Arcsecond),
            '\'' => Some(Unit::Arcminute),
            'r' => Some(Unit::Radian),
            'i' => Some(Unit::Dimensionless),
            'd' => Some(Unit::Degree),
            _ => None,
        }
    }

    pub fn is_angular(self) -> bool {
        !matches!(self, Unit::Dimensionless)
    }

    fn degrees_per_unit(self) -> Option<f64> {
        match self {
            Unit::Degree => Some(1.0),
            Unit::Hour => Some(15.0),
            Unit::Arcminute => Some(1.0 / 60.0),
            Unit::Arcsecond => Some(1.0 / 3600.0),
            Unit::Radian => Some(180.0 / PI),
            Unit::Dimensionless => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Degree => "deg",
            Unit::Hour => "hourangle",
            Unit::Arcminute => "arcmin",
            Unit::Arcsecond => "arcsec",
            Unit::Radian => "rad",
            Unit::Dimensionless => "",
        }
    }
}

/// A number tagged with the unit it was written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    pub fn degrees(value: f64) -> Self {
        Quantity::new(value, Unit::Degree)
    }

    pub fn hours(value: f64) -> Self {
        Quantity::new(value, Unit::Hour)
    }

    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Unit::Dimensionless)
    }

    pub fn is_angle(&self) -> bool {
        self.unit.is_angular()
    }

    /// Converts an angular quantity to degrees; `None` for dimensionless values.
    pub fn to_degrees(&self) -> Option<f64> {
        self.unit.degrees_per_unit().map(|scale| self.value * scale)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.value),
            unit => write!(f, "{} {}", self.value, unit.symbol()),
        }
    }
}

/// How an un-suffixed coordinate literal is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitConvention {
    /// Hours when the literal is sexagesimal (contains `:`), degrees otherwise.
    HourOrDegree,
    Degree,
    Dimensionless,
}

// --- Helper Parsers for Numbers ---

fn parse_optional_sign(input: &str) -> UnitResult<'_, Option<char>> {
    opt(alt((nom_char('+'), nom_char('-'))))(input)
}

/// Unsigned decimal such as `12`, `12.`, `12.5` or `.5`.
fn parse_unsigned(input: &str) -> UnitResult<'_, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(nom_char('.'), digit0)))),
            recognize(pair(nom_char('.'), digit1)),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn parse_number(input: &str) -> UnitResult<'_, f64> {
    double(input)
}

fn signed(sign: Option<char>, magnitude: f64) -> f64 {
    if sign == Some('-') {
        -magnitude
    } else {
        magnitude
    }
}

// --- Sexagesimal Formats ---

/// Parses `HHh[MMm[SSs]]` or `DDd[MMm[SSs]]`, returning the value in the
/// leading component's unit.
fn parse_lettered_sexagesimal<'a>(
    lead: &'static str,
    ctx_label: &'static str,
) -> impl FnMut(&'a str) -> UnitResult<'a, f64> {
    move |input: &'a str| {
        context(
            ctx_label,
            map(
                tuple((
                    parse_optional_sign,
                    parse_unsigned,
                    tag_no_case(lead),
                    opt(tuple((
                        parse_unsigned,
                        tag_no_case("m"),
                        opt(pair(parse_unsigned, tag_no_case("s"))),
                    ))),
                )),
                |(sign, v1, _, rest)| {
                    let mut total = v1;
                    if let Some((v2, _, seconds)) = rest {
                        total += v2 / 60.0;
                        if let Some((v3, _)) = seconds {
                            total += v3 / 3600.0;
                        }
                    }
                    signed(sign, total)
                },
            ),
        )(input)
    }
}

/// Parses `V1:V2[:V3]`; the sign applies to the whole value.
fn parse_colon_sexagesimal(input: &str) -> UnitResult<'_, f64> {
    context(
        "colon-separated sexagesimal",
        map(
            tuple((
                parse_optional_sign,
                parse_unsigned,
                nom_char(':'),
                parse_unsigned,
                opt(preceded(nom_char(':'), parse_unsigned)),
            )),
            |(sign, v1, _, v2, v3)| signed(sign, v1 + v2 / 60.0 + v3.unwrap_or(0.0) / 3600.0),
        ),
    )(input)
}

/// A coordinate written with its own unit, which overrides any hint.
fn parse_explicit_unit_angle(input: &str) -> UnitResult<'_, Quantity> {
    context(
        "angle with explicit unit",
        alt((
            map(
                parse_lettered_sexagesimal("h", "HMS format (e.g. 10h20m30s)"),
                Quantity::hours,
            ),
            map(
                parse_lettered_sexagesimal("d", "DMS format (e.g. +10d20m30s)"),
                Quantity::degrees,
            ),
            map(
                pair(
                    parse_number,
                    alt((
                        value(Unit::Arcminute, nom_char('\'')),
                        value(Unit::Arcsecond, nom_char('"')),
                        value(Unit::Radian, tag_no_case("r")),
                    )),
                ),
                |(v, unit)| Quantity::new(v, unit),
            ),
        )),
    )(input)
}

/// Resolves a coordinate literal under the given unit convention.
pub fn parse_angle(literal: &str, hint: UnitConvention) -> Result<Quantity, RegionError> {
    if let Ok((_, explicit)) = all_consuming(parse_explicit_unit_angle)(literal).finish() {
        return Ok(explicit);
    }

    let parsed = match hint {
        UnitConvention::HourOrDegree if literal.contains(':') => {
            all_consuming(map(parse_colon_sexagesimal, Quantity::hours))(literal)
        }
        UnitConvention::HourOrDegree | UnitConvention::Degree => all_consuming(alt((
            map(parse_colon_sexagesimal, Quantity::degrees),
            map(parse_number, Quantity::degrees),
        )))(literal),
        UnitConvention::Dimensionless => {
            all_consuming(map(parse_number, Quantity::dimensionless))(literal)
        }
    };

    parsed
        .finish()
        .map(|(_, quantity)| quantity)
        .map_err(|_| RegionError::malformed(literal))
}

/// Resolves a length or angle literal from its trailing unit suffix,
/// defaulting to degrees when the literal is a bare number.
pub fn parse_quantity(literal: &str) -> Result<Quantity, RegionError> {
    let Some(last) = literal.chars().last() else {
        return Err(RegionError::malformed(literal));
    };

    let number = |text: &str| {
        all_consuming(parse_number)(text)
            .finish()
            .ok()
            .map(|(_, v)| v)
    };

    if let Some(unit) = Unit::from_suffix(last) {
        let prefix = &literal[..literal.len() - last.len_utf8()];
        return number(prefix)
            .map(|v| Quantity::new(v, unit))
            .ok_or_else(|| RegionError::malformed(literal));
    }

    match number(literal) {
        Some(v) => Ok(Quantity::degrees(v)),
        None if last.is_ascii_digit() || last == '.' => Err(RegionError::malformed(literal)),
        None => Err(RegionError::UnknownUnitSuffix {
            literal: literal.to_string(),
            suffix: last,
        }),
    }
}
