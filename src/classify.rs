//! # Line Classification
//!
//! Decides what a single statement is: a coordinate system declaration, a
//! region definition, or something to skip (blank lines, comments, `global`
//! settings, unknown keywords). The first alphanumeric word of the statement
//! decides; a leading `#` does not hide it.

use nom::{
    bytes::complete::take_till,
    character::complete::{alphanumeric1, char as nom_char, multispace0},
    error::{context, VerboseError},
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::coordsys::CoordSystem;
use crate::error::RegionError;
use crate::region_types::RegionTypeSpec;

/// Marks a region as continuing into the next one of a composite.
pub const CONTINUATION_MARKER: &str = "||";

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    CoordSysDecl(CoordSystem),
    RegionLine(RegionLine<'a>),
    Ignore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionLine<'a> {
    pub spec: &'static RegionTypeSpec,
    pub system: CoordSystem,
    /// Field list with parentheses, surrounding blanks and `|` removed.
    pub payload: String,
    /// Text after the field list and any continuation marker, without a
    /// leading `#`.
    pub properties: &'a str,
    pub exclude: bool,
    pub is_continuation: bool,
}

/// Splits a statement into the text before its first word and the word.
fn parse_leading_identifier(input: &str) -> IResult<&str, (&str, &str), VerboseError<&str>> {
    context(
        "leading identifier",
        pair(take_till(|c: char| c.is_ascii_alphanumeric()), alphanumeric1),
    )(input)
}

/// Parses a parenthesised field list, returning what is inside.
fn parse_field_list(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    context(
        "field list",
        preceded(multispace0, delimited(nom_char('('), take_till(|c: char| c == ')'), nom_char(')'))),
    )(input)
}

/// Splits the text after a region name into its fields and the trailing
/// text. Without parentheses the fields run up to the first `#`.
fn split_fields(rest: &str) -> (&str, &str) {
    if let Ok((trailing, fields)) = parse_field_list(rest) {
        return (fields, trailing);
    }
    match rest.find('#') {
        Some(hash) => (&rest[..hash], &rest[hash..]),
        None => (rest, ""),
    }
}

pub fn classify(line: &str, active_system: Option<CoordSystem>) -> Result<LineKind<'_>, RegionError> {
    let Ok((rest, (prefix, identifier))) = parse_leading_identifier(line) else {
        return Ok(LineKind::Ignore);
    };

    if let Some(system) = CoordSystem::lookup(identifier) {
        return Ok(LineKind::CoordSysDecl(system));
    }

    let Some(spec) = RegionTypeSpec::lookup(identifier) else {
        return Ok(LineKind::Ignore);
    };

    let system = active_system.ok_or_else(|| RegionError::UnboundCoordinateSystem {
        region_type: spec.name.to_string(),
    })?;

    let (fields, trailing) = split_fields(rest);
    let trailing = trailing.trim_start();
    let (marker_after, trailing) = match trailing.strip_prefix(CONTINUATION_MARKER) {
        Some(after) => (true, after),
        None => (false, trailing),
    };
    let properties = trailing.trim_start();
    let properties = properties.strip_prefix('#').unwrap_or(properties);
    let payload = fields
        .chars()
        .filter(|&c| c != '(' && c != ')')
        .collect::<String>()
        .trim_matches(|c: char| c.is_whitespace() || c == '|')
        .to_string();

    Ok(LineKind::RegionLine(RegionLine {
        spec,
        system,
        payload,
        properties: properties.trim(),
        exclude: prefix.trim_end().ends_with('-'),
        is_continuation: marker_after || fields.contains(CONTINUATION_MARKER),
    }))
}
