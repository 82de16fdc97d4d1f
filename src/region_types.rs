//! # Region Types
//!
//! Table mapping each region keyword to the kinds of the fields it takes.
//! Variable-arity types carry a repeating unit that is cycled lazily after
//! the fixed head; the decoder stops at whichever of tokens or kinds runs
//! out first. Supporting a new region type means adding a row here.

use std::iter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Coordinate,
    Length,
    Angle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionTypeSpec {
    pub name: &'static str,
    pub fixed_head: &'static [FieldKind],
    pub repeat_unit: Option<&'static [FieldKind]>,
}

impl RegionTypeSpec {
    pub fn lookup(name: &str) -> Option<&'static RegionTypeSpec> {
        REGION_TYPES
            .iter()
            .copied()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    pub fn all() -> &'static [&'static RegionTypeSpec] {
        REGION_TYPES
    }

    /// The field kinds in order, endless for variable-arity types.
    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        let repeat = self.repeat_unit.unwrap_or(&[]);
        let cycles = if repeat.is_empty() { 0 } else { usize::MAX };
        self.fixed_head
            .iter()
            .copied()
            .chain(iter::repeat(repeat).take(cycles).flatten().copied())
    }

    pub fn is_variable(&self) -> bool {
        self.repeat_unit.is_some_and(|unit| !unit.is_empty())
    }

    /// Field count of a fixed-arity type.
    pub fn arity(&self) -> Option<usize> {
        (!self.is_variable()).then_some(self.fixed_head.len())
    }

    /// Whether `found` fields fill the head and a whole, non-zero number of
    /// repeat units.
    pub fn accepts_field_count(&self, found: usize) -> bool {
        match self.repeat_unit.filter(|unit| !unit.is_empty()) {
            None => found == self.fixed_head.len(),
            Some(unit) => {
                found > self.fixed_head.len() && (found - self.fixed_head.len()) % unit.len() == 0
            }
        }
    }
}

// --- Region Type Table ---
macro_rules! kinds { ($($x:expr),* $(,)?) => { &[$($x),*] } }
use FieldKind::*;
static POINT: RegionTypeSpec = RegionTypeSpec { name: "point", fixed_head: kinds![Coordinate, Coordinate], repeat_unit: None };
static CIRCLE: RegionTypeSpec = RegionTypeSpec { name: "circle", fixed_head: kinds![Coordinate, Coordinate, Length], repeat_unit: None };
static BOX: RegionTypeSpec = RegionTypeSpec { name: "box", fixed_head: kinds![Coordinate, Coordinate, Length, Length, Angle], repeat_unit: None };
static POLYGON: RegionTypeSpec = RegionTypeSpec { name: "polygon", fixed_head: kinds![], repeat_unit: Some(kinds![Coordinate, Coordinate]) };
static ELLIPSE: RegionTypeSpec = RegionTypeSpec { name: "ellipse", fixed_head: kinds![Coordinate, Coordinate, Length, Length, Angle], repeat_unit: None };
static ANNULUS: RegionTypeSpec = RegionTypeSpec { name: "annulus", fixed_head: kinds![Coordinate, Coordinate], repeat_unit: Some(kinds![Length]) };
static VECTOR: RegionTypeSpec = RegionTypeSpec { name: "vector", fixed_head: kinds![Coordinate, Coordinate, Length, Angle], repeat_unit: None };

static REGION_TYPES: &[&RegionTypeSpec] = &[&POINT, &CIRCLE, &BOX, &POLYGON, &ELLIPSE, &ANNULUS, &VECTOR];
