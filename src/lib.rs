//! # DS9 Regions
//!
//! A parser for DS9 region files, written in Rust using nom 7.1.
//! Region text is turned into an ordered list of [`Entry`] values: single
//! regions and composite groups, each field decoded to a typed quantity or,
//! in celestial coordinate systems, a frame-bound [`SkyPosition`].
//! Python bindings are available behind the `python` feature.
//!
//! ```
//! use ds9_regions::{parse_regions, ParsedField};
//!
//! let entries = parse_regions("fk5\ncircle(10.0, 20.0, 5\")").unwrap();
//! let circle = entries[0].as_region().unwrap();
//! assert_eq!(circle.region_type, "circle");
//! assert!(matches!(circle.fields[0], ParsedField::Position(_)));
//! ```

pub mod classify;
pub mod composite;
pub mod coordsys;
pub mod decode;
pub mod error;
pub mod frame;
pub mod parser;
pub mod properties;
pub mod region;
pub mod region_types;
pub mod units;

#[cfg(feature = "python")]
mod python;

use std::path::Path;

pub use coordsys::CoordSystem;
pub use decode::ParsedField;
pub use error::{Error, RegionError, Result};
pub use frame::{Frame, SkyPosition};
pub use parser::{DanglingComposite, ParserConfig, ParserState, RegionParser};
pub use properties::{AttributeValue, Properties};
pub use region::{CompositeRegion, Entry, Region};
pub use region_types::{FieldKind, RegionTypeSpec};
pub use units::{Quantity, Unit, UnitConvention};

/// Parses region text with the default configuration.
pub fn parse_regions(text: &str) -> Result<Vec<Entry>> {
    RegionParser::new().parse_str(text)
}

/// Reads and parses a region file with the default configuration.
pub fn parse_region_file(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    RegionParser::new().parse_file(path)
}
