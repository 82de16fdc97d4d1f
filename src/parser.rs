//! # Region File Driver
//!
//! Walks a region document statement by statement. Lines are split on `;`
//! and after every `||` continuation marker; each statement is classified,
//! decoded and fed to the composite accumulator. The active coordinate
//! system and the open composite chain live in [`ParserState`], which is
//! passed into and returned from every step.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::classify::{classify, LineKind, RegionLine, CONTINUATION_MARKER};
use crate::composite::Accumulator;
use crate::coordsys::CoordSystem;
use crate::decode::decode;
use crate::error::{Error, RegionError, Result};
use crate::properties::parse_properties;
use crate::region::{Entry, Region};

/// Statement separator within a line.
pub const STATEMENT_SEPARATOR: char = ';';

/// What to do with a composite chain still open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingComposite {
    /// Emit the partial chain as a composite and log a warning.
    #[default]
    Emit,
    /// Discard the partial chain and log a warning.
    Drop,
    /// Fail the parse with [`RegionError::DanglingComposite`].
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Fail instead of warning when a region's token count does not fit its type.
    pub strict_field_count: bool,
    pub dangling: DanglingComposite,
}

impl ParserConfig {
    pub fn with_strict_field_count(mut self, strict: bool) -> Self {
        self.strict_field_count = strict;
        self
    }

    pub fn with_dangling(mut self, dangling: DanglingComposite) -> Self {
        self.dangling = dangling;
        self
    }
}

/// State threaded from one statement to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserState {
    pub system: Option<CoordSystem>,
    pub composite: Accumulator,
}

/// Splits one source line into statements: on `;`, and after each `||`
/// that precedes the line's comment. A comment following the last marker
/// stays with the statement it annotates.
pub fn statements(line: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    for statement in line.split(STATEMENT_SEPARATOR) {
        let code_end = statement.find('#').unwrap_or(statement.len());
        let mut start = 0;
        while let Some(offset) = statement[start..code_end].find(CONTINUATION_MARKER) {
            let end = start + offset + CONTINUATION_MARKER.len();
            pieces.push(&statement[start..end]);
            start = end;
        }
        let tail = statement[start..].trim_start();
        if start > 0 && (tail.is_empty() || tail.starts_with('#')) {
            if let Some(last) = pieces.pop() {
                let last_start = start - last.len();
                pieces.push(&statement[last_start..]);
            }
        } else {
            pieces.push(&statement[start..]);
        }
    }
    pieces
}

#[derive(Debug, Clone, Default)]
pub struct RegionParser {
    config: ParserConfig,
}

impl RegionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        RegionParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Consumes one statement, returning the next state and any region or
    /// composite that became complete.
    pub fn step(
        &self,
        state: ParserState,
        statement: &str,
    ) -> Result<(ParserState, Option<Entry>), RegionError> {
        match classify(statement, state.system)? {
            LineKind::Ignore => Ok((state, None)),
            LineKind::CoordSysDecl(system) => {
                debug!(%system, "coordinate system declared");
                Ok((
                    ParserState {
                        system: Some(system),
                        ..state
                    },
                    None,
                ))
            }
            LineKind::RegionLine(line) => {
                let is_continuation = line.is_continuation;
                let region = self.build_region(line)?;
                let (composite, entry) = state.composite.push(region, is_continuation);
                Ok((
                    ParserState {
                        system: state.system,
                        composite,
                    },
                    entry,
                ))
            }
        }
    }

    fn build_region(&self, line: RegionLine<'_>) -> Result<Region, RegionError> {
        let decoded = decode(&line.payload, line.spec, line.system)?;
        if let Some(mismatch) = decoded.field_count_mismatch(line.spec) {
            if self.config.strict_field_count {
                return Err(mismatch);
            }
            warn!(%mismatch, "decoding stopped at the shorter of tokens and field kinds");
        }

        let (properties, unparsed) = parse_properties(line.properties);
        if !unparsed.is_empty() {
            warn!(region_type = line.spec.name, unparsed, "ignoring unparsed region properties");
        }

        trace!(
            region_type = line.spec.name,
            fields = decoded.fields.len(),
            has_properties = !properties.is_empty(),
            "parsed region"
        );
        Ok(Region {
            region_type: line.spec.name,
            system: line.system,
            fields: decoded.fields,
            exclude: line.exclude,
            properties,
        })
    }

    /// Runs every statement of a source line through [`RegionParser::step`].
    pub fn parse_line(
        &self,
        state: ParserState,
        line: &str,
    ) -> Result<(ParserState, Vec<Entry>), RegionError> {
        statements(line)
            .into_iter()
            .try_fold((state, Vec::new()), |(state, mut entries), statement| {
                let (state, entry) = self.step(state, statement)?;
                entries.extend(entry);
                Ok((state, entries))
            })
    }

    /// Resolves a composite chain left open at end of input.
    pub fn finish(&self, state: ParserState) -> Result<Option<Entry>, RegionError> {
        let Some(chain) = state.composite.into_open_chain() else {
            return Ok(None);
        };
        match self.config.dangling {
            DanglingComposite::Emit => {
                warn!(members = chain.len(), "emitting composite region left open at end of input");
                Ok(Some(Entry::Composite(chain)))
            }
            DanglingComposite::Drop => {
                warn!(members = chain.len(), "dropping composite region left open at end of input");
                Ok(None)
            }
            DanglingComposite::Error => Err(RegionError::DanglingComposite {
                members: chain.len(),
            }),
        }
    }

    pub fn parse_str(&self, text: &str) -> Result<Vec<Entry>> {
        let mut run = Run::new(self);
        for line in text.lines() {
            run.feed(line)?;
        }
        run.finish()
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Entry>> {
        let mut run = Run::new(self);
        for line in reader.lines() {
            run.feed(&line?)?;
        }
        run.finish()
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Entry>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "parsing region file");
        self.parse_str(&text)
    }
}

/// Accumulated fold over the lines of one document.
struct Run<'p> {
    parser: &'p RegionParser,
    state: ParserState,
    entries: Vec<Entry>,
    line: usize,
}

impl<'p> Run<'p> {
    fn new(parser: &'p RegionParser) -> Self {
        Run {
            parser,
            state: ParserState::default(),
            entries: Vec::new(),
            line: 0,
        }
    }

    fn feed(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        let state = std::mem::take(&mut self.state);
        let (state, entries) = self
            .parser
            .parse_line(state, line)
            .map_err(|source| Error::Parse {
                line: self.line,
                source,
            })?;
        self.state = state;
        self.entries.extend(entries);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Entry>> {
        let tail = self
            .parser
            .finish(self.state)
            .map_err(|source| Error::Parse {
                line: self.line,
                source,
            })?;
        self.entries.extend(tail);
        Ok(self.entries)
    }
}
