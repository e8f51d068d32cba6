//! Parse path data and numeric attribute values with the pest grammar
//!
//! Path parsing is token-local: a bad token is reported and skipped, and the
//! rest of the path still parses. `ParseMode::Strict` turns the first report
//! into an error instead.

use miette::NamedSource;
use pest::Parser;
use pest::iterators::Pair;

use crate::errors::{AttributeError, ParseError};
use crate::log::{debug, warn};
use crate::shapes::Path;
use crate::{PathDataParser, Rule};

/// How to treat malformed path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip bad tokens and collect diagnostics.
    #[default]
    Lenient,
    /// Fail on the first bad token.
    Strict,
}

/// A parsed path plus everything that had to be skipped to build it.
#[derive(Debug, Default)]
pub struct ParsedPath {
    pub path: Path,
    pub diagnostics: Vec<ParseError>,
}

impl ParsedPath {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parse path data leniently.
pub fn parse_path_data(d: &str) -> ParsedPath {
    let mut builder = PathBuilder::new(d, ParseMode::Lenient);
    if let Err(err) = builder.run() {
        // Only strict mode or a grammar failure ends a parse early.
        builder.diagnostics.push(err);
    }
    builder.finish()
}

/// Parse path data in the given mode.
pub fn parse_path_data_with(d: &str, mode: ParseMode) -> Result<ParsedPath, ParseError> {
    let mut builder = PathBuilder::new(d, mode);
    builder.run()?;
    Ok(builder.finish())
}

struct PathBuilder<'a> {
    source: &'a str,
    mode: ParseMode,
    path: Path,
    diagnostics: Vec<ParseError>,
}

impl<'a> PathBuilder<'a> {
    fn new(source: &'a str, mode: ParseMode) -> Self {
        Self {
            source,
            mode,
            path: Path::new(),
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> ParsedPath {
        ParsedPath {
            path: self.path,
            diagnostics: self.diagnostics,
        }
    }

    /// Diagnostics are labelled `d`, after the attribute path data lives in.
    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new("d", self.source.to_string())
    }

    fn report(&mut self, err: ParseError) -> Result<(), ParseError> {
        match self.mode {
            ParseMode::Strict => Err(err),
            ParseMode::Lenient => {
                warn!(%err, "skipping malformed path data");
                self.diagnostics.push(err);
                Ok(())
            }
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        let pairs = PathDataParser::parse(Rule::path_data, self.source).map_err(|e| ParseError::Grammar {
            message: e.to_string(),
        })?;

        for pair in pairs.flat_map(|p| p.into_inner()) {
            match pair.as_rule() {
                Rule::leading => {
                    let span = pair.as_span();
                    self.report(ParseError::OrphanArguments {
                        src: self.named_source(),
                        span: (span.start(), span.end() - span.start()).into(),
                    })?;
                }
                Rule::command | Rule::arc_command => self.command(pair)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn command(&mut self, pair: Pair<'_, Rule>) -> Result<(), ParseError> {
        let mut inner = pair.into_inner();
        let Some(letter_pair) = inner.next() else {
            return Ok(());
        };
        let letter = letter_pair.as_str().chars().next().unwrap_or_default();
        let relative = letter.is_ascii_lowercase();

        let mut values = Vec::new();
        let mut args_span: Option<(usize, usize)> = None;
        for arg in inner {
            let span = arg.as_span();
            args_span = Some(match args_span {
                Some((start, _)) => (start, span.end()),
                None => (span.start(), span.end()),
            });
            match arg.as_rule() {
                Rule::number | Rule::flag => match arg.as_str().parse::<f64>() {
                    Ok(v) if v.is_finite() => values.push(v),
                    _ => self.report(ParseError::InvalidNumber {
                        text: arg.as_str().to_string(),
                        src: self.named_source(),
                        span: (span.start(), span.end() - span.start()).into(),
                    })?,
                },
                _ => self.report(ParseError::StrayToken {
                    text: arg.as_str().to_string(),
                    src: self.named_source(),
                    span: (span.start(), span.end() - span.start()).into(),
                })?,
            }
        }

        let path = &mut self.path;
        match letter.to_ascii_uppercase() {
            'M' => {
                path.move_to_list(&values, relative);
            }
            'L' => {
                path.line_to_list(&values, relative);
            }
            'H' => {
                path.h_line_to_list(&values, relative);
            }
            'V' => {
                path.v_line_to_list(&values, relative);
            }
            'Q' => {
                path.quad_to_list(&values, relative);
            }
            'T' => {
                path.short_quad_to_list(&values, relative);
            }
            'C' => {
                path.cubic_to_list(&values, relative);
            }
            'S' => {
                path.short_cubic_to_list(&values, relative);
            }
            'A' => {
                path.arc_to_list(&values, relative);
            }
            'Z' => {
                path.close();
                if let Some((start, end)) = args_span.filter(|_| !values.is_empty()) {
                    self.report(ParseError::OrphanArguments {
                        src: self.named_source(),
                        span: (start, end - start).into(),
                    })?;
                }
            }
            _ => {
                let span = letter_pair.as_span();
                self.report(ParseError::UnknownCommand {
                    letter,
                    src: self.named_source(),
                    span: (span.start(), 1).into(),
                })?;
            }
        }
        debug!(%letter, segments = self.path.len(), "path command");
        Ok(())
    }
}

// ============================================================================
// Lengths
// ============================================================================

fn first_number(pair: Pair<'_, Rule>) -> Option<f64> {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::number)
        .and_then(|p| p.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a single length such as `3`, `-1.5e2` or `12px`. The unit is
/// dropped.
pub fn parse_length(value: &str) -> Option<f64> {
    let root = PathDataParser::parse(Rule::length_value, value).ok()?.next()?;
    let length = root.into_inner().find(|p| p.as_rule() == Rule::length)?;
    first_number(length)
}

/// Every length in a whitespace/comma separated list; junk is skipped.
pub fn parse_length_list(value: &str) -> Vec<f64> {
    let Ok(pairs) = PathDataParser::parse(Rule::length_list, value) else {
        return Vec::new();
    };
    pairs
        .flat_map(|p| p.into_inner())
        .filter(|p| p.as_rule() == Rule::length)
        .filter_map(first_number)
        .collect()
}

/// A numeric attribute value.
pub fn parse_number_attr(name: &str, value: &str) -> Result<f64, AttributeError> {
    parse_length(value).ok_or_else(|| AttributeError::InvalidNumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// An SVG `viewBox`: the visible region in user units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// A view box with no area cannot be fitted to a viewport.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Parse `"min-x min-y width height"`. Missing values are zero; extra values
/// are ignored.
pub fn parse_view_box(value: &str) -> ViewBox {
    let mut numbers = parse_length_list(value);
    if numbers.len() > 4 {
        debug!(count = numbers.len(), "ignoring extra viewBox values");
    }
    numbers.resize(4, 0.0);
    ViewBox {
        min_x: numbers[0],
        min_y: numbers[1],
        width: numbers[2],
        height: numbers[3],
    }
}
