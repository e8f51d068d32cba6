//! Error types with rich diagnostics using miette
//!
//! Parse errors carry the path data and a span so a caller can print the
//! offending token in context. Geometry errors are plain values.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Problems found while tokenizing path data.
///
/// None of these abort a lenient parse: the offending token is skipped and
/// the error is collected next to the segments that did parse.
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("unknown path command `{letter}`")]
    #[diagnostic(
        code(vectis::parse::unknown_command),
        help("supported commands are M L H V Q T C S A Z (and their lowercase forms)")
    )]
    UnknownCommand {
        letter: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a path command")]
        span: SourceSpan,
    },

    #[error("invalid number `{text}`")]
    #[diagnostic(code(vectis::parse::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot be read as a number")]
        span: SourceSpan,
    },

    #[error("unexpected `{text}` in path data")]
    #[diagnostic(code(vectis::parse::stray_token))]
    StrayToken {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("skipped")]
        span: SourceSpan,
    },

    #[error("numbers before the first command")]
    #[diagnostic(
        code(vectis::parse::orphan_arguments),
        help("path data must start with a moveto (`M` or `m`)")
    )]
    OrphanArguments {
        #[source_code]
        src: NamedSource<String>,
        #[label("these belong to no command")]
        span: SourceSpan,
    },

    #[error("malformed path data: {message}")]
    #[diagnostic(code(vectis::parse::grammar))]
    Grammar { message: String },
}

/// Problems reading a numeric attribute value.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum AttributeError {
    #[error("attribute `{name}` has non-numeric value `{value}`")]
    #[diagnostic(code(vectis::attr::invalid_number))]
    InvalidNumber { name: String, value: String },
}

// ============================================================================
// Geometry Errors
// ============================================================================

/// Operations a shape cannot answer correctly.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("{operation} is not implemented for {shape}")]
    #[diagnostic(
        code(vectis::shape::unsupported),
        help("convert the shape with `to_path()` and query the path instead")
    )]
    Unsupported {
        shape: &'static str,
        operation: &'static str,
    },

    #[error("segment index {index} out of range for path of {len} segments")]
    #[diagnostic(code(vectis::shape::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },
}

/// Affine transform failures.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("transform is not invertible (determinant {determinant})")]
    #[diagnostic(code(vectis::transform::singular))]
    Singular { determinant: f64 },
}
