//! Error types with rich diagnostics using miette
//!
//! Every error is local to one command: the session reports it and moves on.

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T, E = PixlabError> = std::result::Result<T, E>;

/// How many arguments a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(1) => write!(f, "exactly 1 argument"),
            Arity::Exactly(n) => write!(f, "exactly {n} arguments"),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {n} arguments"),
        }
    }
}

/// Which part of a resolution literal failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPart {
    Width,
    Height,
    /// The single side of a square resolution, e.g. `noise(512)`
    Side,
}

impl fmt::Display for ResolutionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionPart::Width => f.write_str("width"),
            ResolutionPart::Height => f.write_str("height"),
            ResolutionPart::Side => f.write_str("side"),
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum PixlabError {
    // ========================================================================
    // Compile errors
    // ========================================================================
    #[error("syntax error: {message}")]
    #[diagnostic(code(pixlab::compile::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unknown function: {name}")]
    #[diagnostic(code(pixlab::compile::unknown_function))]
    UnknownFunction {
        name: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("{name} takes {expected}, got {got}")]
    #[diagnostic(code(pixlab::compile::argument_count))]
    ArgumentCount {
        name: String,
        expected: Arity,
        got: usize,
    },

    #[error("invalid resolution {part}: `{text}` is not a positive whole number")]
    #[diagnostic(
        code(pixlab::compile::resolution),
        help("write resolutions as `512`, `1920x1080` or a name like `hd`")
    )]
    Resolution { part: ResolutionPart, text: String },

    #[error("unknown resolution: {name}")]
    #[diagnostic(code(pixlab::compile::unknown_resolution))]
    UnknownResolution {
        name: String,
        #[help]
        known: String,
    },

    #[error("resolution `{text}` can only be passed to a generator")]
    #[diagnostic(code(pixlab::compile::misplaced_resolution))]
    MisplacedResolution { text: String },

    // ========================================================================
    // Evaluation and coercion errors
    // ========================================================================
    #[error("bad argument: {message}")]
    #[diagnostic(code(pixlab::eval::bad_argument))]
    BadArgument { message: String },

    #[error("cannot use {found} as an image or a color")]
    #[diagnostic(
        code(pixlab::eval::unknown_argument),
        help("pass a node name, a number, or an array of 2, 3 or 4 numbers")
    )]
    UnknownArgument { found: String },

    #[error("unknown symbol: {name}")]
    #[diagnostic(code(pixlab::eval::unknown_symbol))]
    UnknownSymbol { name: String },

    #[error("division by zero")]
    #[diagnostic(code(pixlab::eval::division_by_zero))]
    DivisionByZero,

    #[error("result is NaN or infinite")]
    #[diagnostic(code(pixlab::eval::invalid_numeric))]
    InvalidNumeric,

    // ========================================================================
    // Assignment errors
    // ========================================================================
    #[error("node not found: {name}")]
    #[diagnostic(code(pixlab::assign::node_not_found))]
    NodeNotFound { name: String },

    #[error("property {property} of node {name} not found")]
    #[diagnostic(code(pixlab::assign::property_not_found))]
    PropertyNotFound {
        name: String,
        property: String,
        /// Every property the node does have, in declaration order
        valid: Vec<&'static str>,
        #[help]
        listing: String,
    },

    #[error("enum value {value} not found")]
    #[diagnostic(code(pixlab::assign::enum_value_not_found))]
    EnumValueNotFound {
        value: String,
        cases: Vec<&'static str>,
        #[help]
        listing: String,
    },

    #[error("enum values start with a dot, e.g. `{property} = .{example}`")]
    #[diagnostic(code(pixlab::assign::enum_syntax))]
    EnumSyntax {
        property: String,
        example: &'static str,
    },

    #[error("{property} needs {expected}, got {got} value(s)")]
    #[diagnostic(code(pixlab::assign::arity_mismatch))]
    ArityMismatch {
        property: String,
        /// The expected shape, e.g. `[x,y]`
        expected: &'static str,
        got: usize,
    },

    #[error("assignment has no name")]
    #[diagnostic(code(pixlab::assign::empty_name))]
    EmptyName,

    #[error("assignment to {name} has no value")]
    #[diagnostic(code(pixlab::assign::empty_value))]
    EmptyValue { name: String },

    #[error("invalid node name: {name}")]
    #[diagnostic(
        code(pixlab::assign::invalid_name),
        help("names start with a letter or `_` and contain only letters, digits and `_`")
    )]
    InvalidName { name: String },

    #[error("nested property paths are not supported: {path}")]
    #[diagnostic(
        code(pixlab::assign::nested_path),
        help("use exactly one dot: `name.property`")
    )]
    NestedPath { path: String },
}

impl PixlabError {
    pub(crate) fn syntax(message: impl Into<String>, source: &str, span: SourceSpan) -> Self {
        PixlabError::Syntax {
            message: message.into(),
            src: NamedSource::new("<command>", source.to_string()),
            span,
        }
    }

    pub(crate) fn bad_argument(message: impl Into<String>) -> Self {
        PixlabError::BadArgument {
            message: message.into(),
        }
    }

    pub(crate) fn property_not_found(
        name: impl Into<String>,
        property: impl Into<String>,
        valid: Vec<&'static str>,
    ) -> Self {
        let listing = dotted_listing(&valid);
        PixlabError::PropertyNotFound {
            name: name.into(),
            property: property.into(),
            valid,
            listing,
        }
    }

    pub(crate) fn enum_value_not_found(value: impl Into<String>, cases: &[&'static str]) -> Self {
        PixlabError::EnumValueNotFound {
            value: value.into(),
            cases: cases.to_vec(),
            listing: dotted_listing(cases),
        }
    }
}

fn dotted_listing(entries: &[&str]) -> String {
    let entries: Vec<String> = entries.iter().map(|e| format!(".{e}")).collect();
    format!("valid: {}", entries.join(" "))
}
