//! Error types for aircraft-document and aerofoil-library operations
//!
//! Every fatal error carries enough context to locate its cause: the field
//! path inside the aircraft document, the offending profile file, or the
//! aerofoil name a section asked for. Conditions that are recoverable by
//! design (duplicate profile names, schema-version drift) are *not* errors;
//! they are surfaced as data (`FoilConflict`, `BuildWarning`) so the caller
//! can decide.

use std::io;
use thiserror::Error;

/// Result type for wingpoint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting an aircraft document
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading a document or profile file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML parsing error
    ///
    /// Raised when the input is not well-formed XML (unclosed tags, bad
    /// encoding, stray markup).
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    #[error("XML attribute error: {0}")]
    XmlAttr(String),

    /// Input that cannot be turned into a document tree
    ///
    /// Covers inputs that are neither an existing file path nor a string
    /// containing well-formed XML, and documents with no root element.
    #[error("Invalid XML input: {0}")]
    InvalidXml(String),

    /// Missing or invalid required field in the aircraft document
    ///
    /// `path` is the full slash-separated field path, with repeated elements
    /// indexed (e.g. `Plane/wing[1]/Sections/Section[3]/Chord`).
    #[error("Invalid aircraft document at {path}: {reason}")]
    Model {
        /// Field path of the offending leaf
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// Aerofoil profile file with an unreadable or ambiguous header
    ///
    /// The first coordinate value of a profile file decides its storage
    /// convention; a value that matches neither convention is reported here
    /// together with the offending file.
    #[error("Malformed aerofoil file '{file}': {reason}")]
    MalformedProfile {
        /// Path of the offending profile file
        file: String,
        /// What was wrong with it
        reason: String,
    },

    /// A wing section references a profile name absent from the library
    #[error("Aerofoil '{name}' referenced by section {section} is not in the library")]
    AerofoilMissing {
        /// The unresolved profile name
        name: String,
        /// 1-indexed section that referenced it
        section: usize,
    },

    /// The aerofoil library still has unresolved name conflicts
    ///
    /// Conflicts are reported as data and must be settled with
    /// [`AerofoilLibrary::resolve`](crate::AerofoilLibrary::resolve) before
    /// the library can feed a transform.
    #[error("Aerofoil name '{name}' is still conflicted; resolve the library first")]
    UnresolvedConflict {
        /// The display name claimed by more than one file
        name: String,
    },

    /// Conflict resolution input does not match the detected conflicts
    #[error("Conflict resolution error: {0}")]
    ConflictResolution(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

/// Non-fatal conditions noticed while building the aircraft model
///
/// Warnings never abort a build; the model is still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// The document's schema version differs from the supported one
    SchemaVersion {
        /// Version string found in the document, if any
        found: Option<String>,
        /// Version this builder was written against
        expected: &'static str,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::SchemaVersion { found, expected } => match found {
                Some(v) => write!(
                    f,
                    "document schema version '{}' differs from supported '{}'",
                    v, expected
                ),
                None => write!(
                    f,
                    "document declares no schema version (expected '{}')",
                    expected
                ),
            },
        }
    }
}
