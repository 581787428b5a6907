//! Extension identifiers and the parsed command line.
//!
//! A marketplace item is addressed as `publisher.extension`. The id is split on
//! the first `.` only, so `ms.vscode.foo` names publisher `ms` and extension
//! `vscode.foo`.

mod sanitize;

pub use sanitize::sanitize_stem;

use crate::error::{Error, Result};
use std::fmt;

const MISSING_ID: &str = "Missing extension name (e.g., publisher.extension)";
const BAD_FORMAT: &str = "Extension ID must be in format 'publisher.extension'";

/// `publisher.extension` split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageId {
    pub publisher: String,
    pub name: String,
}

impl PackageId {
    /// Splits `raw` on the first `.`; both halves must be non-empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let (publisher, name) = raw.split_once('.').ok_or_else(|| Error::usage(BAD_FORMAT))?;
        if publisher.is_empty() || name.is_empty() {
            return Err(Error::usage(BAD_FORMAT));
        }
        Ok(Self {
            publisher: publisher.to_string(),
            name: name.to_string(),
        })
    }

    /// Local file the VSIX is saved to: `<name>.vsix`.
    pub fn vsix_filename(&self) -> Result<String> {
        let stem = sanitize_stem(&self.name);
        if stem.is_empty() {
            return Err(Error::usage(format!(
                "extension name '{}' is not usable as a file name",
                self.name
            )));
        }
        Ok(format!("{}.vsix", stem))
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.publisher, self.name)
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub install: bool,
    pub package: PackageId,
    /// Editor CLI to use instead of auto-detection.
    pub editor: Option<String>,
}

impl Invocation {
    /// Builds an invocation from the positional tokens left after flag parsing.
    ///
    /// The last token containing a `.` is the package id; tokens without a dot
    /// are ignored.
    pub fn from_tokens<S: AsRef<str>>(
        install: bool,
        editor: Option<String>,
        tokens: &[S],
    ) -> Result<Self> {
        let raw = tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| t.contains('.'))
            .last()
            .ok_or_else(|| Error::usage(MISSING_ID))?;
        Ok(Self {
            install,
            package: PackageId::parse(raw)?,
            editor,
        })
    }
}
