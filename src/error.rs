use std::io;
use std::path::PathBuf;

/// All errors produced by the formula visualization generator.
///
/// Catalog and template errors are fatal to a whole batch and are reported
/// before anything is written. The remaining variants are per-formula and
/// get recorded in the generation report instead of aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog source could not be deserialized.
    #[error("cannot parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Two catalog entries share an `id`.
    #[error("duplicate formula id '{id}'")]
    DuplicateId { id: String },

    /// An id or name that cannot be used as an output folder slug.
    #[error("formula '{id}' has an unusable identity: {reason}")]
    InvalidIdentity { id: String, reason: String },

    /// Two parameters of one formula share a name.
    #[error("formula '{formula}' declares parameter '{name}' more than once")]
    DuplicateParameter { formula: String, name: String },

    /// A parameter name that is not a valid script identifier, or one that
    /// would alias an object's prototype slots.
    #[error("formula '{formula}': parameter name '{name}' is not a usable identifier")]
    InvalidParameterName { formula: String, name: String },

    /// Catalog validation found a parameter type other than scalar or 3-vector.
    #[error("formula '{formula}': parameter '{name}' has unknown type '{kind}'")]
    UnknownParameterType {
        formula: String,
        name: String,
        kind: String,
    },

    /// `difficulty` outside 1..=5.
    #[error("formula '{id}': difficulty {value} is outside 1..=5")]
    InvalidDifficulty { id: String, value: u8 },

    /// Control generation reached a parameter type it cannot render. Only
    /// that formula fails; catalogs that passed validation never hit this.
    #[error("formula '{formula}': parameter '{name}' has unsupported type '{kind}'")]
    UnsupportedParameterType {
        formula: String,
        name: String,
        kind: String,
    },

    /// `default` or `range` does not have the shape `type` asks for.
    #[error("formula '{formula}': parameter '{name}' default/range shape does not match its type")]
    ParameterShapeMismatch { formula: String, name: String },

    /// `min <= default <= max` does not hold (component-wise for vectors).
    #[error("formula '{formula}': parameter '{name}' has an invalid range: {detail}")]
    InvalidParameterRange {
        formula: String,
        name: String,
        detail: String,
    },

    /// The base template lacks required placeholder tokens.
    #[error("template is missing required placeholder(s): {}", .names.join(", "))]
    MissingPlaceholder { names: Vec<String> },

    /// The base template uses a placeholder the engine does not know.
    #[error("template uses unknown placeholder '{{{{{name}}}}}' (at byte {offset})")]
    UnknownPlaceholder { name: String, offset: usize },

    /// Filesystem failure while reading inputs or writing artifacts.
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_range(formula: &str, name: &str, detail: impl Into<String>) -> Self {
        Self::InvalidParameterRange {
            formula: formula.to_string(),
            name: name.to_string(),
            detail: detail.into(),
        }
    }

    /// Whether this error must abort a whole batch rather than a single formula.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::UnsupportedParameterType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_and_template_errors_are_fatal() {
        assert!(Error::DuplicateId { id: "01".into() }.is_fatal());
        assert!(Error::UnknownParameterType {
            formula: "01".into(),
            name: "q".into(),
            kind: "matrix".into(),
        }
        .is_fatal());
        assert!(Error::InvalidDifficulty {
            id: "01".into(),
            value: 9
        }
        .is_fatal());
        assert!(Error::MissingPlaceholder {
            names: vec!["TITLE".into()]
        }
        .is_fatal());
        assert!(Error::invalid_range("01", "speed", "default 5 above max 3").is_fatal());
    }

    #[test]
    fn per_formula_errors_are_recoverable() {
        let io = Error::io("out/01-X", io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(!io.is_fatal());
        let unsupported = Error::UnsupportedParameterType {
            formula: "01".into(),
            name: "q".into(),
            kind: "matrix".into(),
        };
        assert!(!unsupported.is_fatal());
    }

    #[test]
    fn unknown_placeholder_message_shows_braces() {
        let e = Error::UnknownPlaceholder {
            name: "COLOR".into(),
            offset: 12,
        };
        assert_eq!(e.to_string(), "template uses unknown placeholder '{{COLOR}}' (at byte 12)");
    }

    #[test]
    fn missing_placeholder_lists_all_names() {
        let e = Error::MissingPlaceholder {
            names: vec!["TITLE".into(), "SCENE_CODE".into()],
        };
        assert_eq!(
            e.to_string(),
            "template is missing required placeholder(s): TITLE, SCENE_CODE"
        );
    }
}
