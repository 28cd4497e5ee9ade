//! The failures that a build description may raise while it's being declared,
//! validated or resolved

use thiserror::Error;

/// Every way in which a [`super::Build`] may be rejected.
///
/// All of them are unrecoverable for a generation run: the description is static
/// input, so there's nothing to retry
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BuildError {
    #[error("A target named '{name}' is already declared on the build")]
    DuplicateName { name: String },

    #[error("{}", not_found_message(.name, .referenced_by.as_deref()))]
    NotFound {
        name: String,
        referenced_by: Option<String>,
    },

    #[error("Target '{target}' has an invalid '{field}' field: {reason}")]
    InvalidTarget {
        target: String,
        field: &'static str,
        reason: String,
    },

    #[error("Cyclic dependency between targets: {cycle}")]
    CyclicDependency { cycle: String },
}

impl BuildError {
    pub(crate) fn invalid_target(
        target: &str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTarget {
            target: target.to_string(),
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(name: &str, referenced_by: Option<&str>) -> Self {
        Self::NotFound {
            name: name.to_string(),
            referenced_by: referenced_by.map(str::to_string),
        }
    }
}

fn not_found_message(name: &str, referenced_by: Option<&str>) -> String {
    match referenced_by {
        Some(target) => {
            format!("Target '{target}' depends on '{name}', which is not declared on the build")
        }
        None => format!("No target named '{name}' is declared on the build"),
    }
}
