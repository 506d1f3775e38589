/*!
 * Error types for the dgproc application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Mistakes made by a subcommand author while declaring parameters.
///
/// These surface at registration time, before any user input is looked at.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    /// The same subcommand was added twice to one parser
    #[error("trying to add subcommand '{subcmd}' once again")]
    DuplicateSubcommand { subcmd: String },

    /// A view was requested for a subcommand never added
    #[error("trying to get a view for an unknown subcommand '{subcmd}'")]
    UnknownSubcommand { subcmd: String },

    /// The same parameter was declared twice on one subcommand
    #[error("trying to add parameter '{param}' to subcommand '{subcmd}' once again")]
    DuplicateParameter { param: String, subcmd: String },

    /// Default value does not have the declared type
    #[error("trying to add parameter '{param}' to subcommand '{subcmd}' with default value '{value}' different from its stated type '{expected}'")]
    DefaultTypeMismatch {
        param: String,
        subcmd: String,
        value: String,
        expected: String,
    },

    /// Default value outside the admissible set
    #[error("trying to add parameter '{param}' to subcommand '{subcmd}' with default value '{value}' not from the admissible set: {admissible}")]
    DefaultNotAdmissible {
        param: String,
        subcmd: String,
        value: String,
        admissible: String,
    },

    /// An admissible value does not have the declared type
    #[error("parameter '{param}' to subcommand '{subcmd}' lists admissible value '{value}' not of type '{expected}'")]
    AdmissibleTypeMismatch {
        param: String,
        subcmd: String,
        value: String,
        expected: String,
    },

    /// List-valued parameter with a scalar default
    #[error("parameter '{param}' to subcommand '{subcmd}' stated to be list-valued, but the default value is not given as a list")]
    DefaultNotList { param: String, subcmd: String },

    /// Scalar parameter with a list default
    #[error("parameter '{param}' to subcommand '{subcmd}' is scalar, but the default value is given as a list")]
    DefaultIsList { param: String, subcmd: String },

    /// Flags toggle away from a default, so they must have one and cannot be lists
    #[error("flag parameter '{param}' to subcommand '{subcmd}' must have a boolean default and cannot be list-valued")]
    MalformedFlag { param: String, subcmd: String },

    /// Sibling subcommand declared the same name with another type
    #[error("trying to add parameter '{param}' to subcommand '{subcmd}' with a type different from other subcommands in the category '{category}'")]
    SiblingTypeMismatch {
        param: String,
        subcmd: String,
        category: String,
    },

    /// Sibling subcommand declared the same name with other list-ness
    #[error("trying to add parameter '{param}' to subcommand '{subcmd}' with a list-indicator different from other subcommands in the category '{category}'")]
    SiblingListMismatch {
        param: String,
        subcmd: String,
        category: String,
    },
}

/// Mistakes in the parameters supplied on the command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UsageError {
    /// Unknown subcommand requested in a category
    #[error("unknown subcommand requested in category '{category}': {subcmd}")]
    UnknownSubcommand { category: String, subcmd: String },

    /// Subcommand issued without being registered with the parser
    #[error("unregistered subcommand '{subcmd}' issued")]
    UnregisteredSubcommand { subcmd: String },

    /// The same parameter given more than once
    #[error("parameter '{param}' repeated more than once")]
    RepeatedParameter { param: String },

    /// Parameter not declared by any issued subcommand
    #[error("parameter '{param}' not expected in any of the issued subcommands")]
    UnexpectedParameter { param: String },

    /// Flag given with a value
    #[error("parameter '{param}' is a flag, no value expected")]
    FlagWithValue { param: String },

    /// Value-taking parameter given as a bare name
    #[error("parameter '{param}' expects a value, given as '{param}:VALUE'")]
    MissingValue { param: String },

    /// Scalar conversion failed
    #[error("cannot convert value '{value}' to parameter '{param}' into expected type '{expected}'")]
    Conversion {
        param: String,
        value: String,
        expected: String,
    },

    /// Conversion of some list element failed
    #[error("cannot convert value '{value}' to parameter '{param}' into list of elements of expected type '{expected}'")]
    ListConversion {
        param: String,
        value: String,
        expected: String,
    },

    /// Value outside the admissible set
    #[error("value '{value}' to parameter '{param}' not from the admissible set: {admissible}")]
    NotAdmissible {
        param: String,
        value: String,
        admissible: String,
    },

    /// Mandatory parameter not supplied
    #[error("mandatory parameter '{param}' to subcommand '{subcmd}' not given")]
    MissingMandatory { param: String, subcmd: String },

    /// A resolved option was read with the wrong accessor, or does not exist
    #[error("subcommand '{subcmd}' has no option '{param}' of type '{expected}'")]
    Unresolved {
        param: String,
        subcmd: String,
        expected: String,
    },
}

/// Errors raised while loading or checking a glossary
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// The document could not be parsed
    #[error("Failed to parse glossary: {0}")]
    Parse(String),

    /// The document parsed, but its content is inconsistent
    #[error("Invalid glossary: {0}")]
    Invalid(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in a subcommand declaration
    #[error("Declaration error: {0}")]
    Declaration(#[from] DeclarationError),

    /// Error in the command line
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// Error from glossary handling
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for GlossaryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
