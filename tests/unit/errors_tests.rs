/*!
 * Tests for error types and conversions
 */

use dgproc::errors::{AppError, DeclarationError, GlossaryError, UsageError};

#[test]
fn test_declarationError_siblingTypeMismatch_shouldNameCategory() {
    let error = DeclarationError::SiblingTypeMismatch {
        param: "lang".to_string(),
        subcmd: "beta".to_string(),
        category: "view".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("'lang'"));
    assert!(display.contains("'beta'"));
    assert!(display.contains("category 'view'"));
}

#[test]
fn test_usageError_notAdmissible_shouldListAdmissibleValues() {
    let error = UsageError::NotAdmissible {
        param: "color".to_string(),
        value: "purple".to_string(),
        admissible: "red green blue".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("purple"));
    assert!(display.contains("red green blue"));
}

#[test]
fn test_usageError_missingMandatory_shouldNameSubcommand() {
    let error = UsageError::MissingMandatory {
        param: "file".to_string(),
        subcmd: "plrules".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "mandatory parameter 'file' to subcommand 'plrules' not given"
    );
}

#[test]
fn test_appError_fromUsageError_shouldWrapMessage() {
    let error: AppError = UsageError::RepeatedParameter {
        param: "wcol".to_string(),
    }
    .into();
    assert!(matches!(error, AppError::Usage(_)));
    assert_eq!(error.to_string(), "Usage error: parameter 'wcol' repeated more than once");
}

#[test]
fn test_appError_fromDeclarationError_shouldWrap() {
    let error: AppError = DeclarationError::DuplicateSubcommand {
        subcmd: "pass".to_string(),
    }
    .into();
    assert!(matches!(error, AppError::Declaration(_)));
}

#[test]
fn test_glossaryError_fromSerdeError_shouldBeParseError() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: GlossaryError = serde_error.into();
    assert!(matches!(error, GlossaryError::Parse(_)));
    assert!(error.to_string().starts_with("Failed to parse glossary"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(msg) if msg == "gone"));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("odd").into();
    assert_eq!(error.to_string(), "Unknown error: odd");
}
