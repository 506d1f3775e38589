/*!
 * Tests for subcommand parameter declaration and help
 */

use dgproc::errors::DeclarationError;
use dgproc::subcmd::{ParamSpec, SuboptParser, Value, ValueType};

/// A same-named parameter with another type on a sibling is rejected, whichever comes first
#[test]
fn test_add_subopt_withSiblingTypeMismatch_shouldFailInEitherOrder() {
    for (first, second) in [(ValueType::Str, ValueType::Int), (ValueType::Int, ValueType::Str)] {
        let mut parser = SuboptParser::new(Some("view"));
        parser
            .add_subcmd("alpha", None)
            .unwrap()
            .add_subopt(ParamSpec::new("level", first))
            .unwrap();

        let err = parser
            .add_subcmd("beta", None)
            .unwrap()
            .add_subopt(ParamSpec::new("level", second))
            .unwrap_err();

        assert_eq!(
            err,
            DeclarationError::SiblingTypeMismatch {
                param: "level".to_string(),
                subcmd: "beta".to_string(),
                category: "view".to_string(),
            }
        );
    }
}

/// Siblings may declare the same parameter with different defaults
#[test]
fn test_add_subopt_withSiblingSameType_shouldCoexist() {
    let mut parser = SuboptParser::new(Some("view"));
    parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(ParamSpec::new("wcol", ValueType::Int).default_value(70i64))
        .unwrap();
    parser
        .add_subcmd("beta", None)
        .unwrap()
        .add_subopt(ParamSpec::new("wcol", ValueType::Int).default_value(40i64))
        .unwrap();

    assert_eq!(parser.subcmd_names(), vec!["alpha", "beta"]);
    let beta = parser.decl("beta").unwrap();
    assert_eq!(beta.param("wcol").unwrap().default, Some(Value::Int(40)));
}

#[test]
fn test_add_subopt_withSiblingListMismatch_shouldFail() {
    let mut parser = SuboptParser::new(Some("filter"));
    parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(ParamSpec::new("items", ValueType::Str).list())
        .unwrap();

    let err = parser
        .add_subcmd("beta", None)
        .unwrap()
        .add_subopt(ParamSpec::new("items", ValueType::Str).default_value("x"))
        .unwrap_err();

    assert!(matches!(err, DeclarationError::SiblingListMismatch { .. }));
}

#[test]
fn test_add_subcmd_withDuplicateName_shouldFail() {
    let mut parser = SuboptParser::new(None);
    parser.add_subcmd("alpha", None).unwrap();

    let err = parser.add_subcmd("alpha", Some("again")).err().unwrap();
    assert_eq!(
        err,
        DeclarationError::DuplicateSubcommand {
            subcmd: "alpha".to_string()
        }
    );
}

#[test]
fn test_view_withUnknownSubcommand_shouldFail() {
    let mut parser = SuboptParser::new(None);
    assert!(matches!(
        parser.view("ghost"),
        Err(DeclarationError::UnknownSubcommand { .. })
    ));
}

#[test]
fn test_add_subopt_withDuplicateParameter_shouldFail() {
    let mut parser = SuboptParser::new(None);
    let mut view = parser.add_subcmd("alpha", None).unwrap();
    view.add_subopt(ParamSpec::new("lang", ValueType::Str)).unwrap();

    let err = view.add_subopt(ParamSpec::new("lang", ValueType::Str)).unwrap_err();
    assert!(matches!(err, DeclarationError::DuplicateParameter { .. }));
}

#[test]
fn test_add_subopt_withDefaultOfWrongType_shouldFail() {
    let mut parser = SuboptParser::new(None);
    let err = parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(ParamSpec::new("wcol", ValueType::Int).default_value("seventy"))
        .unwrap_err();

    assert_eq!(
        err,
        DeclarationError::DefaultTypeMismatch {
            param: "wcol".to_string(),
            subcmd: "alpha".to_string(),
            value: "seventy".to_string(),
            expected: "int".to_string(),
        }
    );
}

#[test]
fn test_add_subopt_withListnessOfDefaultWrong_shouldFail() {
    let mut parser = SuboptParser::new(None);
    let mut view = parser.add_subcmd("alpha", None).unwrap();

    let err = view
        .add_subopt(ParamSpec::new("items", ValueType::Str).list().default_value("a"))
        .unwrap_err();
    assert!(matches!(err, DeclarationError::DefaultNotList { .. }));

    let err = view
        .add_subopt(ParamSpec::new("item", ValueType::Str).default_value(vec!["a", "b"]))
        .unwrap_err();
    assert!(matches!(err, DeclarationError::DefaultIsList { .. }));
}

#[test]
fn test_add_subopt_withDefaultOutsideAdmissible_shouldNameOffendingElement() {
    let mut parser = SuboptParser::new(None);
    let err = parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(
            ParamSpec::new("colors", ValueType::Str)
                .list()
                .default_value(vec!["red", "purple"])
                .admissible(vec!["red", "green", "blue"]),
        )
        .unwrap_err();

    assert_eq!(
        err,
        DeclarationError::DefaultNotAdmissible {
            param: "colors".to_string(),
            subcmd: "alpha".to_string(),
            value: "purple".to_string(),
            admissible: "red green blue".to_string(),
        }
    );
}

#[test]
fn test_add_subopt_withAdmissibleOfWrongType_shouldFail() {
    let mut parser = SuboptParser::new(None);
    let err = parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(ParamSpec::new("level", ValueType::Int).admissible(vec![Value::Int(1), Value::from("two")]))
        .unwrap_err();

    assert!(matches!(err, DeclarationError::AdmissibleTypeMismatch { value, .. } if value == "two"));
}

#[test]
fn test_add_subopt_withFlagWithoutDefault_shouldFail() {
    let mut parser = SuboptParser::new(None);
    let err = parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(ParamSpec::new("verbose", ValueType::Bool))
        .unwrap_err();

    assert!(matches!(err, DeclarationError::MalformedFlag { .. }));
}

#[test]
fn test_add_subopt_withListWithoutDefault_shouldDefaultToEmptyList() {
    let mut parser = SuboptParser::new(None);
    parser
        .add_subcmd("alpha", None)
        .unwrap()
        .add_subopt(ParamSpec::new("items", ValueType::Str).list())
        .unwrap();

    let spec = parser.decl("alpha").unwrap().param("items").unwrap();
    assert_eq!(spec.default, Some(Value::List(Vec::new())));
    assert!(!spec.is_mandatory());
}

#[test]
fn test_help_withMandatoryAndOptionalParameters_shouldListBothGroups() {
    let mut parser = SuboptParser::new(Some("view"));
    let mut view = parser.add_subcmd("alpha", Some("Does alpha things.")).unwrap();
    view.add_subopt(ParamSpec::new("file", ValueType::Str).metavar("FILE").desc("Output file."))
        .unwrap();
    view.add_subopt(ParamSpec::new("wcol", ValueType::Int).default_value(70i64).metavar("COLUMN"))
        .unwrap();
    view.add_subopt(ParamSpec::flag("quiet")).unwrap();

    let help = parser.help(&["alpha"], 0).unwrap();

    assert_eq!(
        help,
        "Subcommand (view):\n\
         \x20 alpha\n\
         \x20   Does alpha things.\n\
         \n\
         \x20 Mandatory parameters:\n\
         \x20   file:FILE\n\
         \x20     Output file.\n\
         \n\
         \x20 Optional parameters:\n\
         \x20   wcol:COLUMN [default COLUMN=70]\n\
         \x20   quiet [flag]\n"
    );
}

#[test]
fn test_help_withUnknownSubcommand_shouldFail() {
    let parser = SuboptParser::new(Some("view"));
    assert!(parser.help(&["ghost"], 79).is_err());
}
