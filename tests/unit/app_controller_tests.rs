/*!
 * Tests for the application controller
 */

use anyhow::Result;
use dgproc::app_config::Config;
use dgproc::app_controller::Controller;

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let config = Config {
        wrap_column: 5,
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_list_subcmds_shouldListFiltersAndViews() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    assert_eq!(
        controller.list_subcmds(),
        "Available filters:\n  pass\nAvailable views:\n  html-bidict\n  null\n  plrules\n  text-simple\n"
    );
    Ok(())
}

#[test]
fn test_request_shouldTakeConfiguredDefaults() -> Result<()> {
    let config = Config {
        default_views: vec!["text-simple".to_string()],
        check: false,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let request = controller.request("gloss.json");

    assert_eq!(request.filters, vec!["pass"]);
    assert_eq!(request.views, vec!["text-simple"]);
    assert!(!request.check);
    assert!(request.view_params.is_empty());
    Ok(())
}

#[test]
fn test_help_subcmds_withMandatoryParameters_shouldNotRequireThem() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let help = controller.help_subcmds(&["pass".to_string()], &["plrules".to_string()])?;

    assert!(help.contains("Subcommand (filter):\n  pass\n"));
    assert!(help.contains("Subcommand (view):\n  plrules\n"));
    assert!(help.contains("Mandatory parameters:"));
    assert!(help.contains("olang:LANGKEY"));
    Ok(())
}

#[test]
fn test_help_subcmds_withUnknownView_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let err = controller
        .help_subcmds(&[], &["nonesuch".to_string()])
        .unwrap_err();

    assert!(err.to_string().contains("unknown subcommand requested in category 'view': nonesuch"));
    Ok(())
}
