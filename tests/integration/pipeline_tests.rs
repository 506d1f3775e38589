/*!
 * Integration tests for the whole pipeline: load, check, filter, view
 */

use anyhow::Result;
use dgproc::app_config::Config;
use dgproc::app_controller::Controller;
use crate::common;

fn controller() -> Result<Controller> {
    common::init_test_logging();
    Controller::with_config(Config::default())
}

#[test]
fn test_run_withDefaultRequest_shouldLoadAndCheckOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss_path = common::write_sample_glossary(temp_dir.path())?;
    let controller = controller()?;

    let request = controller.request(&gloss_path);
    assert_eq!(request.views, vec!["null"]);
    controller.run(&request)?;
    Ok(())
}

#[test]
fn test_run_withNullAndBidict_shouldRouteParametersToDeclaringViews() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss_path = common::write_sample_glossary(temp_dir.path())?;
    let html_path = temp_dir.path().join("dict.html");
    let controller = controller()?;

    let mut request = controller.request(&gloss_path);
    request.views = vec!["null".to_string(), "html-bidict".to_string()];
    request.view_params = vec![
        "olang:en".to_string(),
        "tlang:sr".to_string(),
        format!("file:{}", html_path.display()),
        "style:apricot".to_string(),
    ];
    controller.run(&request)?;

    assert!(std::fs::read_to_string(&html_path)?.contains("bd-table"));
    assert!(temp_dir.path().join("dict.css").exists());
    assert!(temp_dir.path().join("dict.js").exists());
    Ok(())
}

#[test]
fn test_run_withRepeatedView_shouldBuildItOncePerOccurrence() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss_path = common::write_sample_glossary(temp_dir.path())?;
    let rules_path = temp_dir.path().join("term.rules");
    let controller = controller()?;

    let mut request = controller.request(&gloss_path);
    request.views = vec!["plrules".to_string(), "plrules".to_string()];
    request.view_params = vec![
        "olang:en".to_string(),
        "tlang:sr".to_string(),
        format!("file:{}", rules_path.display()),
    ];
    controller.run(&request)?;

    // The second pass updates what the first one created
    let rules = std::fs::read_to_string(&rules_path)?;
    assert_eq!(rules.matches("id=\"folder\"").count(), 1);
    assert_eq!(rules.matches("# @gloss-new").count(), 2);
    Ok(())
}

#[test]
fn test_run_withTextView_shouldWriteListing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss_path = common::write_sample_glossary(temp_dir.path())?;
    let out_path = temp_dir.path().join("listing.txt");
    let controller = controller()?;

    let mut request = controller.request(&gloss_path);
    request.views = vec!["text-simple".to_string()];
    request.view_params = vec!["lang:sr".to_string(), format!("file:{}", out_path.display())];
    controller.run(&request)?;

    let listing = std::fs::read_to_string(&out_path)?;
    assert!(listing.starts_with("Probni rečnik (formalno)\n"));
    assert!(listing.contains("  datoteka (en /file/)"));
    Ok(())
}

#[test]
fn test_run_withUnknownView_shouldFailBeforeLoading() -> Result<()> {
    let controller = controller()?;

    let mut request = controller.request("does-not-exist.json");
    request.views = vec!["nonesuch".to_string()];

    let err = controller.run(&request).unwrap_err();
    assert!(err.to_string().contains("unknown subcommand requested in category 'view': nonesuch"));
    Ok(())
}

#[test]
fn test_run_withMissingMandatoryParameter_shouldFailBeforeLoading() -> Result<()> {
    let controller = controller()?;

    let mut request = controller.request("does-not-exist.json");
    request.views = vec!["plrules".to_string()];
    request.view_params = vec!["olang:en".to_string(), "file:x.rules".to_string()];

    let err = controller.run(&request).unwrap_err();
    assert!(err.to_string().contains("mandatory parameter 'tlang' to subcommand 'plrules' not given"));
    Ok(())
}

#[test]
fn test_run_withUnexpectedFilterParameter_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss_path = common::write_sample_glossary(temp_dir.path())?;
    let controller = controller()?;

    let mut request = controller.request(&gloss_path);
    request.filter_params = vec!["lang:sr".to_string()];

    let err = controller.run(&request).unwrap_err();
    assert!(err.to_string().contains("parameter 'lang' not expected"));
    Ok(())
}

#[test]
fn test_run_withMissingGlossaryFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller()?;

    let request = controller.request(temp_dir.path().join("absent.json"));

    let err = controller.run(&request).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    Ok(())
}

#[test]
fn test_run_withInvalidGlossary_shouldFailUnlessCheckDisabled() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss_path = common::create_test_file(
        temp_dir.path(),
        "bad.json",
        r#"{"lang": "en", "languages": {"en": {}},
            "concepts": {"x": {"term": [{"nom": "x"}], "desc": [{"text": [{"ref": {"c": "y", "text": "y"}}]}]}}}"#,
    )?;
    let controller = controller()?;

    let mut request = controller.request(&gloss_path);
    let err = controller.run(&request).unwrap_err();
    assert!(format!("{:#}", err).contains("reference to unknown concept 'y'"));

    request.check = false;
    controller.run(&request)?;
    Ok(())
}
