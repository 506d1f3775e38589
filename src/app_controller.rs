use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::filter::{self, Filter};
use crate::glossary::{self, Glossary};
use crate::subcmd::SubcmdHandler;
use crate::view::{self, View};

// @module: Application controller running the glossary pipeline

/// One processing request: glossary, subcommands and their raw parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    // @field: Glossary file
    pub glossary: PathBuf,
    // @field: Filter names, in order of application
    pub filters: Vec<String>,
    // @field: View names, in order of building
    pub views: Vec<String>,
    // @field: Raw filter parameters
    pub filter_params: Vec<String>,
    // @field: Raw view parameters
    pub view_params: Vec<String>,
    // @field: Check the glossary for validity
    pub check: bool,
}

/// Main application controller: constructs the glossary, then filters it
/// and builds the views
pub struct Controller {
    // @field: App configuration
    config: Config,
    filters: SubcmdHandler<dyn Filter>,
    views: SubcmdHandler<dyn View>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            filters: filter::handler(),
            views: view::handler(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Request over a glossary with the configured defaults
    pub fn request<P: Into<PathBuf>>(&self, glossary: P) -> Request {
        Request {
            glossary: glossary.into(),
            filters: self.config.default_filters.clone(),
            views: self.config.default_views.clone(),
            filter_params: Vec::new(),
            view_params: Vec::new(),
            check: self.config.check,
        }
    }

    /// Listing of available filters and views
    pub fn list_subcmds(&self) -> String {
        let mut s = String::from("Available filters:\n");
        for name in self.filters.subcmd_names() {
            s.push_str(&format!("  {}\n", name));
        }
        s.push_str("Available views:\n");
        for name in self.views.subcmd_names() {
            s.push_str(&format!("  {}\n", name));
        }
        s
    }

    /// Help on the given filters and views
    pub fn help_subcmds(&self, filters: &[String], views: &[String]) -> Result<String> {
        let wcol = self.config.wrap_column;
        let fhelp = self.filters.help(filters, wcol)?;
        let vhelp = self.views.help(views, wcol)?;
        Ok(format!("{}\n{}", fhelp, vhelp))
    }

    /// Run the whole pipeline.
    ///
    /// All subcommands are created before the glossary is loaded, so that
    /// parameter mistakes are reported without doing any work.
    pub fn run(&self, request: &Request) -> Result<()> {
        let filters = self
            .filters
            .init_subcmds(&request.filters, &request.filter_params)?;
        let views = self.views.init_subcmds(&request.views, &request.view_params)?;

        if !FileManager::file_exists(&request.glossary) {
            return Err(anyhow!("file '{}' does not exist", request.glossary.display()));
        }
        let gloss = glossary::from_file(&request.glossary, request.check)?;

        let gloss = self.apply(gloss, &request.filters, &filters, &request.views, &views)?;
        info!("Processed glossary with {} concepts", gloss.concepts.len());
        Ok(())
    }

    fn apply(
        &self,
        mut gloss: Glossary,
        filter_names: &[String],
        filters: &[Box<dyn Filter>],
        view_names: &[String],
        views: &[Box<dyn View>],
    ) -> Result<Glossary> {
        for (name, fl) in filter_names.iter().zip(filters) {
            debug!("Applying filter '{}'", name);
            gloss = fl
                .process(gloss)
                .with_context(|| format!("Filter '{}' failed", name))?;
        }

        for (name, vw) in view_names.iter().zip(views) {
            debug!("Building view '{}'", name);
            vw.process(&gloss)
                .with_context(|| format!("View '{}' failed", name))?;
        }
        Ok(gloss)
    }
}
