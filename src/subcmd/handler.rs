/*!
 * Handling of subcommands organized by categories.
 *
 * Each category (e.g. filters, views) has a static registry of subcommands.
 * A registry entry names the subcommand as seen by the user, declares its
 * parameters on a `SubcmdView`, and constructs the subcommand object from
 * its resolved options.
 */

use std::collections::HashSet;

use log::debug;

use crate::errors::{AppError, DeclarationError, UsageError};
use crate::subcmd::parser::{SubcmdView, SuboptParser};
use crate::subcmd::router::ResolvedOptions;

/// Declares the parameters of a subcommand
pub type FillOptparser = fn(&mut SubcmdView<'_>) -> Result<(), DeclarationError>;

/// Registry entry of one subcommand, producing objects of type `T`
pub struct SubcmdEntry<T: ?Sized> {
    /// Name as seen by the user, words separated by hyphens
    pub name: &'static str,
    pub fill_optparser: FillOptparser,
    pub create: fn(&ResolvedOptions) -> Result<Box<T>, UsageError>,
}

/// Subcommands of one category
pub struct SubcmdHandler<T: ?Sized> {
    category: String,
    entries: Vec<SubcmdEntry<T>>,
}

impl<T: ?Sized> SubcmdHandler<T> {
    pub fn new(category: &str, entries: Vec<SubcmdEntry<T>>) -> Self {
        Self {
            category: category.to_string(),
            entries,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Names of all the subcommands in this category
    pub fn subcmd_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    fn entry(&self, name: &str) -> Result<&SubcmdEntry<T>, UsageError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| UsageError::UnknownSubcommand {
                category: self.category.clone(),
                subcmd: name.to_string(),
            })
    }

    /// Build the parameter parser for the issued subcommands
    pub fn optparser<S: AsRef<str>>(&self, names: &[S]) -> Result<SuboptParser, AppError> {
        let mut parser = SuboptParser::new(Some(&self.category));
        let mut filled = HashSet::new();
        for name in names {
            let name = name.as_ref();
            let entry = self.entry(name)?;
            if !filled.insert(name) {
                continue;
            }
            let mut view = parser.add_subcmd(name, None)?;
            (entry.fill_optparser)(&mut view)?;
        }
        Ok(parser)
    }

    /// Create subcommand objects, routing the raw parameters to them.
    ///
    /// Objects are returned in the order of `names`. Nothing is created
    /// unless every subcommand exists and all parameters check out.
    pub fn init_subcmds<S, R>(&self, names: &[S], rawopts: &[R]) -> Result<Vec<Box<T>>, AppError>
    where
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let parser = self.optparser(names)?;
        let resolved = parser.parse(rawopts, names)?;

        let mut objs = Vec::with_capacity(resolved.len());
        for opts in &resolved {
            debug!("Creating {} '{}' with options {:?}", self.category, opts.subcmd(), opts.names());
            let entry = self.entry(opts.subcmd())?;
            objs.push((entry.create)(opts)?);
        }
        Ok(objs)
    }

    /// Formatted help for the given subcommands
    pub fn help<S: AsRef<str>>(&self, names: &[S], wcol: usize) -> Result<String, AppError> {
        let parser = self.optparser(names)?;
        Ok(parser.help(names, wcol)?)
    }
}
