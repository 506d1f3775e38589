//! Filter which passes the glossary unchanged.

use anyhow::Result;

use crate::errors::{DeclarationError, UsageError};
use crate::filter::Filter;
use crate::glossary::Glossary;
use crate::subcmd::{ResolvedOptions, SubcmdEntry, SubcmdView};

pub struct Pass;

impl Filter for Pass {
    fn process(&self, gloss: Glossary) -> Result<Glossary> {
        Ok(gloss)
    }
}

fn fill_optparser(pv: &mut SubcmdView<'_>) -> Result<(), DeclarationError> {
    pv.set_desc("Pass-through filter, changes nothing in the glossary.");
    Ok(())
}

fn create(_options: &ResolvedOptions) -> Result<Box<dyn Filter>, UsageError> {
    Ok(Box::new(Pass))
}

pub fn entry() -> SubcmdEntry<dyn Filter> {
    SubcmdEntry {
        name: "pass",
        fill_optparser,
        create,
    }
}
