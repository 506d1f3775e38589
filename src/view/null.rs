//! View which builds nothing out of the glossary.

use anyhow::Result;

use crate::errors::{DeclarationError, UsageError};
use crate::glossary::Glossary;
use crate::subcmd::{ResolvedOptions, SubcmdEntry, SubcmdView};
use crate::view::View;

pub struct Null;

impl View for Null {
    fn process(&self, _gloss: &Glossary) -> Result<()> {
        Ok(())
    }
}

fn fill_optparser(pv: &mut SubcmdView<'_>) -> Result<(), DeclarationError> {
    pv.set_desc("Null-view, builds no view of the glossary.");
    Ok(())
}

fn create(_options: &ResolvedOptions) -> Result<Box<dyn View>, UsageError> {
    Ok(Box::new(Null))
}

pub fn entry() -> SubcmdEntry<dyn View> {
    SubcmdEntry {
        name: "null",
        fill_optparser,
        create,
    }
}
