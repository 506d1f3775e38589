/*!
 * Filters: transformations of the glossary applied before any view.
 *
 * Filters run in the order given on the command line, each receiving the
 * glossary produced by the previous one.
 */

use anyhow::Result;

use crate::glossary::Glossary;
use crate::subcmd::{SubcmdEntry, SubcmdHandler};

pub mod pass;

/// Category name of filters, as shown in help and errors
pub const CATEGORY: &str = "filter";

/// A glossary filter
pub trait Filter {
    fn process(&self, gloss: Glossary) -> Result<Glossary>;
}

/// All available filters
pub fn registry() -> Vec<SubcmdEntry<dyn Filter>> {
    vec![pass::entry()]
}

/// Handler over all available filters
pub fn handler() -> SubcmdHandler<dyn Filter> {
    SubcmdHandler::new(CATEGORY, registry())
}
