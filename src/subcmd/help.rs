/*!
 * Formatted help for subcommands and their parameters.
 */

use crate::errors::DeclarationError;
use crate::subcmd::parser::{ParamSpec, SubcmdDecl, SuboptParser};
use crate::subcmd::value::format_admissible;
use crate::textfmt::fill_paragraphs;

/// Column at which help text is wrapped unless configured otherwise
pub const DEFAULT_HELP_WRAP: usize = 79;

impl SuboptParser {
    /// Formatted help for the requested subcommands.
    ///
    /// `wcol` is the column to wrap text at, 0 for no wrapping.
    pub fn help<S: AsRef<str>>(&self, subcmds: &[S], wcol: usize) -> Result<String, DeclarationError> {
        let mut fmts = Vec::with_capacity(subcmds.len());
        for subcmd in subcmds {
            let decl = self.decl(subcmd.as_ref()).ok_or_else(|| {
                DeclarationError::UnknownSubcommand {
                    subcmd: subcmd.as_ref().to_string(),
                }
            })?;
            fmts.push(format_subcmd(self.category(), decl, wcol));
        }
        Ok(fmts.join("\n"))
    }
}

fn format_param(spec: &ParamSpec, indent: &str, wcol: usize) -> String {
    let mut s = format!("{}  {}", indent, spec.name);

    if spec.is_flag() {
        s.push_str(" [flag]");
    } else {
        let metavar = spec.metavar.as_deref().unwrap_or("ARG");
        s.push(':');
        s.push_str(metavar);

        if let Some(default) = &spec.default {
            let defstr = default.to_string();
            if !defstr.is_empty() {
                s.push_str(&format!(" [default {}={}]", metavar, defstr));
            }
        }
        if let Some(admissible) = &spec.admissible {
            s.push_str(&format!(
                " [{} is one of: {}]",
                metavar,
                format_admissible(admissible)
            ));
        }
    }
    s.push('\n');

    if let Some(desc) = spec.desc.as_deref().filter(|d| !d.is_empty()) {
        s.push_str(&fill_paragraphs(desc, wcol, &format!("{}    ", indent)));
        s.push('\n');
    }
    s
}

fn format_subcmd(category: Option<&str>, decl: &SubcmdDecl, wcol: usize) -> String {
    let (mandatory, optional): (Vec<&ParamSpec>, Vec<&ParamSpec>) =
        decl.params.iter().partition(|p| p.is_mandatory());

    let mut s = String::new();
    match category {
        Some(cat) if !cat.is_empty() => s.push_str(&format!("Subcommand ({}):\n", cat)),
        _ => s.push_str("Subcommand:\n"),
    }
    s.push_str(&format!("  {}\n", decl.name));
    if let Some(desc) = decl.desc.as_deref().filter(|d| !d.is_empty()) {
        s.push_str(&fill_paragraphs(desc, wcol, "    "));
        s.push('\n');
    }

    if !mandatory.is_empty() {
        s.push_str("\n  Mandatory parameters:\n");
        for spec in mandatory {
            s.push_str(&format_param(spec, "  ", wcol));
        }
    }

    if !optional.is_empty() {
        s.push_str("\n  Optional parameters:\n");
        for spec in optional {
            s.push_str(&format_param(spec, "  ", wcol));
        }
    }

    s
}
