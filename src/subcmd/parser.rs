/*!
 * Suboption parser: declaration side.
 *
 * A `SuboptParser` serves one category of subcommands (e.g. all filters).
 * Every subcommand added to it gets a `SubcmdView`, through which it declares
 * its parameters. Subcommands in one category share the meaning of a
 * same-named parameter, so the parser keeps a schema registry keyed by
 * parameter name and checks every new declaration against it.
 */

use std::collections::HashMap;

use log::debug;

use crate::errors::DeclarationError;
use crate::subcmd::value::{Value, ValueType, format_admissible};

/// Declaration of one subcommand parameter.
///
/// Built with a small builder API:
///
/// ```
/// use dgproc::subcmd::{ParamSpec, Value, ValueType};
///
/// let spec = ParamSpec::new("wcol", ValueType::Int)
///     .default_value(Value::Int(70))
///     .metavar("COLUMN")
///     .desc("Wrap text after this column.");
/// assert!(!spec.is_mandatory());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub value_type: ValueType,
    pub is_list: bool,
    /// `None` means the parameter is mandatory
    pub default: Option<Value>,
    pub admissible: Option<Vec<Value>>,
    pub metavar: Option<String>,
    pub desc: Option<String>,
}

impl ParamSpec {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            is_list: false,
            default: None,
            admissible: None,
            metavar: None,
            desc: None,
        }
    }

    /// A flag parameter, off unless given
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueType::Bool).default_value(Value::Bool(false))
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn admissible<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.admissible = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    pub fn desc(mut self, desc: &str) -> Self {
        self.desc = Some(desc.to_string());
        self
    }

    pub fn is_mandatory(&self) -> bool {
        self.default.is_none()
    }

    pub fn is_flag(&self) -> bool {
        self.value_type == ValueType::Bool
    }
}

/// Declared subcommand: description and parameters in declaration order
#[derive(Debug, Clone, Default)]
pub struct SubcmdDecl {
    pub name: String,
    pub desc: Option<String>,
    pub params: Vec<ParamSpec>,
}

impl SubcmdDecl {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Parameter parser for one category of subcommands
#[derive(Debug, Default)]
pub struct SuboptParser {
    category: Option<String>,
    subcmds: Vec<SubcmdDecl>,
    // @field: (type, list-ness) of every parameter name declared so far
    schema: HashMap<String, (ValueType, bool)>,
}

impl SuboptParser {
    /// Create a parser, optionally naming the category it serves
    pub fn new(category: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Add a subcommand whose parameters are declared through the returned view.
    ///
    /// Use a blank line in the description to split it into paragraphs.
    pub fn add_subcmd(
        &mut self,
        subcmd: &str,
        desc: Option<&str>,
    ) -> Result<SubcmdView<'_>, DeclarationError> {
        if self.decl(subcmd).is_some() {
            return Err(DeclarationError::DuplicateSubcommand {
                subcmd: subcmd.to_string(),
            });
        }
        self.subcmds.push(SubcmdDecl {
            name: subcmd.to_string(),
            desc: desc.map(str::to_string),
            params: Vec::new(),
        });
        let index = self.subcmds.len() - 1;
        Ok(SubcmdView { parser: self, index })
    }

    /// View into a previously added subcommand
    pub fn view(&mut self, subcmd: &str) -> Result<SubcmdView<'_>, DeclarationError> {
        let index = self
            .subcmds
            .iter()
            .position(|d| d.name == subcmd)
            .ok_or_else(|| DeclarationError::UnknownSubcommand {
                subcmd: subcmd.to_string(),
            })?;
        Ok(SubcmdView { parser: self, index })
    }

    /// Declaration of a subcommand, if added
    pub fn decl(&self, subcmd: &str) -> Option<&SubcmdDecl> {
        self.subcmds.iter().find(|d| d.name == subcmd)
    }

    /// Names of all added subcommands, in order of addition
    pub fn subcmd_names(&self) -> Vec<&str> {
        self.subcmds.iter().map(|d| d.name.as_str()).collect()
    }

    fn category_label(&self) -> String {
        self.category.clone().unwrap_or_default()
    }

    fn check_declaration(&self, subcmd: &str, spec: &ParamSpec) -> Result<(), DeclarationError> {
        let err_param = || spec.name.clone();
        let err_subcmd = || subcmd.to_string();

        if self
            .decl(subcmd)
            .is_some_and(|d| d.param(&spec.name).is_some())
        {
            return Err(DeclarationError::DuplicateParameter {
                param: err_param(),
                subcmd: err_subcmd(),
            });
        }

        if spec.is_flag() && (spec.is_list || !matches!(spec.default, Some(Value::Bool(_)))) {
            return Err(DeclarationError::MalformedFlag {
                param: err_param(),
                subcmd: err_subcmd(),
            });
        }

        if let Some(default) = &spec.default {
            if spec.is_list && !default.is_list() {
                return Err(DeclarationError::DefaultNotList {
                    param: err_param(),
                    subcmd: err_subcmd(),
                });
            }
            if !spec.is_list && default.is_list() {
                return Err(DeclarationError::DefaultIsList {
                    param: err_param(),
                    subcmd: err_subcmd(),
                });
            }
            if !default.conforms_to(spec.value_type) {
                return Err(DeclarationError::DefaultTypeMismatch {
                    param: err_param(),
                    subcmd: err_subcmd(),
                    value: default.to_string(),
                    expected: spec.value_type.to_string(),
                });
            }
        }

        if let Some(admissible) = &spec.admissible {
            if let Some(bad) = admissible
                .iter()
                .find(|v| v.value_type() != Some(spec.value_type))
            {
                return Err(DeclarationError::AdmissibleTypeMismatch {
                    param: err_param(),
                    subcmd: err_subcmd(),
                    value: bad.to_string(),
                    expected: spec.value_type.to_string(),
                });
            }
            if let Some(default) = &spec.default {
                for elem in default.elements() {
                    if !admissible.contains(elem) {
                        return Err(DeclarationError::DefaultNotAdmissible {
                            param: err_param(),
                            subcmd: err_subcmd(),
                            value: elem.to_string(),
                            admissible: format_admissible(admissible),
                        });
                    }
                }
            }
        }

        if let Some(&(general_type, general_islist)) = self.schema.get(&spec.name) {
            if general_type != spec.value_type {
                return Err(DeclarationError::SiblingTypeMismatch {
                    param: err_param(),
                    subcmd: err_subcmd(),
                    category: self.category_label(),
                });
            }
            if general_islist != spec.is_list {
                return Err(DeclarationError::SiblingListMismatch {
                    param: err_param(),
                    subcmd: err_subcmd(),
                    category: self.category_label(),
                });
            }
        }

        Ok(())
    }
}

/// Mutable view of one subcommand inside a `SuboptParser`
pub struct SubcmdView<'a> {
    parser: &'a mut SuboptParser,
    index: usize,
}

impl SubcmdView<'_> {
    pub fn name(&self) -> &str {
        &self.parser.subcmds[self.index].name
    }

    /// Set the subcommand description
    pub fn set_desc(&mut self, desc: &str) {
        self.parser.subcmds[self.index].desc = Some(desc.to_string());
    }

    /// Declare a parameter.
    ///
    /// Same-named parameters of sibling subcommands must agree on type and
    /// list-ness; defaults and descriptions may differ. A list-valued
    /// parameter declared without a default gets the empty list.
    pub fn add_subopt(&mut self, spec: ParamSpec) -> Result<(), DeclarationError> {
        let mut spec = spec;
        if spec.is_list && spec.default.is_none() {
            spec.default = Some(Value::List(Vec::new()));
        }

        let subcmd = self.name().to_string();
        self.parser.check_declaration(&subcmd, &spec)?;

        debug!(
            "Declared parameter '{}' ({}{}) for subcommand '{}'",
            spec.name,
            spec.value_type,
            if spec.is_list { " list" } else { "" },
            subcmd
        );

        self.parser
            .schema
            .entry(spec.name.clone())
            .or_insert((spec.value_type, spec.is_list));
        self.parser.subcmds[self.index].params.push(spec);
        Ok(())
    }
}
