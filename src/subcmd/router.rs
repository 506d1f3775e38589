/*!
 * Suboption parser: routing side.
 *
 * Turns the raw parameters collected from the command line into one
 * `ResolvedOptions` per issued subcommand. The whole call either succeeds
 * or fails on the first error; nothing is partially applied.
 */

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::UsageError;
use crate::subcmd::parser::{ParamSpec, SuboptParser};
use crate::subcmd::value::{Value, ValueType, format_admissible};

static NON_IDENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^a-z0-9]+").unwrap());

/// Stand-in for an escaped comma while splitting list values
const COMMA_MASK: char = '\u{4}';

/// Construct an identifier-safe option name out of a parameter name.
///
/// Runs of troublesome characters become a single underscore, and an `x`
/// is prepended if the result does not start with a letter.
pub fn to_attr_name(param: &str) -> String {
    let attr = NON_IDENT_REGEX.replace_all(param, "_").into_owned();
    if attr.chars().next().is_some_and(|c| c.is_alphabetic()) {
        attr
    } else {
        format!("x{}", attr)
    }
}

/// Split a raw list value on commas, where `,,` stands for a literal comma
pub fn split_list_value(raw: &str) -> Vec<String> {
    raw.replace(",,", &COMMA_MASK.to_string())
        .split(',')
        .map(|x| x.replace(COMMA_MASK, ","))
        .collect()
}

/// Final parameter values of one subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    subcmd: String,
    values: BTreeMap<String, Value>,
}

impl ResolvedOptions {
    pub fn new(subcmd: &str) -> Self {
        Self {
            subcmd: subcmd.to_string(),
            values: BTreeMap::new(),
        }
    }

    /// Builder used by tests and by subcommands constructed programmatically
    pub fn with(mut self, param: &str, value: impl Into<Value>) -> Self {
        self.values.insert(to_attr_name(param), value.into());
        self
    }

    pub fn subcmd(&self) -> &str {
        &self.subcmd
    }

    /// Option names, already normalized
    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Look up a value by parameter name (raw or normalized)
    pub fn get(&self, param: &str) -> Option<&Value> {
        self.values.get(&to_attr_name(param))
    }

    fn unresolved(&self, param: &str, expected: ValueType, list: bool) -> UsageError {
        UsageError::Unresolved {
            param: param.to_string(),
            subcmd: self.subcmd.clone(),
            expected: if list {
                format!("list of {}", expected)
            } else {
                expected.to_string()
            },
        }
    }

    pub fn get_bool(&self, param: &str) -> Result<bool, UsageError> {
        self.get(param)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.unresolved(param, ValueType::Bool, false))
    }

    pub fn get_str(&self, param: &str) -> Result<&str, UsageError> {
        self.get(param)
            .and_then(Value::as_str)
            .ok_or_else(|| self.unresolved(param, ValueType::Str, false))
    }

    pub fn get_int(&self, param: &str) -> Result<i64, UsageError> {
        self.get(param)
            .and_then(Value::as_int)
            .ok_or_else(|| self.unresolved(param, ValueType::Int, false))
    }

    pub fn get_float(&self, param: &str) -> Result<f64, UsageError> {
        self.get(param)
            .and_then(Value::as_float)
            .ok_or_else(|| self.unresolved(param, ValueType::Float, false))
    }

    pub fn get_str_list(&self, param: &str) -> Result<Vec<&str>, UsageError> {
        self.get(param)
            .and_then(Value::as_list)
            .and_then(|items| items.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
            .ok_or_else(|| self.unresolved(param, ValueType::Str, true))
    }

    pub fn get_int_list(&self, param: &str) -> Result<Vec<i64>, UsageError> {
        self.get(param)
            .and_then(Value::as_list)
            .and_then(|items| items.iter().map(Value::as_int).collect::<Option<Vec<_>>>())
            .ok_or_else(|| self.unresolved(param, ValueType::Int, true))
    }

    /// Optional string: the empty string counts as not given
    pub fn get_nonempty_str(&self, param: &str) -> Result<Option<&str>, UsageError> {
        self.get_str(param)
            .map(|s| if s.is_empty() { None } else { Some(s) })
    }
}

/// Compute the value one subcommand gets for a routed parameter
fn resolve_value(spec: &ParamSpec, raw: Option<&str>) -> Result<Value, UsageError> {
    let param = || spec.name.clone();

    if spec.is_flag() {
        if raw.is_some() {
            return Err(UsageError::FlagWithValue { param: param() });
        }
        let default = spec.default.as_ref().and_then(Value::as_bool).unwrap_or(false);
        return Ok(Value::Bool(!default));
    }

    let raw = raw.ok_or_else(|| UsageError::MissingValue { param: param() })?;

    let value = if spec.is_list {
        let items = split_list_value(raw)
            .iter()
            .map(|x| spec.value_type.convert(x))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| UsageError::ListConversion {
                param: param(),
                value: raw.to_string(),
                expected: spec.value_type.to_string(),
            })?;
        Value::List(items)
    } else {
        spec.value_type
            .convert(raw)
            .ok_or_else(|| UsageError::Conversion {
                param: param(),
                value: raw.to_string(),
                expected: spec.value_type.to_string(),
            })?
    };

    if let Some(admissible) = &spec.admissible {
        for elem in value.elements() {
            if !admissible.contains(elem) {
                return Err(UsageError::NotAdmissible {
                    param: param(),
                    value: elem.to_string(),
                    admissible: format_admissible(admissible),
                });
            }
        }
    }

    Ok(value)
}

impl SuboptParser {
    /// Parse the raw parameters collected from the command line.
    ///
    /// If the command line had `-sfoo -sbar:xyz -sbaz:10`, `rawopts` is
    /// `["foo", "bar:xyz", "baz:10"]`. Each parameter is routed to every
    /// issued subcommand which declares it. Returns the options of each
    /// subcommand, in the order the subcommands were given.
    pub fn parse<R, S>(&self, rawopts: &[R], subcmds: &[S]) -> Result<Vec<ResolvedOptions>, UsageError>
    where
        R: AsRef<str>,
        S: AsRef<str>,
    {
        // Assure only registered subcommands have been issued.
        let mut decls = Vec::with_capacity(subcmds.len());
        for subcmd in subcmds {
            let decl = self.decl(subcmd.as_ref()).ok_or_else(|| {
                UsageError::UnregisteredSubcommand {
                    subcmd: subcmd.as_ref().to_string(),
                }
            })?;
            decls.push(decl);
        }

        // Parse all given parameters and collect their values.
        let mut collected: Vec<HashMap<&str, Value>> = vec![HashMap::new(); decls.len()];
        let mut seen: HashSet<&str> = HashSet::new();
        for opstr in rawopts {
            let opstr = opstr.as_ref();
            let (subopt, strval) = match opstr.split_once(':') {
                Some((name, value)) => (name, Some(value)),
                None => (opstr, None),
            };

            if !seen.insert(subopt) {
                return Err(UsageError::RepeatedParameter {
                    param: subopt.to_string(),
                });
            }

            let mut accepted = false;
            for (i, decl) in decls.iter().enumerate() {
                let Some(spec) = decl.param(subopt) else {
                    continue;
                };
                let value = resolve_value(spec, strval)?;
                debug!("Routed parameter '{}' = '{}' to '{}'", subopt, value, decl.name);
                collected[i].insert(spec.name.as_str(), value);
                accepted = true;
            }

            if !accepted {
                return Err(UsageError::UnexpectedParameter {
                    param: subopt.to_string(),
                });
            }
        }

        // Assure that all mandatory parameters have been supplied to each
        // issued subcommand, and set defaults for all optional parameters.
        let mut resolved = Vec::with_capacity(decls.len());
        for (decl, mut given) in decls.into_iter().zip(collected) {
            let mut opts = ResolvedOptions::new(&decl.name);
            for spec in &decl.params {
                let value = match given.remove(spec.name.as_str()) {
                    Some(value) => value,
                    None => spec.default.clone().ok_or_else(|| UsageError::MissingMandatory {
                        param: spec.name.clone(),
                        subcmd: decl.name.clone(),
                    })?,
                };
                opts.values.insert(to_attr_name(&spec.name), value);
            }
            resolved.push(opts);
        }

        Ok(resolved)
    }
}
