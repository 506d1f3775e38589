/*!
 * Glossary parts which can differ by language and environment.
 *
 * A `ScopedLookup` files fragments (terms, descriptions, names...) under
 * `(language, environment)` keys. Fragments without an explicit language or
 * environment take the defaults of the glossary they belong to. Retrieval
 * falls back to environments declared close to the requested one.
 */

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

/// A glossary fragment which may be restricted to a language and environments
pub trait Scoped {
    /// Explicit language of the fragment, if any
    fn lang(&self) -> Option<&str>;

    /// Explicit environments of the fragment; empty means "the defaults"
    fn envs(&self) -> &[String];
}

/// Defaults shared by all lookups of one glossary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeDefaults {
    pub lang: String,
    pub envs: Vec<String>,
    /// Environment key to keys of environments close to it, most preferred first.
    /// `None` disables the closeness fallback.
    pub closeness: Option<HashMap<String, Vec<String>>>,
}

impl ScopeDefaults {
    pub fn new(lang: &str, envs: &[&str]) -> Self {
        Self {
            lang: lang.to_string(),
            envs: envs.iter().map(|e| e.to_string()).collect(),
            closeness: None,
        }
    }

    pub fn with_closeness(mut self, closeness: HashMap<String, Vec<String>>) -> Self {
        self.closeness = Some(closeness);
        self
    }

    /// First default environment, if any
    pub fn first_env(&self) -> Option<&str> {
        self.envs.first().map(String::as_str)
    }
}

// Fragments filed with no environment at all (neither own nor default)
// live under the `None` environment key.
type EnvMap<T> = BTreeMap<Option<String>, Vec<Rc<T>>>;

/// Language/environment scoped collection of fragments
#[derive(Debug)]
pub struct ScopedLookup<T> {
    defaults: Rc<ScopeDefaults>,
    data: BTreeMap<String, EnvMap<T>>,
}

impl<T> Clone for ScopedLookup<T> {
    fn clone(&self) -> Self {
        Self {
            defaults: Rc::clone(&self.defaults),
            data: self.data.clone(),
        }
    }
}

impl<T: Scoped> ScopedLookup<T> {
    pub fn new(defaults: Rc<ScopeDefaults>) -> Self {
        Self {
            defaults,
            data: BTreeMap::new(),
        }
    }

    /// Build a lookup out of fragments, in order
    pub fn from_fragments<I: IntoIterator<Item = T>>(defaults: Rc<ScopeDefaults>, fragments: I) -> Self {
        let mut lookup = Self::new(defaults);
        for fragment in fragments {
            lookup.add(fragment);
        }
        lookup
    }

    pub fn defaults(&self) -> &ScopeDefaults {
        &self.defaults
    }

    /// File a fragment under its language and each of its environments
    pub fn add(&mut self, fragment: T) {
        let lang = fragment
            .lang()
            .unwrap_or(self.defaults.lang.as_str())
            .to_string();
        let envs: Vec<Option<String>> = if !fragment.envs().is_empty() {
            fragment.envs().iter().cloned().map(Some).collect()
        } else if !self.defaults.envs.is_empty() {
            self.defaults.envs.iter().cloned().map(Some).collect()
        } else {
            vec![None]
        };

        let fragment = Rc::new(fragment);
        let by_env = self.data.entry(lang).or_default();
        for env in envs {
            by_env.entry(env).or_default().push(Rc::clone(&fragment));
        }
    }

    /// Fragments for a language and environment.
    ///
    /// `None` for either means the default (the first default environment).
    /// When nothing is filed under the exact environment, environments close
    /// to it are tried in their declared order. Returns `None` if nothing
    /// is found, as opposed to an empty slice.
    pub fn get(&self, lang: Option<&str>, env: Option<&str>) -> Option<&[Rc<T>]> {
        let lang = lang.unwrap_or(self.defaults.lang.as_str());
        let env = env.or(self.defaults.first_env());
        let by_env = self.data.get(lang)?;

        if let Some(found) = by_env.get(&env.map(str::to_string)) {
            return Some(found.as_slice());
        }

        // Try to select environment by closeness.
        let closeness = self.defaults.closeness.as_ref()?;
        let close_envs = closeness.get(env?)?;
        close_envs
            .iter()
            .find_map(|close| by_env.get(&Some(close.clone())))
            .map(Vec::as_slice)
    }

    /// Like `get`, but with empty results folded into `None`
    pub fn get_nonempty(&self, lang: Option<&str>, env: Option<&str>) -> Option<&[Rc<T>]> {
        self.get(lang, env).filter(|x| !x.is_empty())
    }

    /// First fragment for a language and environment
    pub fn first(&self, lang: Option<&str>, env: Option<&str>) -> Option<&T> {
        self.get(lang, env).and_then(|x| x.first()).map(|x| x.as_ref())
    }

    /// Every filed fragment; one filed under several environments appears once per environment
    pub fn all(&self) -> Vec<&T> {
        self.data
            .values()
            .flat_map(|by_env| by_env.values())
            .flat_map(|frags| frags.iter().map(|x| x.as_ref()))
            .collect()
    }

    /// Every filed fragment once, in filing order within each language
    pub fn distinct(&self) -> Vec<&T> {
        let mut seen: Vec<*const T> = Vec::new();
        let mut frags = Vec::new();
        for frag in self.data.values().flat_map(|by_env| by_env.values()).flatten() {
            let ptr = Rc::as_ptr(frag);
            if !seen.contains(&ptr) {
                seen.push(ptr);
                frags.push(frag.as_ref());
            }
        }
        frags
    }

    /// Languages for which anything is filed
    pub fn languages(&self) -> BTreeSet<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    /// Named environments filed for a language (default language if `None`).
    ///
    /// Returns `None` if nothing is filed for the language.
    pub fn environments(&self, lang: Option<&str>) -> Option<BTreeSet<&str>> {
        let lang = lang.unwrap_or(self.defaults.lang.as_str());
        self.data
            .get(lang)
            .map(|by_env| by_env.keys().filter_map(|e| e.as_deref()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
