/*!
 * HTML page with a bilingual dictionary.
 *
 * Every origin-language term is listed with all target-language terms of
 * the concepts it names. Target terms naming the same set of concepts are
 * grouped, and each group can unfold the descriptions of its concepts.
 * The page links a sibling style sheet and the script controlling the
 * unfolding.
 */

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{debug, info, warn};

use crate::errors::{DeclarationError, UsageError};
use crate::file_utils::FileManager;
use crate::glossary::Glossary;
use crate::language_utils::{langsort, langsort_by_key};
use crate::subcmd::{ParamSpec, ResolvedOptions, SubcmdEntry, SubcmdView, ValueType};
use crate::textfmt::{
    LineAccumulator, TextFormatterHtml, TextFormatterPlain, escape_html, etag, stag, wtext,
};
use crate::view::{View, bilingual_concepts, resolve_env, resolve_lang};

/// Bundled style sheets, by name
const STYLES: &[(&str, &str)] = &[("apricot", include_str!("html_bidict_extras/apricot.css"))];

/// Script toggling entry details
const DCTL_JS: &str = include_str!("html_bidict_extras/dctl.js");

const INDENT: &str = "  ";

fn style_sheet(name: &str) -> Option<&'static str> {
    STYLES.iter().find(|(n, _)| *n == name).map(|(_, css)| *css)
}

// origin term -> target term -> concept keys
type Bidict<'a> = BTreeMap<String, BTreeMap<String, BTreeSet<&'a str>>>;
// target term -> grammar name -> declined forms
type Declensions = BTreeMap<String, BTreeMap<String, BTreeSet<String>>>;

/// Options of the bilingual dictionary view
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlBidict {
    pub olang: String,
    pub tlang: String,
    pub env: Option<String>,
    pub file: PathBuf,
    pub style: Option<String>,
    pub cssfile: Option<PathBuf>,
    pub jsfile: Option<PathBuf>,
    pub header: Option<PathBuf>,
    pub footer: Option<PathBuf>,
}

impl HtmlBidict {
    pub fn from_options(options: &ResolvedOptions) -> Result<Self, UsageError> {
        let path = |name: &str| -> Result<Option<PathBuf>, UsageError> {
            Ok(options.get_nonempty_str(name)?.map(PathBuf::from))
        };
        Ok(Self {
            olang: options.get_str("olang")?.to_string(),
            tlang: options.get_str("tlang")?.to_string(),
            env: options.get_nonempty_str("env")?.map(str::to_string),
            file: PathBuf::from(options.get_str("file")?),
            style: options.get_nonempty_str("style")?.map(str::to_string),
            cssfile: path("cssfile")?,
            jsfile: path("jsfile")?,
            header: path("header")?,
            footer: path("footer")?,
        })
    }

    // Link to a file from the page, relative to the page directory when inside it
    fn href(&self, path: &Path) -> String {
        let base = self.file.parent().unwrap_or(Path::new(""));
        path.strip_prefix(base)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }

    /// The whole page, linking the given style sheet and script
    pub fn render(&self, gloss: &Glossary, stylehref: Option<&str>, dctlhref: Option<&str>) -> Result<String> {
        let olang = resolve_lang(gloss, &self.olang, "origin language")?;
        let tlang = resolve_lang(gloss, &self.tlang, "target language")?;
        let env = resolve_env(gloss, self.env.as_deref())?;
        let env = env.as_deref();

        let accl = self.format_table(gloss, &olang, &tlang, env);

        let mut accl_head = LineAccumulator::new(INDENT, 0);
        match &self.header {
            Some(path) => accl_head.read(path)?,
            None => {
                let tfn = TextFormatterPlain::new(gloss, Some(&tlang), env);
                let gname = gloss
                    .title
                    .first(Some(&tlang), env)
                    .map(|t| tfn.format(&t.text))
                    .unwrap_or_default();
                let title = match env
                    .and_then(|e| gloss.environments.get(e))
                    .and_then(|e| e.name.first(Some(&tlang), env))
                {
                    Some(ename) => format!("{} ({})", gname, tfn.format(&ename.text)),
                    None => gname,
                };
                format_header(&mut accl_head, &tlang, &title, stylehref, dctlhref);
            }
        }

        let mut accl_foot = LineAccumulator::new(INDENT, 0);
        match &self.footer {
            Some(path) => accl_foot.read(path)?,
            None => format_footer(&mut accl_foot),
        }

        let mut accl_all = LineAccumulator::new(INDENT, 0);
        accl_all.extend(&accl_head);
        accl_all.extend(&accl);
        accl_all.extend(&accl_foot);
        Ok(accl_all.to_string())
    }

    fn format_table(&self, gloss: &Glossary, olang: &str, tlang: &str, env: Option<&str>) -> LineAccumulator {
        let concepts = bilingual_concepts(gloss, olang, tlang, env);
        if concepts.is_empty() {
            warn!(
                "No concepts found which have terms in both the origin and the target language and environment"
            );
        }

        let refbase: HashMap<String, String> = concepts
            .iter()
            .map(|(ckey, _)| (ckey.to_string(), String::new()))
            .collect();
        let tfn = TextFormatterPlain::new(gloss, Some(tlang), env);
        let tfp = TextFormatterHtml::new(gloss, Some(tlang), env)
            .refbase(refbase)
            .wtag("p");

        let mut bidict: Bidict<'_> = BTreeMap::new();
        let mut tdecls: Declensions = BTreeMap::new();
        for (ckey, concept) in &concepts {
            let oterms = concept.term.get(Some(olang), env).unwrap_or_default();
            let tterms = concept.term.get(Some(tlang), env).unwrap_or_default();
            for oterm in oterms {
                let by_tterm = bidict.entry(tfn.format(&oterm.nom)).or_default();
                for tterm in tterms {
                    let ttnom = tfn.format(&tterm.nom);
                    by_tterm.entry(ttnom.clone()).or_default().insert(*ckey);

                    let decls = tdecls.entry(ttnom).or_default();
                    for decl in &tterm.decl {
                        let grnam = gloss
                            .grammar
                            .get(&decl.gr)
                            .and_then(|g| g.shortname.first(Some(tlang), env))
                            .map(|n| tfn.format(&n.text))
                            .unwrap_or_else(|| decl.gr.clone());
                        decls.entry(grnam).or_default().insert(tfn.format(&decl.text));
                    }
                }
            }
        }

        let mut oterms_sorted: Vec<&String> = bidict.keys().collect();
        langsort(&mut oterms_sorted, olang);
        debug!("Bilingual dictionary of {} origin terms", oterms_sorted.len());

        let mut accl = LineAccumulator::new(INDENT, 2);
        accl.line(&stag("table", &[("class", "bd-table")], false), 0);
        accl.blank();

        let mut anchored: HashSet<&str> = HashSet::new();
        for (i_entry, oterm) in oterms_sorted.iter().enumerate() {
            let n_entry = i_entry + 1;

            // Collapse target terms naming the same concepts; sort within
            // groups, then groups by their first term.
            let mut by_ckeys: BTreeMap<Vec<&str>, Vec<&str>> = BTreeMap::new();
            for (tterm, ckeys) in &bidict[*oterm] {
                by_ckeys
                    .entry(ckeys.iter().copied().collect())
                    .or_default()
                    .push(tterm.as_str());
            }
            let mut groups: Vec<(Vec<&str>, Vec<&str>)> = by_ckeys
                .into_iter()
                .map(|(ckeys, mut tterms)| {
                    langsort(&mut tterms, tlang);
                    (tterms, ckeys)
                })
                .collect();
            langsort_by_key(&mut groups, tlang, |g| g.0[0]);

            let row_class = if n_entry % 2 == 1 { "bd-entry-odd" } else { "bd-entry-even" };
            accl.line(&stag("tr", &[("class", row_class)], false), 1);

            // Origin term, with anchors for concepts not anchored yet.
            accl.line(&stag("td", &[("class", "bd-oterm")], false), 2);
            let mut anchors = String::new();
            for (_, ckeys) in &groups {
                for &ckey in ckeys {
                    if anchored.insert(ckey) {
                        anchors.push_str(&stag("span", &[("id", ckey)], true));
                    }
                }
            }
            if !anchors.is_empty() {
                accl.line(&anchors, 3);
            }
            accl.line(&wtext(&escape_html(oterm), "p", &[("class", "bd-otline")]), 3);
            accl.line(&etag("td"), 2);

            accl.line(&stag("td", &[("class", "bd-tterms")], false), 2);
            for (i_ttgr, (tterms, ckeys)) in groups.iter().enumerate() {
                let n_ttgr = i_ttgr + 1;
                accl.line(&stag("div", &[("class", "bd-ttgroup")], false), 3);

                let tterms_compgr: Vec<String> = tterms
                    .iter()
                    .map(|tterm| format_term_with_declensions(tterm, tdecls.get(*tterm), tlang))
                    .collect();

                let mut descstrs = Vec::new();
                for ckey in ckeys {
                    let Some(concept) = gloss.concepts.get(*ckey) else {
                        continue;
                    };
                    for desc in concept.desc.get(Some(tlang), env).unwrap_or_default() {
                        if !tfn.format(&desc.text).is_empty() {
                            descstrs.push(tfp.format(&desc.text, Some("bd-desc")));
                        }
                    }
                }
                if descstrs.len() > 1 {
                    for (i, descstr) in descstrs.iter_mut().enumerate() {
                        *descstr = descstr.replacen('>', &format!(">{}. ", i + 1), 1);
                    }
                }

                let details_id = format!("opt_{}_{}", n_entry, n_ttgr);
                let has_details = !descstrs.is_empty();
                if has_details {
                    let onclick = format!("return show_hide(this, '{}')", details_id);
                    accl.line(&stag("div", &[("class", "bd-edctl")], false), 4);
                    accl.line(
                        &wtext(
                            "[+]",
                            "a",
                            &[
                                ("class", "bd-edctl"),
                                ("title", "Show details"),
                                ("href", "#"),
                                ("onclick", onclick.as_str()),
                            ],
                        ),
                        5,
                    );
                    accl.line(&etag("div"), 4);
                }

                let mut ttstr = tterms_compgr.join(", ");
                if groups.len() > 1 {
                    ttstr = format!("{}. {}", n_ttgr, ttstr);
                }
                accl.line(&wtext(&ttstr, "p", &[("class", "bd-ttline")]), 4);

                if has_details {
                    accl.line(
                        &stag(
                            "div",
                            &[("id", details_id.as_str()), ("style", "display: none;")],
                            false,
                        ),
                        4,
                    );
                    for descstr in &descstrs {
                        accl.line(descstr, 5);
                    }
                    accl.line(&etag("div"), 4);
                }

                accl.line(&etag("div"), 3);
            }
            accl.line(&etag("td"), 2);
            accl.line(&etag("tr"), 1);
            accl.blank();
        }

        accl.line(&etag("table"), 0);
        accl.blank();
        accl
    }
}

fn format_term_with_declensions(
    tterm: &str,
    decls: Option<&BTreeMap<String, BTreeSet<String>>>,
    tlang: &str,
) -> String {
    let term = escape_html(tterm);
    let Some(decls) = decls.filter(|d| !d.is_empty()) else {
        return term;
    };

    let mut lst: Vec<(&str, String)> = decls
        .iter()
        .map(|(gr, forms)| {
            let mut forms: Vec<&str> = forms.iter().map(String::as_str).collect();
            langsort(&mut forms, tlang);
            (gr.as_str(), forms.join(", "))
        })
        .collect();
    langsort_by_key(&mut lst, tlang, |x| x.0);

    let tdecl = lst
        .iter()
        .map(|(gr, forms)| format!("<i>{}</i> {}", escape_html(gr), escape_html(forms)))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} ({})", term, tdecl)
}

fn format_header(
    accl: &mut LineAccumulator,
    lang: &str,
    title: &str,
    stylehref: Option<&str>,
    dctlhref: Option<&str>,
) {
    accl.line("<?xml version='1.0' encoding='UTF-8'?>", 0);
    accl.line(
        "<!DOCTYPE html PUBLIC '-//W3C//DTD XHTML 1.0 Strict//EN' \
         'http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd'>",
        0,
    );
    accl.line("<!-- ===== AUTOGENERATED FILE, DO NOT EDIT ===== -->", 0);

    accl.line(
        &stag(
            "html",
            &[
                ("xmlns", "http://www.w3.org/1999/xhtml"),
                ("lang", lang),
                ("xml:lang", lang),
            ],
            false,
        ),
        0,
    );
    accl.line(&stag("head", &[], false), 1);
    accl.line(
        &stag(
            "meta",
            &[("http-equiv", "Content-type"), ("content", "text/html; charset=UTF-8")],
            true,
        ),
        2,
    );
    if let Some(href) = stylehref {
        accl.line(
            &stag(
                "link",
                &[("rel", "stylesheet"), ("type", "text/css"), ("href", href)],
                true,
            ),
            2,
        );
    }
    if let Some(src) = dctlhref {
        accl.line(
            &wtext("", "script", &[("type", "text/javascript"), ("src", src)]),
            2,
        );
    }
    accl.line(&wtext(&escape_html(title), "title", &[]), 2);
    accl.line(&etag("head"), 1);
    accl.line(&stag("body", &[], false), 1);
    accl.blank();
}

fn format_footer(accl: &mut LineAccumulator) {
    accl.line(&etag("body"), 1);
    accl.line(&etag("html"), 0);
}

impl View for HtmlBidict {
    fn process(&self, gloss: &Glossary) -> Result<()> {
        let stylepath = match &self.style {
            Some(style) => {
                let css = style_sheet(style).ok_or_else(|| anyhow!("unknown style sheet '{}'", style))?;
                let path = self
                    .cssfile
                    .clone()
                    .unwrap_or_else(|| FileManager::replace_ext(&self.file, "css"));
                FileManager::write_to_file(&path, css)?;
                Some(path)
            }
            None => None,
        };

        let dctlpath = self
            .jsfile
            .clone()
            .unwrap_or_else(|| FileManager::replace_ext(&self.file, "js"));
        FileManager::write_to_file(&dctlpath, DCTL_JS)?;

        let stylehref = stylepath.as_deref().map(|p| self.href(p));
        let dctlhref = self.href(&dctlpath);
        let page = self.render(gloss, stylehref.as_deref(), Some(&dctlhref))?;
        FileManager::write_to_file(&self.file, &page)?;
        info!("Wrote bilingual dictionary {:?}", self.file);
        Ok(())
    }
}

fn fill_optparser(pv: &mut SubcmdView<'_>) -> Result<(), DeclarationError> {
    let mut styles = vec![""];
    styles.extend(STYLES.iter().map(|(name, _)| *name));

    pv.set_desc("Create HTML page with bilingual dictionary.");

    pv.add_subopt(
        ParamSpec::new("olang", ValueType::Str)
            .metavar("LANGKEY")
            .desc("Original language in the dictionary."),
    )?;
    pv.add_subopt(
        ParamSpec::new("tlang", ValueType::Str)
            .metavar("LANGKEY")
            .desc("Target language in the dictionary."),
    )?;
    pv.add_subopt(
        ParamSpec::new("env", ValueType::Str)
            .default_value("")
            .metavar("ENVKEY")
            .desc("Environment for which the dictionary is produced. If not given, the glossary default is used."),
    )?;
    pv.add_subopt(
        ParamSpec::new("file", ValueType::Str)
            .metavar("FILE")
            .desc("File to output the HTML page to."),
    )?;
    pv.add_subopt(
        ParamSpec::new("style", ValueType::Str)
            .default_value("")
            .admissible(styles)
            .metavar("STYLE")
            .desc("Style sheet for the HTML page. If not given, the page will not be styled."),
    )?;
    pv.add_subopt(
        ParamSpec::new("cssfile", ValueType::Str)
            .default_value("")
            .metavar("FILE")
            .desc(
                "File path where to copy the selected style sheet. If not given, the path is \
                 constructed as that of the HTML page, with extension replaced by .css.",
            ),
    )?;
    pv.add_subopt(
        ParamSpec::new("jsfile", ValueType::Str)
            .default_value("")
            .metavar("FILE")
            .desc(
                "File path where to copy the JavaScript functions. If not given, the path is \
                 constructed as that of the HTML page, with extension replaced by .js.",
            ),
    )?;
    pv.add_subopt(
        ParamSpec::new("header", ValueType::Str)
            .default_value("")
            .metavar("FILE")
            .desc(
                "File that contains the page header section to use instead of the default, \
                 including the <body> tag and possibly some preface text.",
            ),
    )?;
    pv.add_subopt(
        ParamSpec::new("footer", ValueType::Str)
            .default_value("")
            .metavar("FILE")
            .desc(
                "File that contains the page footer section to use instead of the default, \
                 possibly including some closing text before the </body> tag.",
            ),
    )?;
    Ok(())
}

fn create(options: &ResolvedOptions) -> Result<Box<dyn View>, UsageError> {
    Ok(Box::new(HtmlBidict::from_options(options)?))
}

pub fn entry() -> SubcmdEntry<dyn View> {
    SubcmdEntry {
        name: "html-bidict",
        fill_optparser,
        create,
    }
}
