//! Miniature Javadoc 8 sites for tests.
//!
//! Plain string building without crate imports, so integration tests can
//! include this file as well.

#![allow(dead_code)]

use std::collections::BTreeMap;

/// One method row plus its detail block.
#[derive(Debug, Clone, Default)]
pub struct MethodFixture {
    pub return_type: String,
    pub name: String,
    /// Parameter list as written, e.g. `int a, String b`.
    pub params: String,
    /// Full `throws` clause, e.g. `throws IOException`.
    pub throws: String,
    pub summary: String,
    pub body: String,
    pub modifiers: String,
}

impl MethodFixture {
    pub fn new(return_type: &str, name: &str, params: &str) -> Self {
        Self {
            return_type: return_type.to_string(),
            name: name.to_string(),
            params: params.to_string(),
            summary: format!("Does {name}."),
            body: format!("<div class=\"block\">Does {name} thoroughly.</div>"),
            modifiers: "public".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn throws(mut self, clause: &str) -> Self {
        self.throws = clause.to_string();
        self
    }

    #[must_use]
    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.modifiers = modifiers.to_string();
        self
    }

    /// Anchor name as Javadoc 8 generates it: `name-Type1-Type2-`, with
    /// generic arguments erased. Parameters must not contain commas inside
    /// type arguments.
    pub fn anchor(&self) -> String {
        let types: Vec<String> = self
            .params
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let words: Vec<&str> = p.split_whitespace().collect();
                let ty = words[..words.len().saturating_sub(1)].join(" ");
                let erased = ty.split(['<', '&']).next().unwrap_or_default().to_string();
                let array = ty.ends_with("...") || ty.ends_with("[]");
                let suffix = if array { ":A" } else { "" };
                format!("{}{suffix}", erased.trim_end_matches("...").trim_end_matches("[]"))
            })
            .collect();
        format!("{}-{}-", self.name, types.join("-"))
    }

    fn params_html(&self) -> String {
        self.params.replace(' ', "&nbsp;").replace(",&nbsp;", ",\n       ")
    }
}

/// An "inherited from" marker.
#[derive(Debug, Clone)]
pub struct InheritedFixture {
    pub supertype: String,
    pub interface: bool,
    /// `name` links to `name--`; `name(int a, byte[] b)` links to the
    /// anchor of that overload.
    pub names: Vec<String>,
}

impl InheritedFixture {
    /// `(package, class)` of the supertype; the class part starts at the
    /// first capitalized segment, so `java.util.Map.Entry` is
    /// `("java.util", "Map.Entry")`.
    pub fn split_supertype(&self) -> (String, String) {
        let segments: Vec<&str> = self.supertype.split('.').collect();
        let first_class = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));
        (segments[..first_class].join("."), segments[first_class..].join("."))
    }

    /// `(link text, anchor)` of every listed method.
    pub fn links(&self) -> Vec<(String, String)> {
        self.names
            .iter()
            .map(|entry| match entry.split_once('(') {
                Some((name, params)) => {
                    let params = params.trim_end_matches(')');
                    (name.to_string(), MethodFixture::new("", name, params).anchor())
                },
                None => (entry.clone(), format!("{entry}--")),
            })
            .collect()
    }
}

/// One class page.
#[derive(Debug, Clone)]
pub struct ClassFixture {
    pub package: String,
    pub name: String,
    pub declaration: String,
    pub description: String,
    pub methods: Vec<MethodFixture>,
    pub inherited: Vec<InheritedFixture>,
    pub method_summary: bool,
}

impl ClassFixture {
    pub fn new(package: &str, name: &str, declaration: &str) -> Self {
        Self {
            package: package.to_string(),
            name: name.to_string(),
            declaration: declaration.to_string(),
            description: format!("<div class=\"block\">The {name} type.</div>"),
            methods: Vec::new(),
            inherited: Vec::new(),
            method_summary: true,
        }
    }

    #[must_use]
    pub fn description(mut self, html: &str) -> Self {
        self.description = html.to_string();
        self
    }

    #[must_use]
    pub fn method(self, return_type: &str, name: &str, params: &str) -> Self {
        self.with_method(MethodFixture::new(return_type, name, params))
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodFixture) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn inherits(mut self, supertype: &str, names: &[&str]) -> Self {
        self.inherited.push(InheritedFixture {
            supertype: supertype.to_string(),
            interface: false,
            names: names.iter().map(ToString::to_string).collect(),
        });
        self
    }

    #[must_use]
    pub fn inherits_interface(mut self, supertype: &str, names: &[&str]) -> Self {
        self.inherited.push(InheritedFixture {
            supertype: supertype.to_string(),
            interface: true,
            names: names.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Drops the whole method summary section, as Javadoc does for types
    /// without any methods.
    #[must_use]
    pub const fn without_method_summary(mut self) -> Self {
        self.method_summary = false;
        self
    }

    pub fn path(&self) -> String {
        format!("{}/{}.html", self.package.replace('.', "/"), self.name)
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\"><head><title>");
        html.push_str(&self.name);
        html.push_str("</title></head><body>\n");
        html.push_str(&format!(
            "<div class=\"header\"><div class=\"subTitle\">{}</div><h2 class=\"title\">{}</h2></div>\n",
            self.package, self.name
        ));
        html.push_str("<div class=\"contentContainer\">\n");
        html.push_str("<div class=\"description\">\n<ul class=\"blockList\">\n<li class=\"blockList\">\n");
        html.push_str("<hr>\n<br>\n<pre>");
        html.push_str(&self.declaration);
        html.push_str("</pre>\n");
        html.push_str(&self.description);
        html.push_str("\n</li>\n</ul>\n</div>\n");

        if self.method_summary {
            html.push_str("<div class=\"summary\">\n<ul class=\"blockList\">\n<li class=\"blockList\">\n");
            html.push_str("<ul class=\"blockList\">\n<li class=\"blockList\">\n");
            html.push_str("<a name=\"method.summary\">\n<!--   -->\n</a>\n<h3>Method Summary</h3>\n");
            if !self.methods.is_empty() {
                html.push_str(
                    "<table class=\"memberSummary\" border=\"0\" cellpadding=\"3\" cellspacing=\"0\" summary=\"Method Summary table\">\n",
                );
                html.push_str("<caption><span id=\"t0\" class=\"activeTableTab\"><span>All Methods</span></span></caption>\n");
                html.push_str("<tr>\n<th class=\"colFirst\" scope=\"col\">Modifier and Type</th>\n<th class=\"colLast\" scope=\"col\">Method and Description</th>\n</tr>\n");
                for (i, method) in self.methods.iter().enumerate() {
                    html.push_str(&format!(
                        "<tr id=\"i{i}\" class=\"{}\">\n<td class=\"colFirst\"><code>{}</code></td>\n\
                         <td class=\"colLast\"><code><span class=\"memberNameLink\"><a href=\"#{}\">{}</a></span>({})</code>\n\
                         <div class=\"block\">{}</div>\n</td>\n</tr>\n",
                        if i % 2 == 0 { "altColor" } else { "rowColor" },
                        method.return_type,
                        method.anchor(),
                        method.name,
                        method.params_html(),
                        method.summary,
                    ));
                }
                html.push_str("</table>\n");
            }
            let to_root = "../".repeat(self.package.split('.').count());
            for group in &self.inherited {
                let (package, class) = group.split_supertype();
                let page = format!("{to_root}{}/{class}.html", package.replace('.', "/"));
                let links: Vec<String> = group
                    .links()
                    .iter()
                    .map(|(name, anchor)| format!("<a href=\"{page}#{anchor}\">{name}</a>"))
                    .collect();
                html.push_str(&format!(
                    "<ul class=\"blockList\">\n<li class=\"blockList\"><a name=\"methods.inherited.from.class.{}\">\n<!--   -->\n</a>\n\
                     <h3>Methods inherited from {}&nbsp;{}.<a href=\"{}\">{}</a></h3>\n<code>{}</code></li>\n</ul>\n",
                    group.supertype,
                    if group.interface { "interface" } else { "class" },
                    package,
                    page,
                    class,
                    links.join(", "),
                ));
            }
            html.push_str("</li>\n</ul>\n</li>\n</ul>\n</div>\n");
        }

        if !self.methods.is_empty() {
            html.push_str("<div class=\"details\">\n<ul class=\"blockList\">\n<li class=\"blockList\">\n");
            html.push_str("<ul class=\"blockList\">\n<li class=\"blockList\">\n");
            html.push_str("<a name=\"method.detail\">\n<!--   -->\n</a>\n<h3>Method Detail</h3>\n");
            for method in &self.methods {
                let throws = if method.throws.is_empty() {
                    String::new()
                } else {
                    format!("\n                  {}", method.throws)
                };
                html.push_str(&format!(
                    "<a name=\"{}\">\n<!--   -->\n</a>\n<ul class=\"blockList\">\n<li class=\"blockList\">\n<h4>{}</h4>\n\
                     <pre>{}&nbsp;{}&nbsp;{}({}){}</pre>\n{}\n</li>\n</ul>\n",
                    method.anchor(),
                    method.name,
                    method.modifiers.replace(' ', "&nbsp;"),
                    method.return_type,
                    method.name,
                    method.params_html(),
                    throws,
                    method.body,
                ));
            }
            html.push_str("</li>\n</ul>\n</li>\n</ul>\n</div>\n");
        }

        html.push_str("</div>\n</body></html>\n");
        html
    }
}

/// A whole site: listing, overview, package and class pages.
#[derive(Debug, Clone)]
pub struct SiteFixture {
    pub base: String,
    pub classes: Vec<ClassFixture>,
    /// Package name to (short description, description block).
    pub packages: BTreeMap<String, (String, Option<String>)>,
    pub overview: bool,
}

impl SiteFixture {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            classes: Vec::new(),
            packages: BTreeMap::new(),
            overview: true,
        }
    }

    #[must_use]
    pub fn class(mut self, class: ClassFixture) -> Self {
        self.packages
            .entry(class.package.clone())
            .or_insert_with(|| (String::new(), None));
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn package(mut self, name: &str, short: &str, description: Option<&str>) -> Self {
        self.packages.insert(
            name.to_string(),
            (short.to_string(), description.map(ToString::to_string)),
        );
        self
    }

    #[must_use]
    pub const fn without_overview(mut self) -> Self {
        self.overview = false;
        self
    }

    pub fn class_url(&self, package: &str, name: &str) -> String {
        format!("{}{}/{name}.html", self.base, package.replace('.', "/"))
    }

    pub fn package_url(&self, package: &str) -> String {
        format!("{}{}/package-summary.html", self.base, package.replace('.', "/"))
    }

    /// `(absolute url, html)` of every page.
    pub fn pages(&self) -> Vec<(String, String)> {
        let mut pages = Vec::new();

        let items: Vec<String> = self
            .classes
            .iter()
            .map(|c| {
                format!(
                    "<li><a href=\"{}\" title=\"class in {}\" target=\"classFrame\">{}</a></li>",
                    c.path(),
                    c.package,
                    c.name
                )
            })
            .collect();
        pages.push((
            format!("{}allclasses-noframe.html", self.base),
            format!(
                "<!DOCTYPE HTML>\n<html lang=\"en\"><head><title>All Classes</title></head><body>\n\
                 <h1 class=\"bar\">All Classes</h1>\n<div class=\"indexContainer\">\n<ul>\n{}\n</ul>\n</div>\n</body></html>\n",
                items.join("\n")
            ),
        ));

        if self.overview {
            let rows: Vec<String> = self
                .packages
                .iter()
                .map(|(name, (short, _))| {
                    format!(
                        "<tr class=\"altColor\">\n<td class=\"colFirst\"><a href=\"{}/package-summary.html\">{name}</a></td>\n\
                         <td class=\"colLast\"><div class=\"block\">{short}</div></td>\n</tr>",
                        name.replace('.', "/")
                    )
                })
                .collect();
            pages.push((
                format!("{}overview-summary.html", self.base),
                format!(
                    "<!DOCTYPE HTML>\n<html lang=\"en\"><body>\n<div class=\"contentContainer\">\n\
                     <table class=\"overviewSummary\" border=\"0\" summary=\"Packages table\">\n\
                     <caption><span>Packages</span><span class=\"tabEnd\">&nbsp;</span></caption>\n\
                     <tr>\n<th class=\"colFirst\" scope=\"col\">Package</th>\n<th class=\"colLast\" scope=\"col\">Description</th>\n</tr>\n\
                     <tbody>\n{}\n</tbody>\n</table>\n</div>\n</body></html>\n",
                    rows.join("\n")
                ),
            ));
        }

        for (name, (_, description)) in &self.packages {
            let body = description.as_ref().map_or_else(String::new, |d| {
                format!(
                    "<a name=\"package.description\">\n<!--   -->\n</a>\n\
                     <h2 title=\"Package {name} Description\">Package {name} Description</h2>\n\
                     <div class=\"block\">{d}</div>\n"
                )
            });
            pages.push((
                self.package_url(name),
                format!(
                    "<!DOCTYPE HTML>\n<html lang=\"en\"><body>\n<div class=\"header\"><h1 class=\"title\">Package {name}</h1></div>\n\
                     <div class=\"contentContainer\">\n{body}</div>\n</body></html>\n"
                ),
            ));
        }

        for class in &self.classes {
            pages.push((self.class_url(&class.package, &class.name), class.render()));
        }

        pages
    }
}
