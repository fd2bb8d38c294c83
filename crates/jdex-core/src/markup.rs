//! HTML fragment to chat-flavoured Markdown conversion.
//!
//! Javadoc prose is a small, predictable subset of HTML. Every tag the
//! converter knows has a rule; anything else is an [`Error::UnknownTag`]
//! unless the caller asks for unknown tags to be ignored, in which case only
//! their children are rendered.
//!
//! ```rust
//! use jdex_core::markup::{MarkdownConverter, MarkupConverter};
//!
//! let converter = MarkdownConverter;
//! let text = converter.convert(
//!     r#"Returns <b>true</b> for <a href="Foo.html">Foo</a>."#,
//!     "https://example.org/api/a/Bar.html",
//!     false,
//! )?;
//! assert_eq!(text, "Returns **true** for [Foo](https://example.org/api/a/Foo.html).");
//! # Ok::<(), jdex_core::Error>(())
//! ```

use crate::page::{absolute_url, is_tag};
use crate::{Error, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::sync::LazyLock;

/// Converts an HTML fragment into formatted text.
pub trait MarkupConverter: Send + Sync {
    /// Converts `html`, resolving relative links against `base_url`.
    ///
    /// With `ignore_unknown_tags` unset, a tag without a conversion rule is an
    /// [`Error::UnknownTag`].
    fn convert(&self, html: &str, base_url: &str, ignore_unknown_tags: bool) -> Result<String>;
}

/// Default converter producing Discord/CommonMark flavoured Markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkupConverter for MarkdownConverter {
    fn convert(&self, html: &str, base_url: &str, ignore_unknown_tags: bool) -> Result<String> {
        let fragment = Html::parse_fragment(html);
        let renderer = Renderer {
            base_url,
            ignore_unknown_tags,
        };
        let mut out = String::new();
        renderer.render_children(fragment.root_element(), false, &mut out)?;
        Ok(tidy(&out))
    }
}

struct Renderer<'a> {
    base_url: &'a str,
    ignore_unknown_tags: bool,
}

impl Renderer<'_> {
    fn render_children(&self, element: ElementRef<'_>, in_pre: bool, out: &mut String) -> Result<()> {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    if in_pre {
                        out.push_str(text);
                    } else {
                        push_text(out, text);
                    }
                },
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.render_element(child, in_pre, out)?;
                    }
                },
                _ => {},
            }
        }
        Ok(())
    }

    fn render_inner(&self, element: ElementRef<'_>, in_pre: bool) -> Result<String> {
        let mut inner = String::new();
        self.render_children(element, in_pre, &mut inner)?;
        Ok(inner)
    }

    fn render_element(&self, element: ElementRef<'_>, in_pre: bool, out: &mut String) -> Result<()> {
        let tag = element.value().name().to_ascii_lowercase();

        if in_pre {
            return match tag.as_str() {
                "br" => {
                    out.push('\n');
                    Ok(())
                },
                "script" | "style" => Ok(()),
                _ => self.render_children(element, true, out),
            };
        }

        match tag.as_str() {
            "html" | "head" | "body" | "span" | "sup" | "sub" | "small" | "big" | "font"
            | "center" | "abbr" | "acronym" | "nobr" | "label" | "thead" | "tbody" | "tfoot" => {
                self.render_children(element, false, out)?;
            },
            "script" | "style" | "noscript" | "meta" | "link" | "title" => {},
            "a" => self.render_link(element, out)?,
            "b" | "strong" => {
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "**", "**");
            },
            "i" | "em" | "cite" | "var" | "dfn" => {
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "*", "*");
            },
            "u" | "ins" => {
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "__", "__");
            },
            "s" | "strike" | "del" => {
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "~~", "~~");
            },
            "code" | "tt" | "kbd" | "samp" => {
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "`", "`");
            },
            "q" => {
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "\"", "\"");
            },
            "p" | "div" | "table" | "dl" | "caption" => {
                ensure_blank_line(out);
                if tag == "caption" {
                    let inner = self.render_inner(element, false)?;
                    wrap_inline(out, &inner, "**", "**");
                } else {
                    self.render_children(element, false, out)?;
                }
                ensure_blank_line(out);
            },
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "dt" => {
                ensure_newline(out);
                let inner = self.render_inner(element, false)?;
                wrap_inline(out, &inner, "**", "**");
                out.push('\n');
            },
            "dd" => {
                ensure_newline(out);
                self.render_children(element, false, out)?;
                out.push('\n');
            },
            "tr" => {
                ensure_newline(out);
                self.render_children(element, false, out)?;
                out.push('\n');
            },
            "td" | "th" => {
                self.render_children(element, false, out)?;
                out.push(' ');
            },
            "br" => out.push('\n'),
            "hr" => {
                ensure_newline(out);
                out.push_str("---\n");
            },
            "ul" | "ol" => self.render_list(element, tag == "ol", out)?,
            "li" => {
                ensure_newline(out);
                out.push_str("- ");
                self.render_children(element, false, out)?;
                out.push('\n');
            },
            "blockquote" => {
                ensure_blank_line(out);
                let inner = tidy(&self.render_inner(element, false)?);
                for line in inner.lines() {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
                ensure_blank_line(out);
            },
            "pre" => {
                ensure_blank_line(out);
                let inner = self.render_inner(element, true)?;
                out.push_str("```\n");
                out.push_str(inner.trim_matches('\n'));
                out.push_str("\n```");
                ensure_blank_line(out);
            },
            "img" => {
                if let Some(alt) = element.value().attr("alt") {
                    push_text(out, alt);
                }
            },
            _ if self.ignore_unknown_tags => self.render_children(element, false, out)?,
            _ => return Err(Error::UnknownTag(tag)),
        }
        Ok(())
    }

    fn render_link(&self, element: ElementRef<'_>, out: &mut String) -> Result<()> {
        let inner = self.render_inner(element, false)?;
        let target = element
            .value()
            .attr("href")
            .filter(|href| !href.starts_with("javascript:"))
            .and_then(|href| absolute_url(self.base_url, href));

        match target {
            Some(url) if !inner.trim().is_empty() => {
                wrap_inline(out, &inner, "[", &format!("]({url})"));
            },
            _ => out.push_str(&inner),
        }
        Ok(())
    }

    fn render_list(&self, list: ElementRef<'_>, ordered: bool, out: &mut String) -> Result<()> {
        ensure_blank_line(out);
        let mut number = 0usize;
        for child in list.children() {
            match child.value() {
                Node::Element(_) => {
                    let Some(child) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if is_tag(child, "li") {
                        number += 1;
                        ensure_newline(out);
                        if ordered {
                            out.push_str(&format!("{number}. "));
                        } else {
                            out.push_str("- ");
                        }
                        let item = tidy(&self.render_inner(child, false)?);
                        out.push_str(&item.replace('\n', "\n  "));
                        out.push('\n');
                    } else {
                        self.render_element(child, false, out)?;
                    }
                },
                Node::Text(text) => push_text(out, text),
                _ => {},
            }
        }
        ensure_blank_line(out);
        Ok(())
    }
}

/// Appends text with HTML whitespace semantics: every run of whitespace,
/// non-breaking spaces included, becomes a single space.
fn push_text(out: &mut String, text: &str) {
    let mut last_space = out.ends_with(' ') || out.ends_with('\n');
    for c in text.chars() {
        if c.is_whitespace() || c == '\u{a0}' {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
}

/// Wraps already rendered inline content in markers, keeping the surrounding
/// spacing outside of them (`** bold **` is not valid emphasis).
fn wrap_inline(out: &mut String, inner: &str, open: &str, close: &str) {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        if !inner.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        return;
    }
    if inner.starts_with([' ', '\n']) && !out.ends_with([' ', '\n']) && !out.is_empty() {
        out.push(' ');
    }
    out.push_str(open);
    out.push_str(trimmed);
    out.push_str(close);
    if inner.ends_with([' ', '\n']) {
        out.push(' ');
    }
}

fn ensure_newline(out: &mut String) {
    trim_trailing_spaces(out);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn ensure_blank_line(out: &mut String) {
    trim_trailing_spaces(out);
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
}

/// Normalizes rendered output: trims lines and squeezes blank lines, leaving
/// fenced code blocks untouched.
fn tidy(rendered: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in rendered.lines() {
        if line.trim() == "```" {
            in_fence = !in_fence;
            lines.push("```".to_string());
            continue;
        }
        if in_fence {
            lines.push(line.trim_end().to_string());
            continue;
        }
        let squeezed = line.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" ");
        if squeezed.is_empty() && lines.last().is_none_or(String::is_empty) {
            continue;
        }
        lines.push(squeezed);
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Markdown links: `[text](url)`.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

/// Emphasis, strike-through and inline-code markers.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*|__|~~|\*|`").unwrap());

/// Removes the formatting [`MarkdownConverter`] adds, keeping link texts.
///
/// ```rust
/// use jdex_core::markup::strip_formatting;
///
/// assert_eq!(
///     strip_formatting("foo(**int** a, [`String`](https://x/String.html) b)"),
///     "foo(int a, String b)"
/// );
/// ```
pub fn strip_formatting(text: &str) -> String {
    let without_links = LINK_RE.replace_all(text, "$1");
    MARKER_RE.replace_all(&without_links, "").into_owned()
}
