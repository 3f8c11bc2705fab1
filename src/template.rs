//! Markup templates with a fixed placeholder set.
//!
//! Templates use `{name}` placeholders and `{{` / `}}` for literal braces.
//! Each template kind accepts a closed set of placeholders; anything else is
//! rejected when the template is parsed, so a typo surfaces at registration
//! rather than on the first request.
//!
//! ```ignore
//! let tpl = Template::<Inline>::parse("<style type=\"{mimetype}\">{content}</style>")?;
//! let html = tpl.render(&InlineVars { content: "a{}", mimetype: "text/css" });
//! ```

use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder `{{{name}}}` in {kind} template (allowed: {allowed})")]
    UnknownPlaceholder {
        kind: &'static str,
        name: String,
        allowed: String,
    },

    #[error("unbalanced `{brace}` at offset {offset} in {kind} template")]
    Unbalanced {
        kind: &'static str,
        brace: char,
        offset: usize,
    },
}

/// A family of templates sharing a placeholder set.
pub trait TemplateKind {
    const NAME: &'static str;
    const PLACEHOLDERS: &'static [&'static str];
}

/// Values substituted into a template of kind `Kind`.
pub trait TemplateVars {
    type Kind: TemplateKind;

    /// Value for one of `Kind::PLACEHOLDERS`.
    fn value(&self, placeholder: &str) -> &str;
}

/// Template embedding content directly: `{content}`, `{mimetype}`.
#[derive(Debug, Clone, Copy)]
pub struct Inline;

/// Template referencing content by URL: `{url}`, `{mimetype}`.
#[derive(Debug, Clone, Copy)]
pub struct Linked;

impl TemplateKind for Inline {
    const NAME: &'static str = "inline";
    const PLACEHOLDERS: &'static [&'static str] = &["content", "mimetype"];
}

impl TemplateKind for Linked {
    const NAME: &'static str = "linked";
    const PLACEHOLDERS: &'static [&'static str] = &["url", "mimetype"];
}

pub struct InlineVars<'a> {
    pub content: &'a str,
    pub mimetype: &'a str,
}

impl TemplateVars for InlineVars<'_> {
    type Kind = Inline;

    fn value(&self, placeholder: &str) -> &str {
        match placeholder {
            "content" => self.content,
            _ => self.mimetype,
        }
    }
}

pub struct LinkedVars<'a> {
    pub url: &'a str,
    pub mimetype: &'a str,
}

impl TemplateVars for LinkedVars<'_> {
    type Kind = Linked;

    fn value(&self, placeholder: &str) -> &str {
        match placeholder {
            "url" => self.url,
            _ => self.mimetype,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(&'static str),
}

/// Parsed template of kind `K`.
#[derive(Clone)]
pub struct Template<K> {
    source: String,
    segments: Vec<Segment>,
    _marker: PhantomData<K>,
}

impl<K: TemplateKind> Template<K> {
    /// Parse and validate a template string.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unbalanced {
                            kind: K::NAME,
                            brace: '{',
                            offset,
                        });
                    }
                    let placeholder = Self::resolve(&name)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                }
                '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(TemplateError::Unbalanced {
                        kind: K::NAME,
                        brace: '}',
                        offset,
                    });
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_owned(),
            segments,
            _marker: PhantomData,
        })
    }

    fn resolve(name: &str) -> Result<&'static str, TemplateError> {
        K::PLACEHOLDERS
            .iter()
            .copied()
            .find(|p| *p == name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder {
                kind: K::NAME,
                name: name.to_owned(),
                allowed: K::PLACEHOLDERS.join(", "),
            })
    }

    /// Substitute `vars` into the template.
    pub fn render<V: TemplateVars<Kind = K>>(&self, vars: &V) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => out.push_str(vars.value(name)),
            }
        }
        out
    }

    /// The original template string.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<K: TemplateKind> fmt::Debug for Template<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("kind", &K::NAME)
            .field("source", &self.source)
            .finish()
    }
}
