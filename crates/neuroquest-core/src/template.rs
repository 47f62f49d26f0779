//! Styled-text templates.
//!
//! Quest copy mixes plain text, styled runs written as `{content|style}` and
//! small inline HTML fragments. A style is either a class list
//! (`{Every|text-purple-600 font-bold}`) or a tag and class list separated by
//! the first colon (`{Hi|h2:text-lg}`).
//!
//! Parsing never fails: anything malformed comes out as literal text so an
//! authoring typo cannot break rendering.

use serde::{Deserialize, Serialize};

/// Tag used for styled runs that do not name one.
pub const DEFAULT_TAG: &str = "span";

/// Parsed style of a styled run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub tag: String,
    pub class: String,
}

impl StyleSpec {
    /// Parse `"classes"` or `"tag:classes"`, splitting on the first colon.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once(':') {
            Some((tag, class)) => Self {
                tag: tag.to_string(),
                class: class.to_string(),
            },
            None => Self {
                tag: DEFAULT_TAG.to_string(),
                class: spec.to_string(),
            },
        }
    }
}

/// One unit of rendered output, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderNode {
    /// Literal text, whitespace preserved.
    Text(String),
    /// A styled run: `text` wrapped in `tag` with the given class list.
    Styled {
        tag: String,
        class: String,
        text: String,
    },
    /// A markup fragment passed through verbatim.
    ///
    /// This is not sanitized. Template content comes from the bundled
    /// catalogs; feeding user-supplied text through here requires a
    /// sanitizer in front of it.
    Raw(String),
}

impl RenderNode {
    /// Text or markup carried by this node.
    pub fn content(&self) -> &str {
        match self {
            RenderNode::Text(text) | RenderNode::Raw(text) => text,
            RenderNode::Styled { text, .. } => text,
        }
    }
}

/// Ordered sequence of render nodes produced from one template string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledText {
    nodes: Vec<RenderNode>,
}

impl StyledText {
    pub fn new(nodes: Vec<RenderNode>) -> Self {
        Self { nodes }
    }

    /// A single plain-text node.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![RenderNode::Text(text.into())])
    }

    /// A single raw-markup node.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self::new(vec![RenderNode::Raw(markup.into())])
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<RenderNode> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The only node, when there is exactly one.
    pub fn single(&self) -> Option<&RenderNode> {
        match self.nodes.as_slice() {
            [node] => Some(node),
            _ => None,
        }
    }

    /// Concatenated text and markup content, in order.
    pub fn plain_text(&self) -> String {
        self.nodes.iter().map(RenderNode::content).collect()
    }

    /// Render as an HTML string.
    ///
    /// Text and class attributes are escaped; raw fragments are not.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                RenderNode::Text(text) => push_escaped(&mut out, text),
                RenderNode::Styled { tag, class, text } => {
                    out.push('<');
                    out.push_str(tag);
                    out.push_str(" class=\"");
                    push_escaped(&mut out, class);
                    out.push_str("\">");
                    push_escaped(&mut out, text);
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                RenderNode::Raw(markup) => out.push_str(markup),
            }
        }
        out
    }
}

impl IntoIterator for StyledText {
    type Item = RenderNode;
    type IntoIter = std::vec::IntoIter<RenderNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// A piece of the input: either a `{...}` run (braces included) or the text between runs.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Run(&'a str),
    Between(&'a str),
}

/// Split `text` around runs of the form `{` + one or more non-`}` chars + `}`.
///
/// Runs do not nest: the first `}` closes. An empty `{}` is not a run.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    let mut search = 0;

    while let Some(open) = text[search..].find('{').map(|i| search + i) {
        let Some(close) = text[open + 1..].find('}').map(|i| open + 1 + i) else {
            break;
        };
        if close == open + 1 {
            search = open + 1;
            continue;
        }
        out.push(Segment::Between(&text[cursor..open]));
        out.push(Segment::Run(&text[open..=close]));
        cursor = close + 1;
        search = cursor;
    }
    out.push(Segment::Between(&text[cursor..]));
    out
}

/// Parse a template string into render nodes.
///
/// Text between runs is kept verbatim unless it is whitespace only, in which
/// case it is dropped; whitespace-only input therefore yields no nodes.
pub fn parse_styled_text(text: &str) -> StyledText {
    let mut nodes = Vec::new();

    for segment in segments(text) {
        match segment {
            Segment::Run(run) => {
                let inner = &run[1..run.len() - 1];
                match inner.split_once('|') {
                    Some((content, spec)) => {
                        let style = StyleSpec::parse(spec.trim());
                        nodes.push(RenderNode::Styled {
                            tag: style.tag,
                            class: style.class,
                            text: content.trim().to_string(),
                        });
                    }
                    None => nodes.push(RenderNode::Text(run.to_string())),
                }
            }
            Segment::Between(part) => {
                if part.contains('<') && part.contains('>') {
                    nodes.push(RenderNode::Raw(part.to_string()));
                } else if !part.trim().is_empty() {
                    nodes.push(RenderNode::Text(part.to_string()));
                }
            }
        }
    }

    StyledText::new(nodes)
}
