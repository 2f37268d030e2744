//! Markdown → HTML with YAML front matter.
//!
//! ```text
//! ---                 ┐
//! id: "123"           │ front matter (YAML mapping)
//! title: Hello        │
//! ---                 ┘
//! # Body              ← CommonMark + GFM tables, strikethrough, task lists, footnotes
//! ```
//!
//! The rendered HTML ends with a hidden `<details id="blogger-raw">` block
//! holding the escaped markdown source, so the original text can be
//! recovered from the published post.

use pulldown_cmark::{html, Options, Parser};
use serde_yaml::Mapping;

use crate::error::RenderError;

/// Rendered post body plus its front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub content: String,
    pub meta: Mapping,
}

/// Render a markdown document.
///
/// Line endings are normalised to LF first, so CRLF and LF sources of the
/// same post render identically.
pub fn render(source: &[u8]) -> Result<Rendered, RenderError> {
    let text = std::str::from_utf8(source)?.replace("\r\n", "\n");
    let (front, body) = split_front_matter(&text)?;

    let meta = match front {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str::<Mapping>(yaml)?,
        _ => Mapping::new(),
    };

    let mut content = String::with_capacity(body.len() * 2);
    html::push_html(&mut content, Parser::new_ext(body, options()));
    content.push_str("<details hidden id=\"blogger-raw\">");
    escape_html_into(&mut content, &text);
    content.push_str("</details>\n");

    Ok(Rendered { content, meta })
}

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts
}

/// Split `---\n<yaml>---\n<body>` into `(Some(yaml), body)`.
///
/// A document that does not open with a `---` line has no front matter.
fn split_front_matter(text: &str) -> Result<(Option<&str>, &str), RenderError> {
    let Some(rest) = text.strip_prefix("---\n") else {
        return Ok((None, text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(RenderError::UnterminatedFrontMatter)
}

fn escape_html_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
