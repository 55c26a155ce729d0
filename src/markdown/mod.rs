//! Markdown rendering with anchored headings and syntax highlighting

mod headings;

pub use headings::{anchor_id, extract_headings, Heading};

use anyhow::Result;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer with custom rules for headings, code and links
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with default settings
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, highlight: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight,
        }
    }

    /// Render a markdown body to HTML.
    ///
    /// Rendering overrides:
    /// - headings 1-3 get an `id` anchor from [`anchor_id`], so TOC links
    ///   and the scroll tracker resolve against the rendered document
    /// - inline code spans get a class distinct from block code
    /// - fenced code blocks render inside a container exposing the fence
    ///   language and a copy button
    /// - links get a class; URLs are not validated or rewritten
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let events: Vec<Event> = Parser::new_ext(markdown, options).collect();

        let mut out: Vec<Event> = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_content = String::new();

        for (i, event) in events.iter().enumerate() {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            // Info string may carry extra words; the language
                            // is the first token ("```python" -> "python")
                            info.split_whitespace().next().unwrap_or("").to_string()
                        }
                        CodeBlockKind::Indented => String::new(),
                    };
                    code_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let block = self.render_code_block(&code_content, &code_lang);
                    out.push(Event::Html(CowStr::from(block)));
                    in_code_block = false;
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(text);
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    match heading_number(*level) {
                        Some(n) => {
                            let text = heading_text(&events[i + 1..]);
                            let id = anchor_id(&text);
                            out.push(Event::Html(CowStr::from(format!(
                                "<h{} id=\"{}\">",
                                n,
                                html_escape(&id)
                            ))));
                        }
                        None => out.push(event.clone()),
                    }
                }
                Event::End(TagEnd::Heading(level)) => match heading_number(*level) {
                    Some(n) => out.push(Event::Html(CowStr::from(format!("</h{}>", n)))),
                    None => out.push(event.clone()),
                },
                Event::Code(code) if !in_code_block => {
                    out.push(Event::Html(CowStr::from(format!(
                        "<code class=\"inline-code\">{}</code>",
                        html_escape(code)
                    ))));
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) => {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(" title=\"{}\"", html_escape(title))
                    };
                    out.push(Event::Html(CowStr::from(format!(
                        "<a class=\"article-link\" href=\"{}\"{}>",
                        html_escape(dest_url),
                        title_attr
                    ))));
                }
                Event::End(TagEnd::Link) => {
                    out.push(Event::Html(CowStr::from("</a>")));
                }
                _ => {
                    if !in_code_block {
                        out.push(event.clone());
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, out.into_iter());

        Ok(html_output)
    }

    /// Render a code block inside its container: a header bar exposing the
    /// language tag and a copy button, then the (optionally highlighted) code
    fn render_code_block(&self, code: &str, lang: &str) -> String {
        let label = if lang.is_empty() { "code" } else { lang };
        let body = if self.highlight {
            self.highlight_code(code, lang)
        } else {
            plain_code_block(code, lang)
        };

        format!(
            "<figure class=\"code-block\" data-lang=\"{}\">\
             <figcaption class=\"code-block-header\">\
             <span class=\"code-lang\">{}</span>\
             <button class=\"copy-code\" type=\"button\">Copy</button>\
             </figcaption>{}</figure>",
            html_escape(lang),
            html_escape(label),
            body
        )
    }

    /// Highlight a code block, falling back to a plain escaped block
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let token = if lang.is_empty() { "text" } else { lang };

        let syntax = self
            .syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = match self.theme_set.themes.get(&self.theme_name) {
            Some(theme) => theme,
            None => match self.theme_set.themes.values().next() {
                Some(theme) => theme,
                None => return plain_code_block(code, lang),
            },
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(_) => plain_code_block(code, lang),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Escaped code block without highlighting
fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        "<pre><code class=\"language-{}\">{}</code></pre>",
        html_escape(lang),
        html_escape(code)
    )
}

/// Map H1-H3 to their numeric level; deeper headings keep default rendering
fn heading_number(level: HeadingLevel) -> Option<u8> {
    match level {
        HeadingLevel::H1 => Some(1),
        HeadingLevel::H2 => Some(2),
        HeadingLevel::H3 => Some(3),
        _ => None,
    }
}

/// Collect the display text of a heading from the events following its start
/// tag, up to the matching end tag
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Heading(_)) => break,
            _ => {}
        }
    }
    text
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        // plain blocks keep assertions readable
        MarkdownRenderer::with_options("base16-ocean.dark", false)
    }

    #[test]
    fn test_headings_get_anchor_ids() {
        let html = renderer().render("# Getting started\n\n## First steps\n").unwrap();
        assert!(html.contains("<h1 id=\"getting-started\">"));
        assert!(html.contains("<h2 id=\"first-steps\">"));
    }

    #[test]
    fn test_deep_headings_have_no_anchor() {
        let html = renderer().render("#### Deep dive\n").unwrap();
        assert!(html.contains("<h4"));
        assert!(!html.contains("id=\"deep-dive\""));
    }

    #[test]
    fn test_extracted_ids_match_rendered_anchors() {
        let body = "# Overview\n\nIntro text.\n\n## Step 1: Install\n\n\
                    ```sh\n# comment, not a heading\necho ok\n```\n\n\
                    ### What's next?\n\nMore text.\n";
        let html = renderer().render(body).unwrap();
        let headings = extract_headings(body);
        assert_eq!(headings.len(), 3);
        for heading in &headings {
            assert!(
                html.contains(&format!("id=\"{}\"", heading.id)),
                "missing anchor for {:?}",
                heading
            );
        }
    }

    #[test]
    fn test_heading_with_inline_code_matches_extractor() {
        let body = "## Configure `sshd` safely\n";
        let html = renderer().render(body).unwrap();
        let headings = extract_headings(body);
        assert_eq!(headings[0].id, "configure-sshd-safely");
        assert!(html.contains("id=\"configure-sshd-safely\""));
    }

    #[test]
    fn test_inline_code_is_distinct_from_block_code() {
        let html = renderer()
            .render("Use `kubectl` here.\n\n```\nkubectl get pods\n```\n")
            .unwrap();
        assert!(html.contains("<code class=\"inline-code\">kubectl</code>"));
        assert!(html.contains("class=\"code-block\""));
    }

    #[test]
    fn test_code_block_exposes_language_and_copy_button() {
        let html = renderer().render("```python\nprint('hi')\n```\n").unwrap();
        assert!(html.contains("data-lang=\"python\""));
        assert!(html.contains("<span class=\"code-lang\">python</span>"));
        assert!(html.contains("<button class=\"copy-code\""));
    }

    #[test]
    fn test_code_block_without_language_shows_generic_label() {
        let html = renderer().render("```\nplain\n```\n").unwrap();
        assert!(html.contains("data-lang=\"\""));
        assert!(html.contains("<span class=\"code-lang\">code</span>"));
    }

    #[test]
    fn test_links_get_class_and_keep_url() {
        let html = renderer()
            .render("See [the docs](https://example.com/a?b=1).\n")
            .unwrap();
        assert!(html.contains("<a class=\"article-link\" href=\"https://example.com/a?b=1\">"));
    }

    #[test]
    fn test_code_text_is_escaped() {
        let html = renderer().render("```\n<script>alert(1)</script>\n```\n").unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_highlighted_block_keeps_container() {
        let highlighted = MarkdownRenderer::new();
        let html = highlighted.render("```rust\nfn main() {}\n```\n").unwrap();
        assert!(html.contains("data-lang=\"rust\""));
        assert!(html.contains("<pre"));
    }
}
