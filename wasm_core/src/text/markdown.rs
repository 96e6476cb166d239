// Markdown preview for the editor widget: block structure first, then inline spans.

/// A block-level construct recognised by the first pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: usize, text: String },
    Code { lang: Option<String>, body: String },
    Quote(Vec<Block>),
    List { ordered: bool, items: Vec<String> },
    Rule,
    Paragraph(Vec<String>),
}

/// Converts Markdown into HTML for the live preview pane.
///
/// # Example
/// ```
/// use wasm_core::text::markdown::markdown_to_html;
/// let html = markdown_to_html("# Title\n\nSome **bold** text");
/// assert!(html.contains("<h1>Title</h1>"));
/// assert!(html.contains("<p>Some <strong>bold</strong> text</p>"));
/// ```
pub fn markdown_to_html(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();
    render_blocks(&parse_blocks(&lines))
}

/// Quotes nested deeper than this are kept as literal `>` text.
pub const MAX_QUOTE_DEPTH: usize = 32;

/// Splits lines into block tokens. Inline markup is left untouched.
pub fn parse_blocks(lines: &[&str]) -> Vec<Block> {
    parse_blocks_at(lines, 0)
}

fn parse_blocks_at(lines: &[&str], depth: usize) -> Vec<Block> {
    let quotes = depth < MAX_QUOTE_DEPTH;
    let mut blocks = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx].trim_end();
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            idx += 1;
            continue;
        }
        if let Some(info) = trimmed.strip_prefix("```") {
            let lang = Some(info.trim()).filter(|l| !l.is_empty()).map(str::to_string);
            let mut body = Vec::new();
            idx += 1;
            while idx < lines.len() && !lines[idx].trim_start().starts_with("```") {
                body.push(lines[idx]);
                idx += 1;
            }
            // Skip the closing fence; an unclosed fence runs to the end.
            idx += 1;
            blocks.push(Block::Code {
                lang,
                body: body.join("\n"),
            });
            continue;
        }
        if let Some((level, text)) = heading(trimmed) {
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
            idx += 1;
            continue;
        }
        if is_rule(trimmed) {
            blocks.push(Block::Rule);
            idx += 1;
            continue;
        }
        if quotes && trimmed.starts_with('>') {
            let mut inner = Vec::new();
            while idx < lines.len() {
                let Some(rest) = lines[idx].trim_start().strip_prefix('>') else {
                    break;
                };
                inner.push(rest.strip_prefix(' ').unwrap_or(rest));
                idx += 1;
            }
            blocks.push(Block::Quote(parse_blocks_at(&inner, depth + 1)));
            continue;
        }
        if let Some((ordered, _)) = list_item(trimmed) {
            let mut items = Vec::new();
            while idx < lines.len() {
                match list_item(lines[idx].trim()) {
                    Some((kind, item)) if kind == ordered => {
                        items.push(item.to_string());
                        idx += 1;
                    }
                    _ => break,
                }
            }
            blocks.push(Block::List { ordered, items });
            continue;
        }

        let mut paragraph = Vec::new();
        while idx < lines.len() {
            let candidate = lines[idx].trim();
            if candidate.is_empty() || (!paragraph.is_empty() && starts_block(candidate, quotes)) {
                break;
            }
            paragraph.push(candidate.to_string());
            idx += 1;
        }
        blocks.push(Block::Paragraph(paragraph));
    }
    blocks
}

fn starts_block(line: &str, quotes: bool) -> bool {
    line.starts_with("```")
        || (quotes && line.starts_with('>'))
        || heading(line).is_some()
        || is_rule(line)
        || list_item(line).is_some()
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|ch| *ch == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}

fn is_rule(line: &str) -> bool {
    let compact: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
    compact.len() >= 3
        && matches!(compact[0], '-' | '*' | '_')
        && compact.iter().all(|ch| *ch == compact[0])
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(item) = line.strip_prefix(marker) {
            return Some((false, item.trim()));
        }
    }
    let digits = line.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(item) = line[digits..].strip_prefix(". ") {
            return Some((true, item.trim()));
        }
    }
    None
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut result = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                result.push_str(&format!(
                    "<h{level}>{content}</h{level}>\n",
                    content = render_inline(text)
                ));
            }
            Block::Code { lang, body } => {
                match lang {
                    Some(lang) => result.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        html_escape(lang)
                    )),
                    None => result.push_str("<pre><code>"),
                }
                result.push_str(&html_escape(body));
                result.push_str("</code></pre>\n");
            }
            Block::Quote(inner) => {
                result.push_str("<blockquote>\n");
                result.push_str(&render_blocks(inner));
                result.push_str("</blockquote>\n");
            }
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                result.push_str(&format!("<{tag}>\n"));
                for item in items {
                    result.push_str("<li>");
                    result.push_str(&render_inline(item));
                    result.push_str("</li>\n");
                }
                result.push_str(&format!("</{tag}>\n"));
            }
            Block::Rule => result.push_str("<hr>\n"),
            Block::Paragraph(lines) => {
                let rendered: Vec<String> = lines.iter().map(|l| render_inline(l)).collect();
                result.push_str("<p>");
                result.push_str(&rendered.join("<br>\n"));
                result.push_str("</p>\n");
            }
        }
    }
    result
}

/// Renders inline spans (code, emphasis, strikethrough, links, images) and
/// escapes everything else.
pub fn render_inline(text: &str) -> String {
    let mut out = String::new();
    let mut closers = LinkClosers::new(text);
    let mut pos = 0;
    let mut prev: Option<char> = None;
    while let Some(ch) = text[pos..].chars().next() {
        if let Some((html, consumed)) = match_span(text, pos, prev, &mut closers) {
            out.push_str(&html);
            prev = text[pos..pos + consumed].chars().last();
            pos += consumed;
            continue;
        }
        out.push_str(&html_escape(&text[pos..pos + ch.len_utf8()]));
        prev = Some(ch);
        pos += ch.len_utf8();
    }
    out
}

fn match_span<'a>(
    text: &'a str,
    pos: usize,
    prev: Option<char>,
    closers: &mut LinkClosers<'a>,
) -> Option<(String, usize)> {
    let rest = &text[pos..];
    if let Some(body) = rest.strip_prefix('`') {
        let end = body.find('`')?;
        return Some((
            format!("<code>{}</code>", html_escape(&body[..end])),
            end + 2,
        ));
    }
    if rest.starts_with("![") {
        let (alt, href, used) = match_link(text, pos + 1, closers)?;
        return Some((
            format!(
                "<img src=\"{}\" alt=\"{}\">",
                html_escape(safe_href(href)),
                html_escape(alt)
            ),
            used + 1,
        ));
    }
    if rest.starts_with('[') {
        let (label, href, used) = match_link(text, pos, closers)?;
        return Some((
            format!(
                "<a href=\"{}\">{}</a>",
                html_escape(safe_href(href)),
                render_inline(label)
            ),
            used,
        ));
    }
    // Underscore emphasis only opens at a word boundary so snake_case stays literal.
    let word_boundary = !prev.is_some_and(char::is_alphanumeric);
    let markers = [
        ("**", "strong"),
        ("__", "strong"),
        ("~~", "del"),
        ("*", "em"),
        ("_", "em"),
    ];
    for (marker, tag) in markers {
        if marker.starts_with('_') && !word_boundary {
            continue;
        }
        if let Some(span) = wrap_span(rest, marker, tag) {
            return Some(span);
        }
    }
    None
}

fn wrap_span(rest: &str, marker: &str, tag: &str) -> Option<(String, usize)> {
    let body = rest.strip_prefix(marker)?;
    let end = body.find(marker)?;
    let inner = &body[..end];
    if inner.is_empty() || inner.starts_with(char::is_whitespace) {
        return None;
    }
    Some((
        format!("<{tag}>{}</{tag}>", render_inline(inner)),
        marker.len() * 2 + inner.len(),
    ))
}

/// Caches the next `]` and `)` so a run of unclosed `[` stays linear.
struct LinkClosers<'a> {
    bracket: NextClose<'a>,
    paren: NextClose<'a>,
}

impl<'a> LinkClosers<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bracket: NextClose::new(text, ']'),
            paren: NextClose::new(text, ')'),
        }
    }
}

struct NextClose<'a> {
    text: &'a str,
    needle: char,
    from: usize,
    at: Option<usize>,
}

impl<'a> NextClose<'a> {
    fn new(text: &'a str, needle: char) -> Self {
        Self {
            text,
            needle,
            from: 0,
            at: text.find(needle),
        }
    }

    /// First `needle` at or after `pos`.
    fn after(&mut self, pos: usize) -> Option<usize> {
        if pos < self.from || self.at.is_some_and(|at| at < pos) {
            self.at = self.text[pos..].find(self.needle).map(|idx| pos + idx);
            self.from = pos;
        }
        self.at
    }
}

/// Matches `[label](href)` starting at the `[` at `start`.
fn match_link<'a>(
    text: &'a str,
    start: usize,
    closers: &mut LinkClosers<'a>,
) -> Option<(&'a str, &'a str, usize)> {
    let close = closers.bracket.after(start + 1)?;
    let label = &text[start + 1..close];
    text[close + 1..].strip_prefix('(')?;
    let end = closers.paren.after(close + 2)?;
    Some((label, text[close + 2..end].trim(), end + 1 - start))
}

fn safe_href(href: &str) -> &str {
    let lowered = href.trim_start().to_ascii_lowercase();
    if lowered.starts_with("javascript:") || lowered.starts_with("vbscript:") {
        "#"
    } else {
        href
    }
}

/// Escapes text for HTML bodies and double-quoted attributes.
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
