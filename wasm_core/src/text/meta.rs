// SEO meta-tag generator.
use serde::{Deserialize, Serialize};

use super::markdown::html_escape;

pub const TITLE_LIMIT: usize = 60;
pub const DESCRIPTION_LIMIT: usize = 160;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaInput {
    pub title: String,
    pub description: String,
    /// Comma separated
    pub keywords: String,
    pub author: String,
    pub canonical_url: String,
    pub image_url: String,
    pub no_index: bool,
    pub no_follow: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaOutput {
    pub html: String,
    pub warnings: Vec<String>,
}

/// Renders the `<head>` snippet. Empty fields are skipped; over-long title or
/// description produce warnings, not errors.
///
/// # Example
/// ```
/// use wasm_core::text::meta::{generate_meta_tags, MetaInput};
/// let out = generate_meta_tags(&MetaInput { title: "Tools & more".into(), ..Default::default() });
/// assert!(out.html.contains("<title>Tools &amp; more</title>"));
/// ```
pub fn generate_meta_tags(input: &MetaInput) -> MetaOutput {
    let mut lines = vec![
        r#"<meta charset="UTF-8">"#.to_string(),
        r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#.to_string(),
    ];
    let mut warnings = Vec::new();

    let title = input.title.trim();
    let description = input.description.trim();
    if !title.is_empty() {
        lines.push(format!("<title>{}</title>", html_escape(title)));
        let length = title.chars().count();
        if length > TITLE_LIMIT {
            warnings.push(format!(
                "Title is {length} characters; search engines show about {TITLE_LIMIT}"
            ));
        }
    }
    if !description.is_empty() {
        lines.push(meta_name("description", description));
        let length = description.chars().count();
        if length > DESCRIPTION_LIMIT {
            warnings.push(format!(
                "Description is {length} characters; search engines show about {DESCRIPTION_LIMIT}"
            ));
        }
    }

    let keywords: Vec<&str> = input
        .keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        lines.push(meta_name("keywords", &keywords.join(", ")));
    }
    if !input.author.trim().is_empty() {
        lines.push(meta_name("author", input.author.trim()));
    }
    let robots = format!(
        "{}, {}",
        if input.no_index { "noindex" } else { "index" },
        if input.no_follow { "nofollow" } else { "follow" }
    );
    lines.push(meta_name("robots", &robots));

    let canonical = input.canonical_url.trim();
    if !canonical.is_empty() {
        lines.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            html_escape(canonical)
        ));
    }

    // Open Graph and Twitter cards mirror the basic fields.
    if !title.is_empty() {
        lines.push(meta_property("og:title", title));
        lines.push(meta_name("twitter:title", title));
    }
    if !description.is_empty() {
        lines.push(meta_property("og:description", description));
        lines.push(meta_name("twitter:description", description));
    }
    if !canonical.is_empty() {
        lines.push(meta_property("og:url", canonical));
    }
    let image = input.image_url.trim();
    if !image.is_empty() {
        lines.push(meta_property("og:image", image));
        lines.push(meta_name("twitter:card", "summary_large_image"));
        lines.push(meta_name("twitter:image", image));
    }
    lines.push(meta_property("og:type", "website"));

    MetaOutput {
        html: lines.join("\n"),
        warnings,
    }
}

fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        name,
        html_escape(content)
    )
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        property,
        html_escape(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_attribute_values() {
        let out = generate_meta_tags(&MetaInput {
            description: r#"Say "hi" <now>"#.into(),
            ..Default::default()
        });
        assert!(out
            .html
            .contains(r#"<meta name="description" content="Say &quot;hi&quot; &lt;now&gt;">"#));
    }

    #[test]
    fn keywords_are_normalized() {
        let out = generate_meta_tags(&MetaInput {
            keywords: " rust, ,wasm ,tools".into(),
            ..Default::default()
        });
        assert!(out
            .html
            .contains(r#"<meta name="keywords" content="rust, wasm, tools">"#));
    }

    #[test]
    fn robots_flags() {
        let out = generate_meta_tags(&MetaInput {
            no_index: true,
            ..Default::default()
        });
        assert!(out.html.contains(r#"content="noindex, follow""#));
    }

    #[test]
    fn long_fields_warn() {
        let out = generate_meta_tags(&MetaInput {
            title: "t".repeat(61),
            description: "d".repeat(161),
            ..Default::default()
        });
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].starts_with("Title is 61"));
    }

    #[test]
    fn image_enables_large_card() {
        let out = generate_meta_tags(&MetaInput {
            image_url: "https://x.io/a.png".into(),
            ..Default::default()
        });
        assert!(out.html.contains("summary_large_image"));
        assert!(!out.html.contains("og:title"));
    }
}
