//! HTML page generation.
//!
//! Produces a single self-contained HTML5 document: inline stylesheet, the
//! title as heading, the caller's fragment in a content block, and a footer
//! stamped with the generation time.
//!
//! Title and content are inserted verbatim. The fragment is expected to be
//! HTML, and the title is trusted input from the developer running the tool.

use crate::utils::iso_timestamp;
use chrono::{DateTime, Utc};

/// Stylesheet embedded in every preview page.
const STYLESHEET: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 800px;
            margin: 2rem auto;
            padding: 2rem;
            line-height: 1.6;
            color: #333;
        }
        .header {
            border-bottom: 2px solid #007acc;
            padding-bottom: 1rem;
            margin-bottom: 2rem;
        }
        .content {
            background: #f8f9fa;
            padding: 2rem;
            border-radius: 8px;
            border-left: 4px solid #007acc;
        }
        .footer {
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }
        pre {
            background: #f4f4f4;
            padding: 1rem;
            border-radius: 4px;
            overflow-x: auto;
        }
        code {
            background: #f4f4f4;
            padding: 0.2rem 0.4rem;
            border-radius: 3px;
            font-family: 'Monaco', 'Consolas', monospace;
        }"#;

/// Credit line printed under the timestamp.
const FOOTER_CREDIT: &str = "Preview tool - Rhappsody Development";

/// Render a complete preview document.
///
/// # Arguments
///
/// * `title` - Used for both `<title>` and the `<h1>` heading
/// * `content` - HTML fragment placed inside `<div class="content">`
/// * `generated_at` - Instant printed in the footer as ISO-8601 UTC
///
/// # Returns
///
/// The document as a `String`. Rendering cannot fail.
pub fn render_preview(title: &str, content: &str, generated_at: DateTime<Utc>) -> String {
    let generated = iso_timestamp(generated_at);

    let mut html = String::with_capacity(STYLESHEET.len() + title.len() * 2 + content.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <style>\n");
    html.push_str(STYLESHEET);
    html.push_str("\n    </style>\n</head>\n<body>\n");

    html.push_str("    <div class=\"header\">\n");
    html.push_str(&format!("        <h1>{}</h1>\n", title));
    html.push_str("    </div>\n\n");

    html.push_str("    <div class=\"content\">\n");
    html.push_str(&format!("        {}\n", content));
    html.push_str("    </div>\n\n");

    html.push_str("    <div class=\"footer\">\n");
    html.push_str(&format!("        <p>Generated at: {}</p>\n", generated));
    html.push_str(&format!("        <p>{}</p>\n", FOOTER_CREDIT));
    html.push_str("    </div>\n</body>\n</html>\n");

    html
}
