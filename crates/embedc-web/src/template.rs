use axum::response::Html;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Values substituted into the index page.
#[derive(Debug, Default)]
pub struct PageView {
    pub query: String,
    pub notice: Option<String>,
    pub summary: Option<String>,
    /// Generated C source, unescaped.
    pub result: Option<String>,
    pub backends: Vec<&'static str>,
}

pub fn render_page(view: &PageView) -> Html<String> {
    let notice = view
        .notice
        .as_deref()
        .map(|n| format!("<div class=\"notice\">{}</div>", escape_html(n)))
        .unwrap_or_default();
    let summary = view
        .summary
        .as_deref()
        .map(|s| format!("<p class=\"summary\">{}</p>", escape_html(s)))
        .unwrap_or_default();
    let result = view
        .result
        .as_deref()
        .map(|code| {
            format!(
                "<pre><code class=\"language-c\">{}</code></pre>",
                escape_html(code)
            )
        })
        .unwrap_or_default();
    let backends = if view.backends.is_empty() {
        "none".to_string()
    } else {
        view.backends.join(", ")
    };
    let query = escape_html(&view.query);

    Html(fill(
        INDEX_HTML,
        &[
            ("query", query.as_str()),
            ("notice", notice.as_str()),
            ("summary", summary.as_str()),
            ("result", result.as_str()),
            ("backends", backends.as_str()),
        ],
    ))
}

/// Single-pass `{{ key }}` substitution; inserted values are never rescanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{ ") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let Some(end) = after.find(" }}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 3 + end + 3]),
        }
        rest = &after[end + 3..];
    }
    out.push_str(rest);
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
