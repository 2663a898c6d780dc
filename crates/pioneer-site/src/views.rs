//! Shared HTML scaffolding for every page the site serves.

pub const SITE_NAME: &str = "Pioneer Cooperative Loans";

const NAVIGATION: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/about", "About"),
    ("/loan-products", "Loan products"),
    ("/requirements", "Requirements"),
    ("/faq", "FAQ"),
    ("/apply", "Apply"),
    ("/contact", "Contact"),
];

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps `body` (already-escaped HTML) in the site chrome.
pub fn layout(title: &str, body: &str) -> String {
    let nav: String = NAVIGATION
        .iter()
        .map(|(href, label)| format!("<li><a href=\"{href}\">{label}</a></li>"))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | {SITE_NAME}</title>\n</head>\n<body>\n\
         <header><p class=\"brand\">{SITE_NAME}</p><nav><ul>{nav}</ul></nav></header>\n\
         <main>\n{body}\n</main>\n\
         <footer><p>&copy; {SITE_NAME}</p></footer>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn error_page(message: &str) -> String {
    layout(
        "Something went wrong",
        &format!(
            "<h1>Something went wrong</h1>\n<p>{}</p>",
            escape(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>alert(\"x\" & 'y')</script>"),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn layout_links_every_section() {
        let html = layout("About", "<p>hi</p>");
        assert!(html.contains("<title>About | Pioneer Cooperative Loans</title>"));
        for (href, _) in NAVIGATION {
            assert!(html.contains(&format!("href=\"{href}\"")));
        }
    }
}
