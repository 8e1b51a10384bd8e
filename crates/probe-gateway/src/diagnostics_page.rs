//! HTML renderer for the diagnostics page.

use crate::REFRESH_ENDPOINT;

pub(crate) fn render_diagnostics_page(
    cycle: u64,
    environment_report: &str,
    credentials_report: &str,
    raw_http_report: &str,
) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>OAuth Credentials Test</title>
  <style>
    :root {{
      color-scheme: light;
      font-family: "IBM Plex Sans", "Segoe UI", sans-serif;
    }}
    body {{
      margin: 0;
      background: #f4f6f8;
      color: #13232f;
    }}
    .container {{
      max-width: 980px;
      margin: 0 auto;
      padding: 1.5rem;
    }}
    h2 {{
      margin: 0 0 0.5rem 0;
      font-size: 1.4rem;
    }}
    h3 {{
      margin: 1rem 0 0.4rem 0;
      font-size: 1.05rem;
    }}
    .cycle {{
      color: #3a4f5f;
      font-size: 0.85rem;
    }}
    pre {{
      background: #ffffff;
      border: 1px solid #d2dde6;
      border-radius: 8px;
      padding: 0.8rem;
      overflow-x: auto;
      white-space: pre-wrap;
      word-break: break-all;
      font-size: 0.85rem;
    }}
    button {{
      border: 1px solid #2f6fab;
      border-radius: 8px;
      background: #2f6fab;
      color: #ffffff;
      padding: 0.5rem 1.1rem;
      font-size: 0.95rem;
      cursor: pointer;
    }}
  </style>
</head>
<body>
  <div class="container">
    <h2>OAuth Credentials Test</h2>
    <p class="cycle">Refresh cycle: {cycle}</p>
    <hr />
    <h3>Environment</h3>
    <pre>{environment}</pre>
    <hr />
    <h3>Credentials Response</h3>
    <pre>{credentials}</pre>
    <hr />
    <h3>Raw HTTP Test</h3>
    <pre>{raw_http}</pre>
    <hr />
    <form method="post" action="{refresh_endpoint}">
      <button type="submit">Refresh</button>
    </form>
  </div>
</body>
</html>
"#,
        cycle = cycle,
        environment = escape_html(environment_report),
        credentials = escape_html(credentials_report),
        raw_http = escape_html(raw_http_report),
        refresh_endpoint = REFRESH_ENDPOINT,
    )
}

/// Escapes report text for embedding inside a `<pre>` element. Reports
/// carry raw response bodies, which may themselves contain markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
