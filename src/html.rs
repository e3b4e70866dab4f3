//! HTML document output.
//!
//! Wraps a rendered page in a full document with the navigation sidebar.
//! Chart markup goes into `<iframe srcdoc>`; the attribute encoding is undone
//! by the browser, so the framed document is the artifact byte for byte.

use crate::config::Layout;
use crate::nav::NavigationShell;
use crate::render::{Block, RenderedPage};

pub struct DocumentMeta<'a> {
    pub app_title: &'a str,
    pub layout: Layout,
}

pub fn render_document(
    meta: &DocumentMeta<'_>,
    shell: &NavigationShell,
    page: &RenderedPage,
) -> String {
    let menu_title = shell
        .select(&page.slug)
        .map(|e| e.title)
        .unwrap_or(page.heading.as_str());
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} · {app}</title>
    <style>{css}</style>
</head>
<body class="{layout}">
    <nav class="sidebar">
        <div class="app-title">{app}</div>
{menu}
    </nav>
    <main>
        <h1>{heading}</h1>
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(menu_title),
        app = escape_html(meta.app_title),
        css = inline_css(),
        layout = meta.layout.css_class(),
        menu = render_menu(shell, &page.slug),
        heading = escape_html(&page.heading),
        body = render_blocks(&page.blocks),
    )
}

fn render_menu(shell: &NavigationShell, active: &str) -> String {
    let mut out = String::from("        <ul>\n");
    for entry in shell.entries() {
        let class = if entry.page.slug == active { " class=\"active\"" } else { "" };
        out.push_str(&format!(
            "            <li{}><a href=\"{}\"><span class=\"icon\">{}</span> {}</a></li>\n",
            class,
            escape_html(&entry.href()),
            escape_html(entry.icon),
            escape_html(entry.title),
        ));
    }
    out.push_str("        </ul>");
    out
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Header(h) => {
                out.push_str(&format!("        <h2>{}</h2>\n", escape_html(h)));
            }
            Block::Embed {
                artifact,
                content,
                height,
            } => {
                out.push_str(&format!(
                    "        <iframe class=\"chart\" title=\"{}\" height=\"{}\" srcdoc=\"{}\"></iframe>\n",
                    escape_html(artifact),
                    height,
                    escape_html(content),
                ));
            }
            Block::Notice(msg) => {
                out.push_str(&format!(
                    "        <div class=\"notice error\" role=\"alert\">{}</div>\n",
                    escape_html(msg)
                ));
            }
        }
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; display: flex; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #262730; }
.sidebar { width: 240px; min-height: 100vh; background: #f0f2f6; padding: 1.5rem 1rem; box-sizing: border-box; }
.sidebar .app-title { font-weight: 600; margin-bottom: 1rem; }
.sidebar ul { list-style: none; padding: 0; margin: 0; }
.sidebar li a { display: block; padding: .4rem .6rem; border-radius: 6px; color: inherit; text-decoration: none; }
.sidebar li.active a { background: #e0e3ea; font-weight: 600; }
main { flex: 1; padding: 2rem 3rem; }
body.layout-centered main { max-width: 736px; margin: 0 auto; }
iframe.chart { width: 100%; border: 0; display: block; }
.notice.error { background: #ffe9e9; color: #7d1a1a; padding: .8rem 1rem; border-radius: 6px; }
"#
}
