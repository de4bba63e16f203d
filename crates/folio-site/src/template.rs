//! HTML page templates for static site generation.
//!
//! Every page shares the same header and footer. Paths in links are
//! relative, prefixed with the page's `root`, so the output can be served
//! from any directory or opened straight from disk. Relative URLs inside a
//! post body are rebased onto the same `root`.

use std::fmt::Write;

use folio_renderer::escape_html as escape;
use folio_toc::{ObserverOptions, scroll_spy_script};

use crate::model::Post;
use crate::page::PostPage;
use crate::paths::rebase_relative_urls;

/// Site-wide data shared by all pages.
#[derive(Clone, Debug)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    /// "View source" link; hidden when empty.
    pub repo_url: String,
}

/// A post card on the index page.
pub struct PostCard<'a> {
    pub post: &'a Post,
    /// Display date.
    pub date: String,
    /// Link to the post page, relative to the site root.
    pub href: String,
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;line-height:1.6;color:#1f2933}
a{color:#2563eb}
.site-header,.site-footer{display:flex;justify-content:space-between;align-items:center;padding:1rem 1.5rem;border-bottom:1px solid #e5e7eb}
.site-footer{border-top:1px solid #e5e7eb;border-bottom:0;font-size:.875rem;color:#6b7280}
.container{max-width:72rem;margin:0 auto;padding:1.5rem}
.cards{display:grid;gap:1rem;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr))}
.card{display:block;padding:1rem;border:1px solid #e5e7eb;border-radius:.5rem;text-decoration:none;color:inherit}
.meta{font-size:.875rem;color:#6b7280}
.tag{display:inline-block;margin-right:.25rem;padding:0 .5rem;border-radius:999px;background:#eef2ff;font-size:.75rem}
.post-layout{display:flex;gap:2rem}
.post-content{flex:1;min-width:0}
.toc{width:15rem;position:sticky;top:1rem;max-height:80vh;overflow-y:auto;align-self:flex-start}
.toc a{display:block;text-decoration:none;color:#4b5563}
.toc a.active{color:#2563eb;font-weight:600}
.toc ol{padding-left:16px}
.toc-fab{display:none}
.toc-drawer{display:none}
.toc-drawer.open{display:block;position:fixed;inset:0;background:#fff;padding:1.5rem;overflow-y:auto}
@media (max-width:60rem){.toc{display:none}.toc-fab{display:block;position:fixed;right:1rem;bottom:1rem}}
";

/// Render the index page listing `cards` (already in display order).
#[must_use]
pub fn render_index_page(site: &SiteData, cards: &[PostCard<'_>], tags: &[&str]) -> String {
    let mut html = String::with_capacity(4096 + cards.len() * 512);
    push_head(&mut html, &site.title, &site.description);
    push_header(&mut html, site, "");

    html.push_str("<main class=\"container\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(&site.title));
    if !site.description.is_empty() {
        let _ = writeln!(html, "<p class=\"site-desc\">{}</p>", escape(&site.description));
    }

    if !tags.is_empty() {
        html.push_str("<div class=\"tag-bar\">");
        push_tags(&mut html, tags.iter().copied());
        html.push_str("</div>\n");
    }

    if cards.is_empty() {
        html.push_str("<p class=\"empty-state\">No posts yet.</p>\n");
    } else {
        html.push_str("<div class=\"cards\">\n");
        for card in cards {
            push_card(&mut html, card);
        }
        html.push_str("</div>\n");
    }
    html.push_str("</main>\n");

    push_footer(&mut html, site, "");
    html.push_str("</body>\n</html>\n");
    html
}

/// Render a post page.
///
/// `root` is the relative path from the page back to the site root, e.g.
/// `"../"` for pages under `posts/`.
#[must_use]
pub fn render_post_page(site: &SiteData, page: &PostPage, root: &str) -> String {
    let mut html = String::with_capacity(8192 + page.html.len());
    let title = format!("{} | {}", page.title, site.title);
    push_head(&mut html, &title, &site.description);
    push_header(&mut html, site, root);

    html.push_str("<main class=\"container\">\n");
    html.push_str("<div class=\"post-layout\">\n");
    html.push_str("<article class=\"post-content\">\n");
    let _ = writeln!(html, "<h1 class=\"post-title\">{}</h1>", escape(&page.title));
    let _ = write!(
        html,
        "<div class=\"meta\"><span class=\"post-date\">{}</span> · \
         <span class=\"reading-time\">{} min read</span></div>\n<div class=\"tags\">",
        escape(&page.date),
        page.reading_minutes,
    );
    push_tags(&mut html, page.tags.iter().map(String::as_str));
    html.push_str("</div>\n");
    html.push_str("<div id=\"post-body\">\n");
    html.push_str(&rebase_relative_urls(&page.html, root));
    html.push_str("\n</div>\n</article>\n");

    html.push_str("<nav class=\"toc\" data-toc>\n<h2 class=\"toc-title\">On this page</h2>\n");
    html.push_str(&page.toc_html);
    html.push_str("\n</nav>\n</div>\n</main>\n");

    // Mobile drawer with a second copy of the outline.
    html.push_str("<button class=\"toc-fab\" type=\"button\" data-toc-open>Contents</button>\n");
    html.push_str("<div class=\"toc-drawer\" data-toc-drawer>\n");
    html.push_str("<button class=\"toc-close\" type=\"button\" data-toc-close>Close</button>\n");
    html.push_str(&page.toc_html);
    html.push_str("\n</div>\n");

    push_footer(&mut html, site, root);
    let _ = writeln!(
        html,
        "<script>\n{}\n</script>",
        scroll_spy_script(&ObserverOptions::scroll_spy())
    );
    html.push_str("</body>\n</html>\n");
    html
}

/// Render the page shown when there is no post to display.
#[must_use]
pub fn render_not_found_page(site: &SiteData, root: &str) -> String {
    let mut html = String::with_capacity(2048);
    let title = format!("Post not found | {}", site.title);
    push_head(&mut html, &title, &site.description);
    push_header(&mut html, site, root);
    html.push_str("<main class=\"container\">\n");
    html.push_str("<h1 class=\"post-title\">Post not found</h1>\n");
    let _ = writeln!(
        html,
        "<p><a href=\"{}index.html\">Back to all posts</a></p>",
        escape(root)
    );
    html.push_str("</main>\n");
    push_footer(&mut html, site, root);
    html.push_str("</body>\n</html>\n");
    html
}

fn push_head(html: &mut String, title: &str, description: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    if !description.is_empty() {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    let _ = writeln!(html, "<style>\n{STYLE}</style>");
    html.push_str("</head>\n<body>\n");
}

fn push_header(html: &mut String, site: &SiteData, root: &str) {
    html.push_str("<header class=\"site-header\">\n");
    let _ = writeln!(
        html,
        "<a class=\"site-title\" href=\"{}index.html\">{}</a>",
        escape(root),
        escape(&site.title)
    );
    if !site.repo_url.is_empty() {
        let _ = writeln!(
            html,
            "<a class=\"repo-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View on GitHub</a>",
            escape(&site.repo_url)
        );
    }
    html.push_str("</header>\n");
}

fn push_footer(html: &mut String, site: &SiteData, root: &str) {
    html.push_str("<footer class=\"site-footer\">\n");
    let _ = writeln!(
        html,
        "<span>{}</span><a href=\"{}index.html\">All posts</a>",
        escape(&site.title),
        escape(root)
    );
    html.push_str("</footer>\n");
}

fn push_card(html: &mut String, card: &PostCard<'_>) {
    let post = card.post;
    let _ = writeln!(html, "<a class=\"card\" href=\"{}\">", escape(&card.href));
    let _ = writeln!(html, "<h3>{}</h3>", escape(&post.title));
    let _ = writeln!(
        html,
        "<p>{}</p>",
        escape(post.summary.as_deref().unwrap_or_default())
    );
    let _ = writeln!(html, "<div class=\"meta\">{}</div>", escape(&card.date));
    html.push_str("<div class=\"tags\">");
    push_tags(html, post.tags.iter().map(String::as_str));
    html.push_str("</div>\n</a>\n");
}

fn push_tags<'a>(html: &mut String, tags: impl Iterator<Item = &'a str>) {
    for tag in tags {
        let _ = write!(html, "<span class=\"tag\">{}</span>", escape(tag));
    }
}
