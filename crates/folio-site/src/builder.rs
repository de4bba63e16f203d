//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::date::format_date;
use crate::error::SiteError;
use crate::model::{PostsDocument, unique_tags};
use crate::page::{PageOptions, PostPage};
use crate::paths::{post_file_stems, post_href};
use crate::template::{
    PostCard, SiteData, render_index_page, render_not_found_page, render_post_page,
};

/// Directory for per-post pages, relative to the output directory.
const POSTS_DIR: &str = "posts";
/// Fallback post view at the site root.
const FALLBACK_PAGE: &str = "post.html";

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Directory the site was written to.
    pub output_dir: PathBuf,
    /// Number of post pages written (excluding the fallback view).
    pub posts: usize,
    /// Total number of files written.
    pub files: usize,
}

/// Builds a static blog from a posts document.
pub struct SiteBuilder {
    document: PostsDocument,
    site: SiteData,
    options: PageOptions,
    /// Output file stem for each post, in document order.
    file_stems: Vec<String>,
    /// Post id to index link.
    hrefs: HashMap<String, String>,
}

impl SiteBuilder {
    /// Create a builder.
    ///
    /// Title and description from the posts document take precedence over
    /// the ones in `site`.
    #[must_use]
    pub fn new(document: PostsDocument, mut site: SiteData, options: PageOptions) -> Self {
        if let Some(title) = document.site_title() {
            title.clone_into(&mut site.title);
        }
        if let Some(description) = document.site_description() {
            description.clone_into(&mut site.description);
        }
        let file_stems = post_file_stems(&document.posts);
        let hrefs = document
            .posts
            .iter()
            .zip(&file_stems)
            .map(|(post, stem)| (post.id.clone(), post_href(stem)))
            .collect();
        Self {
            document,
            site,
            options,
            file_stems,
            hrefs,
        }
    }

    /// Resolved site data.
    #[must_use]
    pub fn site(&self) -> &SiteData {
        &self.site
    }

    /// Render the index page.
    #[must_use]
    pub fn render_index(&self) -> String {
        let posts = self.document.posts_by_date_desc();
        let tags = unique_tags(posts.iter().copied());
        let cards: Vec<PostCard<'_>> = posts
            .into_iter()
            .map(|post| PostCard {
                post,
                date: format_date(&post.date),
                href: self
                    .hrefs
                    .get(&post.id)
                    .cloned()
                    .unwrap_or_else(|| post_href(&post.id)),
            })
            .collect();
        render_index_page(&self.site, &cards, &tags)
    }

    /// Render the page for `id` as served from the site root.
    ///
    /// Unknown or missing ids show the first post; an empty document shows
    /// the not-found page.
    #[must_use]
    pub fn render_post(&self, id: Option<&str>) -> String {
        self.render_post_at(id, "")
    }

    fn render_post_at(&self, id: Option<&str>, root: &str) -> String {
        match self.document.resolve_post(id) {
            Some(post) => {
                let page = PostPage::render(post, &self.options);
                render_post_page(&self.site, &page, root)
            }
            None => render_not_found_page(&self.site, root),
        }
    }

    /// Write the site to `output_dir`.
    ///
    /// Produces `index.html`, one page under `posts/` for every post and the
    /// fallback view `post.html`. Post pages are named after the post id when
    /// it is a safe file name, otherwise after its slug. Existing files are
    /// overwritten; other files in the directory are left alone.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Io` if a directory or file cannot be written.
    pub fn build(&self, output_dir: &Path) -> Result<BuildSummary, SiteError> {
        let posts_dir = output_dir.join(POSTS_DIR);
        fs::create_dir_all(&posts_dir)?;

        write_page(&output_dir.join("index.html"), &self.render_index())?;

        for (post, stem) in self.document.posts.iter().zip(&self.file_stems) {
            let html = self.render_post_at(Some(&post.id), "../");
            write_page(&posts_dir.join(format!("{stem}.html")), &html)?;
        }

        write_page(&output_dir.join(FALLBACK_PAGE), &self.render_post(None))?;

        let posts = self.document.posts.len();
        let summary = BuildSummary {
            output_dir: output_dir.to_path_buf(),
            posts,
            files: posts + 2,
        };
        tracing::info!(
            output = %output_dir.display(),
            posts = summary.posts,
            files = summary.files,
            "Site built"
        );
        Ok(summary)
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), SiteError> {
    fs::write(path, html)?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "Wrote page");
    Ok(())
}
