//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod show;

pub(crate) use build::BuildArgs;
pub(crate) use show::ShowArgs;

use folio_config::Config;
use folio_site::{PageOptions, PostsDocument, SiteBuilder, SiteData};

use crate::error::CliError;

/// Load the posts document named by `config` and prepare a site builder.
pub(crate) fn site_builder(config: &Config) -> Result<SiteBuilder, CliError> {
    let document = PostsDocument::load(&config.content_resolved.posts)?;
    let site = SiteData {
        title: config.site.title.clone(),
        description: config.site.description.clone(),
        repo_url: config.site.repo_url.clone(),
    };
    let options = PageOptions {
        reading_wpm: config.site.reading_wpm,
        empty_label: config.toc.empty_label.clone(),
    };
    Ok(SiteBuilder::new(document, site, options))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_project(dir: &std::path::Path) -> std::path::PathBuf {
        std::fs::create_dir_all(dir.join("data")).unwrap();
        std::fs::write(
            dir.join("data/posts.json"),
            r###"{"posts": [{"id": "intro", "title": "Intro", "date": "2025-08-15",
                "content_md": "## Start\n\nHello"}]}"###,
        )
        .unwrap();
        let config = dir.join("folio.toml");
        std::fs::write(
            &config,
            "[site]\ntitle = \"Notes\"\nreading_wpm = 200\n\n[toc]\nempty_label = \"Empty\"\n",
        )
        .unwrap();
        config
    }

    #[test]
    fn test_site_builder_uses_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_project(dir.path());
        let config = Config::load(Some(&config_path), None).unwrap();

        let builder = site_builder(&config).unwrap();

        assert_eq!(builder.site().title, "Notes");
        let html = builder.render_post(Some("intro"));
        assert!(html.contains("<h2 id=\"start\">Start</h2>"));
    }

    #[test]
    fn test_site_builder_missing_posts() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "").unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();

        let Err(err) = site_builder(&config) else {
            panic!("expected missing posts error");
        };
        assert!(err.to_string().starts_with("Posts document not found"));
    }
}
