// Best-effort title/image extraction from project pages.
// Pattern matching only; malformed markup yields defaults, never errors.

use regex::{Captures, Regex};

use crate::utils::error::Result;

/// Metadata recovered from a page with no index record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapedMetadata {
    pub title: String,
    pub image: String,
}

#[derive(Debug, Clone)]
pub struct MetadataScraper {
    title: Regex,
    heading: Regex,
    image_src: Regex,
    inner_tags: Regex,
    owner_suffix: Regex,
    word_start: Regex,
}

impl MetadataScraper {
    /// `owner_name` is the site owner appended to page titles as `Page | Owner`.
    /// Without one, any trailing `| ...` segment is treated as the suffix.
    pub fn new(owner_name: Option<&str>) -> Result<Self> {
        let owner_suffix = match owner_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => format!(r"(?i)\s*\|\s*{}\s*$", regex::escape(name)),
            None => r"\s*\|[^|]*$".to_string(),
        };

        Ok(Self {
            title: Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>")?,
            heading: Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>")?,
            image_src: Regex::new(r#"(?is)<img\s(?:[^>]*?\s)?src\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)?,
            inner_tags: Regex::new(r"(?s)<[^>]*>")?,
            owner_suffix: Regex::new(&owner_suffix)?,
            word_start: Regex::new(r"\b\w")?,
        })
    }

    /// Title falls back from `<title>` to the first `<h1>` to the humanized slug
    pub fn scrape(&self, slug: &str, html: &str) -> ScrapedMetadata {
        let title = self
            .title_text(html)
            .or_else(|| self.heading_text(html))
            .unwrap_or_else(|| self.humanize(slug));

        ScrapedMetadata {
            title,
            image: self.first_image(html).unwrap_or_default(),
        }
    }

    /// "my-cool-page" -> "My Cool Page"
    pub fn humanize(&self, slug: &str) -> String {
        let spaced = slug.replace('-', " ");
        self.word_start
            .replace_all(&spaced, |caps: &Captures| caps[0].to_uppercase())
            .into_owned()
    }

    fn title_text(&self, html: &str) -> Option<String> {
        let raw = self.title.captures(html)?.get(1)?.as_str();
        let text = self.inner_tags.replace_all(raw, "");
        let text = self.owner_suffix.replace(text.trim(), "");
        non_empty(text.trim())
    }

    fn heading_text(&self, html: &str) -> Option<String> {
        let raw = self.heading.captures(html)?.get(1)?.as_str();
        non_empty(self.inner_tags.replace_all(raw, "").trim())
    }

    fn first_image(&self, html: &str) -> Option<String> {
        let caps = self.image_src.captures(html)?;
        (1..=3)
            .find_map(|group| caps.get(group))
            .map(|m| m.as_str().to_string())
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
