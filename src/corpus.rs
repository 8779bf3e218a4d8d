use crate::{LinkGraph, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

lazy_static! {
    static ref HREF: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// `href` targets of all anchors in `html`.
pub fn parse_links(html: &str) -> BTreeSet<String> {
    HREF.captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

/// Builds the link graph of the `*.html` files directly inside `dir`.
///
/// Links pointing outside the directory are dropped, as are self-links.
pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") || !entry.path().is_file() {
            tracing::debug!(entry = %name, "skipping non-html entry");
            continue;
        }
        let contents = fs::read_to_string(entry.path())?;
        pages.insert(name, parse_links(&contents));
    }
    let known: BTreeSet<String> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|l| known.contains(l));
    }
    tracing::debug!(dir = %dir.display(), pages = pages.len(), "crawled corpus");
    LinkGraph::from_links(pages)
}
