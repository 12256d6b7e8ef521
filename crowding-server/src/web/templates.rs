//! Askama templates for the web frontend.

use askama::Template;

/// Home page: station list, direction picker and the result panel.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Sorted station display names for the datalist.
    pub stations: Vec<String>,
}
