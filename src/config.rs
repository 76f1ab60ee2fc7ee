use std::path::PathBuf;

pub(crate) const INDEX_URL: &str =
    "http://info.sjsu.edu/web-dbgen/artic/all-course-to-course.html";
pub(crate) const BASE_URL: &str = "http://info.sjsu.edu/";
pub(crate) const OUTPUT_PATH: &str = "articulations.txt";

pub(crate) const COURSES: &[&str] = &["CS 046A", "CS 046B", "CS 047", "CS 049C", "CS 049J"];

/// Ordinal path into the index page: which `<table>` holds the links to
/// the per-institution articulation pages.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    pub table_index: usize,
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self { table_index: 2 }
    }
}

/// Ordinal path into an articulation detail page. The remote pages carry
/// no stable identifiers on the articulation table itself, so navigation
/// is positional: a wrapper selector, then the nth `<table>` inside it,
/// then fixed cell offsets within each row.
#[derive(Debug, Clone)]
pub struct PageSchema {
    pub content_selector: String,
    pub table_index: usize,
    /// Cell holding the candidate course code in every row.
    pub code_cell: usize,
    /// Cell holding the equivalency text in every row.
    pub equiv_cell: usize,
    /// Cell of the first row holding the institution display name.
    pub institution_cell: usize,
}

impl Default for PageSchema {
    fn default() -> Self {
        Self {
            content_selector: "div#bg div#content div.content_wrapper".to_string(),
            table_index: 1,
            code_cell: 0,
            equiv_cell: 2,
            institution_cell: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub index_url: String,
    /// Relative hrefs on the index page resolve against this, not against
    /// the index URL itself.
    pub base_url: String,
    pub output_path: PathBuf,
    pub courses: Vec<String>,
    pub index: IndexSchema,
    pub page: PageSchema,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            index_url: INDEX_URL.to_string(),
            base_url: BASE_URL.to_string(),
            output_path: PathBuf::from(OUTPUT_PATH),
            courses: COURSES.iter().map(|c| c.to_string()).collect(),
            index: IndexSchema::default(),
            page: PageSchema::default(),
        }
    }
}
