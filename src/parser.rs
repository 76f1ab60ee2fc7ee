use crate::config::{IndexSchema, PageSchema};
use crate::types::ArticulationSet;

use scraper::{ElementRef, Html, Selector};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid selector '{0}'")]
    BadSelector(String),
    #[error("No element matches '{0}'")]
    MissingElement(String),
    #[error("Expected table {0} not found")]
    MissingTable(usize),
    #[error("Articulation table has no rows")]
    EmptyTable,
    #[error("Row {row} has no cell {cell}")]
    MissingCell { row: usize, cell: usize },
    #[error("Failed to resolve link '{href}': {source}")]
    UrlParseError {
        href: String,
        source: url::ParseError,
    },
}

/// Extracts the articulation-page links from the index page.
///
/// The links live in a positionally indexed table; each row's first cell
/// is expected to hold an anchor. Rows without one are skipped with a
/// warning rather than carried downstream as dead links.
pub fn parse_index_links(
    html: &str,
    base: &Url,
    schema: &IndexSchema,
) -> Result<Vec<Url>, ParseError> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").unwrap();
    let tr_selector = Selector::parse("tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();
    let a_selector = Selector::parse("a").unwrap();

    let table = document
        .select(&table_selector)
        .nth(schema.table_index)
        .ok_or(ParseError::MissingTable(schema.table_index))?;

    let mut links = Vec::new();
    for (row, tr) in table.select(&tr_selector).enumerate() {
        let href = tr
            .select(&td_selector)
            .next()
            .and_then(|cell| cell.select(&a_selector).next())
            .and_then(|anchor| anchor.value().attr("href"));

        let Some(href) = href else {
            log::warn!("Index row {} has no link, skipping", row + 1);
            continue;
        };

        let url = base.join(href).map_err(|source| ParseError::UrlParseError {
            href: href.to_string(),
            source,
        })?;
        links.push(url);
    }

    Ok(links)
}

/// Scrapes one articulation page into the accumulator, returning how many
/// articulations were appended.
///
/// The first row of the articulation table names the transfer institution;
/// every row is then matched against the tracked course codes. Rows whose
/// equivalency cell holds the "No Current Equivalent" sentinel are skipped.
pub fn scrape_articulations(
    html: &str,
    schema: &PageSchema,
    set: &mut ArticulationSet,
) -> Result<usize, ParseError> {
    let document = Html::parse_document(html);
    let wrapper_selector = Selector::parse(&schema.content_selector)
        .map_err(|_| ParseError::BadSelector(schema.content_selector.clone()))?;
    let table_selector = Selector::parse("table").unwrap();
    let tr_selector = Selector::parse("tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();

    let wrapper = document
        .select(&wrapper_selector)
        .next()
        .ok_or_else(|| ParseError::MissingElement(schema.content_selector.clone()))?;
    let table = wrapper
        .select(&table_selector)
        .nth(schema.table_index)
        .ok_or(ParseError::MissingTable(schema.table_index))?;

    let rows: Vec<ElementRef> = table.select(&tr_selector).collect();
    let first = rows.first().ok_or(ParseError::EmptyTable)?;

    let institution_cell = first
        .select(&td_selector)
        .nth(schema.institution_cell)
        .ok_or(ParseError::MissingCell {
            row: 0,
            cell: schema.institution_cell,
        })?;
    let institution = normalize_whitespace(&text_of(&institution_cell));

    let mut appended = 0;
    for (row, tr) in rows.iter().enumerate() {
        let cells: Vec<ElementRef> = tr.select(&td_selector).collect();

        let code_cell = cells.get(schema.code_cell).ok_or(ParseError::MissingCell {
            row,
            cell: schema.code_cell,
        })?;
        let code_text = text_of(code_cell);
        let candidate: String = code_text.chars().take(7).collect();
        let candidate = candidate.trim_matches(' ');

        if !set.is_tracked(candidate) {
            continue;
        }

        let equiv_cell = cells.get(schema.equiv_cell).ok_or(ParseError::MissingCell {
            row,
            cell: schema.equiv_cell,
        })?;
        let equiv_text = text_of(equiv_cell);
        if equiv_text == "No Current Equivalent" {
            continue;
        }

        let text = normalize_equivalency(&equiv_text);
        set.append(candidate, format!("{} at {}", text, institution));
        appended += 1;
    }

    Ok(appended)
}

/// Normalizes one equivalency cell: drops non-breaking spaces, pads the
/// AND/OR connectives so they stand apart from the course numbers they
/// were glued to, repairs the "HONORS" collision the OR padding causes,
/// and collapses the leftover whitespace. Idempotent.
pub fn normalize_equivalency(text: &str) -> String {
    let text = text.replace('\u{a0}', "");
    let text = text.replace("AND", " AND ").replace("OR", " OR ");
    let text = text.replace("HON OR S", "HONORS");
    normalize_whitespace(&text)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>()
}
