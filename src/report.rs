//! Plain-text rendering of one table page for the command line

use unicode_width::UnicodeWidthStr;

use crate::api::resource::AdminRecord;
use crate::api::ResourcePayload;
use crate::cli::ViewArgs;
use crate::models::{columns, Country, Discipline, Document, University, User, Year};
use crate::research_tui::components::TableLabels;
use crate::research_tui::ui::fit_width;
use crate::table::{Column, DerivedView, PageSize, PageState, Record, SortState, TableError};

const MAX_COLUMN_WIDTH: usize = 40;

/// Run the view pipeline and lay the page out as aligned text.
///
/// A page past the end is clamped to the last one, as in the interactive
/// table.
pub fn format_page<R: Record>(
    records: &[R],
    columns: &[Column],
    sort: &SortState,
    filter: &str,
    page: &PageState,
    labels: &TableLabels,
) -> String {
    let mut derived = DerivedView::new();
    derived.refresh(0, records, columns, sort, filter);
    let mut page = *page;
    page.clamp_to(page.total_pages(derived.filtered_count()));
    let view = derived.page(records, &page);

    let headers: Vec<String> = columns
        .iter()
        .map(|column| match sort {
            Some(spec) if spec.key == column.key => {
                format!("{} {}", column.label, spec.direction.indicator())
            }
            _ => column.label.clone(),
        })
        .collect();

    let rows: Vec<Vec<String>> = view
        .items
        .iter()
        .map(|record| columns.iter().map(|c| record.field_text(&c.key)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| fit_width(cell, width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::new();
    out.push(line(&headers));
    out.push("-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    if view.filtered_count == 0 {
        out.push(if records.is_empty() {
            labels.empty.clone()
        } else {
            labels.no_match.clone()
        });
    }
    for row in &rows {
        out.push(line(row));
    }
    out.push(String::new());
    out.push(format!(
        "{} ({} / {})",
        labels.page_text(page.current_page, view.total_pages),
        view.filtered_count,
        records.len()
    ));

    out.join("\n")
}

/// Apply the command line flags to a record list
pub fn format_records<R: Record>(
    records: &[R],
    columns: &[Column],
    view: &ViewArgs,
    default_size: PageSize,
) -> Result<String, TableError> {
    let sort = view.sort_state(columns)?;
    let page = view.page_state(default_size)?;
    Ok(format_page(
        records,
        columns,
        &sort,
        &view.filter,
        &page,
        &TableLabels::default(),
    ))
}

fn format_admin<R: AdminRecord>(
    records: &[R],
    view: &ViewArgs,
    default_size: PageSize,
) -> Result<String, TableError> {
    format_records(records, &R::columns(), view, default_size)
}

pub fn format_payload(
    payload: &ResourcePayload,
    view: &ViewArgs,
    default_size: PageSize,
) -> Result<String, TableError> {
    match payload {
        ResourcePayload::Years(records) => format_admin::<Year>(records, view, default_size),
        ResourcePayload::Universities(records) => {
            format_admin::<University>(records, view, default_size)
        }
        ResourcePayload::Countries(records) => format_admin::<Country>(records, view, default_size),
        ResourcePayload::Disciplines(records) => {
            format_admin::<Discipline>(records, view, default_size)
        }
        ResourcePayload::Users(records) => format_admin::<User>(records, view, default_size),
    }
}

pub fn format_documents(
    documents: &[Document],
    view: &ViewArgs,
    default_size: PageSize,
) -> Result<String, TableError> {
    format_records(documents, &columns::documents(), view, default_size)
}
