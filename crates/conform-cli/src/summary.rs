use std::fmt::Display;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use conform_core::{BatchOutcome, BatchReport, CategorySummary, ReviewRow};
use conform_model::{
    Comment, ConfidenceScore, ConfidenceSummary, ConfidenceTier, Decision, MaterialItem,
    ValidationStatus, VersionId,
};
use conform_validate::Classifier;

/// One-line rendering of a summary, e.g. for logs and headers.
pub fn summary_line(label: &str, summary: &ConfidenceSummary) -> String {
    if !summary.has_data() {
        return format!("{label}: no data");
    }
    format!(
        "{label}: {} total, {} pre-approved, {} review required, {} action mandatory, mean confidence {}%",
        summary.total,
        summary.pre_approved,
        summary.review_required,
        summary.action_mandatory,
        summary.overall_confidence
    )
}

pub fn breakdown_table(breakdown: &[CategorySummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Results"),
        header_cell("Pre-Approved"),
        header_cell("Review Required"),
        header_cell("Action Mandatory"),
        header_cell("Mean Confidence"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for entry in breakdown {
        let summary = &entry.summary;
        table.add_row(vec![
            Cell::new(entry.category.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.total),
            count_cell(summary.pre_approved, Color::Green),
            count_cell(summary.review_required, Color::Yellow),
            count_cell(summary.action_mandatory, Color::Red),
            if summary.has_data() {
                Cell::new(format!("{}%", summary.overall_confidence))
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

pub fn print_breakdown(version_id: &VersionId, breakdown: &[CategorySummary]) {
    println!("Version: {version_id}");
    println!("{}", breakdown_table(breakdown));
}

pub fn rows_table(rows: &[ReviewRow], classifier: &Classifier) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("File"),
        header_cell("Section"),
        header_cell("Status"),
        header_cell("Confidence"),
        header_cell("Decision"),
        header_cell("Rev"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for row in rows {
        let section = format!(
            "{} {}",
            row.document.spec_section_code, row.document.spec_section_title
        );
        let mut cells = vec![
            Cell::new(&row.document.id),
            Cell::new(&row.document.file_name),
            Cell::new(section.trim()),
        ];
        match &row.validation {
            Some(validation) => cells.extend([
                status_cell(validation.status),
                confidence_cell(validation.confidence_score, classifier),
                decision_cell(validation.decision),
                Cell::new(validation.revision),
            ]),
            None => cells.extend([
                dim_cell("not validated"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        }
        table.add_row(cells);
    }
    table
}

pub fn items_table(items: &[MaterialItem], classifier: &Classifier) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Name"),
        header_cell("Material Matrix"),
        header_cell("Project Spec"),
        header_cell("Project Index"),
        header_cell("Status"),
        header_cell("Confidence"),
        header_cell("Comments"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 6, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(&item.name),
            Cell::new(&item.material_matrix_value),
            Cell::new(&item.project_spec_value),
            Cell::new(&item.project_index_value),
            status_cell(item.status),
            confidence_cell(item.confidence_score, classifier),
            if item.comments.is_empty() {
                dim_cell(0)
            } else {
                Cell::new(item.comments.len())
            },
        ]);
    }
    table
}

pub fn batch_table<K: Display>(report: &BatchReport<K>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Target"), header_cell("Outcome")]);
    apply_table_style(&mut table);
    for entry in &report.entries {
        let outcome = match entry.outcome {
            BatchOutcome::Applied => Cell::new("applied").fg(Color::Green),
            BatchOutcome::NotFound => Cell::new("not found")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            BatchOutcome::NotApplied => dim_cell("not applied"),
        };
        table.add_row(vec![Cell::new(&entry.target), outcome]);
    }
    table
}

pub fn comments_table(comments: &[Comment]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Author"),
        header_cell("Posted"),
        header_cell("Comment"),
    ]);
    apply_table_style(&mut table);
    for comment in comments {
        table.add_row(vec![
            dim_cell(comment.id),
            Cell::new(&comment.author_id),
            Cell::new(comment.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&comment.content),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: ValidationStatus) -> Cell {
    let cell = Cell::new(status.label());
    match status {
        ValidationStatus::PreApproved => cell.fg(Color::Green),
        ValidationStatus::ReviewRequired => cell.fg(Color::Yellow),
        ValidationStatus::ActionMandatory => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn confidence_cell(score: ConfidenceScore, classifier: &Classifier) -> Cell {
    let cell = Cell::new(score);
    match classifier.tier(score) {
        ConfidenceTier::High => cell.fg(Color::Green),
        ConfidenceTier::Medium => cell.fg(Color::Yellow),
        ConfidenceTier::Low => cell.fg(Color::Red),
    }
}

fn decision_cell(decision: Decision) -> Cell {
    if decision.is_pending() {
        dim_cell(decision.label())
    } else {
        Cell::new(decision.label()).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
