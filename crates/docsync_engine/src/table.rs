use crate::markup::{Element, ElementKind};

/// Renders a table as a pipe-delimited block.
///
/// The first row becomes the header whatever its cell type. Cells are
/// flattened to trimmed text. Rows with differing cell counts are emitted
/// as they are, without padding.
pub fn render_table(table: &Element) -> String {
    let rows = table.descendants_of_kind(&ElementKind::TableRow);
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let headers = row_cells(header);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(pipe_line(&headers));
    lines.push(pipe_line(&vec!["---".to_string(); headers.len()]));
    for row in body {
        lines.push(pipe_line(&row_cells(row)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn row_cells(row: &Element) -> Vec<String> {
    row.descendants_of_kind(&ElementKind::TableCell)
        .into_iter()
        .map(|cell| cell.text_content().trim().to_string())
        .collect()
}

fn pipe_line(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
