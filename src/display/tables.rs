//! Tables for the end-of-run summary.

use crate::indexing::PackageSummary;
use comfy_table::{Attribute, Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

pub struct TableBuilder {
    table: Table,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.apply_modifier(UTF8_ROUND_CORNERS);
        Self { table }
    }

    pub fn set_headers(mut self, headers: Vec<&str>) -> Self {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect();
        self.table.set_header(header_cells);
        self
    }

    pub fn add_row(mut self, row: Vec<String>) -> Self {
        self.table.add_row(row);
        self
    }

    fn add_cells(mut self, row: Vec<Cell>) -> Self {
        self.table.add_row(row);
        self
    }

    pub fn build(self) -> String {
        self.table.to_string()
    }
}

/// Entity counts per package with a bold total row.
pub fn create_package_table(packages: &[PackageSummary]) -> String {
    let mut builder = TableBuilder::new().set_headers(vec![
        "Package",
        "Functions",
        "Structs",
        "Interfaces",
        "Types",
        "Imports",
    ]);

    let mut total = PackageSummary::default();
    for row in packages {
        total.functions += row.functions;
        total.structs += row.structs;
        total.interfaces += row.interfaces;
        total.types += row.types;
        total.imports += row.imports;

        let label = if row.path.is_empty() || row.path == "." {
            row.name.clone()
        } else {
            row.path.clone()
        };
        builder = builder.add_row(vec![
            label,
            row.functions.to_string(),
            row.structs.to_string(),
            row.interfaces.to_string(),
            row.types.to_string(),
            row.imports.to_string(),
        ]);
    }

    if packages.len() > 1 {
        let bold = |value: usize| Cell::new(value).add_attribute(Attribute::Bold);
        builder = builder.add_cells(vec![
            Cell::new("TOTAL").add_attribute(Attribute::Bold),
            bold(total.functions),
            bold(total.structs),
            bold(total.interfaces),
            bold(total.types),
            bold(total.imports),
        ]);
    }

    builder.build()
}
