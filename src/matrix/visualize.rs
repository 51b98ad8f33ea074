//! Matrix Visualization
//!
//! Three renderings of the same grid:
//! - [`RationalMatrix::render`]: the compact column-aligned text printed after every operation
//! - [`VizTable`]: a boxed prettytable with row and column labels
//! - [`MatrixSnapshot::snapshot`]: a JSON object with the grid and the history labels
//!

use super::basic::*;
use crate::util::*;
use itertools::Itertools;
use prettytable::format::TableFormat;
use prettytable::*;

impl RationalMatrix {
    /// every column is right-justified to its widest cell; an augmented matrix gets a `|` divider
    /// between the original columns and the identity block
    pub fn render(&self) -> String {
        let cells = rationals_to_strings(&self.to_rows());
        let mut widths = vec![0; self.columns()];
        for row in cells.iter() {
            for (column, cell) in row.iter().enumerate() {
                widths[column] = widths[column].max(cell.chars().count());
            }
        }
        let original_columns = self.original_columns();
        cells
            .iter()
            .map(|row| {
                let mut parts: Vec<String> = row
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| format!("{:>width$}", cell, width = widths[column]))
                    .collect();
                if self.is_augmented() {
                    parts.insert(original_columns, " | ".to_string());
                }
                parts.join(" ")
            })
            .join("\n")
    }
}

impl std::fmt::Display for RationalMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[derive(Clone)]
pub struct VizTable {
    pub title: Row,
    pub rows: Vec<Row>,
}

lazy_static! {
    pub static ref DEFAULT_TABLE_FORMAT: TableFormat = {
        let mut format = TableFormat::new();
        format.padding(0, 0);
        format.column_separator('\u{250A}');
        format.borders('\u{250A}');
        use format::LinePosition::*;
        let separators = [
            (Intern, ['\u{2500}', '\u{253C}', '\u{251C}', '\u{2524}']),
            (Top, ['\u{2500}', '\u{252C}', '\u{250C}', '\u{2510}']),
            (Bottom, ['\u{2500}', '\u{2534}', '\u{2514}', '\u{2518}']),
            (Title, ['\u{2550}', '\u{256A}', '\u{255E}', '\u{2561}']),
        ];
        for (position, s) in separators {
            format.separators(&[position], format::LineSeparator::new(s[0], s[1], s[2], s[3]))
        }
        format
    };
}

impl From<&RationalMatrix> for VizTable {
    fn from(matrix: &RationalMatrix) -> VizTable {
        let divider_at = if matrix.is_augmented() {
            Some(matrix.original_columns())
        } else {
            None
        };
        // create title
        let mut title = Row::empty();
        title.add_cell(Cell::new(""));
        for column in 0..matrix.columns() {
            if divider_at == Some(column) {
                title.add_cell(Cell::new("|"));
            }
            title.add_cell(Cell::new((column + 1).to_string().as_str()).style_spec("brFm"));
        }
        // create body rows
        let mut rows: Vec<Row> = vec![];
        for (index, row) in rationals_to_strings(&matrix.to_rows()).iter().enumerate() {
            let mut table_row = Row::empty();
            table_row.add_cell(Cell::new((index + 1).to_string().as_str()).style_spec("brFb"));
            for (column, cell) in row.iter().enumerate() {
                if divider_at == Some(column) {
                    table_row.add_cell(Cell::new("|"));
                }
                table_row.add_cell(Cell::new(cell.as_str()).style_spec("r"));
            }
            rows.push(table_row);
        }
        VizTable { title, rows }
    }
}

impl From<VizTable> for Table {
    fn from(viz_table: VizTable) -> Table {
        let mut table = Table::new();
        table.set_format(*DEFAULT_TABLE_FORMAT);
        table.set_titles(viz_table.title.clone());
        for row in viz_table.rows.iter() {
            table.add_row(row.clone());
        }
        table
    }
}

impl From<VizTable> for serde_json::Value {
    fn from(viz_table: VizTable) -> serde_json::Value {
        let mut table_json = vec![];
        let mut title_json = vec![];
        for cell in viz_table.title.iter() {
            title_json.push(cell.get_content());
        }
        table_json.push(title_json);
        for row in viz_table.rows.iter() {
            let mut row_json = vec![];
            for cell in row {
                row_json.push(cell.get_content());
            }
            table_json.push(row_json);
        }
        json!(table_json)
    }
}

pub trait VizTrait {
    fn viz_table(&self) -> VizTable;
    fn printstd_str(&self) -> String {
        Table::from(self.viz_table()).to_string()
    }
    fn printstd(&self) {
        #[cfg(feature = "colorful")]
        Table::from(self.viz_table()).printstd();
        #[cfg(not(feature = "colorful"))]
        println!("{}", Table::from(self.viz_table()));
    }
}

impl VizTrait for VizTable {
    fn viz_table(&self) -> VizTable {
        self.clone()
    }
}

impl VizTrait for RationalMatrix {
    fn viz_table(&self) -> VizTable {
        VizTable::from(self)
    }
}

pub trait MatrixSnapshot {
    fn snapshot(&self, abbrev: bool) -> serde_json::Value;
}

impl MatrixSnapshot for RationalMatrix {
    fn snapshot(&self, abbrev: bool) -> serde_json::Value {
        let history: Vec<String> = self.history().iter().map(|operation| operation.to_string()).collect();
        json!({
            if abbrev { "r" } else { "rows" }: self.rows(),
            if abbrev { "c" } else { "columns" }: self.columns(),
            if abbrev { "a" } else { "augmented" }: self.is_augmented(),
            if abbrev { "g" } else { "grid" }: rationals_to_strings(&self.to_rows()),
            if abbrev { "h" } else { "history" }: history,
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::super::operation::*;
    use super::*;

    #[test]
    fn visualize_render_plain() {
        // cargo test visualize_render_plain -- --nocapture
        let matrix = RationalMatrix::new_plain(vec![
            vec![rational_integer(1), rational_integer(-2)],
            vec![rational_integer(10), rational(3, 4)],
        ])
        .unwrap();
        println!("{matrix}");
        assert_eq!(matrix.render(), " 1  -2\n10 3/4");
        assert_eq!(matrix.to_string(), matrix.render());
    }

    #[test]
    fn visualize_render_augmented() {
        // cargo test visualize_render_augmented -- --nocapture
        let mut matrix = RationalMatrix::from_integers(&[vec![2, 0], vec![0, 2]], true).unwrap();
        assert_eq!(matrix.render(), "2 0  |  1 0\n0 2  |  0 1");
        matrix.eliminate();
        println!("{matrix}");
        assert_eq!(matrix.render(), "1 0  |  1/2   0\n0 1  |    0 1/2");
    }

    #[test]
    fn visualize_table_plain() {
        // cargo test visualize_table_plain -- --nocapture
        let matrix = RationalMatrix::from_integers(&[vec![1, 2], vec![3, 4]], false).unwrap();
        matrix.printstd();
        assert_eq!(
            matrix.printstd_str(),
            "\
┌─┬─┬─┐
┊ ┊1┊2┊
╞═╪═╪═╡
┊1┊1┊2┊
├─┼─┼─┤
┊2┊3┊4┊
└─┴─┴─┘
"
        );
    }

    #[test]
    fn visualize_table_augmented() {
        // cargo test visualize_table_augmented -- --nocapture
        let matrix = RationalMatrix::from_integers(&[vec![2, 0], vec![0, 2]], true).unwrap();
        matrix.printstd();
        let expected_result = "\
┌─┬─┬─┬─┬─┬─┐
┊ ┊1┊2┊|┊3┊4┊
╞═╪═╪═╪═╪═╪═╡
┊1┊2┊0┊|┊1┊0┊
├─┼─┼─┼─┼─┼─┤
┊2┊0┊2┊|┊0┊1┊
└─┴─┴─┴─┴─┴─┘
";
        assert_eq!(matrix.printstd_str(), expected_result);
        let viz_table = matrix.viz_table();
        assert_eq!(viz_table.printstd_str(), expected_result);
        let json_value: serde_json::Value = viz_table.into();
        assert_eq!(
            json_value,
            json!([
                ["", "1", "2", "|", "3", "4"],
                ["1", "2", "0", "|", "1", "0"],
                ["2", "0", "2", "|", "0", "1"]
            ])
        );
    }

    #[test]
    fn visualize_snapshot() {
        // cargo test visualize_snapshot -- --nocapture
        let mut matrix = RationalMatrix::from_integers(&[vec![0, 2], vec![1, 1]], false).unwrap();
        matrix.apply(ElementaryRowOperation::swap(1, 2).unwrap()).unwrap();
        matrix
            .apply(ElementaryRowOperation::scalar_multiply(2, rational(1, 2)).unwrap())
            .unwrap();
        assert_eq!(
            matrix.snapshot(false),
            json!({
                "rows": 2,
                "columns": 2,
                "augmented": false,
                "grid": [["1", "1"], ["0", "1"]],
                "history": ["P_{1,2}", "D_{2}(1/2)"],
            })
        );
        assert_eq!(matrix.snapshot(true)["h"], json!(["P_{1,2}", "D_{2}(1/2)"]));
    }
}
