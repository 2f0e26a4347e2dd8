use crate::config::Cell;

static ABSENT: Cell = Cell::Absent;

impl Cell {
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            Cell::Absent => None,
        }
    }

    pub fn trimmed(&self) -> Option<&str> {
        self.text().map(|s| s.trim())
    }

    /// Lowercase, trimmed text. This is the form used for label matching.
    pub fn normalized(&self) -> Option<String> {
        self.trimmed().map(|s| s.to_lowercase())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Cell {
        match s {
            Some(x) => Cell::Text(x.to_string()),
            None => Cell::Absent,
        }
    }
}

/// Looks up a cell of a row; positions past the end are absent.
pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&ABSENT)
}

/// A row-major grid of cells. Rows do not need to share the same width.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Grid {
        Grid { rows }
    }

    /// Convenience constructor, mostly for tests: empty strings become absent.
    pub fn from_text_rows(rows: &[&[&str]]) -> Grid {
        let rows = rows
            .iter()
            .map(|r| {
                r.iter()
                    .map(|s| if s.is_empty() { Cell::Absent } else { Cell::from(*s) })
                    .collect()
            })
            .collect();
        Grid { rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn row(&self, idx: usize) -> &[Cell] {
        self.rows.get(idx).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        cell_at(self.row(row), col)
    }
}
