use log::debug;

use crate::config::{Cell, ExtractionRules};
use crate::grid::cell_at;
use crate::layout::{is_header_row, ID_LABEL};

/// The columns named by a header row. Only `id` is guaranteed.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnMap {
    pub id: usize,
    pub name: Option<usize>,
    pub grade: Option<usize>,
    pub course: Option<usize>,
}

/// The column indices to read for one data row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct FieldIndices {
    pub id: usize,
    pub name: usize,
    pub grade: usize,
    pub course: Option<usize>,
}

impl ColumnMap {
    /// Builds the mapping from a header row, or returns None if the row is not one.
    ///
    /// When several cells match the same field, the rightmost one is kept.
    pub fn from_header(row: &[Cell]) -> Option<ColumnMap> {
        if !is_header_row(row) {
            return None;
        }
        let mut id: Option<usize> = None;
        let mut name: Option<usize> = None;
        let mut grade: Option<usize> = None;
        let mut course: Option<usize> = None;
        for (idx, cell) in row.iter().enumerate() {
            let v = match cell.normalized() {
                Some(v) => v,
                None => continue,
            };
            if v.contains(ID_LABEL) {
                id = Some(idx);
            }
            if v.contains("student name") {
                name = Some(idx);
            }
            if v == "gr" || v.contains("grade") {
                grade = Some(idx);
            }
            if v.contains("course title") {
                course = Some(idx);
            }
        }
        let res = ColumnMap {
            id: id?,
            name,
            grade,
            course,
        };
        debug!("ColumnMap::from_header: {:?}", res);
        Some(res)
    }

    /// The indices for a row that sits where the header says it should.
    pub fn base_indices(&self) -> FieldIndices {
        let name = self.name.unwrap_or(self.id + 1);
        let grade = self.grade.unwrap_or(name + 1);
        FieldIndices {
            id: self.id,
            name,
            grade,
            course: self.course,
        }
    }

    /// The indices for a row whose cells moved one column to the right.
    ///
    /// Explicit columns move by one; positional defaults follow the moved id.
    pub fn shifted_indices(&self) -> FieldIndices {
        let id = self.id + 1;
        let name = self.name.map(|x| x + 1).unwrap_or(id + 1);
        let grade = self.grade.map(|x| x + 1).unwrap_or(name + 1);
        FieldIndices {
            id,
            name,
            grade,
            course: self.course.map(|x| x + 1),
        }
    }
}

/// True if the row looks like it received an extra leading cell: the id cell
/// is too short (or a "nan" marker) to be an identity while the next cell is
/// long enough to be one.
pub fn is_shifted_row(map: &ColumnMap, row: &[Cell], rules: &ExtractionRules) -> bool {
    let suspicious = match cell_at(row, map.id).normalized() {
        None => true,
        Some(s) => s == "nan" || s.chars().count() <= rules.max_rejected_identity_len,
    };
    if !suspicious {
        return false;
    }
    let next_len = cell_at(row, map.id + 1)
        .trimmed()
        .map(|s| s.chars().count())
        .unwrap_or(0);
    next_len > rules.shift_probe_min_len
}

/// The indices to use for this row only. The map itself is never modified.
pub fn effective_indices(map: &ColumnMap, row: &[Cell], rules: &ExtractionRules) -> FieldIndices {
    if is_shifted_row(map, row, rules) {
        let res = map.shifted_indices();
        debug!("effective_indices: shifted row {:?} -> {:?}", row, res);
        res
    } else {
        map.base_indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn rules() -> ExtractionRules {
        ExtractionRules::DEFAULT_RULES
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        Grid::from_text_rows(&[cells]).row(0).to_vec()
    }

    #[test]
    fn maps_all_labels() {
        let m = ColumnMap::from_header(&row(&[
            "",
            "Student ID",
            "Student Name",
            "Grade Level",
            "Course Title",
        ]))
        .unwrap();
        assert_eq!(
            m,
            ColumnMap {
                id: 1,
                name: Some(2),
                grade: Some(3),
                course: Some(4)
            }
        );
    }

    #[test]
    fn gr_label_must_be_exact() {
        let m = ColumnMap::from_header(&row(&["Student ID", "Group", "GR "])).unwrap();
        assert_eq!(m.grade, Some(2));
        let m = ColumnMap::from_header(&row(&["Student ID", "Group"])).unwrap();
        assert_eq!(m.grade, None);
    }

    #[test]
    fn not_a_header() {
        assert_eq!(ColumnMap::from_header(&row(&["Student Name", "GR"])), None);
        assert_eq!(ColumnMap::from_header(&[]), None);
    }

    #[test]
    fn positional_fallbacks() {
        let m = ColumnMap::from_header(&row(&["Student ID"])).unwrap();
        assert_eq!(
            m.base_indices(),
            FieldIndices {
                id: 0,
                name: 1,
                grade: 2,
                course: None
            }
        );
        let m = ColumnMap::from_header(&row(&["x", "Student ID", "", "", "Student Name"])).unwrap();
        assert_eq!(m.base_indices().grade, 5);
    }

    #[test]
    fn shift_detected_on_blank_leading_cell() {
        let m = ColumnMap::from_header(&row(&["Student ID", "Student Name", "GR"])).unwrap();
        let r = row(&["", "S00123", "Jane Doe", "7"]);
        assert!(is_shifted_row(&m, &r, &rules()));
        assert_eq!(
            effective_indices(&m, &r, &rules()),
            FieldIndices {
                id: 1,
                name: 2,
                grade: 3,
                course: None
            }
        );
    }

    #[test]
    fn unshifted_row_keeps_base_mapping() {
        let m = ColumnMap::from_header(&row(&["Student ID"])).unwrap();
        let r = row(&["S00123", "Jane Doe", "7"]);
        assert!(!is_shifted_row(&m, &r, &rules()));
        assert_eq!(effective_indices(&m, &r, &rules()), m.base_indices());
    }

    #[test]
    fn short_label_with_short_neighbour_is_not_a_shift() {
        let m = ColumnMap::from_header(&row(&["Student ID"])).unwrap();
        assert!(!is_shifted_row(&m, &row(&["7", "Band"]), &rules()));
        assert!(!is_shifted_row(&m, &row(&[""]), &rules()));
        assert!(is_shifted_row(&m, &row(&["1.", "  4021056  "]), &rules()));
    }

    #[test]
    fn nan_id_cell_is_suspicious() {
        let m = ColumnMap::from_header(&row(&["Student ID"])).unwrap();
        assert!(is_shifted_row(&m, &row(&["nan", "S00123", "Jane Doe"]), &rules()));
        assert!(is_shifted_row(&m, &row(&[" NaN ", "S00123"]), &rules()));
        assert!(!is_shifted_row(&m, &row(&["nan", "Band"]), &rules()));
        assert!(!is_shifted_row(&m, &row(&["Nancy", "S00123"]), &rules()));
    }

    #[test]
    fn shift_moves_every_field_by_one() {
        let m = ColumnMap::from_header(&row(&["Student ID", "", "Student Name", "GR", "Course Title"]))
            .unwrap();
        assert_eq!(
            m.shifted_indices(),
            FieldIndices {
                id: 1,
                name: 3,
                grade: 4,
                course: Some(5)
            }
        );
        let m = ColumnMap::from_header(&row(&["Student ID"])).unwrap();
        assert_eq!(
            m.shifted_indices(),
            FieldIndices {
                id: 1,
                name: 2,
                grade: 3,
                course: None
            }
        );
    }
}
