use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, info};

use crate::aggregate::YearBatch;
use crate::config::{HistoryEntry, ProgramResult, StudentEntity, YearRecord, UNKNOWN};

#[derive(Debug, Clone)]
struct StudentAccumulator {
    identity: String,
    display_name: String,
    years: BTreeMap<String, YearRecord>,
}

/// Accumulates the year batches of all the files of one program.
///
/// Batches must be merged in file order: the first known name of a student
/// wins.
#[derive(Debug, Default)]
pub struct EntityMerger {
    years: BTreeSet<String>,
    students: Vec<StudentAccumulator>,
    index: HashMap<String, usize>,
}

/// The key used to order students: leading markers dropped, case ignored.
pub fn name_sort_key(name: &str) -> String {
    name.trim_start_matches(|c: char| matches!(c, '*' | '-' | '_' | ' '))
        .to_lowercase()
}

impl EntityMerger {
    pub fn new() -> EntityMerger {
        EntityMerger::default()
    }

    /// Adds a year to the program, even if no student ends up in it.
    pub fn register_year(&mut self, year: &str) {
        self.years.insert(year.to_string());
    }

    pub fn merge_batch(&mut self, year: &str, batch: &YearBatch) {
        self.register_year(year);
        for entry in batch.entries.iter() {
            let pos = match self.index.get(&entry.identity) {
                Some(&pos) => pos,
                None => {
                    let pos = self.students.len();
                    self.index.insert(entry.identity.clone(), pos);
                    self.students.push(StudentAccumulator {
                        identity: entry.identity.clone(),
                        display_name: entry.display_name.clone(),
                        years: BTreeMap::new(),
                    });
                    pos
                }
            };
            let student = &mut self.students[pos];
            if student.display_name == UNKNOWN && entry.display_name != UNKNOWN {
                student.display_name = entry.display_name.clone();
            }
            match student.years.get_mut(year) {
                Some(existing) => {
                    debug!(
                        "merge_batch: {}: second record for year {}",
                        entry.identity, year
                    );
                    existing.absorb(&entry.record.grade, &entry.record.courses);
                }
                None => {
                    student.years.insert(year.to_string(), entry.record.clone());
                }
            }
        }
        debug!(
            "merge_batch: year {}: {} entries, {} students so far",
            year,
            batch.len(),
            self.students.len()
        );
    }

    /// Completes every history with the missing years and sorts the students.
    pub fn finish(self) -> ProgramResult {
        let years: Vec<String> = self.years.iter().cloned().collect();
        let mut students: Vec<StudentEntity> = self
            .students
            .into_iter()
            .map(|s| {
                let history: BTreeMap<String, HistoryEntry> = years
                    .iter()
                    .map(|y| {
                        let entry = match s.years.get(y) {
                            Some(rec) => HistoryEntry {
                                grade: rec.grade.clone(),
                                course: rec.course_string(),
                            },
                            None => HistoryEntry::no_enrollment(),
                        };
                        (y.clone(), entry)
                    })
                    .collect();
                let years_enrolled = history.values().filter(|h| h.is_enrolled()).count();
                StudentEntity {
                    identity: s.identity,
                    display_name: s.display_name,
                    history,
                    years_enrolled,
                }
            })
            .collect();
        // Stable: students with the same key stay in order of first appearance.
        students.sort_by_key(|s| name_sort_key(&s.display_name));
        info!(
            "EntityMerger: {} students over {} years",
            students.len(),
            years.len()
        );
        ProgramResult { years, students }
    }
}
