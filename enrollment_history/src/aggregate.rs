use std::collections::HashMap;

use log::debug;

use crate::config::{CandidateRecord, YearRecord, UNKNOWN};

/// One student's record within a single file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct YearEntry {
    pub identity: String,
    pub display_name: String,
    pub record: YearRecord,
}

/// The year records of one file, in order of first appearance.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct YearBatch {
    pub entries: Vec<YearEntry>,
}

impl YearBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identity: &str) -> Option<&YearEntry> {
        self.entries.iter().find(|e| e.identity == identity)
    }
}

/// Folds the candidate records of one file into at most one record per student.
///
/// A student listed on several rows (several courses in the same year) ends up
/// with the union of the courses.
#[derive(Debug, Default)]
pub struct YearAggregator {
    batch: YearBatch,
    index: HashMap<String, usize>,
}

impl YearAggregator {
    pub fn new() -> YearAggregator {
        YearAggregator::default()
    }

    pub fn add(&mut self, cand: &CandidateRecord) {
        if let Some(&pos) = self.index.get(&cand.identity) {
            let entry = &mut self.batch.entries[pos];
            if entry.display_name == UNKNOWN && cand.display_name != UNKNOWN {
                entry.display_name = cand.display_name.clone();
            }
            let single = YearRecord::new(&cand.grade, &cand.course);
            entry.record.absorb(&cand.grade, &single.courses);
            debug!(
                "YearAggregator: merged {:?} into {:?}",
                cand, entry.identity
            );
        } else {
            self.index
                .insert(cand.identity.clone(), self.batch.entries.len());
            self.batch.entries.push(YearEntry {
                identity: cand.identity.clone(),
                display_name: cand.display_name.clone(),
                record: YearRecord::new(&cand.grade, &cand.course),
            });
        }
    }

    pub fn finish(self) -> YearBatch {
        self.batch
    }
}

pub fn aggregate_year(candidates: &[CandidateRecord]) -> YearBatch {
    let mut agg = YearAggregator::new();
    for c in candidates {
        agg.add(c);
    }
    agg.finish()
}
