use std::ops::RangeInclusive;

use indexmap::IndexMap;

/// Structural facts about one compiled class, as produced by analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCoverageInfo {
    /// Dotted binary name, e.g. `a.b.C`.
    pub name: String,
    pub id: u64,
    pub first_line: Option<u32>,
    pub last_line: Option<u32>,
}

impl ClassCoverageInfo {
    pub fn line_range(&self) -> Option<RangeInclusive<u32>> {
        match (self.first_line, self.last_line) {
            (Some(first), Some(last)) if first <= last => Some(first..=last),
            _ => None,
        }
    }
}

/// Classes analyzed so far for the current test, keyed by name. A later
/// analysis of the same name replaces the earlier one.
#[derive(Debug, Default)]
pub struct CoverageBuilder {
    classes: IndexMap<String, ClassCoverageInfo>,
}

impl CoverageBuilder {
    pub fn add(&mut self, info: ClassCoverageInfo) {
        self.classes.insert(info.name.clone(), info);
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassCoverageInfo> {
        self.classes.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageEntry {
    pub test: String,
    pub locations: Vec<String>,
}

pub fn location(class_name: &str, line: u32) -> String {
    format!("{class_name}#{line}")
}
