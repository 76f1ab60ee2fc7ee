use std::collections::HashMap;

/// Accumulator for scraped articulations, keyed by course code.
///
/// Iteration follows the allow-list order the set was created with, and
/// entries within a course keep their insertion order. Entries are never
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticulationSet {
    courses: Vec<String>,
    entries: HashMap<String, Vec<String>>,
}

impl ArticulationSet {
    pub fn new(courses: &[String]) -> Self {
        let entries = courses
            .iter()
            .map(|c| (c.clone(), Vec::new()))
            .collect();
        Self {
            courses: courses.to_vec(),
            entries,
        }
    }

    pub fn is_tracked(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Appends an articulation under `code`. Returns false (and stores
    /// nothing) if the code is not in the allow-list.
    pub fn append(&mut self, code: &str, text: String) -> bool {
        match self.entries.get_mut(code) {
            Some(list) => {
                list.push(text);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.courses
            .iter()
            .map(|c| (c.as_str(), self.entries[c].as_slice()))
    }

    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Vec<String> {
        ["CS 046A", "CS 047"].iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn starts_empty_per_course() {
        let set = ArticulationSet::new(&courses());
        assert_eq!(set.total(), 0);
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected.len(), 2);
        assert!(collected.iter().all(|(_, entries)| entries.is_empty()));
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut set = ArticulationSet::new(&courses());
        assert!(set.append("CS 047", "first".to_string()));
        assert!(set.append("CS 047", "second".to_string()));

        let (_, entries) = set.iter().find(|(c, _)| *c == "CS 047").unwrap();
        assert_eq!(entries, ["first", "second"]);
    }

    #[test]
    fn append_untracked_is_noop() {
        let mut set = ArticulationSet::new(&courses());
        assert!(!set.append("MATH 30", "ignored".to_string()));
        assert_eq!(set.total(), 0);
        assert!(!set.is_tracked("MATH 30"));
    }

    #[test]
    fn iter_follows_allow_list_order() {
        let mut set = ArticulationSet::new(&courses());
        set.append("CS 047", "later course first".to_string());
        set.append("CS 046A", "earlier course second".to_string());

        let order: Vec<&str> = set.iter().map(|(c, _)| c).collect();
        assert_eq!(order, ["CS 046A", "CS 047"]);
    }
}
