use crate::types::ArticulationSet;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the accumulated articulations to `path`, truncating any
/// existing file. One line per articulation: `<course code>: <text>`.
pub fn write_articulations(set: &ArticulationSet, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    for (course, entries) in set.iter() {
        for articulation in entries {
            writeln!(out, "{}: {}", course, articulation)?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("articulations-{}-{}", std::process::id(), name))
    }

    fn sample_set() -> ArticulationSet {
        let courses: Vec<String> = ["CS 046A", "CS 047"].iter().map(|c| c.to_string()).collect();
        let mut set = ArticulationSet::new(&courses);
        set.append("CS 047", "CS 22 at Foothill College".to_string());
        set.append("CS 046A", "CIS 22A at De Anza College".to_string());
        set
    }

    #[test]
    fn writes_one_line_per_articulation_in_allow_list_order() {
        let path = temp_path("basic.txt");
        write_articulations(&sample_set(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "CS 046A: CIS 22A at De Anza College\nCS 047: CS 22 at Foothill College\n"
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn truncates_existing_output() {
        let path = temp_path("truncate.txt");
        fs::write(&path, "stale content from a previous run\nmore stale lines\n").unwrap();

        write_articulations(&sample_set(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert_eq!(contents.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_set_produces_empty_file() {
        let path = temp_path("empty.txt");
        let courses = vec!["CS 047".to_string()];
        write_articulations(&ArticulationSet::new(&courses), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        fs::remove_file(&path).unwrap();
    }
}
