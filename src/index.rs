use std::io::{self, Write};

use log::trace;

use crate::course::CourseRecord;

pub const DEFAULT_CAPACITY: usize = 179;

/// Polynomial rolling hash over the raw bytes of `key`, wrapping at 32 bits.
#[inline]
pub fn course_hash(key: &str) -> u32 {
    key.bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(byte as u32))
}

struct Entry {
    hash: u32,
    record: CourseRecord,
}

/// Fixed-capacity hash table of course records with separate chaining.
///
/// The slot count is chosen at construction and never changes, so the load factor is
/// unbounded and chain length is the only cost of a lookup. Each chain keeps its entries
/// in insertion order. Ids are not unique: inserting an id twice stores both records,
/// and [`CourseIndex::search`] returns the one inserted first.
pub struct CourseIndex {
    table: Vec<Vec<Entry>>,
}

impl CourseIndex {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity of zero is raised to one slot.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            table: (0..capacity).map(|_| Vec::new()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    #[inline]
    fn slot_for(&self, hash: u32) -> usize {
        hash as usize % self.table.len()
    }

    /// Slot that `id` is stored under in this table.
    pub fn slot_of(&self, id: &str) -> usize {
        self.slot_for(course_hash(id))
    }

    /// Appends `record` to the tail of its slot's chain. Never fails.
    pub fn insert(&mut self, record: CourseRecord) {
        let hash = course_hash(&record.id);
        let slot = self.slot_for(hash);
        let chain = &mut self.table[slot];
        trace!(
            "inserting {} into slot {} behind {} entries",
            record.id,
            slot,
            chain.len()
        );
        chain.push(Entry { hash, record });
    }

    /// First record in chain order whose id equals `id` exactly.
    pub fn search(&self, id: &str) -> Option<&CourseRecord> {
        let hash = course_hash(id);
        self.table[self.slot_for(hash)]
            .iter()
            .find(|entry| entry.hash == hash && entry.record.id == id)
            .map(|entry| &entry.record)
    }

    /// Every record in bucket order: ascending slot, then insertion order within a slot.
    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> + '_ {
        self.table.iter().flatten().map(|entry| &entry.record)
    }

    pub fn print_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for record in self {
            writeln!(out, "{}", record)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.table.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.iter().all(Vec::is_empty)
    }
}

impl Default for CourseIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<CourseRecord> for CourseIndex {
    fn extend<I: IntoIterator<Item = CourseRecord>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a CourseRecord;
    type IntoIter = Box<dyn Iterator<Item = &'a CourseRecord> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, title: &str, prerequisites: &str) -> CourseRecord {
        CourseRecord::new(id, title, prerequisites)
    }

    #[test]
    fn hash_matches_known_slots() {
        let index = CourseIndex::new();
        assert_eq!(64397186, course_hash("CS101"));
        assert_eq!(146, index.slot_of("CS101"));
        assert_eq!(62, index.slot_of("CSCI100"));
        assert_eq!(0, index.slot_of(""));
    }

    #[test]
    fn hash_wraps_on_overflow() {
        assert_eq!(1703914554, course_hash("Introduction"));
        assert_eq!(129, CourseIndex::new().slot_of("Introduction"));
    }

    #[test]
    fn insert_then_search() {
        let mut index = CourseIndex::new();
        let record = course("CSCI200", "Data Structures", "CSCI101");
        index.insert(record.clone());
        assert_eq!(Some(&record), index.search("CSCI200"));
    }

    #[test]
    fn search_missing() {
        let mut index = CourseIndex::new();
        index.insert(course("CSCI200", "Data Structures", "CSCI101"));
        assert_eq!(None, index.search("CSCI201"));
        assert_eq!(None, index.search("csci200"));
        assert_eq!(None, index.search(""));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut index = CourseIndex::new();
        index.insert(course("CS101", "Intro", ""));
        index.insert(course("CS201", "DataStruct", "CS101"));
        index.insert(course("CS101", "IntroRetake", ""));

        assert_eq!("Intro", index.search("CS101").unwrap().title);
        assert_eq!(3, index.len());

        let titles: Vec<&str> = index.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(3, titles.len());
        assert!(titles.contains(&"Intro"));
        assert!(titles.contains(&"IntroRetake"));
        assert!(titles.contains(&"DataStruct"));
    }

    #[test]
    fn empty_index() {
        let index = CourseIndex::new();
        assert_eq!(0, index.len());
        assert!(index.is_empty());
        assert_eq!(0, index.iter().count());
        assert_eq!(None, index.search("CS101"));
    }

    #[test]
    fn colliding_ids_share_a_chain() {
        let mut index = CourseIndex::new();
        assert_eq!(index.slot_of("A107"), index.slot_of("A160"));
        index.insert(course("A107", "First", ""));
        index.insert(course("A160", "Second", "A107"));
        assert_eq!("First", index.search("A107").unwrap().title);
        assert_eq!("Second", index.search("A160").unwrap().title);
        let order: Vec<&str> = index.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(vec!["A107", "A160"], order);
    }

    #[test]
    fn single_slot_is_one_chain() {
        let mut index = CourseIndex::with_capacity(0);
        assert_eq!(1, index.capacity());
        for id in ["MATH201", "CSCI100", "CSCI300"] {
            index.insert(course(id, id, ""));
        }
        let order: Vec<&str> = index.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(vec!["MATH201", "CSCI100", "CSCI300"], order);
        assert_eq!("CSCI300", index.search("CSCI300").unwrap().id);
    }

    #[test]
    fn many_ids_survive_collisions() {
        let mut index = CourseIndex::with_capacity(DEFAULT_CAPACITY);
        let ids: Vec<String> = (0..200).map(|n| format!("CSCI{:03}", n)).collect();
        for id in &ids {
            index.insert(course(id, &format!("Course {}", id), ""));
        }
        assert_eq!(200, index.len());
        for id in &ids {
            let found = index.search(id).unwrap();
            assert_eq!(id, &found.id);
            assert_eq!(format!("Course {}", id), found.title);
        }
    }

    #[test]
    fn iteration_is_bucket_order() {
        let mut index = CourseIndex::new();
        let ids = ["MATH201", "CSCI100", "CSCI350", "A160", "CSCI300", "A107", "CS101"];
        for id in ids {
            index.insert(course(id, "", ""));
        }

        let mut expected: Vec<(usize, usize, &str)> = ids
            .iter()
            .enumerate()
            .map(|(order, id)| (index.slot_of(id), order, *id))
            .collect();
        expected.sort();
        let expected: Vec<&str> = expected.into_iter().map(|(_, _, id)| id).collect();

        let visited: Vec<&str> = index.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(expected, visited);
        assert_eq!(index.len(), visited.len());
    }

    #[test]
    fn capacity_changes_order_not_contents() {
        let records = [course("CS101", "Intro", ""), course("CS201", "DataStruct", "CS101")];

        let mut wide = CourseIndex::new();
        wide.extend(records.iter().cloned());
        let mut narrow = CourseIndex::with_capacity(10);
        narrow.extend(records.iter().cloned());

        let wide_order: Vec<&str> = wide.iter().map(|c| c.id.as_str()).collect();
        let narrow_order: Vec<&str> = narrow.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(vec!["CS201", "CS101"], wide_order);
        assert_eq!(vec!["CS101", "CS201"], narrow_order);
    }

    #[test]
    fn print_all_writes_one_line_per_record() {
        let mut index = CourseIndex::new();
        index.insert(course("CS101", "Intro", ""));
        index.insert(course("CS201", "DataStruct", "CS101"));

        let mut out = Vec::new();
        index.print_all(&mut out).unwrap();
        assert_eq!(
            "Course ID: CS201, Course Name: DataStruct, Prerequisite: CS101\n\
             Course ID: CS101, Course Name: Intro, Prerequisite: \n",
            String::from_utf8(out).unwrap()
        );
    }
}
