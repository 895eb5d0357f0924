use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    /// Free-form text, never resolved against other records.
    pub prerequisites: String,
}

impl CourseRecord {
    #[inline]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        prerequisites: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prerequisites: prerequisites.into(),
        }
    }
}

impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course ID: {}, Course Name: {}, Prerequisite: {}",
            self.id, self.title, self.prerequisites
        )
    }
}
