use crate::data::{
    image::{ImageSlot, ImageSource},
    student_record::StudentRecord,
    subject::SubjectField,
};
use serde::Deserialize;

///every way a card can change - the store has no other mutation path
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordUpdate {
    Name(String),
    Class(String),
    Section(String),
    Roll(String),
    StudentId(String),
    ExamType(String),
    SchoolName(String),
    Image {
        slot: ImageSlot,
        source: ImageSource,
    },
    SubjectField {
        index: usize,
        field: SubjectField,
        value: String,
    },
    AddSubject,
    RemoveSubject {
        index: usize,
    },
}

///top-level text fields, as they appear in routes
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Name,
    Class,
    Section,
    Roll,
    StudentId,
    ExamType,
    SchoolName,
}

impl ScalarField {
    #[cfg(test)]
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Class,
        Self::Section,
        Self::Roll,
        Self::StudentId,
        Self::ExamType,
        Self::SchoolName,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Class => "class",
            Self::Section => "section",
            Self::Roll => "roll",
            Self::StudentId => "student_id",
            Self::ExamType => "exam_type",
            Self::SchoolName => "school_name",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Student Name",
            Self::Class => "Class",
            Self::Section => "Section",
            Self::Roll => "Roll Number",
            Self::StudentId => "Student ID",
            Self::ExamType => "Exam Title",
            Self::SchoolName => "School Name",
        }
    }

    pub fn into_update(self, value: String) -> RecordUpdate {
        match self {
            Self::Name => RecordUpdate::Name(value),
            Self::Class => RecordUpdate::Class(value),
            Self::Section => RecordUpdate::Section(value),
            Self::Roll => RecordUpdate::Roll(value),
            Self::StudentId => RecordUpdate::StudentId(value),
            Self::ExamType => RecordUpdate::ExamType(value),
            Self::SchoolName => RecordUpdate::SchoolName(value),
        }
    }
}

impl StudentRecord {
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Name => &self.name,
            ScalarField::Class => &self.class,
            ScalarField::Section => &self.section,
            ScalarField::Roll => &self.roll,
            ScalarField::StudentId => &self.student_id,
            ScalarField::ExamType => &self.exam_type,
            ScalarField::SchoolName => &self.school_name,
        }
    }
}
