use crate::data::{
    image::{ImageSlot, ImageSource},
    subject::SubjectEntry,
    update::RecordUpdate,
};

///everything printed on one admit card
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StudentRecord {
    pub name: String,
    pub class: String,
    pub section: String,
    pub roll: String,
    pub student_id: String,
    pub exam_type: String,
    pub school_name: String,
    pub school_logo: ImageSource,
    pub student_photo: ImageSource,
    pub subjects: Vec<SubjectEntry>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum UpdateOutcome {
    Applied,
    ///the index was past the end of `subjects` - nothing changed
    IndexOutOfRange { index: usize, len: usize },
}

impl StudentRecord {
    ///the values a freshly opened card starts with
    pub fn seeded() -> Self {
        let slot = "09:00 AM - 12:00 PM";
        Self {
            name: "John Doe".into(),
            class: "10".into(),
            section: "A".into(),
            roll: "42".into(),
            student_id: "S10A42".into(),
            exam_type: "Final Term Examination 2025".into(),
            school_name: "ABC Public School".into(),
            school_logo: ImageSource::placeholder(80, 80),
            student_photo: ImageSource::placeholder(120, 150),
            subjects: vec![
                SubjectEntry::new("Mathematics", "MATH101", "2025-05-10", slot),
                SubjectEntry::new("Science", "SCI102", "2025-05-12", slot),
                SubjectEntry::new("English", "ENG103", "2025-05-14", slot),
            ],
        }
    }

    pub const fn image(&self, slot: ImageSlot) -> &ImageSource {
        match slot {
            ImageSlot::SchoolLogo => &self.school_logo,
            ImageSlot::StudentPhoto => &self.student_photo,
        }
    }

    pub fn apply(&mut self, update: RecordUpdate) -> UpdateOutcome {
        let len = self.subjects.len();

        match update {
            RecordUpdate::Name(value) => self.name = value,
            RecordUpdate::Class(value) => self.class = value,
            RecordUpdate::Section(value) => self.section = value,
            RecordUpdate::Roll(value) => self.roll = value,
            RecordUpdate::StudentId(value) => self.student_id = value,
            RecordUpdate::ExamType(value) => self.exam_type = value,
            RecordUpdate::SchoolName(value) => self.school_name = value,
            RecordUpdate::Image { slot, source } => match slot {
                ImageSlot::SchoolLogo => self.school_logo = source,
                ImageSlot::StudentPhoto => self.student_photo = source,
            },
            RecordUpdate::SubjectField {
                index,
                field,
                value,
            } => {
                let Some(subject) = self.subjects.get_mut(index) else {
                    return UpdateOutcome::IndexOutOfRange { index, len };
                };
                subject.set(field, value);
            }
            RecordUpdate::AddSubject => self.subjects.push(SubjectEntry::default()),
            RecordUpdate::RemoveSubject { index } => {
                if index >= len {
                    return UpdateOutcome::IndexOutOfRange { index, len };
                }
                self.subjects.remove(index);
            }
        }

        UpdateOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{subject::SubjectField, update::ScalarField};

    fn set_subject(index: usize, field: SubjectField, value: &str) -> RecordUpdate {
        RecordUpdate::SubjectField {
            index,
            field,
            value: value.to_string(),
        }
    }

    #[test]
    fn last_write_wins_for_every_scalar_field() {
        let mut record = StudentRecord::seeded();

        for field in ScalarField::ALL {
            for value in ["first", "", "third"] {
                assert_eq!(
                    record.apply(field.into_update(value.to_string())),
                    UpdateOutcome::Applied
                );
            }
            assert_eq!(record.scalar(field), "third");
        }

        assert_eq!(record.name, "third");
        assert_eq!(record.school_name, "third");
        assert_eq!(record.subjects, StudentRecord::seeded().subjects);
    }

    #[test]
    fn add_subject_appends_empty_entry() {
        let mut record = StudentRecord::seeded();
        let before = record.subjects.clone();

        assert_eq!(record.apply(RecordUpdate::AddSubject), UpdateOutcome::Applied);

        assert_eq!(record.subjects.len(), before.len() + 1);
        assert_eq!(&record.subjects[..before.len()], &before[..]);
        let added = record.subjects.last().unwrap();
        for field in SubjectField::ALL {
            assert_eq!(added.get(field), "");
        }
    }

    #[test]
    fn remove_subject_deletes_exactly_one_position() {
        for removed in 0..3 {
            let mut record = StudentRecord::seeded();
            let mut expected = record.subjects.clone();
            expected.remove(removed);

            assert_eq!(
                record.apply(RecordUpdate::RemoveSubject { index: removed }),
                UpdateOutcome::Applied
            );
            assert_eq!(record.subjects, expected);
        }
    }

    #[test]
    fn removing_middle_of_seed_keeps_first_and_last() {
        let seed = StudentRecord::seeded();
        let mut record = seed.clone();

        let _ = record.apply(RecordUpdate::RemoveSubject { index: 1 });

        assert_eq!(record.subjects.len(), 2);
        assert_eq!(record.subjects[0], seed.subjects[0]);
        assert_eq!(record.subjects[1], seed.subjects[2]);
    }

    #[test]
    fn set_subject_field_changes_one_scalar() {
        let seed = StudentRecord::seeded();

        for index in 0..seed.subjects.len() {
            for field in SubjectField::ALL {
                let mut record = seed.clone();
                let _ = record.apply(set_subject(index, field, "changed"));

                for (i, (after, before)) in record.subjects.iter().zip(&seed.subjects).enumerate() {
                    for other in SubjectField::ALL {
                        if i == index && other == field {
                            assert_eq!(after.get(other), "changed");
                        } else {
                            assert_eq!(after.get(other), before.get(other));
                        }
                    }
                }
                assert_eq!(record.name, seed.name);
            }
        }
    }

    #[test]
    fn out_of_range_updates_change_nothing() {
        let seed = StudentRecord::seeded();
        let mut record = seed.clone();

        assert_eq!(
            record.apply(set_subject(3, SubjectField::Code, "X")),
            UpdateOutcome::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            record.apply(RecordUpdate::RemoveSubject { index: 7 }),
            UpdateOutcome::IndexOutOfRange { index: 7, len: 3 }
        );
        assert_eq!(record, seed);
    }

    #[test]
    fn subjects_can_be_emptied_and_refilled() {
        let mut record = StudentRecord::seeded();
        for _ in 0..3 {
            let _ = record.apply(RecordUpdate::RemoveSubject { index: 0 });
        }
        assert!(record.subjects.is_empty());
        assert_eq!(
            record.apply(RecordUpdate::RemoveSubject { index: 0 }),
            UpdateOutcome::IndexOutOfRange { index: 0, len: 0 }
        );

        let _ = record.apply(RecordUpdate::AddSubject);
        let _ = record.apply(set_subject(0, SubjectField::Name, "Art"));
        assert_eq!(record.subjects, vec![SubjectEntry::new("Art", "", "", "")]);
    }

    #[test]
    fn images_replace_their_own_slot_only() {
        let mut record = StudentRecord::seeded();
        let logo = ImageSource::embed(b"logo", Some("image/png"));

        let _ = record.apply(RecordUpdate::Image {
            slot: ImageSlot::SchoolLogo,
            source: logo.clone(),
        });

        assert_eq!(record.image(ImageSlot::SchoolLogo), &logo);
        assert_eq!(
            record.image(ImageSlot::StudentPhoto),
            &ImageSource::placeholder(120, 150)
        );
    }
}
