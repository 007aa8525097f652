//! The printable admit card. Everything here is a pure function of the record and the date
//! settings - two equal records always render to the same markup.

use crate::{
    config::date_locale::{DateLocaleConfig, ExamDateFormatter},
    data::{student_record::StudentRecord, subject::SubjectEntry},
    error::AdmitResult,
    maud_conveniences::{detail, render_table},
};
use maud::{Markup, html};

pub const ADMIT_CARD_ID: &str = "admit-card";

pub const INSTRUCTIONS: [&str; 4] = [
    "Students must bring this admit card to every examination.",
    "Reach the examination center at least 30 minutes before the scheduled time.",
    "Mobile phones and other electronic devices are not permitted in the examination hall.",
    "Students without proper uniform will not be allowed to enter the examination hall.",
];

pub const SCHEDULE_COLUMNS: [&str; 4] = ["Subject", "Code", "Date", "Time"];

///cell text for the schedule table, in display order
pub fn schedule_rows(subjects: &[SubjectEntry], dates: &ExamDateFormatter) -> Vec<[String; 4]> {
    subjects
        .iter()
        .map(|subject| {
            [
                subject.name.clone(),
                subject.code.clone(),
                dates.format_raw(&subject.date),
                subject.time.clone(),
            ]
        })
        .collect()
}

pub fn render_admit_card(record: &StudentRecord, dates: &DateLocaleConfig) -> AdmitResult<Markup> {
    let formatter = dates.date_formatter()?;
    let rows = schedule_rows(&record.subjects, &formatter)
        .into_iter()
        .map(|row| row.map(|cell| html! {(cell)}))
        .collect();

    Ok(html! {
        div id=(ADMIT_CARD_ID) class="border-2 border-gray-800 p-6 bg-white" {
            (header(record))
            (identity(record))

            div class="mt-6" {
                h2 class="text-lg font-bold border-b-2 border-gray-800 pb-2" {"Examination Schedule"}
                (render_table(SCHEDULE_COLUMNS, rows))
            }

            div class="mt-6" {
                h3 class="font-bold" {"Instructions:"}
                ul class="list-disc ml-5 text-sm mt-1" {
                    @for instruction in INSTRUCTIONS {
                        li {(instruction)}
                    }
                }
            }

            div class="mt-8 flex justify-end" {
                div class="text-center" {
                    div class="border-t-2 border-black pt-1 w-48" {
                        p class="font-semibold" {"Principal's Signature"}
                    }
                }
            }
        }
    })
}

fn header(record: &StudentRecord) -> Markup {
    html! {
        div class="flex items-center justify-between border-b-2 border-gray-800 pb-4" {
            div class="flex items-center" {
                div class="w-16 h-16 mr-4 flex items-center justify-center" {
                    img src=(record.school_logo.src()) alt="School Logo" class="max-w-full max-h-full object-contain";
                }
                div {
                    h1 class="text-2xl font-bold" {(record.school_name)}
                    p class="text-lg font-semibold" {(record.exam_type)}
                }
            }
            div class="text-right" {
                p class="font-bold" {"ADMIT CARD"}
            }
        }
    }
}

fn identity(record: &StudentRecord) -> Markup {
    html! {
        div class="flex mt-4" {
            div class="w-3/4" {
                div class="grid grid-cols-2 gap-4" {
                    (detail("Student Name", &record.name))
                    (detail("Student ID", &record.student_id))
                    (detail("Class", &record.class))
                    (detail("Section", &record.section))
                    (detail("Roll Number", &record.roll))
                }
            }
            div class="w-1/4 flex flex-col items-center" {
                div class="w-24 h-32 border border-gray-300 flex items-center justify-center overflow-hidden" {
                    img src=(record.student_photo.src()) alt="Student" class="max-w-full max-h-full object-cover";
                }
                div class="mt-2 flex justify-center" {
                    (qr_glyph(64))
                }
            }
        }
    }
}

///decorative only - it doesn't encode anything
fn qr_glyph(size: u32) -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(size) height=(size) viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-label="QR code" {
            rect width="5" height="5" x="3" y="3" rx="1" {}
            rect width="5" height="5" x="16" y="3" rx="1" {}
            rect width="5" height="5" x="3" y="16" rx="1" {}
            path d="M21 16h-3a2 2 0 0 0-2 2v3" {}
            path d="M21 21v.01" {}
            path d="M12 7v3a2 2 0 0 1-2 2H7" {}
            path d="M3 12h.01" {}
            path d="M12 3h.01" {}
            path d="M12 16v.01" {}
            path d="M16 12h1" {}
            path d="M21 12v.01" {}
            path d="M12 21v-1" {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        image::{ImageSlot, ImageSource},
        subject::SubjectField,
        update::{RecordUpdate, ScalarField},
    };

    fn dates() -> DateLocaleConfig {
        DateLocaleConfig::new(Some("en-US".into()), None, None).unwrap()
    }

    fn rows_of(record: &StudentRecord) -> Vec<[String; 4]> {
        schedule_rows(&record.subjects, &dates().date_formatter().unwrap())
    }

    fn set_first_date(value: &str) -> StudentRecord {
        let mut record = StudentRecord::seeded();
        let _ = record.apply(RecordUpdate::SubjectField {
            index: 0,
            field: SubjectField::Date,
            value: value.into(),
        });
        record
    }

    #[test]
    fn equal_records_render_identically() {
        let first = render_admit_card(&StudentRecord::seeded(), &dates())
            .unwrap()
            .into_string();
        let second = render_admit_card(&StudentRecord::seeded(), &dates())
            .unwrap()
            .into_string();
        assert_eq!(first, second);
    }

    #[test]
    fn one_row_per_subject_in_order() {
        let record = StudentRecord::seeded();
        let rows = rows_of(&record);

        assert_eq!(rows.len(), 3);
        let names: Vec<_> = rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(names, ["Mathematics", "Science", "English"]);
        assert_eq!(rows[1][1], "SCI102");
        assert_eq!(rows[2][3], "09:00 AM - 12:00 PM");

        let html = render_admit_card(&record, &dates()).unwrap().into_string();
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn dates_are_locale_formatted() {
        let record = set_first_date("2025-05-10");
        let rows = rows_of(&record);

        assert_eq!(rows[0][2], "5/10/2025");

        let html = render_admit_card(&record, &dates()).unwrap().into_string();
        assert!(!html.contains("2025-05-10"));
        assert!(html.contains(&rows[0][2]));
    }

    #[test]
    fn empty_date_is_an_empty_cell() {
        let record = set_first_date("");
        assert_eq!(rows_of(&record)[0][2], "");

        let html = render_admit_card(&record, &dates()).unwrap().into_string();
        assert!(html.contains(r#"<td class="border border-gray-300 px-4 py-2"></td>"#));
    }

    #[test]
    fn fixed_blocks_are_present() {
        let html = render_admit_card(&StudentRecord::seeded(), &dates())
            .unwrap()
            .into_string();

        assert!(html.contains("ADMIT CARD"));
        assert!(html.contains("Examination Schedule"));
        assert!(html.contains("Principal&#39;s Signature") || html.contains("Principal's Signature"));
        for instruction in INSTRUCTIONS {
            assert!(html.contains(instruction));
        }
        for column in SCHEDULE_COLUMNS {
            assert!(html.contains(&format!(">{column}</th>")));
        }
    }

    #[test]
    fn record_values_flow_into_the_card() {
        let mut record = StudentRecord::seeded();
        let _ = record.apply(ScalarField::SchoolName.into_update("Riverside High".into()));
        let _ = record.apply(ScalarField::Roll.into_update("99".into()));
        let _ = record.apply(RecordUpdate::Image {
            slot: ImageSlot::StudentPhoto,
            source: ImageSource::embed(b"GIF89a", None),
        });

        let html = render_admit_card(&record, &dates()).unwrap().into_string();
        assert!(html.contains("Riverside High"));
        assert!(html.contains(">99<"));
        assert!(html.contains("data:image/gif;base64,"));
        assert!(html.contains("/placeholder/80/80"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut record = StudentRecord::seeded();
        let _ = record.apply(ScalarField::Name.into_update("<script>alert(1)</script>".into()));

        let html = render_admit_card(&record, &dates()).unwrap().into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_schedule_still_renders() {
        let mut record = StudentRecord::seeded();
        record.subjects.clear();

        let html = render_admit_card(&record, &dates()).unwrap().into_string();
        assert!(html.contains("Examination Schedule"));
        assert_eq!(html.matches("<tr>").count(), 0);
    }
}
