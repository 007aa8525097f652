use crate::{
    data::{
        ValueForm,
        image::ImageSlot,
        student_record::StudentRecord,
        subject::{SubjectEntry, SubjectField},
        update::{RecordUpdate, ScalarField},
    },
    error::AdmitResult,
    maud_conveniences::{live_input, subtitle},
    routes::images::thumbnail,
    state::AdmitState,
};
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
};
use maud::{Markup, html};
use uuid::Uuid;

pub const SUBJECTS_FORM_ID: &str = "subjects_form";

fn scalar_input(id: Uuid, record: &StudentRecord, field: ScalarField) -> Markup {
    live_input(
        field.as_str(),
        field.label(),
        record.scalar(field),
        &format!("/card/{id}/field/{}", field.as_str()),
        None,
        None,
    )
}

fn image_input(id: Uuid, record: &StudentRecord, slot: ImageSlot, label: &str, button: &str) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700 mb-1" {(label)}
            div class="flex items-center gap-3" {
                (thumbnail(id, slot, record.image(slot)))
                form hx-post={"/card/" (id) "/image/" (slot.as_str())} hx-encoding="multipart/form-data" hx-trigger="change" hx-swap="none" {
                    label class="px-3 py-2 bg-blue-500 text-white rounded-md hover:bg-blue-600 flex items-center gap-1 cursor-pointer" {
                        input type="file" name="file" accept="image/*" class="hidden";
                        (button)
                    }
                }
            }
        }
    }
}

///the editing column - hidden when printing
pub fn render_form(id: Uuid, record: &StudentRecord) -> Markup {
    html! {
        div class="w-full lg:w-2/5 bg-white rounded-lg shadow p-6 print:hidden" {
            h2 class="text-xl font-semibold mb-4" {"School Information"}
            div class="space-y-4" {
                (scalar_input(id, record, ScalarField::SchoolName))
                (image_input(id, record, ImageSlot::SchoolLogo, "School Logo", "Upload Logo"))
            }

            (subtitle("Student Information"))
            div class="space-y-4" {
                (scalar_input(id, record, ScalarField::Name))
                div class="flex gap-4" {
                    div class="w-1/2" { (scalar_input(id, record, ScalarField::Class)) }
                    div class="w-1/2" { (scalar_input(id, record, ScalarField::Section)) }
                }
                div class="flex gap-4" {
                    div class="w-1/2" { (scalar_input(id, record, ScalarField::Roll)) }
                    div class="w-1/2" { (scalar_input(id, record, ScalarField::StudentId)) }
                }
                (image_input(id, record, ImageSlot::StudentPhoto, "Student Photo", "Upload Photo"))
                (scalar_input(id, record, ScalarField::ExamType))
            }

            (subtitle("Exam Subjects"))
            (render_subjects(id, &record.subjects))

            button type="button" hx-put={"/card/" (id) "/subjects"} hx-target={"#" (SUBJECTS_FORM_ID)} hx-swap="outerHTML"
                class="mt-2 w-full py-2 bg-blue-500 text-white rounded-md hover:bg-blue-600" {
                "Add Subject"
            }

            button type="button" onclick="window.print()"
                class="mt-8 w-full py-3 bg-green-600 text-white font-medium rounded-md hover:bg-green-700" {
                "Print Admit Card"
            }
        }
    }
}

///re-rendered wholesale after add/remove so every index in it is current
pub fn render_subjects(id: Uuid, subjects: &[SubjectEntry]) -> Markup {
    html! {
        div id=(SUBJECTS_FORM_ID) {
            @for (index, subject) in subjects.iter().enumerate() {
                (subject_card(id, index, subject))
            }
        }
    }
}

fn subject_card(id: Uuid, index: usize, subject: &SubjectEntry) -> Markup {
    let input = |field: SubjectField, label: &str, input_type, placeholder| {
        live_input(
            &format!("subject_{index}_{}", field.as_str()),
            label,
            subject.get(field),
            &format!("/card/{id}/subjects/{index}/{}", field.as_str()),
            input_type,
            placeholder,
        )
    };

    html! {
        div class="p-3 border rounded-md mb-3 bg-gray-50" {
            div class="flex justify-between items-center mb-2" {
                h3 class="font-medium" {"Subject #" (index + 1)}
                button type="button" hx-delete={"/card/" (id) "/subjects/" (index)} hx-target={"#" (SUBJECTS_FORM_ID)} hx-swap="outerHTML"
                    class="text-red-500 hover:text-red-700" {
                    "Remove"
                }
            }

            div class="space-y-3" {
                (input(SubjectField::Name, "Subject Name", None, None))
                (input(SubjectField::Code, "Subject Code", None, None))
                (input(SubjectField::Date, "Exam Date", Some("date"), None))
                (input(SubjectField::Time, "Exam Time", None, Some("e.g. 09:00 AM - 12:00 PM")))
            }
        }
    }
}

pub async fn post_field(
    State(state): State<AdmitState>,
    Path((id, field)): Path<(Uuid, ScalarField)>,
    Form(ValueForm { value }): Form<ValueForm>,
) -> AdmitResult<StatusCode> {
    let _ = state.apply(id, field.into_update(value)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_subject_field(
    State(state): State<AdmitState>,
    Path((id, index, field)): Path<(Uuid, usize, SubjectField)>,
    Form(ValueForm { value }): Form<ValueForm>,
) -> AdmitResult<StatusCode> {
    let _ = state
        .apply(id, RecordUpdate::SubjectField { index, field, value })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn put_subject(
    State(state): State<AdmitState>,
    Path(id): Path<Uuid>,
) -> AdmitResult<Markup> {
    let _ = state.apply(id, RecordUpdate::AddSubject).await?;
    let record = state.snapshot(id).await?;
    Ok(render_subjects(id, &record.subjects))
}

pub async fn delete_subject(
    State(state): State<AdmitState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AdmitResult<Markup> {
    let _ = state.apply(id, RecordUpdate::RemoveSubject { index }).await?;
    let record = state.snapshot(id).await?;
    Ok(render_subjects(id, &record.subjects))
}
