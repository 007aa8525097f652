use crate::{
    data::image::{ImageSlot, ImageSource, placeholder_svg},
    error::{AdmitResult, MultipartSnafu},
    routes::sse::SseEvent,
    state::AdmitState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use maud::{Markup, html};
use snafu::ResultExt;
use uuid::Uuid;

const MAX_PLACEHOLDER_SIDE: u32 = 2000;

///the form's preview of one image slot, refreshed only when that slot changes
pub fn thumbnail(id: Uuid, slot: ImageSlot, source: &ImageSource) -> Markup {
    let (frame, fit) = match slot {
        ImageSlot::SchoolLogo => ("w-20 h-20", "object-contain"),
        ImageSlot::StudentPhoto => ("w-24 h-32", "object-cover"),
    };

    let trigger = format!(
        "sse:{}, sse:{}",
        SseEvent::image_changed(slot),
        SseEvent::RESYNC
    );

    html! {
        div id={"thumbnail_" (slot.as_str())} hx-get={"/card/" (id) "/image/" (slot.as_str())} hx-trigger=(trigger) hx-swap="outerHTML"
            class={(frame) " border flex items-center justify-center bg-gray-50"} {
            img src=(source.src()) alt=(slot.alt_text()) class={"max-w-full max-h-full " (fit)};
        }
    }
}

pub async fn internal_get_thumbnail(
    State(state): State<AdmitState>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
) -> AdmitResult<Markup> {
    let record = state.snapshot(id).await?;
    Ok(thumbnail(id, slot, record.image(slot)))
}

///kicks off decoding and returns straight away - the card updates when decoding finishes
pub async fn post_image(
    State(state): State<AdmitState>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
    mut multipart: Multipart,
) -> AdmitResult<StatusCode> {
    state.store(id).await?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.context(MultipartSnafu)? {
        if field.name() != Some("file") {
            continue;
        }

        let declared_mime = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await.context(MultipartSnafu)?;
        upload = Some((bytes, declared_mime));
    }

    let Some((bytes, declared_mime)) = upload.filter(|(bytes, _)| !bytes.is_empty()) else {
        //no file picked, nothing to do
        return Ok(StatusCode::NO_CONTENT);
    };

    state.spawn_image_decode(id, slot, bytes.to_vec(), declared_mime);
    Ok(StatusCode::ACCEPTED)
}

///stands in for images nobody has uploaded yet
pub async fn get_placeholder(Path((width, height)): Path<(u32, u32)>) -> impl IntoResponse {
    let width = width.clamp(1, MAX_PLACEHOLDER_SIDE);
    let height = height.clamp(1, MAX_PLACEHOLDER_SIDE);

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        placeholder_svg(width, height),
    )
}
