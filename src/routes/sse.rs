use crate::{data::image::ImageSlot, error::AdmitResult, state::AdmitState};
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub enum SseEvent {
    RecordChanged { card_id: Uuid },
    ImageChanged { card_id: Uuid, slot: ImageSlot },
}

impl SseEvent {
    pub const RECORD_CHANGED: &'static str = "record_changed";
    ///sent when the feed fell behind and can't say what changed
    pub const RESYNC: &'static str = "resync";

    pub const fn card_id(&self) -> Uuid {
        match self {
            Self::RecordChanged { card_id } | Self::ImageChanged { card_id, .. } => *card_id,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::RecordChanged { .. } => Self::RECORD_CHANGED,
            Self::ImageChanged { slot, .. } => Self::image_changed(*slot),
        }
    }

    pub const fn image_changed(slot: ImageSlot) -> &'static str {
        match slot {
            ImageSlot::SchoolLogo => "school_logo_changed",
            ImageSlot::StudentPhoto => "student_photo_changed",
        }
    }
}

///tells the page to re-pull anything derived from this card
///
///while the feed is open the card counts as watched and won't be reaped
pub async fn sse_feed(
    State(state): State<AdmitState>,
    Path(id): Path<Uuid>,
) -> AdmitResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let guard = state.store(id).await?.watch();
    debug!(%id, "Page connected to card feed");

    let stream = BroadcastStream::new(state.subscribe_to_sse_feed()).filter_map(move |msg| {
        let _watching = &guard;

        match msg {
            Ok(event) if event.card_id() == id => {
                Some(Ok::<_, Infallible>(
                    Event::default().event(event.name()).data(""),
                ))
            }
            Ok(_) => None,
            Err(e) => {
                //we don't know what we missed, so just get everything re-pulled
                debug!(?e, %id, "SSE feed lagged");
                Some(Ok(Event::default().event(SseEvent::RESYNC).data("")))
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
