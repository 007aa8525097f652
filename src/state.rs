use crate::{
    config::RuntimeConfiguration,
    data::{
        image::{ImageSlot, ImageSource},
        student_record::{StudentRecord, UpdateOutcome},
        update::RecordUpdate,
    },
    error::{AdmitResult, MissingSessionSnafu},
    routes::sse::SseEvent,
    store::FormStore,
};
use maud::{DOCTYPE, Markup, html};
use snafu::OptionExt;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{
    sync::{
        RwLock,
        broadcast::{Receiver, Sender, channel},
    },
    task::JoinHandle,
};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct AdmitState {
    config: RuntimeConfiguration,
    sessions: Arc<RwLock<HashMap<Uuid, FormStore>>>,
    sse_events_sender: Sender<SseEvent>,
}

impl AdmitState {
    pub fn new(config: RuntimeConfiguration) -> Self {
        let (tx, _rx) = channel(16);

        Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            sse_events_sender: tx,
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    #[allow(clippy::unused_self)] //to allow direct html! usage, like the rest of the routes
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Admit Card Generator" }
                }
                body hx-ext="sse" class="min-h-screen bg-gray-100 p-4 print:bg-white print:p-0" {
                    (markup)
                }
            }
        }
    }

    ///a fresh card, filled with the seed values
    pub async fn open_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, FormStore::new(StudentRecord::seeded()));
        info!(%id, open_sessions = sessions.len(), "Opened admit card session");
        id
    }

    pub async fn store(&self, id: Uuid) -> AdmitResult<FormStore> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .context(MissingSessionSnafu { id })
    }

    pub async fn snapshot(&self, id: Uuid) -> AdmitResult<StudentRecord> {
        Ok(self.store(id).await?.snapshot().await)
    }

    ///the one place updates enter - out-of-range indices are logged and dropped
    pub async fn apply(&self, id: Uuid, update: RecordUpdate) -> AdmitResult<UpdateOutcome> {
        let store = self.store(id).await?;
        let description = format!("{update:?}");
        let image_slot = match &update {
            RecordUpdate::Image { slot, .. } => Some(*slot),
            _ => None,
        };
        let outcome = store.apply(update).await;

        match outcome {
            UpdateOutcome::Applied => {
                debug!(%id, update = %truncate(&description, 120), "Applied update");
                self.send_sse_event(SseEvent::RecordChanged { card_id: id });
                if let Some(slot) = image_slot {
                    self.send_sse_event(SseEvent::ImageChanged { card_id: id, slot });
                }
            }
            UpdateOutcome::IndexOutOfRange { index, len } => {
                warn!(%id, index, len, update = %truncate(&description, 120), "Ignoring update for a subject that doesn't exist");
            }
        }

        Ok(outcome)
    }

    ///encodes the image off the async threads, then posts it back through [`Self::apply`]
    ///
    ///nobody waits on this - if it fails, the slot just keeps whatever it had
    pub fn spawn_image_decode(
        &self,
        id: Uuid,
        slot: ImageSlot,
        bytes: Vec<u8>,
        declared_mime: Option<String>,
    ) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let size = bytes.len();
            let decoded = tokio::task::spawn_blocking(move || {
                ImageSource::embed(&bytes, declared_mime.as_deref())
            })
            .await;

            let source = match decoded {
                Ok(source) => source,
                Err(e) => {
                    error!(?e, %id, slot = slot.as_str(), "Error decoding uploaded image");
                    return;
                }
            };

            match state.apply(id, RecordUpdate::Image { slot, source }).await {
                Ok(_) => info!(%id, slot = slot.as_str(), size, "Stored uploaded image"),
                Err(e) => warn!(?e, "Card went away before its image finished decoding"),
            }
        })
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    ///drops every card which hasn't been looked at or edited within the configured idle time
    ///
    ///cards with a page still connected to their event feed are left alone
    pub async fn reap_idle_sessions(&self) -> usize {
        let max_idle = self.config.session_idle();
        let mut sessions = self.sessions.write().await;

        let mut stale = vec![];
        for (id, store) in sessions.iter() {
            if !store.is_watched() && store.idle_for().await >= max_idle {
                stale.push(*id);
            }
        }
        for id in &stale {
            sessions.remove(id);
        }

        if !stale.is_empty() {
            info!(reaped = stale.len(), remaining = sessions.len(), "Reaped idle sessions");
        }
        stale.len()
    }

    pub fn spawn_session_reaper(&self) -> JoinHandle<()> {
        let state = self.clone();
        let period = (self.config.session_idle() / 2)
            .clamp(Duration::from_secs(1), Duration::from_secs(60));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                state.reap_idle_sessions().await;
            }
        })
    }

    pub async fn sensible_shutdown(&self) {
        let mut sessions = self.sessions.write().await;
        info!(discarded = sessions.len(), "Discarding admit card sessions");
        sessions.clear();
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        let _ = self.sse_events_sender.send(event);
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    s.char_indices().nth(max_chars).map_or(s, |(i, _)| &s[..i])
}
