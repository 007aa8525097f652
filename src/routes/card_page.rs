use crate::{
    card::render_admit_card,
    config::date_locale::DateLocaleConfig,
    error::{AdmitError, AdmitResult},
    maud_conveniences::title,
    routes::card_form::render_form,
    state::AdmitState,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, header::ACCEPT_LANGUAGE},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use uuid::Uuid;

///the configured date settings, but in the browser's language if it told us one
fn request_dates(state: &AdmitState, headers: &HeaderMap) -> DateLocaleConfig {
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    state
        .config()
        .date_locale()
        .for_accept_language(accept_language)
}

pub async fn get_card(
    State(state): State<AdmitState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AdmitResult<Response> {
    let record = match state.snapshot(id).await {
        Ok(record) => record,
        Err(AdmitError::MissingSession { id }) => {
            info!(%id, "Card session has gone, starting a new one");
            return Ok(Redirect::to("/").into_response());
        }
        Err(e) => return Err(e),
    };

    let preview = render_admit_card(&record, &request_dates(&state, &headers))?;
    let form = render_form(id, &record);

    Ok(state
        .render(html! {
            div class="max-w-6xl mx-auto" sse-connect={"/card/" (id) "/sse"} {
                div class="print:hidden" {
                    (title("School Exam Admit Card Generator"))
                }

                div class="flex flex-col lg:flex-row gap-6" {
                    (form)

                    div class="w-full lg:w-3/5" {
                        div class="bg-white rounded-lg shadow p-6 mb-4 print:shadow-none print:p-0" {
                            h2 class="text-xl font-semibold mb-4 print:hidden" {"Preview"}
                            div id="preview" hx-get={"/card/" (id) "/preview"} hx-trigger="sse:record_changed, sse:resync" {
                                (preview)
                            }
                        }
                    }
                }
            }
        })
        .into_response())
}

pub async fn internal_get_preview(
    State(state): State<AdmitState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> AdmitResult<Markup> {
    let record = state.snapshot(id).await?;
    render_admit_card(&record, &request_dates(&state, &headers))
}
