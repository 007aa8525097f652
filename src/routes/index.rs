use crate::state::AdmitState;
use axum::{extract::State, response::Redirect};

///"mounting" the tool - every visit starts a new card from the seed values
pub async fn get_index_route(State(state): State<AdmitState>) -> Redirect {
    let id = state.open_session().await;
    Redirect::to(&format!("/card/{id}"))
}
