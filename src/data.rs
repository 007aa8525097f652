use serde::Deserialize;

pub mod image;
pub mod student_record;
pub mod subject;
pub mod update;

///the single value posted by every text input
#[derive(Deserialize)]
pub struct ValueForm {
    #[serde(default)]
    pub value: String,
}
