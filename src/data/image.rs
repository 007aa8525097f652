use base64::{Engine, prelude::BASE64_STANDARD};
use maud::html;
use serde::Deserialize;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    SchoolLogo,
    StudentPhoto,
}

impl ImageSlot {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SchoolLogo => "school_logo",
            Self::StudentPhoto => "student_photo",
        }
    }

    pub const fn alt_text(self) -> &'static str {
        match self {
            Self::SchoolLogo => "School Logo",
            Self::StudentPhoto => "Student",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImageSource {
    ///served by `/placeholder/{w}/{h}`
    Placeholder { width: u32, height: u32 },
    Embedded { mime: String, data_uri: String },
}

impl ImageSource {
    pub const fn placeholder(width: u32, height: u32) -> Self {
        Self::Placeholder { width, height }
    }

    ///sniffs the type from the bytes, then trusts the browser's claim, then gives up and says octet-stream
    pub fn embed(bytes: &[u8], declared_mime: Option<&str>) -> Self {
        let mime = infer::get(bytes)
            .map(|kind| kind.mime_type())
            .or(declared_mime.filter(|mime| !mime.is_empty()))
            .unwrap_or(FALLBACK_MIME)
            .to_string();
        let data_uri = format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes));

        Self::Embedded { mime, data_uri }
    }

    pub fn src(&self) -> String {
        match self {
            Self::Placeholder { width, height } => format!("/placeholder/{width}/{height}"),
            Self::Embedded { data_uri, .. } => data_uri.clone(),
        }
    }
}

///grey box with the dimensions written on it
pub fn placeholder_svg(width: u32, height: u32) -> String {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(width) height=(height) viewBox={"0 0 " (width) " " (height)} {
            rect width="100%" height="100%" fill="#e5e7eb" {}
            text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="sans-serif" font-size="12" fill="#6b7280" {
                (width) "×" (height)
            }
        }
    }
    .into_string()
}
