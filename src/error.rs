use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type AdmitResult<T> = Result<T, AdmitError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AdmitError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` as a number for `{}`", original, name))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("Invalid locale: {:?}", provided))]
    InvalidLocale {
        source: icu::locale::ParseError,
        provided: String,
    },
    #[snafu(display("Invalid calendar algorithm: {:?}", provided))]
    InvalidCalendarAlgorithm { provided: String },
    #[snafu(display("Invalid date style: {:?}", provided))]
    InvalidDateStyle { provided: String },
    #[snafu(display("Unable to create date formatter"))]
    BadDateTimeFormatter {
        source: icu::datetime::DateTimeFormatterLoadError,
    },
    #[snafu(display("Unable to find admit card session with UUID: {}", id))]
    MissingSession { id: Uuid },
    #[snafu(display("Error with multipart form input"))]
    Multipart {
        source: axum::extract::multipart::MultipartError,
    },
}

impl IntoResponse for AdmitError {
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Admit Card Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseNumber { .. } => ISE,
            Self::InvalidLocale { .. }
            | Self::InvalidCalendarAlgorithm { .. }
            | Self::InvalidDateStyle { .. } => BI,
            Self::BadDateTimeFormatter { .. } => ISE,
            Self::MissingSession { .. } => NF,
            Self::Multipart { source } => source.status(),
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_is_not_found() {
        let response = AdmitError::MissingSession { id: Uuid::nil() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn config_errors_name_the_offending_value() {
        let err = AdmitError::InvalidDateStyle {
            provided: "tiny".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date style: \"tiny\"");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
