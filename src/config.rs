use crate::{
    config::date_locale::DateLocaleConfig,
    error::{AdmitResult, BadEnvVarSnafu, ParseNumberSnafu},
};
use dotenvy::var;
use snafu::ResultExt;
use std::{env::VarError, sync::Arc, time::Duration};

pub mod date_locale;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_SESSION_IDLE_MINS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: String,
    session_idle: Duration,
    max_upload_bytes: usize,
    date_locale: Arc<DateLocaleConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> AdmitResult<Self> {
        Self::from_lookup(var)
    }

    ///every variable is optional - anything missing falls back to a default
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, dotenvy::Error>,
    ) -> AdmitResult<Self> {
        let get_env_var = |name: &'static str| -> AdmitResult<Option<String>> {
            match lookup(name) {
                Ok(value) => Ok(Some(value)),
                Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
                Err(source) => Err(source).context(BadEnvVarSnafu { name }),
            }
        };
        let get_number = |name: &'static str, default: u64| -> AdmitResult<u64> {
            match get_env_var(name)? {
                Some(original) => original
                    .trim()
                    .parse()
                    .context(ParseNumberSnafu { name, original }),
                None => Ok(default),
            }
        };

        let server_ip =
            get_env_var("ADMIT_SERVER_IP")?.unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());
        let session_idle_mins = get_number("ADMIT_SESSION_IDLE_MINS", DEFAULT_SESSION_IDLE_MINS)?;
        let max_upload_bytes = get_number(
            "ADMIT_MAX_UPLOAD_BYTES",
            DEFAULT_MAX_UPLOAD_BYTES as u64,
        )?;

        let date_locale = DateLocaleConfig::new(
            get_env_var("ADMIT_LOCALE")?,
            get_env_var("ADMIT_CALENDAR")?,
            get_env_var("ADMIT_DATE_STYLE")?,
        )?;

        Ok(Self {
            server_ip,
            session_idle: Duration::from_secs(session_idle_mins * 60),
            max_upload_bytes: usize::try_from(max_upload_bytes).unwrap_or(usize::MAX),
            date_locale: Arc::new(date_locale),
        })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn session_idle(&self) -> Duration {
        self.session_idle
    }

    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn date_locale(&self) -> Arc<DateLocaleConfig> {
        self.date_locale.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdmitError;
    use std::collections::HashMap;

    fn lookup_from(
        pairs: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Result<String, dotenvy::Error> {
        let map: HashMap<_, _> = pairs.iter().copied().collect();
        move |name| {
            map.get(name)
                .map(ToString::to_string)
                .ok_or(dotenvy::Error::EnvVar(VarError::NotPresent))
        }
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = RuntimeConfiguration::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_ip(), DEFAULT_SERVER_IP);
        assert_eq!(config.session_idle(), Duration::from_secs(120 * 60));
        assert_eq!(config.max_upload_bytes(), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.date_locale().locale.to_string(), "en-US");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = RuntimeConfiguration::from_lookup(lookup_from(&[
            ("ADMIT_SERVER_IP", "0.0.0.0:3000"),
            ("ADMIT_SESSION_IDLE_MINS", "5"),
            ("ADMIT_MAX_UPLOAD_BYTES", "2048"),
            ("ADMIT_LOCALE", "en-GB"),
        ]))
        .unwrap();
        assert_eq!(config.server_ip(), "0.0.0.0:3000");
        assert_eq!(config.session_idle(), Duration::from_secs(300));
        assert_eq!(config.max_upload_bytes(), 2048);
        assert_eq!(config.date_locale().locale.to_string(), "en-GB");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = RuntimeConfiguration::from_lookup(lookup_from(&[(
            "ADMIT_SESSION_IDLE_MINS",
            "forever",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            AdmitError::ParseNumber {
                name: "ADMIT_SESSION_IDLE_MINS",
                ..
            }
        ));
    }

    #[test]
    fn bad_date_style_is_rejected() {
        let err =
            RuntimeConfiguration::from_lookup(lookup_from(&[("ADMIT_DATE_STYLE", "huge")]))
                .unwrap_err();
        assert!(matches!(err, AdmitError::InvalidDateStyle { .. }));
    }
}
