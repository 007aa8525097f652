use crate::error::{
    AdmitError, AdmitResult, BadDateTimeFormatterSnafu, InvalidLocaleSnafu,
};
use icu::{
    calendar::{Date, Iso, preferences::CalendarAlgorithm},
    datetime::{
        DateTimeFormatter, DateTimeFormatterPreferences,
        fieldsets::YMD,
        options::YearStyle,
    },
    locale::Locale,
};
use jiff_icu::ConvertFrom;
use snafu::ResultExt;

const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone)]
pub struct DateLocaleConfig {
    pub locale: Locale,
    pub date_format: DateFormat,
    dtf_prefs: DateTimeFormatterPreferences,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DateFormat {
    ShortYMD,
    MediumYMD,
    LongYMD,
}

impl DateFormat {
    fn fieldset(self) -> YMD {
        let mut fieldset = match self {
            Self::ShortYMD => YMD::short(),
            Self::MediumYMD => YMD::medium(),
            Self::LongYMD => YMD::long(),
        };
        fieldset.year_style = Some(YearStyle::Full);
        fieldset
    }
}

impl DateLocaleConfig {
    fn dtf_prefs(
        locale: &Locale,
        calendar_algorithm: CalendarAlgorithm,
    ) -> DateTimeFormatterPreferences {
        let mut prefs = DateTimeFormatterPreferences::default();
        prefs.locale_preferences = locale.into();
        prefs.calendar_algorithm = Some(calendar_algorithm);
        prefs
    }

    pub fn new(
        locale: Option<String>,
        calendar_algorithm: Option<String>,
        date_format: Option<String>,
    ) -> AdmitResult<Self> {
        let locale = locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let locale =
            Locale::try_from_str(&locale).context(InvalidLocaleSnafu { provided: locale })?;

        let calendar_algorithm = match calendar_algorithm.as_deref().unwrap_or("gregorian") {
            "gregorian" => CalendarAlgorithm::Gregory,
            "buddhist" => CalendarAlgorithm::Buddhist,
            "chinese" => CalendarAlgorithm::Chinese,
            "japanese" => CalendarAlgorithm::Japanese,
            "hebrew" => CalendarAlgorithm::Hebrew,
            "dangi" => CalendarAlgorithm::Dangi,
            _ => {
                return Err(AdmitError::InvalidCalendarAlgorithm {
                    provided: calendar_algorithm.unwrap_or_default(),
                });
            }
        };

        let date_format = match date_format.as_deref().unwrap_or("short") {
            "short" => DateFormat::ShortYMD,
            "medium" => DateFormat::MediumYMD,
            "long" => DateFormat::LongYMD,
            _ => {
                return Err(AdmitError::InvalidDateStyle {
                    provided: date_format.unwrap_or_default(),
                });
            }
        };

        let dtf_prefs = Self::dtf_prefs(&locale, calendar_algorithm);
        Ok(Self {
            locale,
            date_format,
            dtf_prefs,
        })
    }

    ///same calendar and style, different locale - used for the browser's `Accept-Language`
    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        let mut dtf_prefs = self.dtf_prefs;
        dtf_prefs.locale_preferences = (&locale).into();
        Self {
            locale,
            date_format: self.date_format,
            dtf_prefs,
        }
    }

    ///picks the first usable language tag from an `Accept-Language` header value
    #[must_use]
    pub fn for_accept_language(&self, header: Option<&str>) -> Self {
        let preferred = header.and_then(|header| {
            header
                .split(',')
                .filter_map(|tag| tag.split(';').next())
                .map(str::trim)
                .filter(|tag| !tag.is_empty() && *tag != "*")
                .find_map(|tag| Locale::try_from_str(tag).ok())
        });

        match preferred {
            Some(locale) => self.with_locale(locale),
            None => self.clone(),
        }
    }

    pub fn date_formatter(&self) -> AdmitResult<ExamDateFormatter> {
        trace!(locale = %self.locale, format = ?self.date_format, "Building exam date formatter");
        let formatter = DateTimeFormatter::try_new(self.dtf_prefs, self.date_format.fieldset())
            .context(BadDateTimeFormatterSnafu)?;
        Ok(ExamDateFormatter { formatter })
    }
}

///built once per render rather than once per date
pub struct ExamDateFormatter {
    formatter: DateTimeFormatter<YMD>,
}

impl ExamDateFormatter {
    pub fn format(&self, date: jiff::civil::Date) -> String {
        let date: Date<Iso> = Date::convert_from(date);
        self.formatter.format(&date).to_string()
    }

    ///empty stays empty, anything which isn't a calendar date gets the same text a browser shows
    pub fn format_raw(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        match raw.trim().parse::<jiff::civil::Date>() {
            Ok(date) => self.format(date),
            Err(e) => {
                debug!(?e, ?raw, "Unable to parse exam date");
                "Invalid Date".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(locale: &str, style: &str) -> DateLocaleConfig {
        DateLocaleConfig::new(Some(locale.to_string()), None, Some(style.to_string())).unwrap()
    }

    #[test]
    fn empty_date_renders_as_empty() {
        let formatter = config("en-US", "short").date_formatter().unwrap();
        assert_eq!(formatter.format_raw(""), "");
    }

    #[test]
    fn iso_date_is_locale_formatted() {
        let formatter = config("en-US", "medium").date_formatter().unwrap();
        let formatted = formatter.format_raw("2025-05-10");

        assert_ne!(formatted, "2025-05-10");
        assert!(formatted.contains("May"), "{formatted}");
        assert!(formatted.contains("10"), "{formatted}");
        assert!(formatted.contains("2025"), "{formatted}");
    }

    #[test]
    fn garbage_date_is_invalid() {
        let formatter = config("en-US", "short").date_formatter().unwrap();
        assert_eq!(formatter.format_raw("next tuesday"), "Invalid Date");
    }

    #[test]
    fn locales_disagree_on_day_month_order() {
        let us = config("en-US", "short").date_formatter().unwrap();
        let gb = config("en-GB", "short").date_formatter().unwrap();
        assert_ne!(us.format_raw("2025-05-10"), gb.format_raw("2025-05-10"));
    }

    #[test]
    fn accept_language_picks_first_valid_tag() {
        let base = config("en-US", "short");

        let picked = base.for_accept_language(Some("fr-FR,fr;q=0.9,en;q=0.8"));
        assert_eq!(picked.locale.to_string(), "fr-FR");

        let fallback = base.for_accept_language(Some("*"));
        assert_eq!(fallback.locale.to_string(), "en-US");

        let missing = base.for_accept_language(None);
        assert_eq!(missing.locale.to_string(), "en-US");
    }

    #[test]
    fn unknown_calendar_is_rejected() {
        let err = DateLocaleConfig::new(None, Some("lunar-ish".to_string()), None).unwrap_err();
        assert!(matches!(err, AdmitError::InvalidCalendarAlgorithm { provided } if provided == "lunar-ish"));
    }
}
