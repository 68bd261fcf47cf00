//! Locale-aware formatting of PHP `date()` format strings.
//!
//! Field display formats are authored with PHP tokens (`F j, Y`, `d/m/Y
//! g:i a`). Each token is mapped onto `chrono`, with the names of days,
//! months and meridiems taken from the configured locale.

use chrono::DateTime;
use chrono::Datelike;
use chrono::Locale;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Timelike;
use chrono::Utc;

use crate::RenderConfig;

#[derive(Debug, Clone)]
pub struct DateFormatter {
	locale: Locale,
	site_format: String,
}

impl Default for DateFormatter {
	fn default() -> Self {
		Self::new("en_US", "F j, Y")
	}
}

impl DateFormatter {
	/// Unknown locales fall back to `en_US`.
	pub fn new(locale: &str, site_format: &str) -> Self {
		let locale = Locale::try_from(locale).unwrap_or_else(|_| {
			tracing::warn!(locale, "unknown locale, falling back to en_US");
			Locale::en_US
		});

		Self {
			locale,
			site_format: site_format.to_string(),
		}
	}

	pub fn from_config(config: &RenderConfig) -> Self {
		Self::new(&config.locale, &config.date_format)
	}

	/// Format with the site-wide date format.
	pub fn format_site_date(&self, date: &NaiveDateTime) -> String {
		self.format(&self.site_format, date)
	}

	/// Format `date` with a PHP format string. A backslash escapes the
	/// following character.
	pub fn format(&self, format: &str, date: &NaiveDateTime) -> String {
		let date = date.and_utc();
		let mut output = String::new();
		let mut chars = format.chars();

		while let Some(token) = chars.next() {
			if token == '\\' {
				if let Some(literal) = chars.next() {
					output.push(literal);
				}
				continue;
			}

			match self.token(token, &date) {
				Some(text) => output.push_str(&text),
				None => output.push(token),
			}
		}

		output
	}

	fn localized(&self, date: &DateTime<Utc>, spec: &str) -> String {
		date.format_localized(spec, self.locale).to_string()
	}

	fn token(&self, token: char, date: &DateTime<Utc>) -> Option<String> {
		let text = match token {
			// day
			'd' => format!("{:02}", date.day()),
			'D' => self.localized(date, "%a"),
			'j' => date.day().to_string(),
			'l' => self.localized(date, "%A"),
			'N' => date.weekday().number_from_monday().to_string(),
			'S' => ordinal_suffix(date.day()).to_string(),
			'w' => date.weekday().num_days_from_sunday().to_string(),
			'z' => date.ordinal0().to_string(),
			// week
			'W' => format!("{:02}", date.iso_week().week()),
			// month
			'F' => self.localized(date, "%B"),
			'm' => format!("{:02}", date.month()),
			'M' => self.localized(date, "%b"),
			'n' => date.month().to_string(),
			't' => days_in_month(date.year(), date.month()).to_string(),
			// year
			'L' => u8::from(date.date_naive().leap_year()).to_string(),
			'o' => date.iso_week().year().to_string(),
			'Y' => date.year().to_string(),
			'y' => format!("{:02}", date.year().rem_euclid(100)),
			// time
			'a' => self.localized(date, "%P"),
			'A' => self.localized(date, "%p"),
			'g' => date.hour12().1.to_string(),
			'G' => date.hour().to_string(),
			'h' => format!("{:02}", date.hour12().1),
			'H' => format!("{:02}", date.hour()),
			'i' => format!("{:02}", date.minute()),
			's' => format!("{:02}", date.second()),
			'u' => format!("{:06}", date.nanosecond() / 1_000),
			'v' => format!("{:03}", date.nanosecond() / 1_000_000),
			// timezone, values are rendered in UTC
			'e' | 'T' => "UTC".to_string(),
			'P' => "+00:00".to_string(),
			'O' => "+0000".to_string(),
			'Z' => "0".to_string(),
			// full date/time
			'c' => date.format("%Y-%m-%dT%H:%M:%S+00:00").to_string(),
			'r' => self.localized(date, "%a, %d %b %Y %H:%M:%S +0000"),
			'U' => date.timestamp().to_string(),
			_ => return None,
		};

		Some(text)
	}
}

fn ordinal_suffix(day: u32) -> &'static str {
	match (day % 10, day % 100) {
		(_, 11..=13) => "th",
		(1, _) => "st",
		(2, _) => "nd",
		(3, _) => "rd",
		_ => "th",
	}
}

fn days_in_month(year: i32, month: u32) -> u32 {
	let (next_year, next_month) = if month == 12 {
		(year + 1, 1)
	} else {
		(year, month + 1)
	};

	NaiveDate::from_ymd_opt(next_year, next_month, 1)
		.and_then(|first| first.pred_opt())
		.map_or(31, |last| last.day())
}

/// Parse the storage form of a date picker value (`Ymd`).
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
	NaiveDate::parse_from_str(raw.trim(), "%Y%m%d")
		.ok()
		.map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse the storage form of a date-time picker value (`Y-m-d H:i:s`).
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
	NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S").ok()
}

/// Parse the storage form of a time picker value (`H:i:s`). The date part
/// is today.
pub fn parse_time(raw: &str) -> Option<NaiveDateTime> {
	NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S")
		.ok()
		.map(|time| Utc::now().date_naive().and_time(time))
}
