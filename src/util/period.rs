/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use crate::error::{InflationError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month. Price-index observations are monthly, so this is the
/// finest time granularity anything in the crate deals with.
///
/// Field order matters: the derived ordering is by year, then by month.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimePeriod {
	year: i32,
	month: u8,
}

impl TimePeriod {
	pub fn new(year: i32, month: u32) -> Result<TimePeriod> {
		if !(1..=12).contains(&month) {
			return Err(InflationError::invalid(format!(
				"month must be between 1 and 12, got {}",
				month
			)));
		}

		Ok(TimePeriod {
			year,
			month: month as u8,
		})
	}

	/// Parses the canonical "YYYY-MM" key. The split is at the last dash so
	/// that negative years survive a round trip.
	pub fn from_key(key: &str) -> Result<TimePeriod> {
		let (year, month) = key.rsplit_once('-').ok_or_else(|| {
			InflationError::invalid(format!(
				"period must be formatted as YYYY-MM, got '{}'",
				key
			))
		})?;

		let year = year.parse::<i32>().map_err(|_| {
			InflationError::invalid(format!("bad year in period '{}'", key))
		})?;
		let month = month.parse::<u32>().map_err(|_| {
			InflationError::invalid(format!("bad month in period '{}'", key))
		})?;

		TimePeriod::new(year, month)
	}

	pub fn to_key(&self) -> String {
		self.to_string()
	}

	pub fn year(&self) -> i32 {
		self.year
	}

	pub fn month(&self) -> u32 {
		self.month as u32
	}

	pub fn year_start(year: i32) -> TimePeriod {
		TimePeriod { year, month: 1 }
	}

	pub fn year_end(year: i32) -> TimePeriod {
		TimePeriod { year, month: 12 }
	}

	/// All twelve months of the given year, January first.
	pub fn months_of(year: i32) -> impl Iterator<Item = TimePeriod> {
		(1..=12u8).map(move |month| TimePeriod { year, month })
	}
}

impl FromStr for TimePeriod {
	type Err = InflationError;

	fn from_str(s: &str) -> Result<Self> {
		TimePeriod::from_key(s)
	}
}

impl fmt::Display for TimePeriod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{:02}", self.year, self.month)
	}
}

impl Serialize for TimePeriod {
	fn serialize<S: Serializer>(
		&self,
		serializer: S,
	) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_key())
	}
}

impl<'de> Deserialize<'de> for TimePeriod {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> std::result::Result<Self, D::Error> {
		let key = String::deserialize(deserializer)?;
		TimePeriod::from_key(&key).map_err(serde::de::Error::custom)
	}
}

/// An inclusive span of months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimeRange {
	pub from: TimePeriod,
	pub to: TimePeriod,
}

impl TimeRange {
	pub fn new(from: TimePeriod, to: TimePeriod) -> Result<TimeRange> {
		if from > to {
			return Err(InflationError::invalid(format!(
				"range start {} is after its end {}",
				from, to
			)));
		}
		Ok(TimeRange { from, to })
	}

	pub fn whole_year(year: i32) -> TimeRange {
		TimeRange {
			from: TimePeriod::year_start(year),
			to: TimePeriod::year_end(year),
		}
	}

	/// The span a calculator opens on: two full years back from the given
	/// year through the end of the following one.
	pub fn default_around(year: i32) -> TimeRange {
		TimeRange {
			from: TimePeriod::year_start(year - 2),
			to: TimePeriod::year_end(year + 1),
		}
	}

	pub fn contains(&self, period: &TimePeriod) -> bool {
		self.from <= *period && *period <= self.to
	}
}

impl fmt::Display for TimeRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..{}", self.from, self.to)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cmp::Ordering;

	#[test]
	fn test_month_bounds() {
		assert!(TimePeriod::new(2024, 0).is_err());
		assert!(TimePeriod::new(2024, 13).is_err());
		assert!(TimePeriod::new(2024, 1).is_ok());
		assert!(TimePeriod::new(2024, 12).is_ok());
	}

	#[test]
	fn test_month_bounds_are_not_truncated() {
		// 257 would wrap to 1 if it were cast before validation
		assert!(TimePeriod::new(2024, 257).is_err());
	}

	#[test]
	fn test_key_is_zero_padded() {
		let period = TimePeriod::new(2024, 3).unwrap();
		assert_eq!(period.to_key(), "2024-03");
		assert_eq!(TimePeriod::new(2024, 11).unwrap().to_key(), "2024-11");
	}

	#[test]
	fn test_key_year_is_not_padded() {
		assert_eq!(TimePeriod::new(987, 5).unwrap().to_key(), "987-05");
		assert_eq!(TimePeriod::new(12345, 5).unwrap().to_key(), "12345-05");
	}

	#[test]
	fn test_from_key() {
		let period = TimePeriod::from_key("2023-07").unwrap();
		assert_eq!((period.year(), period.month()), (2023, 7));

		// unpadded months are accepted and normalized
		let period = TimePeriod::from_key("2023-7").unwrap();
		assert_eq!(period.to_key(), "2023-07");
	}

	#[test]
	fn test_from_key_rejects_garbage() {
		for key in ["", "2023", "2023-", "-07", "2023-13", "2023-00", "x-01"] {
			assert!(TimePeriod::from_key(key).is_err(), "{} parsed", key);
		}
		assert!(TimePeriod::from_key("2023-07-01").is_err());
		assert!(TimePeriod::from_key(" 2023-07").is_err());
	}

	#[test]
	fn test_negative_year_round_trip() {
		let period = TimePeriod::new(-44, 3).unwrap();
		assert_eq!(period.to_key(), "-44-03");
		assert_eq!(TimePeriod::from_key("-44-03").unwrap(), period);
	}

	#[test]
	fn test_ordering() {
		let a = TimePeriod::new(2023, 12).unwrap();
		let b = TimePeriod::new(2024, 1).unwrap();
		let c = TimePeriod::new(2024, 2).unwrap();

		assert_eq!(a.cmp(&b), Ordering::Less);
		assert_eq!(c.cmp(&b), Ordering::Greater);
		assert_eq!(b.cmp(&b), Ordering::Equal);
	}

	#[test]
	fn test_months_of() {
		let months: Vec<String> =
			TimePeriod::months_of(2022).map(|p| p.to_key()).collect();
		assert_eq!(months.len(), 12);
		assert_eq!(months[0], "2022-01");
		assert_eq!(months[11], "2022-12");
	}

	#[test]
	fn test_range_must_be_ordered() {
		let a = TimePeriod::new(2023, 1).unwrap();
		let b = TimePeriod::new(2024, 1).unwrap();
		assert!(TimeRange::new(a, b).is_ok());
		assert!(TimeRange::new(a, a).is_ok());
		assert!(TimeRange::new(b, a).is_err());
	}

	#[test]
	fn test_default_range() {
		let range = TimeRange::default_around(2025);
		assert_eq!(range.to_string(), "2023-01..2026-12");
		assert!(range.contains(&TimePeriod::new(2024, 6).unwrap()));
		assert!(!range.contains(&TimePeriod::new(2022, 12).unwrap()));
	}

	#[test]
	fn test_serde_uses_key() {
		let period = TimePeriod::new(2021, 4).unwrap();
		let json = serde_json::to_string(&period).unwrap();
		assert_eq!(json, "\"2021-04\"");
		let back: TimePeriod = serde_json::from_str(&json).unwrap();
		assert_eq!(back, period);
		assert!(serde_json::from_str::<TimePeriod>("\"2021-14\"").is_err());
	}
}
