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
//! JSON has no representation for NaN or infinity, and serde_json writes
//! both as `null`. Rates go through [`serialize`] instead, which keeps them
//! apart as the strings `"NaN"`, `"inf"` and `"-inf"`.

use serde::Serializer;

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
	if value.is_nan() {
		serializer.serialize_str("NaN")
	} else if value.is_infinite() {
		serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
	} else {
		serializer.serialize_f64(*value)
	}
}
