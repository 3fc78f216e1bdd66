// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Deserializer};
use tokio::fs::read_to_string;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker};

pub async fn parse_config(config_path: &str) -> Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let config: ConfigData = serde_json::from_str(&config_file_contents).into_diagnostic()?;
	Ok(config)
}

/// Startup configuration for the single guild the bot serves. Read once; never reloaded.
#[derive(Debug, Deserialize)]
pub struct ConfigData {
	pub bot_token: String,
	pub guild: Id<GuildMarker>,
	pub admin_role: Id<RoleMarker>,
	pub staff_role: Id<RoleMarker>,
	pub autorole: Id<RoleMarker>,
	pub welcome_channel: Id<ChannelMarker>,
	pub goodbye_channel: Id<ChannelMarker>,
	#[serde(deserialize_with = "embed_color")]
	pub embed_color: u32,
}

fn embed_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
	let color = String::deserialize(deserializer)?;
	let digits = color.strip_prefix('#').unwrap_or(&color);
	if digits.len() != 6 {
		return Err(serde::de::Error::custom(format!(
			"embed color must be a 6-digit RGB hex string (got {})",
			color
		)));
	}
	u32::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_config(color: &str) -> String {
		format!(
			r#"{{
				"bot_token": "token",
				"guild": "1",
				"admin_role": "2",
				"staff_role": "3",
				"autorole": "4",
				"welcome_channel": "5",
				"goodbye_channel": "6",
				"embed_color": "{}"
			}}"#,
			color
		)
	}

	#[test]
	fn parses_full_config() {
		let config: ConfigData = serde_json::from_str(&sample_config("#8800ff")).unwrap();
		assert_eq!(config.bot_token, "token");
		assert_eq!(config.guild, Id::new(1));
		assert_eq!(config.admin_role, Id::new(2));
		assert_eq!(config.welcome_channel, Id::new(5));
		assert_eq!(config.embed_color, 0x8800ff);
	}

	#[test]
	fn color_accepts_bare_hex() {
		let config: ConfigData = serde_json::from_str(&sample_config("00AA11")).unwrap();
		assert_eq!(config.embed_color, 0x00aa11);
	}

	#[test]
	fn color_rejects_wrong_length() {
		let result = serde_json::from_str::<ConfigData>(&sample_config("#fff"));
		assert!(result.is_err());
	}

	#[test]
	fn color_rejects_non_hex() {
		let result = serde_json::from_str::<ConfigData>(&sample_config("#gggggg"));
		assert!(result.is_err());
	}
}
