// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::gateway::payload::incoming::{MemberAdd, MemberRemove};

const FAREWELL_MESSAGE: &str = "We are sorry to see you go. We hope to see you soon!";

/// Assigns the autorole and posts the welcome message. Joins on any guild other than the
/// configured one are ignored.
pub async fn handle_member_join(
	member_add: &MemberAdd,
	http_client: &Client,
	config: &ConfigData,
) -> miette::Result<()> {
	if member_add.guild_id != config.guild {
		return Ok(());
	}

	let user_id = member_add.member.user.id;
	http_client
		.add_guild_member_role(config.guild, user_id, config.autorole)
		.await
		.into_diagnostic()?;

	let welcome_message = format!(
		"Welcome! We hope you enjoy your stay! For questions and information feel free to contact support.\n{}",
		user_id.mention()
	);
	let mut allowed_mentions = AllowedMentions::default();
	allowed_mentions.users.push(user_id);
	http_client
		.create_message(config.welcome_channel)
		.content(&welcome_message)
		.allowed_mentions(Some(&allowed_mentions))
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn handle_member_leave(
	member_remove: &MemberRemove,
	http_client: &Client,
	config: &ConfigData,
) -> miette::Result<()> {
	if member_remove.guild_id != config.guild {
		return Ok(());
	}

	http_client
		.create_message(config.goodbye_channel)
		.content(FAREWELL_MESSAGE)
		.await
		.into_diagnostic()?;

	Ok(())
}
