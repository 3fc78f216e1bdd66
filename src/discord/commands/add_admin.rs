// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::discord::utils::permissions::caller_is_admin;
use crate::discord::utils::responses::PERMISSION_DENIED;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::application::interaction::application_command::{CommandData, CommandOptionValue};
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::guild::Permissions;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;
use twilight_util::builder::command::{CommandBuilder, UserBuilder};

pub fn command_definition() -> Command {
	let user = UserBuilder::new("user", "The member to grant the admin role")
		.required(true)
		.build();
	CommandBuilder::new("add_admin", "Grant admin access", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.default_member_permissions(Permissions::MANAGE_GUILD)
		.option(user)
		.build()
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	if !caller_is_admin(interaction, config) {
		let response = InteractionResponseDataBuilder::new()
			.content(PERMISSION_DENIED)
			.flags(MessageFlags::EPHEMERAL)
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::ChannelMessageWithSource,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	let Some(option) = command_data.options.first() else {
		bail!("Add admin command received without required options");
	};
	if option.name != "user" {
		bail!("Add admin command received without required option user");
	}
	let CommandOptionValue::User(target_user) = option.value else {
		bail!("Add admin argument user wasn't a user");
	};

	let grant_result = http_client
		.add_guild_member_role(config.guild, target_user, config.admin_role)
		.await;
	let response_content = match grant_result {
		Ok(_) => format!("Granted admin role to {}", target_user.mention()),
		Err(error) => {
			tracing::error!(source = ?error, "Failed to grant the admin role");
			String::from("The admin role couldn't be granted.")
		}
	};

	let response = InteractionResponseDataBuilder::new()
		.content(response_content)
		.flags(MessageFlags::EPHEMERAL)
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(response),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}
