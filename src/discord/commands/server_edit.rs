// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::categories::{CategoryStatus, CategoryStore};
use crate::config::ConfigData;
use crate::discord::utils::permissions::caller_is_admin;
use crate::discord::utils::responses::PERMISSION_DENIED;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
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
use twilight_util::builder::command::{CommandBuilder, StringBuilder};
use type_map::concurrent::TypeMap;

pub fn command_definition() -> Command {
	let key = StringBuilder::new("key", "The category to update").required(true).build();
	let value = StringBuilder::new("value", "The new status: open, express, or closed")
		.required(true)
		.build();
	CommandBuilder::new("server_edit", "Change a category's availability", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.default_member_permissions(Permissions::MANAGE_GUILD)
		.option(key)
		.option(value)
		.build()
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	// The privilege check runs before anything can touch the store.
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

	let mut key: Option<&str> = None;
	let mut value: Option<&str> = None;
	for option in &command_data.options {
		match option.name.as_str() {
			"key" => {
				let CommandOptionValue::String(key_value) = &option.value else {
					bail!("Server edit argument key wasn't a string");
				};
				key = Some(key_value.as_str());
			}
			"value" => {
				let CommandOptionValue::String(value_value) = &option.value else {
					bail!("Server edit argument value wasn't a string");
				};
				value = Some(value_value.as_str());
			}
			_ => (),
		}
	}
	let (Some(key), Some(value)) = (key, value) else {
		bail!("Server edit command received without its required options");
	};

	let Some(new_status) = CategoryStatus::parse(value) else {
		let response = InteractionResponseDataBuilder::new()
			.content(format!(
				"Invalid status **{}**. Valid statuses are `open`, `express`, and `closed`.",
				value
			))
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
	};

	let update_result = {
		let mut state = bot_state.write().await;
		let Some(store) = state.get_mut::<CategoryStore>() else {
			bail!("Category store missing from bot state");
		};
		store.set(key, new_status)
	};

	let response_content = match update_result {
		Ok(()) => {
			tracing::info!(category = key, status = %new_status, "category status updated");
			format!("Category **{}** status set to **{}**.", key, new_status)
		}
		Err(error) => format!("Unknown category: **{}**", error.name),
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
