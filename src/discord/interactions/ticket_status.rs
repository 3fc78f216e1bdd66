// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::discord::state::ticket_status::{TicketStatus, status_components};
use crate::discord::utils::orders::set_order_status;
use crate::discord::utils::permissions::caller_is_staff;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_http::error::ErrorType;
use twilight_http::response::StatusCode;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;

pub async fn handle_status_button(
	interaction: &InteractionCreate,
	custom_id_path: &[String],
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
) -> miette::Result<()> {
	let Some(status_id) = custom_id_path.get(1) else {
		bail!("Invalid custom ID for status update (parts: {:?})", custom_id_path);
	};
	let Some(new_status) = TicketStatus::from_id(status_id) else {
		bail!("Invalid ticket status ID: {}", status_id);
	};

	let interaction_client = http_client.interaction(application_id);

	if !caller_is_staff(interaction, config) {
		let response = InteractionResponseDataBuilder::new()
			.content("Only staff members can update the order status.")
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

	let Some(channel) = &interaction.channel else {
		bail!("Status button used outside of a channel");
	};
	let Some(control_message) = &interaction.message else {
		bail!("Status button interaction carries no message");
	};

	let message_response = http_client.message(channel.id, control_message.id).await;
	let order_message = match message_response {
		Ok(response) => response.model().await.into_diagnostic()?,
		Err(error) => {
			if let ErrorType::Response {
				status: StatusCode::NOT_FOUND,
				..
			} = error.kind()
			{
				let response = InteractionResponseDataBuilder::new()
					.content("The order message no longer exists.")
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
			return Err(error).into_diagnostic();
		}
	};

	let Some(mut order_embed) = order_message.embeds.into_iter().next() else {
		bail!("Order record message carries no embed");
	};
	if !set_order_status(&mut order_embed, new_status) {
		bail!("Order record message is missing its status field");
	}

	// The same button row is reattached; the status stays editable after every change.
	let status_controls = status_components();
	http_client
		.update_message(channel.id, control_message.id)
		.embeds(Some(&[order_embed]))
		.components(Some(&status_controls))
		.await
		.into_diagnostic()?;

	let response = InteractionResponse {
		kind: InteractionResponseType::DeferredUpdateMessage,
		data: None,
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}
