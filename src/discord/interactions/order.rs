// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::MAX_INTERACTION_WAIT_TIME;
use crate::categories::{CategoryStatus, CategoryStore};
use crate::config::ConfigData;
use crate::discord::state::order::{OrderFlowState, OrderFlowStates, category_select_components};
use crate::discord::state::ticket_status::status_components;
use crate::discord::utils::orders::{OrderSubmission, order_channel_name, order_record_message};
use crate::discord::utils::responses::{EXPRESS_WARNING, ORDER_FLOW_EXPIRED, ORDER_PROMPT};
use miette::{IntoDiagnostic, bail, ensure};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::sleep;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::channel::message::component::{ActionRow, Component, TextInput, TextInputStyle};
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::guild::Permissions;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;
use type_map::concurrent::TypeMap;

pub async fn route_order_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	custom_id_path: &[String],
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let Some(id) = custom_id_path.get(1) else {
		bail!("Invalid custom ID for order flow (parts: {:?})", custom_id_path);
	};
	let Some(action) = custom_id_path.get(2) else {
		bail!("Invalid custom ID for order flow (parts: {:?})", custom_id_path);
	};

	match action.as_str() {
		"start" => {
			ensure!(id.is_empty(), "Unexpected ID when starting order flow");
			start_order(interaction, http_client, application_id, bot_state).await?
		}
		"category" => {
			set_category(
				interaction,
				interaction_data,
				id,
				http_client,
				application_id,
				bot_state,
			)
			.await?
		}
		"confirm" => confirm_category(interaction, id, http_client, application_id, bot_state).await?,
		_ => bail!(
			"Invalid action for order flow: {} (custom ID parts: {:?})",
			action,
			custom_id_path
		),
	}

	Ok(())
}

pub async fn route_order_modal(
	interaction: &InteractionCreate,
	modal_data: &ModalInteractionData,
	custom_id_path: &[String],
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let Some(id) = custom_id_path.get(1) else {
		bail!("Invalid modal custom ID for order flow (parts: {:?})", custom_id_path);
	};
	let Some(action) = custom_id_path.get(2) else {
		bail!("Invalid modal custom ID for order flow (parts: {:?})", custom_id_path);
	};

	if action == "details" {
		handle_order_form(
			interaction,
			modal_data,
			id,
			http_client,
			application_id,
			config,
			bot_state,
		)
		.await?;
	} else {
		bail!(
			"Invalid modal action for order flow: {} (custom ID parts: {:?})",
			action,
			custom_id_path
		);
	}

	Ok(())
}

async fn start_order(
	interaction: &InteractionCreate,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	let available_categories = {
		let state = bot_state.read().await;
		let Some(store) = state.get::<CategoryStore>() else {
			bail!("Category store missing from bot state");
		};
		store.available()
	};

	if available_categories.is_empty() {
		let response = InteractionResponseDataBuilder::new()
			.content("Ordering is currently closed. Please check back later.")
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

	let order_flow_id = cuid2::create_id();
	let components = category_select_components(&order_flow_id, &available_categories, true, None);

	{
		let mut state = bot_state.write().await;
		let order_flow_states = state.entry::<OrderFlowStates>().or_insert_with(OrderFlowStates::default);
		order_flow_states
			.states
			.insert(order_flow_id.clone(), OrderFlowState::default());
	}
	tokio::spawn(expire_order_flow(bot_state, order_flow_id));

	let response = InteractionResponseDataBuilder::new()
		.content(ORDER_PROMPT)
		.components(components)
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

async fn expire_order_flow(bot_state: Arc<RwLock<TypeMap>>, order_flow_id: String) {
	sleep(MAX_INTERACTION_WAIT_TIME).await;
	let mut state = bot_state.write().await;
	if let Some(order_flow_states) = state.get_mut::<OrderFlowStates>() {
		order_flow_states.states.remove(&order_flow_id);
	};
}

async fn set_category(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	order_flow_id: &str,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	let Some(category) = interaction_data.values.first() else {
		bail!("Missing category selection handling order flow event");
	};

	let mut state = bot_state.write().await;
	let flow_is_active = {
		let Some(order_flow_states) = state.get_mut::<OrderFlowStates>() else {
			bail!("Failed to get order flow states responding to interaction");
		};
		match order_flow_states.states.get_mut(order_flow_id) {
			Some(flow_state) => {
				flow_state.category = Some(category.clone());
				true
			}
			None => false,
		}
	};
	if !flow_is_active {
		drop(state);
		let response = InteractionResponseDataBuilder::new()
			.content(ORDER_FLOW_EXPIRED)
			.components(Vec::new())
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::UpdateMessage,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	let Some(store) = state.get::<CategoryStore>() else {
		bail!("Category store missing from bot state");
	};
	let category_status = store.status_of(category);
	let available_categories = store.available();
	// Everything the response needs is copied out; the lock can't be held across the
	// Discord call or every other state user stalls behind it.
	drop(state);

	let content = selection_prompt(category_status);
	let updated_components = category_select_components(order_flow_id, &available_categories, false, Some(category));
	let response = InteractionResponseDataBuilder::new()
		.content(content)
		.components(updated_components)
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::UpdateMessage,
		data: Some(response),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

/// Builds the select prompt shown above the category menu. The express warning never
/// blocks the flow; the form stays reachable.
fn selection_prompt(category_status: Option<CategoryStatus>) -> String {
	if category_status == Some(CategoryStatus::ExpressOnly) {
		format!("{}\n\n⚠️ {}", ORDER_PROMPT, EXPRESS_WARNING)
	} else {
		String::from(ORDER_PROMPT)
	}
}

async fn confirm_category(
	interaction: &InteractionCreate,
	order_flow_id: &str,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	let selected_category = {
		let state = bot_state.read().await;
		let Some(order_flow_states) = state.get::<OrderFlowStates>() else {
			bail!("Confirming order category when no order flow states have been created");
		};
		let Some(flow_state) = order_flow_states.states.get(order_flow_id) else {
			let response = InteractionResponseDataBuilder::new()
				.content(ORDER_FLOW_EXPIRED)
				.components(Vec::new())
				.build();
			let response = InteractionResponse {
				kind: InteractionResponseType::UpdateMessage,
				data: Some(response),
			};
			interaction_client
				.create_response(interaction.id, &interaction.token, &response)
				.await
				.into_diagnostic()?;
			return Ok(());
		};
		flow_state.category.clone()
	};

	let Some(selected_category) = selected_category else {
		let response = InteractionResponseDataBuilder::new()
			.content("Select a category before placing your order.")
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

	let modal_id = format!("order/{}/details", order_flow_id);
	let response = InteractionResponseDataBuilder::new()
		.custom_id(modal_id)
		.title("Place Your Order")
		.components(order_form_components(&selected_category))
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::Modal,
		data: Some(response),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

fn order_form_components(selected_category: &str) -> Vec<Component> {
	let inputs = [
		TextInput {
			custom_id: String::from("category"),
			label: String::from("Category"),
			max_length: None,
			min_length: None,
			placeholder: None,
			required: Some(true),
			style: TextInputStyle::Short,
			value: Some(selected_category.to_string()),
		},
		TextInput {
			custom_id: String::from("order"),
			label: String::from("Order"),
			max_length: None,
			min_length: None,
			placeholder: Some(String::from("What do you want?")),
			required: Some(true),
			style: TextInputStyle::Paragraph,
			value: None,
		},
		TextInput {
			custom_id: String::from("amount"),
			label: String::from("Amount"),
			max_length: None,
			min_length: None,
			placeholder: Some(String::from("How many?")),
			required: Some(true),
			style: TextInputStyle::Short,
			value: None,
		},
		TextInput {
			custom_id: String::from("budget"),
			label: String::from("Budget"),
			max_length: None,
			min_length: None,
			placeholder: Some(String::from("Negotiable?")),
			required: Some(true),
			style: TextInputStyle::Short,
			value: None,
		},
		TextInput {
			custom_id: String::from("delay"),
			label: String::from("Delay"),
			max_length: None,
			min_length: None,
			placeholder: Some(String::from("When do you need it?")),
			required: Some(true),
			style: TextInputStyle::Short,
			value: None,
		},
	];

	inputs
		.into_iter()
		.map(|input| {
			Component::ActionRow(ActionRow {
				components: vec![Component::TextInput(input)],
			})
		})
		.collect()
}

async fn handle_order_form(
	interaction: &InteractionCreate,
	modal_data: &ModalInteractionData,
	order_flow_id: &str,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	let Some(submission) = OrderSubmission::from_modal(modal_data) else {
		let response = InteractionResponseDataBuilder::new()
			.content("Order not sent: missing required data.")
			.components(Vec::new())
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::UpdateMessage,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	};

	let flow_state_existed = {
		let mut state = bot_state.write().await;
		let Some(order_flow_states) = state.get_mut::<OrderFlowStates>() else {
			bail!("Submitting order form with no order flow state data");
		};
		order_flow_states.states.remove(order_flow_id).is_some()
	};
	if !flow_state_existed {
		let response = InteractionResponseDataBuilder::new()
			.content(ORDER_FLOW_EXPIRED)
			.components(Vec::new())
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::UpdateMessage,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	let Some(interaction_member) = &interaction.member else {
		bail!("Order form submission isn't from a guild member");
	};
	let Some(interaction_user) = &interaction_member.user else {
		bail!("Order form submission member is not a user");
	};

	// The channel must exist before the order record can be posted into it; a creation
	// failure ends the flow with a user-visible error.
	let channel_name = order_channel_name(&interaction_user.name);
	let permission_overwrites = [
		PermissionOverwrite {
			allow: Permissions::empty(),
			deny: Permissions::VIEW_CHANNEL,
			id: config.guild.cast(),
			kind: PermissionOverwriteType::Role,
		},
		PermissionOverwrite {
			allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
			deny: Permissions::empty(),
			id: interaction_user.id.cast(),
			kind: PermissionOverwriteType::Member,
		},
		PermissionOverwrite {
			allow: Permissions::VIEW_CHANNEL,
			deny: Permissions::empty(),
			id: config.staff_role.cast(),
			kind: PermissionOverwriteType::Role,
		},
	];
	let channel_response = http_client
		.create_guild_channel(config.guild, &channel_name)
		.kind(ChannelType::GuildText)
		.permission_overwrites(&permission_overwrites)
		.await;
	let order_channel = match channel_response {
		Ok(response) => response.model().await.into_diagnostic()?,
		Err(error) => {
			tracing::error!(source = ?error, "Failed to create an order ticket channel");
			let response = InteractionResponseDataBuilder::new()
				.content("Your order couldn't be placed; the ticket channel couldn't be created.")
				.components(Vec::new())
				.build();
			let response = InteractionResponse {
				kind: InteractionResponseType::UpdateMessage,
				data: Some(response),
			};
			interaction_client
				.create_response(interaction.id, &interaction.token, &response)
				.await
				.into_diagnostic()?;
			return Ok(());
		}
	};

	let order_message_data = match order_record_message(
		&submission,
		config.staff_role,
		interaction_user.id,
		config.embed_color,
	) {
		Ok(data) => data,
		Err(_) => {
			let response = InteractionResponseDataBuilder::new()
				.content("Your order couldn't be sent; its contents don't fit in an embed.")
				.components(Vec::new())
				.build();
			let response = InteractionResponse {
				kind: InteractionResponseType::UpdateMessage,
				data: Some(response),
			};
			interaction_client
				.create_response(interaction.id, &interaction.token, &response)
				.await
				.into_diagnostic()?;
			return Ok(());
		}
	};

	let status_controls = status_components();
	let order_message_result = http_client
		.create_message(order_channel.id)
		.content(&order_message_data.content)
		.embeds(&order_message_data.embeds)
		.components(&status_controls)
		.allowed_mentions(Some(&order_message_data.allowed_mentions))
		.await;
	if let Err(error) = order_message_result {
		tracing::error!(source = ?error, "Failed to post an order record message");
		let response = InteractionResponseDataBuilder::new()
			.content("Your order couldn't be placed; the order record couldn't be posted.")
			.components(Vec::new())
			.build();
		let response = InteractionResponse {
			kind: InteractionResponseType::UpdateMessage,
			data: Some(response),
		};
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	tracing::info!(channel = %order_channel.id, "created order ticket");

	let response = InteractionResponseDataBuilder::new()
		.content(format!("Your ticket has been created: {}", order_channel.id.mention()))
		.components(Vec::new())
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::UpdateMessage,
		data: Some(response),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn express_only_selection_carries_the_warning() {
		let prompt = selection_prompt(Some(CategoryStatus::ExpressOnly));
		assert!(prompt.starts_with(ORDER_PROMPT));
		assert!(prompt.contains(EXPRESS_WARNING));
	}

	#[test]
	fn open_selection_is_the_plain_prompt() {
		assert_eq!(selection_prompt(Some(CategoryStatus::Open)), ORDER_PROMPT);
		assert_eq!(selection_prompt(None), ORDER_PROMPT);
	}
}
