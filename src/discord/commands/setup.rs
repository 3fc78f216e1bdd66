// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::categories::{CategoryStatus, CategoryStore};
use crate::config::ConfigData;
use crate::discord::state::order::order_panel_button;
use crate::discord::utils::permissions::caller_is_admin;
use crate::discord::utils::responses::PERMISSION_DENIED;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::application::interaction::InteractionContextType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::guild::Permissions;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use twilight_util::builder::InteractionResponseDataBuilder;
use twilight_util::builder::command::CommandBuilder;
use twilight_util::builder::embed::EmbedBuilder;
use type_map::concurrent::TypeMap;

pub fn command_definition() -> Command {
	CommandBuilder::new("setup", "Post the public order panel", CommandType::ChatInput)
		.contexts([InteractionContextType::Guild])
		.default_member_permissions(Permissions::MANAGE_GUILD)
		.build()
}

/// Renders the panel body: one line per catalog category with its live status glyph,
/// followed by the ordering guidelines. Closed categories are listed here even though
/// they can't be selected; the glyph is how users learn a category is closed.
pub(crate) fn panel_description(categories: &[(&'static str, &'static str, CategoryStatus)]) -> String {
	let mut description = String::from("Please select the product you'd like to purchase from the options below.\n\n");
	description.push_str("🕘 | **Order Status:**\n");
	for (name, _, status) in categories {
		description.push_str(&format!("• {} **{}**: {}\n", status.glyph(), name, status.label()));
	}
	description.push_str("\n*Tax not included.*\n\n");
	description.push_str("**Guidelines:**\n");
	description.push_str("• Do not abandon the ticket.\n");
	description.push_str("• Do not order without the sufficient funds.\n");
	description.push_str("• Do not request free items.\n");
	description
}

pub async fn handle_command(
	interaction: &InteractionCreate,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);

	if interaction.guild_id.is_none() {
		bail!("Setup command was used outside of a guild");
	}

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

	let categories = {
		let state = bot_state.read().await;
		let Some(store) = state.get::<CategoryStore>() else {
			bail!("Category store missing from bot state");
		};
		store.all()
	};

	let panel_embed = EmbedBuilder::new()
		.title("Order Here")
		.color(config.embed_color)
		.description(panel_description(&categories))
		.validate()
		.into_diagnostic()?
		.build();
	let components = vec![order_panel_button()];

	let response = InteractionResponseDataBuilder::new()
		.embeds([panel_embed])
		.components(components)
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(response),
	};
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	interaction_client
		.create_followup(&interaction.token)
		.content("Main order panel deployed.")
		.flags(MessageFlags::EPHEMERAL)
		.await
		.into_diagnostic()?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn panel_lists_every_category_with_its_glyph() {
		let store = CategoryStore::new();
		let description = panel_description(&store.all());
		assert!(description.contains("• 🟢 **ERLC Livery**: Open"));
		assert!(description.contains("• 🟢 **Photography Orders**: Open"));
	}

	#[test]
	fn closed_category_shows_closed_glyph_but_is_not_selectable() {
		use crate::discord::state::order::category_select_components;
		use twilight_model::channel::message::component::Component;

		let mut store = CategoryStore::new();
		store.set("Graphics", CategoryStatus::Closed).unwrap();

		// The panel keeps listing the category, now with the closed glyph.
		let description = panel_description(&store.all());
		assert!(description.contains("• 🔴 **Graphics**: Closed"));

		// The order select no longer offers it.
		let components = category_select_components("flowid", &store.available(), true, None);
		let Component::ActionRow(row) = &components[0] else {
			panic!("first component isn't an action row");
		};
		let Component::SelectMenu(menu) = &row.components[0] else {
			panic!("first row doesn't hold the select menu");
		};
		let options = menu.options.as_ref().unwrap();
		assert!(options.iter().all(|option| option.value != "Graphics"));
	}

	#[test]
	fn express_only_category_shows_the_express_glyph() {
		let mut store = CategoryStore::new();
		store.set("Custom Bots", CategoryStatus::ExpressOnly).unwrap();
		let description = panel_description(&store.all());
		assert!(description.contains("• 🟡 **Custom Bots**: Express Only"));
	}
}
