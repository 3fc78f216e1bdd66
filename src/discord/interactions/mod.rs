// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use miette::bail;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use twilight_http::client::Client;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use type_map::concurrent::TypeMap;

mod order;
mod ticket_status;

pub const MAX_INTERACTION_WAIT_TIME: Duration = Duration::from_secs(3600);

pub async fn route_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let custom_id_path: Vec<String> = interaction_data.custom_id.split('/').map(|s| s.to_string()).collect();

	match custom_id_path.first().map(|s| s.as_str()) {
		Some("order") => {
			order::route_order_interaction(
				interaction,
				interaction_data,
				&custom_id_path,
				http_client,
				application_id,
				bot_state,
			)
			.await
		}
		Some("ticket_status") => {
			ticket_status::handle_status_button(interaction, &custom_id_path, http_client, application_id, config)
				.await
		}
		_ => bail!("Unexpected interaction custom ID: {}", interaction_data.custom_id),
	}
}

pub async fn route_modal_submit(
	interaction: &InteractionCreate,
	modal_data: &ModalInteractionData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let custom_id_path: Vec<String> = modal_data.custom_id.split('/').map(|s| s.to_string()).collect();

	match custom_id_path.first().map(|s| s.as_str()) {
		Some("order") => {
			order::route_order_modal(
				interaction,
				modal_data,
				&custom_id_path,
				http_client,
				application_id,
				config,
				bot_state,
			)
			.await
		}
		_ => bail!("Unexpected modal custom ID: {}", modal_data.custom_id),
	}
}
