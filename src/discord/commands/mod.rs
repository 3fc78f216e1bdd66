// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use miette::bail;
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_model::application::command::Command;
use twilight_model::application::interaction::application_command::CommandData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use type_map::concurrent::TypeMap;

mod add_admin;
mod remove_admin;
mod server_edit;
mod setup;

pub fn command_definitions() -> Vec<Command> {
	vec![
		add_admin::command_definition(),
		remove_admin::command_definition(),
		server_edit::command_definition(),
		setup::command_definition(),
	]
}

pub async fn route_command(
	interaction: &InteractionCreate,
	command_data: &CommandData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	match command_data.name.as_str() {
		"add_admin" => add_admin::handle_command(interaction, command_data, http_client, application_id, config).await,
		"remove_admin" => {
			remove_admin::handle_command(interaction, command_data, http_client, application_id, config).await
		}
		"server_edit" => {
			server_edit::handle_command(interaction, command_data, http_client, application_id, config, bot_state)
				.await
		}
		"setup" => setup::handle_command(interaction, http_client, application_id, config, bot_state).await,
		_ => bail!("Unknown command encountered: {}\n{:?}", command_data.name, command_data),
	}
}
