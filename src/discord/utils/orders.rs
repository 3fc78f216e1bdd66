// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::ticket_status::TicketStatus;
use twilight_mention::fmt::Mention;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::channel::message::AllowedMentions;
use twilight_model::channel::message::embed::Embed;
use twilight_model::id::Id;
use twilight_model::id::marker::{RoleMarker, UserMarker};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};
use twilight_validate::embed::EmbedValidationError;

/// Name of the embed field the status buttons rewrite.
pub const STATUS_FIELD_NAME: &str = "Order Status";
/// Status field value before any status button has been pressed.
pub const STATUS_UNSET: &str = "Unset";

/// The five required text inputs of the order form, collected from a submitted modal.
#[derive(Debug, Eq, PartialEq)]
pub struct OrderSubmission {
	pub category: String,
	pub order: String,
	pub amount: String,
	pub budget: String,
	pub delay: String,
}

impl OrderSubmission {
	pub fn from_modal(modal_data: &ModalInteractionData) -> Option<Self> {
		let mut category: Option<String> = None;
		let mut order: Option<String> = None;
		let mut amount: Option<String> = None;
		let mut budget: Option<String> = None;
		let mut delay: Option<String> = None;

		for row in modal_data.components.iter() {
			for component in row.components.iter() {
				match component.custom_id.as_str() {
					"category" => category = component.value.clone(),
					"order" => order = component.value.clone(),
					"amount" => amount = component.value.clone(),
					"budget" => budget = component.value.clone(),
					"delay" => delay = component.value.clone(),
					_ => (),
				}
			}
		}

		Some(Self {
			category: category?,
			order: order?,
			amount: amount?,
			budget: budget?,
			delay: delay?,
		})
	}
}

/// Contains data necessary to post an order record message
pub struct OrderMessageData {
	pub content: String,
	pub embeds: Vec<Embed>,
	pub allowed_mentions: AllowedMentions,
}

/// Generates the order record message posted into a freshly created ticket channel. The
/// status field leads the field list so the status buttons can rewrite it in place.
pub fn order_record_message(
	submission: &OrderSubmission,
	staff_role: Id<RoleMarker>,
	ordering_user: Id<UserMarker>,
	embed_color: u32,
) -> Result<OrderMessageData, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title("Thank you for your order!")
		.description(
			"The order has successfully been placed.\nPlease describe how you would like your order and a designer will answer soon.",
		)
		.color(embed_color)
		.field(EmbedFieldBuilder::new(STATUS_FIELD_NAME, STATUS_UNSET))
		.field(EmbedFieldBuilder::new("Category", submission.category.as_str()))
		.field(EmbedFieldBuilder::new("Order", submission.order.as_str()))
		.field(EmbedFieldBuilder::new("Amount", submission.amount.as_str()).inline())
		.field(EmbedFieldBuilder::new("Budget", submission.budget.as_str()).inline())
		.field(EmbedFieldBuilder::new("Delay", submission.delay.as_str()))
		.validate()?
		.build();

	let content = format!("{} {}", staff_role.mention(), ordering_user.mention());
	let mut allowed_mentions = AllowedMentions::default();
	allowed_mentions.roles.push(staff_role);
	allowed_mentions.users.push(ordering_user);

	Ok(OrderMessageData {
		content,
		embeds: vec![embed],
		allowed_mentions,
	})
}

/// Rewrites the status field of an order record embed. Returns false if the embed doesn't
/// carry the field.
pub fn set_order_status(embed: &mut Embed, status: TicketStatus) -> bool {
	for field in embed.fields.iter_mut() {
		if field.name == STATUS_FIELD_NAME {
			field.value = status.label().to_string();
			return true;
		}
	}
	false
}

/// Derives a channel name from the ordering user's name. Discord channel names are
/// lowercase with hyphens standing in for anything non-alphanumeric.
pub fn order_channel_name(username: &str) -> String {
	let mut slug = String::new();
	for c in username.chars().flat_map(char::to_lowercase) {
		if c.is_ascii_alphanumeric() {
			slug.push(c);
		} else if !slug.is_empty() && !slug.ends_with('-') {
			slug.push('-');
		}
	}
	let slug = slug.trim_end_matches('-');
	if slug.is_empty() {
		String::from("order-ticket")
	} else {
		format!("order-{}", slug)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use twilight_model::application::interaction::modal::{
		ModalInteractionDataActionRow, ModalInteractionDataComponent,
	};
	use twilight_model::channel::message::component::ComponentType;

	fn modal_data(fields: &[(&str, &str)]) -> ModalInteractionData {
		let components = fields
			.iter()
			.map(|(custom_id, value)| ModalInteractionDataActionRow {
				components: vec![ModalInteractionDataComponent {
					custom_id: custom_id.to_string(),
					kind: ComponentType::TextInput,
					value: Some(value.to_string()),
				}],
			})
			.collect();
		ModalInteractionData {
			custom_id: String::from("order/flowid/details"),
			components,
		}
	}

	#[test]
	fn submission_collects_all_fields() {
		let data = modal_data(&[
			("category", "ERLC Livery"),
			("order", "Two liveries"),
			("amount", "2"),
			("budget", "50"),
			("delay", "1 week"),
		]);
		let submission = OrderSubmission::from_modal(&data).unwrap();
		assert_eq!(submission.category, "ERLC Livery");
		assert_eq!(submission.order, "Two liveries");
		assert_eq!(submission.amount, "2");
		assert_eq!(submission.budget, "50");
		assert_eq!(submission.delay, "1 week");
	}

	#[test]
	fn submission_requires_every_field() {
		let data = modal_data(&[("category", "ERLC Livery"), ("order", "Two liveries")]);
		assert!(OrderSubmission::from_modal(&data).is_none());
	}

	#[test]
	fn record_message_carries_fields_verbatim_with_status_unset() {
		let submission = OrderSubmission {
			category: String::from("ERLC Livery"),
			order: String::from("Two liveries"),
			amount: String::from("2"),
			budget: String::from("50"),
			delay: String::from("1 week"),
		};
		let staff_role = Id::new(10);
		let user = Id::new(20);
		let message = order_record_message(&submission, staff_role, user, 0x8800ff).unwrap();

		assert!(message.content.contains("<@&10>"));
		assert!(message.content.contains("<@20>"));
		assert_eq!(message.allowed_mentions.roles, vec![staff_role]);
		assert_eq!(message.allowed_mentions.users, vec![user]);

		let embed = &message.embeds[0];
		assert_eq!(embed.fields[0].name, STATUS_FIELD_NAME);
		assert_eq!(embed.fields[0].value, STATUS_UNSET);
		let field_value = |name: &str| {
			embed
				.fields
				.iter()
				.find(|field| field.name == name)
				.map(|field| field.value.clone())
				.unwrap()
		};
		assert_eq!(field_value("Category"), "ERLC Livery");
		assert_eq!(field_value("Order"), "Two liveries");
		assert_eq!(field_value("Amount"), "2");
		assert_eq!(field_value("Budget"), "50");
		assert_eq!(field_value("Delay"), "1 week");
	}

	#[test]
	fn status_updates_converge_on_the_pressed_label() {
		let submission = OrderSubmission {
			category: String::from("Clothing"),
			order: String::from("A shirt"),
			amount: String::from("1"),
			budget: String::from("20"),
			delay: String::from("tomorrow"),
		};
		let message = order_record_message(&submission, Id::new(10), Id::new(20), 0).unwrap();
		let mut embed = message.embeds.into_iter().next().unwrap();

		assert!(set_order_status(&mut embed, TicketStatus::InProgress));
		assert_eq!(embed.fields[0].value, "In Progress");
		// Any status is reachable from any other, including the one already set.
		assert!(set_order_status(&mut embed, TicketStatus::Completed));
		assert!(set_order_status(&mut embed, TicketStatus::Completed));
		assert_eq!(embed.fields[0].value, "Completed");
		assert!(set_order_status(&mut embed, TicketStatus::Pending));
		assert_eq!(embed.fields[0].value, "Pending");
		// Only the status field is touched.
		assert_eq!(embed.fields[1].value, "Clothing");
	}

	#[test]
	fn status_update_fails_without_a_status_field() {
		let mut embed = Embed {
			author: None,
			color: None,
			description: None,
			fields: Vec::new(),
			footer: None,
			image: None,
			kind: String::from("rich"),
			provider: None,
			thumbnail: None,
			timestamp: None,
			title: None,
			url: None,
			video: None,
		};
		assert!(!set_order_status(&mut embed, TicketStatus::Pending));
	}

	#[test]
	fn channel_names_are_slugged() {
		assert_eq!(order_channel_name("SomeUser"), "order-someuser");
		assert_eq!(order_channel_name("a b!!c"), "order-a-b-c");
		assert_eq!(order_channel_name("---"), "order-ticket");
		assert_eq!(order_channel_name("trailing!"), "order-trailing");
	}
}
