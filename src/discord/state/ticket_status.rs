// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

/// Ticket progress as tracked on the order record message. Any status can be applied at
/// any time, including reapplying the current one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketStatus {
	Pending,
	InProgress,
	Completed,
	Cancelled,
}

impl TicketStatus {
	pub fn all() -> [Self; 4] {
		[Self::Pending, Self::InProgress, Self::Completed, Self::Cancelled]
	}

	pub fn from_id(id: &str) -> Option<Self> {
		match id {
			"pending" => Some(Self::Pending),
			"in_progress" => Some(Self::InProgress),
			"completed" => Some(Self::Completed),
			"cancelled" => Some(Self::Cancelled),
			_ => None,
		}
	}

	pub fn as_id(&self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::InProgress => "in_progress",
			Self::Completed => "completed",
			Self::Cancelled => "cancelled",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Pending => "Pending",
			Self::InProgress => "In Progress",
			Self::Completed => "Completed",
			Self::Cancelled => "Cancelled",
		}
	}

	pub fn button_style(&self) -> ButtonStyle {
		match self {
			Self::Pending => ButtonStyle::Primary,
			Self::InProgress => ButtonStyle::Secondary,
			Self::Completed => ButtonStyle::Success,
			Self::Cancelled => ButtonStyle::Danger,
		}
	}
}

impl fmt::Display for TicketStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

/// The status button row attached to every order record message. Status changes re-attach
/// the same row so the status stays editable.
pub fn status_components() -> Vec<Component> {
	let status_buttons: Vec<Component> = TicketStatus::all()
		.iter()
		.map(|status| {
			Component::Button(Button {
				custom_id: Some(format!("ticket_status/{}", status.as_id())),
				disabled: false,
				emoji: None,
				label: Some(status.label().to_string()),
				style: status.button_style(),
				url: None,
				sku_id: None,
			})
		})
		.collect();
	vec![Component::ActionRow(ActionRow {
		components: status_buttons,
	})]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_round_trip() {
		for status in TicketStatus::all() {
			assert_eq!(TicketStatus::from_id(status.as_id()), Some(status));
		}
		assert_eq!(TicketStatus::from_id("archived"), None);
	}

	#[test]
	fn status_row_holds_all_four_buttons() {
		let components = status_components();
		assert_eq!(components.len(), 1);
		let Component::ActionRow(row) = &components[0] else {
			panic!("status components aren't wrapped in an action row");
		};
		assert_eq!(row.components.len(), 4);
		let Component::Button(first) = &row.components[0] else {
			panic!("status row doesn't hold buttons");
		};
		assert_eq!(first.custom_id.as_deref(), Some("ticket_status/pending"));
		assert_eq!(first.label.as_deref(), Some("Pending"));
	}
}
