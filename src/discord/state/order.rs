// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::categories::CategoryStatus;
use std::collections::HashMap;
use twilight_model::channel::message::component::{
	ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectMenuOption, SelectMenuType,
};

/// In-flight order intake sessions, keyed by flow instance ID.
#[derive(Debug, Default)]
pub struct OrderFlowStates {
	pub states: HashMap<String, OrderFlowState>,
}

#[derive(Debug, Default)]
pub struct OrderFlowState {
	pub category: Option<String>,
}

/// The single button posted on the public order panel.
pub fn order_panel_button() -> Component {
	let order_button = Button {
		custom_id: Some(String::from("order//start")),
		disabled: false,
		emoji: None,
		label: Some(String::from("Order Here")),
		style: ButtonStyle::Primary,
		url: None,
		sku_id: None,
	};
	Component::ActionRow(ActionRow {
		components: vec![Component::Button(order_button)],
	})
}

pub fn category_select_components(
	flow_id: &str,
	available_categories: &[(&'static str, &'static str, CategoryStatus)],
	confirm_button_disabled: bool,
	selected_category: Option<&str>,
) -> Vec<Component> {
	let category_select_options: Vec<SelectMenuOption> = available_categories
		.iter()
		.map(|(name, emoji, status)| SelectMenuOption {
			default: Some(*name) == selected_category,
			description: if *status == CategoryStatus::ExpressOnly {
				Some(String::from("Express package only"))
			} else {
				None
			},
			emoji: None,
			label: format!("{} {}", emoji, name),
			value: name.to_string(),
		})
		.collect();
	let category_select_menu = SelectMenu {
		channel_types: None,
		custom_id: format!("order/{}/category", flow_id),
		default_values: None,
		disabled: false,
		kind: SelectMenuType::Text,
		max_values: None,
		min_values: None,
		options: Some(category_select_options),
		placeholder: Some(String::from("Choose a product...")),
	};
	let confirm_button = Button {
		custom_id: Some(format!("order/{}/confirm", flow_id)),
		disabled: confirm_button_disabled,
		emoji: None,
		label: Some(String::from("Place Order")),
		style: ButtonStyle::Primary,
		url: None,
		sku_id: None,
	};

	let category_select_row = Component::ActionRow(ActionRow {
		components: vec![Component::SelectMenu(category_select_menu)],
	});
	let confirm_button_row = Component::ActionRow(ActionRow {
		components: vec![Component::Button(confirm_button)],
	});

	vec![category_select_row, confirm_button_row]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::categories::CategoryStore;

	fn select_options(components: &[Component]) -> Vec<SelectMenuOption> {
		let Component::ActionRow(row) = &components[0] else {
			panic!("first component isn't an action row");
		};
		let Component::SelectMenu(menu) = &row.components[0] else {
			panic!("first row doesn't hold the select menu");
		};
		menu.options.clone().unwrap()
	}

	#[test]
	fn closed_categories_are_excluded_from_the_select() {
		let mut store = CategoryStore::new();
		store.set("Graphics", CategoryStatus::Closed).unwrap();
		let components = category_select_components("flowid", &store.available(), true, None);
		let options = select_options(&components);
		assert!(options.iter().all(|option| option.value != "Graphics"));
	}

	#[test]
	fn express_only_categories_carry_a_description() {
		let mut store = CategoryStore::new();
		store.set("ELS", CategoryStatus::ExpressOnly).unwrap();
		let components = category_select_components("flowid", &store.available(), true, None);
		let options = select_options(&components);
		let els = options.iter().find(|option| option.value == "ELS").unwrap();
		assert_eq!(els.description.as_deref(), Some("Express package only"));
		let open_option = options.iter().find(|option| option.value == "Clothing").unwrap();
		assert!(open_option.description.is_none());
	}

	#[test]
	fn selection_enables_the_confirm_button_and_marks_the_default() {
		let store = CategoryStore::new();
		let components = category_select_components("flowid", &store.available(), false, Some("Clothing"));
		let options = select_options(&components);
		assert!(options.iter().find(|option| option.value == "Clothing").unwrap().default);
		assert!(options.iter().filter(|option| option.default).count() == 1);
		let Component::ActionRow(row) = &components[1] else {
			panic!("second component isn't an action row");
		};
		let Component::Button(button) = &row.components[0] else {
			panic!("second row doesn't hold the confirm button");
		};
		assert!(!button.disabled);
		assert_eq!(button.custom_id.as_deref(), Some("order/flowid/confirm"));
	}
}
