// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The fixed product catalog with display emoji. Listing order everywhere (order panel,
/// category select) follows this order.
pub const CATEGORIES: [(&str, &str); 8] = [
	("ERLC Livery", "🚗"),
	("Clothing", "👕"),
	("Graphics", "🎨"),
	("ELS", "🚨"),
	("Custom Bots", "🤖"),
	("Website Orders", "🌐"),
	("Discord Services", "🛠️"),
	("Photography Orders", "📸"),
];

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CategoryStatus {
	#[default]
	Open,
	ExpressOnly,
	Closed,
}

impl CategoryStatus {
	/// Parses a status entered by an admin. `delayed` is accepted as a legacy spelling of
	/// the express-only status.
	pub fn parse(value: &str) -> Option<Self> {
		match value.to_lowercase().as_str() {
			"open" => Some(Self::Open),
			"express" | "express_only" | "delayed" => Some(Self::ExpressOnly),
			"closed" => Some(Self::Closed),
			_ => None,
		}
	}

	pub fn glyph(&self) -> &'static str {
		match self {
			Self::Open => "🟢",
			Self::ExpressOnly => "🟡",
			Self::Closed => "🔴",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Open => "Open",
			Self::ExpressOnly => "Express Only",
			Self::Closed => "Closed",
		}
	}
}

impl fmt::Display for CategoryStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.label())
	}
}

#[derive(Debug, Error)]
#[error("unknown category: {name}")]
pub struct UnknownCategoryError {
	pub name: String,
}

/// Availability state for every catalog category. Lives in the shared bot state for the
/// lifetime of the process; admin commands are the only writers.
#[derive(Debug)]
pub struct CategoryStore {
	statuses: HashMap<&'static str, CategoryStatus>,
}

impl CategoryStore {
	pub fn new() -> Self {
		let statuses = CATEGORIES
			.iter()
			.map(|(name, _)| (*name, CategoryStatus::Open))
			.collect();
		Self { statuses }
	}

	pub fn status_of(&self, name: &str) -> Option<CategoryStatus> {
		self.statuses.get(name).copied()
	}

	pub fn set(&mut self, name: &str, status: CategoryStatus) -> Result<(), UnknownCategoryError> {
		match self.statuses.get_mut(name) {
			Some(entry) => {
				*entry = status;
				Ok(())
			}
			None => Err(UnknownCategoryError {
				name: name.to_string(),
			}),
		}
	}

	/// Every catalog category with its current status, in catalog order.
	pub fn all(&self) -> Vec<(&'static str, &'static str, CategoryStatus)> {
		CATEGORIES
			.iter()
			.map(|(name, emoji)| (*name, *emoji, self.statuses.get(name).copied().unwrap_or_default()))
			.collect()
	}

	/// Categories users may order from, in catalog order. Closed categories are never offered.
	pub fn available(&self) -> Vec<(&'static str, &'static str, CategoryStatus)> {
		self.all()
			.into_iter()
			.filter(|(_, _, status)| *status != CategoryStatus::Closed)
			.collect()
	}
}

impl Default for CategoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn all_categories_start_open() {
		let store = CategoryStore::new();
		for (name, _) in CATEGORIES {
			assert_eq!(store.status_of(name), Some(CategoryStatus::Open));
		}
	}

	#[test]
	fn listing_follows_catalog_order() {
		let store = CategoryStore::new();
		let names: Vec<&str> = store.all().into_iter().map(|(name, _, _)| name).collect();
		let catalog_names: Vec<&str> = CATEGORIES.iter().map(|(name, _)| *name).collect();
		assert_eq!(names, catalog_names);
	}

	#[test]
	fn closed_categories_are_not_available() {
		let mut store = CategoryStore::new();
		store.set("Graphics", CategoryStatus::Closed).unwrap();
		let available: Vec<&str> = store.available().into_iter().map(|(name, _, _)| name).collect();
		assert!(!available.contains(&"Graphics"));
		assert_eq!(available.len(), CATEGORIES.len() - 1);
	}

	#[test]
	fn express_only_categories_remain_available() {
		let mut store = CategoryStore::new();
		store.set("ELS", CategoryStatus::ExpressOnly).unwrap();
		let listing = store.available();
		let els = listing.iter().find(|(name, _, _)| *name == "ELS").unwrap();
		assert_eq!(els.2, CategoryStatus::ExpressOnly);
	}

	#[test]
	fn set_unknown_category_fails_and_names_the_key() {
		let mut store = CategoryStore::new();
		let error = store.set("Woodworking", CategoryStatus::Closed).unwrap_err();
		assert_eq!(error.name, "Woodworking");
		assert_eq!(error.to_string(), "unknown category: Woodworking");
		// No entry was created as a side effect.
		assert!(store.status_of("Woodworking").is_none());
		assert_eq!(store.all().len(), CATEGORIES.len());
	}

	#[test]
	fn parse_accepts_known_statuses() {
		assert_eq!(CategoryStatus::parse("open"), Some(CategoryStatus::Open));
		assert_eq!(CategoryStatus::parse("Closed"), Some(CategoryStatus::Closed));
		assert_eq!(CategoryStatus::parse("express"), Some(CategoryStatus::ExpressOnly));
		assert_eq!(CategoryStatus::parse("delayed"), Some(CategoryStatus::ExpressOnly));
	}

	#[test]
	fn parse_rejects_arbitrary_strings() {
		assert_eq!(CategoryStatus::parse("sorta-open"), None);
		assert_eq!(CategoryStatus::parse(""), None);
	}

	#[test]
	fn status_glyphs_and_labels() {
		assert_eq!(CategoryStatus::Open.glyph(), "🟢");
		assert_eq!(CategoryStatus::ExpressOnly.glyph(), "🟡");
		assert_eq!(CategoryStatus::Closed.glyph(), "🔴");
		assert_eq!(CategoryStatus::ExpressOnly.label(), "Express Only");
	}
}
