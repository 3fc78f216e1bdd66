// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::RoleMarker;

pub fn member_holds_role(member_roles: &[Id<RoleMarker>], role: Id<RoleMarker>) -> bool {
	member_roles.contains(&role)
}

fn interaction_member_roles(interaction: &InteractionCreate) -> Option<&[Id<RoleMarker>]> {
	interaction.member.as_ref().map(|member| member.roles.as_slice())
}

/// Whether a member with the given roles holds the configured admin role. An interaction
/// without member data (not from a guild) is never privileged.
pub fn roles_grant_admin(member_roles: Option<&[Id<RoleMarker>]>, config: &ConfigData) -> bool {
	member_roles.is_some_and(|roles| member_holds_role(roles, config.admin_role))
}

/// Whether a member with the given roles counts as staff. Admins count as staff.
pub fn roles_grant_staff(member_roles: Option<&[Id<RoleMarker>]>, config: &ConfigData) -> bool {
	member_roles.is_some_and(|roles| {
		member_holds_role(roles, config.staff_role) || member_holds_role(roles, config.admin_role)
	})
}

/// Whether the interaction came from a member holding the configured admin role. Every
/// privileged command checks this before mutating anything.
pub fn caller_is_admin(interaction: &InteractionCreate, config: &ConfigData) -> bool {
	roles_grant_admin(interaction_member_roles(interaction), config)
}

/// Whether the interaction came from a staff member.
pub fn caller_is_staff(interaction: &InteractionCreate, config: &ConfigData) -> bool {
	roles_grant_staff(interaction_member_roles(interaction), config)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_config() -> ConfigData {
		ConfigData {
			bot_token: String::from("token"),
			guild: Id::new(1),
			admin_role: Id::new(10),
			staff_role: Id::new(20),
			autorole: Id::new(30),
			welcome_channel: Id::new(40),
			goodbye_channel: Id::new(50),
			embed_color: 0x8800ff,
		}
	}

	#[test]
	fn role_membership() {
		let roles = [Id::new(1), Id::new(2)];
		assert!(member_holds_role(&roles, Id::new(2)));
		assert!(!member_holds_role(&roles, Id::new(3)));
		assert!(!member_holds_role(&[], Id::new(1)));
	}

	#[test]
	fn admin_role_grants_both_privileges() {
		let config = test_config();
		let roles = [Id::new(5), config.admin_role];
		assert!(roles_grant_admin(Some(&roles), &config));
		assert!(roles_grant_staff(Some(&roles), &config));
	}

	#[test]
	fn staff_role_grants_staff_but_not_admin() {
		let config = test_config();
		let roles = [config.staff_role];
		assert!(!roles_grant_admin(Some(&roles), &config));
		assert!(roles_grant_staff(Some(&roles), &config));
	}

	#[test]
	fn unrelated_roles_grant_nothing() {
		let config = test_config();
		let roles = [Id::new(5), Id::new(6)];
		assert!(!roles_grant_admin(Some(&roles), &config));
		assert!(!roles_grant_staff(Some(&roles), &config));
	}

	#[test]
	fn missing_member_grants_nothing() {
		let config = test_config();
		assert!(!roles_grant_admin(None, &config));
		assert!(!roles_grant_staff(None, &config));
	}
}
