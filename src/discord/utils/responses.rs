// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub const PERMISSION_DENIED: &str = "You don't have permission to use this command.";

pub const EXPRESS_WARNING: &str =
	"This service is currently only available with the express package. There may be additional fees.";

pub const ORDER_FLOW_EXPIRED: &str = "Order session expired. Press the order button to start again.";

pub const ORDER_PROMPT: &str = "Select the product you'd like to order:";
