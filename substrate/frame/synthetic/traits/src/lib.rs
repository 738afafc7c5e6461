// This file is part of Synthetic USD.

// Copyright (C) 2023-2025 Synthetic USD Developers.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

#![doc = "Shared traits and types for the synthetic USD protocol and its related pallets."]
#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::{DispatchError, FixedU128, RuntimeDebug};
use sp_std::prelude::*;

/// Balance of collateral assets, issued synthetic units and USD values.
///
/// Debt and USD values carry 18 decimals by convention; collateral amounts
/// use the asset's native unit.
pub type Balance = u128;
/// The USD price of one unit of an asset, represented as a `FixedU128`.
pub type Price = FixedU128;
/// A ratio, represented as a `FixedU128`.
pub type Ratio = FixedU128;
/// A rate, represented as a `FixedU128`.
pub type Rate = FixedU128;

/// A snapshot of an account's position: the synthetic units it has issued
/// and the USD value of everything backing them.
#[derive(
	Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, Default, MaxEncodedLen, TypeInfo,
)]
pub struct AccountSnapshot {
	/// Synthetic units issued against the collateral.
	pub debt: Balance,
	/// Total USD value of the deposited collateral, summed in registry order.
	pub collateral_value: Balance,
}

/// One observation reported by an external price feed.
#[derive(Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct FeedRound {
	/// The reported price, in the feed's 8-decimal convention.
	pub answer: i128,
	/// Unix seconds of the feed's last update.
	pub updated_at: u64,
}

/// The external oracle collaborator. One feed reference per collateral
/// asset; the feed's only contract is "reports a round, or does not".
pub trait PriceFeed<FeedId> {
	/// The latest round reported by `feed`, `None` if the feed has never
	/// reported.
	fn latest_round(feed: FeedId) -> Option<FeedRound>;
}

/// The fixed set of collateral assets accepted by the protocol.
pub trait AssetRegistry<CurrencyId> {
	/// All supported assets, in registration order.
	fn supported_assets() -> Vec<CurrencyId>;

	/// Whether `asset` is accepted as collateral.
	fn is_supported(asset: &CurrencyId) -> bool;
}

/// Converts between an asset's native amount and its USD value.
pub trait ValuationProvider<CurrencyId> {
	/// The USD value of `amount` of `asset` at the current feed price.
	fn usd_value(asset: CurrencyId, amount: Balance) -> Result<Balance, DispatchError>;

	/// The amount of `asset` worth `usd_value` USD at the current feed
	/// price. Inverse of [`Self::usd_value`] up to integer truncation.
	fn asset_amount_for_usd(
		asset: CurrencyId,
		usd_value: Balance,
	) -> Result<Balance, DispatchError>;
}
