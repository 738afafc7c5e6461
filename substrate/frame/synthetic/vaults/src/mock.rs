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

//! Mocks for the vaults module.

#![cfg(test)]

use super::*;
use frame_support::{construct_runtime, derive_impl, parameter_types, PalletId};
use pallet_traits::{AssetRegistry, Balance, ValuationProvider};
use sp_runtime::{traits::IdentityLookup, BuildStorage, DispatchError};

pub type AccountId = u128;
pub type CurrencyId = u32;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;

pub const ETH: CurrencyId = 1;
pub const WBTC: CurrencyId = 2;
pub const DOGE: CurrencyId = 3;

type Block = frame_system::mocking::MockBlock<Runtime>;

construct_runtime!(
	pub enum Runtime {
		System: frame_system,
		Vaults: pallet,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Runtime {
	type AccountId = AccountId;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = Block;
}

pub struct MockRegistry;
impl AssetRegistry<CurrencyId> for MockRegistry {
	fn supported_assets() -> Vec<CurrencyId> {
		vec![ETH, WBTC]
	}

	fn is_supported(asset: &CurrencyId) -> bool {
		matches!(*asset, ETH | WBTC)
	}
}

// whole-unit prices, no decimal scaling: keeps the ledger assertions readable
pub struct MockValuation;
impl ValuationProvider<CurrencyId> for MockValuation {
	fn usd_value(asset: CurrencyId, amount: Balance) -> Result<Balance, DispatchError> {
		match asset {
			ETH => Ok(amount.saturating_mul(2_000)),
			WBTC => Ok(amount.saturating_mul(40_000)),
			_ => Err(DispatchError::Other("mock missing price")),
		}
	}

	fn asset_amount_for_usd(
		asset: CurrencyId,
		usd_value: Balance,
	) -> Result<Balance, DispatchError> {
		match asset {
			ETH => Ok(usd_value / 2_000),
			WBTC => Ok(usd_value / 40_000),
			_ => Err(DispatchError::Other("mock missing price")),
		}
	}
}

parameter_types! {
	pub const VaultsPalletId: PalletId = PalletId(*b"susd/vlt");
}

impl Config for Runtime {
	type CurrencyId = CurrencyId;
	type Registry = MockRegistry;
	type Valuation = MockValuation;
	type PalletId = VaultsPalletId;
}

pub struct ExtBuilder;

impl Default for ExtBuilder {
	fn default() -> Self {
		Self
	}
}

impl ExtBuilder {
	pub fn build(self) -> sp_io::TestExternalities {
		let t = frame_system::GenesisConfig::<Runtime>::default()
			.build_storage()
			.unwrap();

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| System::set_block_number(1));
		ext
	}
}
