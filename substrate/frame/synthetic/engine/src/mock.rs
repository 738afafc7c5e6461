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

//! Mock runtime for the synthetic engine module.

#![cfg(test)]

use super::*;
use frame_support::{
	construct_runtime, derive_impl, parameter_types,
	traits::{ConstU128, ConstU32, ConstU64, UnixTime},
	PalletId,
};
use pallet_traits::{FeedRound, PriceFeed};
use sp_runtime::{traits::IdentityLookup, BuildStorage};
use std::collections::HashMap;

pub type AccountId = u128;
pub type CurrencyId = u32;
pub type FeedId = u32;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;

pub const ETH: CurrencyId = 1;
pub const WBTC: CurrencyId = 2;
pub const SUSD: CurrencyId = 3;
pub const DOGE: CurrencyId = 4;
pub const ETH_FEED: FeedId = 10;
pub const WBTC_FEED: FeedId = 20;

/// One whole 18-decimal unit.
pub const ONE: Balance = 1_000_000_000_000_000_000;
/// Fixed "now" of the mock clock, unix seconds.
pub const NOW: u64 = 1_700_000_000;

type Block = frame_system::mocking::MockBlock<Runtime>;

construct_runtime!(
	pub enum Runtime {
		System: frame_system,
		Balances: pallet_balances,
		Assets: pallet_assets,
		Prices: pallet_prices,
		Vaults: pallet_vaults,
		Engine: pallet,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Runtime {
	type AccountId = AccountId;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = Block;
	type AccountData = pallet_balances::AccountData<Balance>;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig as pallet_balances::DefaultConfig)]
impl pallet_balances::Config for Runtime {
	type Balance = Balance;
	type ExistentialDeposit = ConstU128<1>;
	type AccountStore = System;
}

impl pallet_assets::Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type Balance = Balance;
	type AssetId = CurrencyId;
	type AssetIdParameter = CurrencyId;
	type Currency = Balances;
	type CreateOrigin = frame_system::EnsureSigned<AccountId>;
	type ForceOrigin = frame_system::EnsureRoot<AccountId>;
	type AssetDeposit = ConstU128<0>;
	type AssetAccountDeposit = ConstU128<0>;
	type MetadataDepositBase = ConstU128<0>;
	type MetadataDepositPerByte = ConstU128<0>;
	type ApprovalDeposit = ConstU128<0>;
	type StringLimit = ConstU32<64>;
	type Freezer = ();
	type Extra = ();
	type WeightInfo = ();
	type RemoveItemsLimit = ConstU32<1000>;
	type CallbackHandle = ();
	type Holder = ();
}

parameter_types! {
	pub static FeedRounds: HashMap<FeedId, FeedRound> = HashMap::new();
}

pub struct MockFeeds;
impl PriceFeed<FeedId> for MockFeeds {
	fn latest_round(feed: FeedId) -> Option<FeedRound> {
		FeedRounds::get().get(&feed).copied()
	}
}

/// Set a fresh feed round, price quoted in whole dollars.
pub fn set_price(feed: FeedId, dollars: i128) {
	FeedRounds::mutate(|rounds| {
		rounds.insert(
			feed,
			FeedRound {
				answer: dollars * 100_000_000,
				updated_at: NOW,
			},
		);
	});
}

pub struct MockUnixTime;
impl UnixTime for MockUnixTime {
	fn now() -> core::time::Duration {
		core::time::Duration::from_secs(NOW)
	}
}

impl pallet_prices::Config for Runtime {
	type CurrencyId = CurrencyId;
	type FeedId = FeedId;
	type Source = MockFeeds;
	type UnixTime = MockUnixTime;
	type MaxPriceAge = ConstU64<10_800>;
	type MaxSupportedAssets = ConstU32<8>;
}

parameter_types! {
	pub const VaultsPalletId: PalletId = PalletId(*b"susd/vlt");
}

impl pallet_vaults::Config for Runtime {
	type CurrencyId = CurrencyId;
	type Registry = Prices;
	type Valuation = Prices;
	type PalletId = VaultsPalletId;
}

parameter_types! {
	pub const GetSyntheticCurrencyId: CurrencyId = SUSD;
	// only half of the collateral value counts toward solvency
	pub LiquidationThresholdValue: Ratio = Ratio::saturating_from_rational(50, 100);
	pub LiquidationBonusValue: Rate = Rate::saturating_from_rational(10, 100);
	pub MinimumHealthFactorValue: Ratio = Ratio::one();
}

impl Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type Currency = Assets;
	type SyntheticCurrencyId = GetSyntheticCurrencyId;
	type LiquidationThreshold = LiquidationThresholdValue;
	type LiquidationBonus = LiquidationBonusValue;
	type MinimumHealthFactor = MinimumHealthFactorValue;
}

pub struct ExtBuilder;

impl Default for ExtBuilder {
	fn default() -> Self {
		Self
	}
}

impl ExtBuilder {
	pub fn build(self) -> sp_io::TestExternalities {
		let mut t = frame_system::GenesisConfig::<Runtime>::default()
			.build_storage()
			.unwrap();

		pallet_balances::GenesisConfig::<Runtime> {
			balances: vec![(ALICE, 1_000_000), (BOB, 1_000_000)],
			..Default::default()
		}
		.assimilate_storage(&mut t)
		.unwrap();

		pallet_assets::GenesisConfig::<Runtime> {
			assets: vec![(ETH, ALICE, true, 1), (WBTC, ALICE, true, 1), (SUSD, ALICE, true, 1)],
			accounts: vec![
				(ETH, ALICE, 100 * ONE),
				(ETH, BOB, 100 * ONE),
				(WBTC, ALICE, 10 * ONE),
				(WBTC, BOB, 10 * ONE),
			],
			..Default::default()
		}
		.assimilate_storage(&mut t)
		.unwrap();

		pallet_prices::GenesisConfig::<Runtime> {
			assets: vec![ETH, WBTC],
			feeds: vec![ETH_FEED, WBTC_FEED],
			_phantom: Default::default(),
		}
		.assimilate_storage(&mut t)
		.unwrap();

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| {
			System::set_block_number(1);
			set_price(ETH_FEED, 2_000);
			set_price(WBTC_FEED, 40_000);
		});
		ext
	}
}
