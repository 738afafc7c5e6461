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

//! Mocks for the prices module.

#![cfg(test)]

use super::*;
use frame_support::{
	construct_runtime, derive_impl, parameter_types,
	traits::{ConstU32, ConstU64},
};
use sp_runtime::{traits::IdentityLookup, BuildStorage};
use std::collections::HashMap;

pub type AccountId = u128;
pub type CurrencyId = u32;
pub type FeedId = u32;

pub const ETH: CurrencyId = 1;
pub const WBTC: CurrencyId = 2;
pub const DOGE: CurrencyId = 3;
pub const ETH_FEED: FeedId = 10;
pub const WBTC_FEED: FeedId = 20;

/// Fixed "now" of the mock clock, unix seconds.
pub const NOW: u64 = 1_700_000_000;
/// Feed rounds older than this are stale.
pub const MAX_PRICE_AGE: u64 = 10_800;

type Block = frame_system::mocking::MockBlock<Runtime>;

construct_runtime!(
	pub enum Runtime {
		System: frame_system,
		Prices: pallet,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Runtime {
	type AccountId = AccountId;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = Block;
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

pub fn set_feed_round(feed: FeedId, answer: i128, updated_at: u64) {
	FeedRounds::mutate(|rounds| {
		rounds.insert(feed, FeedRound { answer, updated_at });
	});
}

pub fn remove_feed_round(feed: FeedId) {
	FeedRounds::mutate(|rounds| {
		rounds.remove(&feed);
	});
}

pub struct MockUnixTime;
impl UnixTime for MockUnixTime {
	fn now() -> core::time::Duration {
		core::time::Duration::from_secs(NOW)
	}
}

impl Config for Runtime {
	type CurrencyId = CurrencyId;
	type FeedId = FeedId;
	type Source = MockFeeds;
	type UnixTime = MockUnixTime;
	type MaxPriceAge = ConstU64<MAX_PRICE_AGE>;
	type MaxSupportedAssets = ConstU32<8>;
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
		pallet::GenesisConfig::<Runtime> {
			assets: vec![ETH, WBTC],
			feeds: vec![ETH_FEED, WBTC_FEED],
			_phantom: Default::default(),
		}
		.assimilate_storage(&mut t)
		.unwrap();

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| {
			System::set_block_number(1);
			// ETH at $2000, WBTC at $40000, both fresh
			set_feed_round(ETH_FEED, 2_000_0000_0000, NOW);
			set_feed_round(WBTC_FEED, 40_000_0000_0000, NOW);
		});
		ext
	}
}
