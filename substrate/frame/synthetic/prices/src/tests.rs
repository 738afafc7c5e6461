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

//! Unit tests for the prices module.

#![cfg(test)]

use super::*;
use frame_support::{assert_noop, assert_ok};
use mock::*;

#[test]
fn genesis_registry_work() {
	ExtBuilder::default().build().execute_with(|| {
		assert_eq!(
			<Prices as AssetRegistry<CurrencyId>>::supported_assets(),
			vec![ETH, WBTC]
		);
		assert!(<Prices as AssetRegistry<CurrencyId>>::is_supported(&ETH));
		assert!(<Prices as AssetRegistry<CurrencyId>>::is_supported(&WBTC));
		assert!(!<Prices as AssetRegistry<CurrencyId>>::is_supported(&DOGE));
		assert_eq!(Prices::price_feeds(ETH), Some(ETH_FEED));
		assert_eq!(Prices::price_feeds(WBTC), Some(WBTC_FEED));
		assert_eq!(Prices::price_feeds(DOGE), None);
	});
}

#[test]
fn feed_price_scales_to_eighteen_decimals() {
	ExtBuilder::default().build().execute_with(|| {
		// $2000 with 8 feed decimals becomes 2000 * 1e18
		assert_eq!(
			Prices::feed_price(ETH),
			Ok(Price::from_inner(2_000_000_000_000_000_000_000))
		);
	});
}

#[test]
fn feed_price_rejects_unregistered_asset() {
	ExtBuilder::default().build().execute_with(|| {
		assert_noop!(Prices::feed_price(DOGE), Error::<Runtime>::AssetNotRegistered);
	});
}

#[test]
fn feed_price_rejects_missing_round() {
	ExtBuilder::default().build().execute_with(|| {
		remove_feed_round(ETH_FEED);
		assert_noop!(Prices::feed_price(ETH), Error::<Runtime>::InvalidFeedPrice);
	});
}

#[test]
fn feed_price_rejects_stale_round() {
	ExtBuilder::default().build().execute_with(|| {
		// exactly at the age limit is still acceptable
		set_feed_round(ETH_FEED, 2_000_0000_0000, NOW - MAX_PRICE_AGE);
		assert_ok!(Prices::feed_price(ETH));

		set_feed_round(ETH_FEED, 2_000_0000_0000, NOW - MAX_PRICE_AGE - 1);
		assert_noop!(Prices::feed_price(ETH), Error::<Runtime>::InvalidFeedPrice);
	});
}

#[test]
fn feed_price_rejects_non_positive_answer() {
	ExtBuilder::default().build().execute_with(|| {
		set_feed_round(ETH_FEED, 0, NOW);
		assert_noop!(Prices::feed_price(ETH), Error::<Runtime>::InvalidFeedPrice);

		set_feed_round(ETH_FEED, -1, NOW);
		assert_noop!(Prices::feed_price(ETH), Error::<Runtime>::InvalidFeedPrice);
	});
}

#[test]
fn usd_value_work() {
	ExtBuilder::default().build().execute_with(|| {
		// 10 ETH at $2000 is worth 20000 USD
		assert_eq!(
			Prices::usd_value(ETH, 10_000_000_000_000_000_000),
			Ok(20_000_000_000_000_000_000_000)
		);
		// 0.5 WBTC at $40000 is worth 20000 USD
		assert_eq!(
			Prices::usd_value(WBTC, 500_000_000_000_000_000),
			Ok(20_000_000_000_000_000_000_000)
		);
		assert_eq!(Prices::usd_value(ETH, 0), Ok(0));
		assert_noop!(
			Prices::usd_value(DOGE, 1),
			Error::<Runtime>::AssetNotRegistered
		);
	});
}

#[test]
fn asset_amount_for_usd_work() {
	ExtBuilder::default().build().execute_with(|| {
		// 20000 USD buys 10 ETH at $2000
		assert_eq!(
			Prices::asset_amount_for_usd(ETH, 20_000_000_000_000_000_000_000),
			Ok(10_000_000_000_000_000_000)
		);
		// 100 USD buys 0.05 ETH
		assert_eq!(
			Prices::asset_amount_for_usd(ETH, 100_000_000_000_000_000_000),
			Ok(50_000_000_000_000_000)
		);
		assert_noop!(
			Prices::asset_amount_for_usd(DOGE, 1),
			Error::<Runtime>::AssetNotRegistered
		);
	});
}

#[test]
fn valuation_round_trip_truncates_at_most_one_unit() {
	ExtBuilder::default().build().execute_with(|| {
		// an awkward price so the conversions actually truncate: $1234.56789012
		set_feed_round(ETH_FEED, 123_456_789_012, NOW);

		for amount in [
			1_u128,
			999_u128,
			123_456_789_u128,
			1_000_000_000_000_000_000_u128,
			987_654_321_987_654_321_u128,
		] {
			let value = Prices::usd_value(ETH, amount).unwrap();
			let back = Prices::asset_amount_for_usd(ETH, value).unwrap();
			assert!(back <= amount);
			assert!(amount - back <= 1);
		}
	});
}

#[test]
fn conversions_propagate_feed_failures() {
	ExtBuilder::default().build().execute_with(|| {
		set_feed_round(ETH_FEED, 2_000_0000_0000, NOW - MAX_PRICE_AGE - 1);
		assert_noop!(
			Prices::usd_value(ETH, 1_000_000_000_000_000_000),
			Error::<Runtime>::InvalidFeedPrice
		);
		assert_noop!(
			Prices::asset_amount_for_usd(ETH, 1_000_000_000_000_000_000),
			Error::<Runtime>::InvalidFeedPrice
		);
	});
}
