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

//! # Prices Module
//!
//! ## Overview
//!
//! Prices module keeps the immutable registry of supported collateral
//! assets and wraps their external price feeds. It converts between an
//! asset's native amount and its USD value, rejecting feed rounds that are
//! stale or report a non-positive price.
//!
//! The registry is built once at genesis and never changes afterwards:
//! there is no extrinsic to add or remove an asset.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

use frame_support::{pallet_prelude::*, traits::UnixTime};
use pallet_traits::{AssetRegistry, Balance, FeedRound, Price, PriceFeed, ValuationProvider};
use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};
use sp_runtime::{ArithmeticError, DispatchError, FixedPointNumber};
use sp_std::{marker::PhantomData, prelude::*};

mod mock;
mod tests;

pub use pallet::*;

/// Feeds report with 8 decimals, `Price` carries 18.
pub const FEED_SCALE: u128 = 10_000_000_000;

#[frame_support::pallet]
pub mod pallet {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The collateral asset identifier type.
		type CurrencyId: Parameter + Member + Copy + MaybeSerializeDeserialize + Ord + MaxEncodedLen;

		/// Reference to one external price feed.
		type FeedId: Parameter + Member + Copy + MaybeSerializeDeserialize + MaxEncodedLen;

		/// The external price feed collaborator.
		type Source: PriceFeed<Self::FeedId>;

		/// Time used for the feed staleness check.
		type UnixTime: UnixTime;

		/// A feed round older than this many seconds is rejected.
		#[pallet::constant]
		type MaxPriceAge: Get<u64>;

		/// Hard cap on the number of registered collateral assets.
		#[pallet::constant]
		type MaxSupportedAssets: Get<u32>;
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The asset has no registered price feed.
		AssetNotRegistered,
		/// Feed price is missing, stale or non-positive.
		InvalidFeedPrice,
	}

	/// All registered collateral assets, in registration order.
	///
	/// SupportedAssets: Vec<CurrencyId>
	#[pallet::storage]
	#[pallet::getter(fn supported_assets)]
	pub type SupportedAssets<T: Config> =
		StorageValue<_, BoundedVec<T::CurrencyId, T::MaxSupportedAssets>, ValueQuery>;

	/// The price feed serving each registered asset.
	///
	/// PriceFeeds: CurrencyId => FeedId
	#[pallet::storage]
	#[pallet::getter(fn price_feeds)]
	pub type PriceFeeds<T: Config> =
		StorageMap<_, Twox64Concat, T::CurrencyId, T::FeedId, OptionQuery>;

	#[pallet::genesis_config]
	#[derive(frame_support::DefaultNoBound)]
	pub struct GenesisConfig<T: Config> {
		pub assets: Vec<T::CurrencyId>,
		pub feeds: Vec<T::FeedId>,
		pub _phantom: PhantomData<T>,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			assert_eq!(
				self.assets.len(),
				self.feeds.len(),
				"each supported asset needs exactly one price feed"
			);
			let assets: BoundedVec<T::CurrencyId, T::MaxSupportedAssets> =
				self.assets.clone().try_into().expect("too many supported assets");
			for (asset, feed) in self.assets.iter().zip(self.feeds.iter()) {
				PriceFeeds::<T>::insert(asset, feed);
			}
			SupportedAssets::<T>::put(assets);
		}
	}

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::call]
	impl<T: Config> Pallet<T> {}
}

impl<T: Config> Pallet<T> {
	/// The current 18-decimal USD price of one unit of `asset`, read from
	/// its registered feed.
	pub fn feed_price(asset: T::CurrencyId) -> Result<Price, DispatchError> {
		let feed = Self::price_feeds(asset).ok_or(Error::<T>::AssetNotRegistered)?;
		let FeedRound { answer, updated_at } =
			T::Source::latest_round(feed).ok_or(Error::<T>::InvalidFeedPrice)?;

		let now = T::UnixTime::now().as_secs();
		if answer <= 0 || now.saturating_sub(updated_at) > T::MaxPriceAge::get() {
			log::debug!(
				target: "prices",
				"rejected feed round: answer {:?}, updated_at {:?}, now {:?}",
				answer,
				updated_at,
				now,
			);
			return Err(Error::<T>::InvalidFeedPrice.into());
		}

		let inner = (answer as u128)
			.checked_mul(FEED_SCALE)
			.ok_or(Error::<T>::InvalidFeedPrice)?;
		Ok(Price::from_inner(inner))
	}
}

impl<T: Config> AssetRegistry<T::CurrencyId> for Pallet<T> {
	fn supported_assets() -> Vec<T::CurrencyId> {
		SupportedAssets::<T>::get().into_inner()
	}

	fn is_supported(asset: &T::CurrencyId) -> bool {
		PriceFeeds::<T>::contains_key(asset)
	}
}

impl<T: Config> ValuationProvider<T::CurrencyId> for Pallet<T> {
	fn usd_value(asset: T::CurrencyId, amount: Balance) -> Result<Balance, DispatchError> {
		let price = Self::feed_price(asset)?;
		price
			.checked_mul_int(amount)
			.ok_or_else(|| ArithmeticError::Overflow.into())
	}

	fn asset_amount_for_usd(
		asset: T::CurrencyId,
		usd_value: Balance,
	) -> Result<Balance, DispatchError> {
		let price = Self::feed_price(asset)?;
		// amount = usd_value / price, truncating like the forward direction
		multiply_by_rational_with_rounding(usd_value, Price::DIV, price.into_inner(), Rounding::Down)
			.ok_or_else(|| ArithmeticError::Overflow.into())
	}
}
