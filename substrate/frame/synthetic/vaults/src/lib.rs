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

//! # Vaults Module
//!
//! ## Overview
//!
//! Vaults module owns the authoritative record of every account's deposited
//! collateral and issued synthetic debt. It is a pure ledger: checked
//! arithmetic mutators plus read-only views, with no token movement. Moving
//! the underlying assets and enforcing solvency is the engine's job.
//!
//! A vault record springs into existence on the first deposit or issuance
//! and is removed from storage once driven back to zero.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

pub use pallet::*;

mod mock;
mod tests;

#[frame_support::pallet]
pub mod pallet {
	use frame_support::{pallet_prelude::*, PalletId};
	use pallet_traits::{AccountSnapshot, AssetRegistry, Balance, ValuationProvider};
	use sp_runtime::{
		traits::{AccountIdConversion, Zero},
		ArithmeticError, DispatchError, DispatchResult,
	};
	use sp_std::prelude::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The collateral asset identifier type.
		type CurrencyId: Parameter + Member + Copy + MaybeSerializeDeserialize + Ord + MaxEncodedLen;

		/// The fixed set of assets accepted as collateral.
		type Registry: AssetRegistry<Self::CurrencyId>;

		/// USD valuation of collateral amounts.
		type Valuation: ValuationProvider<Self::CurrencyId>;

		/// The vaults module id, derives the account keeping custody of all
		/// deposited collateral.
		#[pallet::constant]
		type PalletId: Get<PalletId>;
	}

	#[pallet::error]
	pub enum Error<T> {
		/// A positive amount is required.
		ZeroAmount,
		/// The asset is not accepted as collateral.
		CollateralNotSupported,
		/// Deposited collateral is smaller than the requested decrement.
		CollateralNotEnough,
		/// Issued debt is smaller than the requested decrement.
		DebtNotEnough,
	}

	/// Collateral deposited, per account and asset.
	///
	/// Collaterals: double_map AccountId, CurrencyId => Balance
	#[pallet::storage]
	#[pallet::getter(fn collaterals)]
	pub type Collaterals<T: Config> = StorageDoubleMap<
		_,
		Twox64Concat,
		T::AccountId,
		Twox64Concat,
		T::CurrencyId,
		Balance,
		ValueQuery,
	>;

	/// Synthetic units issued, per account.
	///
	/// Debts: AccountId => Balance
	#[pallet::storage]
	#[pallet::getter(fn debts)]
	pub type Debts<T: Config> = StorageMap<_, Twox64Concat, T::AccountId, Balance, ValueQuery>;

	/// Total collateral deposited, per asset.
	///
	/// TotalCollaterals: CurrencyId => Balance
	#[pallet::storage]
	#[pallet::getter(fn total_collaterals)]
	pub type TotalCollaterals<T: Config> =
		StorageMap<_, Twox64Concat, T::CurrencyId, Balance, ValueQuery>;

	/// Total synthetic units issued across all accounts.
	///
	/// TotalDebt: Balance
	#[pallet::storage]
	#[pallet::getter(fn total_debt)]
	pub type TotalDebt<T: Config> = StorageValue<_, Balance, ValueQuery>;

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::call]
	impl<T: Config> Pallet<T> {}

	impl<T: Config> Pallet<T> {
		/// The account keeping custody of all deposited collateral.
		pub fn account_id() -> T::AccountId {
			T::PalletId::get().into_account_truncating()
		}

		/// Record `amount` of `asset` as deposited by `who`.
		pub fn deposit(
			who: &T::AccountId,
			asset: T::CurrencyId,
			amount: Balance,
		) -> DispatchResult {
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
			ensure!(
				T::Registry::is_supported(&asset),
				Error::<T>::CollateralNotSupported
			);

			Collaterals::<T>::try_mutate(who, asset, |collateral| -> DispatchResult {
				*collateral = collateral
					.checked_add(amount)
					.ok_or(ArithmeticError::Overflow)?;
				Ok(())
			})?;
			TotalCollaterals::<T>::try_mutate(asset, |total| -> DispatchResult {
				*total = total.checked_add(amount).ok_or(ArithmeticError::Overflow)?;
				Ok(())
			})
		}

		/// Deduct `amount` of `asset` from `who`'s deposit.
		pub fn withdraw(
			who: &T::AccountId,
			asset: T::CurrencyId,
			amount: Balance,
		) -> DispatchResult {
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			Collaterals::<T>::try_mutate_exists(who, asset, |maybe_collateral| -> DispatchResult {
				let collateral = maybe_collateral.take().unwrap_or_default();
				let remaining = collateral
					.checked_sub(amount)
					.ok_or(Error::<T>::CollateralNotEnough)?;
				*maybe_collateral = if remaining.is_zero() { None } else { Some(remaining) };
				Ok(())
			})?;
			TotalCollaterals::<T>::mutate(asset, |total| *total = total.saturating_sub(amount));
			Ok(())
		}

		/// Record `amount` of newly issued synthetic debt for `who`.
		pub fn increase_debt(who: &T::AccountId, amount: Balance) -> DispatchResult {
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			Debts::<T>::try_mutate(who, |debt| -> DispatchResult {
				*debt = debt.checked_add(amount).ok_or(ArithmeticError::Overflow)?;
				Ok(())
			})?;
			TotalDebt::<T>::try_mutate(|total| -> DispatchResult {
				*total = total.checked_add(amount).ok_or(ArithmeticError::Overflow)?;
				Ok(())
			})
		}

		/// Deduct `amount` of repaid synthetic debt from `who`.
		pub fn decrease_debt(who: &T::AccountId, amount: Balance) -> DispatchResult {
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			Debts::<T>::try_mutate_exists(who, |maybe_debt| -> DispatchResult {
				let debt = maybe_debt.take().unwrap_or_default();
				let remaining = debt.checked_sub(amount).ok_or(Error::<T>::DebtNotEnough)?;
				*maybe_debt = if remaining.is_zero() { None } else { Some(remaining) };
				Ok(())
			})?;
			TotalDebt::<T>::mutate(|total| *total = total.saturating_sub(amount));
			Ok(())
		}

		/// The account's issued debt and the USD value of its collateral,
		/// summed over the registry in registration order.
		pub fn account_snapshot(who: &T::AccountId) -> Result<AccountSnapshot, DispatchError> {
			let mut collateral_value: Balance = Zero::zero();
			for asset in T::Registry::supported_assets() {
				let deposited = Self::collaterals(who, asset);
				if deposited.is_zero() {
					continue;
				}
				let value = T::Valuation::usd_value(asset, deposited)?;
				collateral_value = collateral_value
					.checked_add(value)
					.ok_or(ArithmeticError::Overflow)?;
			}
			Ok(AccountSnapshot {
				debt: Self::debts(who),
				collateral_value,
			})
		}
	}
}
