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

//! # Synthetic Engine Module
//!
//! ## Overview
//!
//! The engine orchestrates every balance-changing operation of the
//! protocol: collateral deposit and redemption, synthetic issuance and
//! repayment, and liquidation of unhealthy vaults. Each operation mutates
//! the vaults ledger, moves the underlying tokens, and finishes by checking
//! the solvency invariant.
//!
//! ### Key Concepts
//!
//! * **Health factor:** the USD value of a vault's collateral, discounted
//!   by the liquidation threshold, divided by its issued debt. A vault with
//!   no debt has infinite health. Every operation must leave the affected
//!   vaults at or above the minimum health factor.
//! * **Liquidation:** anyone may repay part of an unhealthy vault's debt
//!   and seize the covered value's worth of collateral plus a bonus. The
//!   liquidation must strictly improve the vault's health and must leave
//!   the liquidator's own vault healthy.
//!
//! Operations are atomic: a failure at any step, including a failed token
//! movement or a broken invariant discovered at the end, rolls back the
//! whole call.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

use frame_support::{
	pallet_prelude::*,
	traits::{
		fungibles::{self, Mutate},
		tokens::{Fortitude, Precision, Preservation},
	},
	transactional,
};
use pallet_traits::{AccountSnapshot, Balance, Rate, Ratio, ValuationProvider};
use sp_runtime::{
	traits::{Bounded, Zero},
	ArithmeticError, DispatchError, DispatchResult, FixedPointNumber,
};
use sp_std::prelude::*;

mod mock;

pub use pallet::*;

pub type CurrencyIdOf<T> = <T as pallet_vaults::Config>::CurrencyId;
pub type VaultsOf<T> = pallet_vaults::Pallet<T>;

#[frame_support::pallet]
pub mod pallet {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config + pallet_vaults::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		/// Currency for moving collateral assets and for minting/burning
		/// the synthetic. The runtime must restrict the synthetic's
		/// mint/burn to this engine.
		type Currency: fungibles::Mutate<
			Self::AccountId,
			AssetId = CurrencyIdOf<Self>,
			Balance = Balance,
		>;

		/// The currency id of the issued synthetic asset.
		#[pallet::constant]
		type SyntheticCurrencyId: Get<CurrencyIdOf<Self>>;

		/// The share of collateral value that counts toward solvency.
		#[pallet::constant]
		type LiquidationThreshold: Get<Ratio>;

		/// Premium paid to a liquidator on top of the covered debt's
		/// collateral equivalent.
		#[pallet::constant]
		type LiquidationBonus: Get<Rate>;

		/// Vaults with debt must keep their health factor at or above this
		/// minimum.
		#[pallet::constant]
		type MinimumHealthFactor: Get<Ratio>;
	}

	#[pallet::error]
	pub enum Error<T> {
		/// A positive amount is required.
		ZeroAmount,
		/// The operation would leave the vault's health factor below the
		/// minimum.
		BelowMinimumHealthFactor,
		/// Only vaults below the minimum health factor can be liquidated.
		MustBeUnsafe,
		/// The liquidation did not strictly improve the vault's health
		/// factor.
		HealthFactorNotImproved,
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(crate) fn deposit_event)]
	pub enum Event<T: Config> {
		/// Collateral was deposited into a vault.
		CollateralDeposited {
			who: T::AccountId,
			asset: CurrencyIdOf<T>,
			amount: Balance,
		},
		/// Collateral left a vault.
		CollateralRedeemed {
			from: T::AccountId,
			to: T::AccountId,
			asset: CurrencyIdOf<T>,
			amount: Balance,
		},
		/// New synthetic units were issued against a vault.
		SyntheticIssued { who: T::AccountId, amount: Balance },
		/// Synthetic units were repaid and burned.
		SyntheticRepaid {
			who: T::AccountId,
			payer: T::AccountId,
			amount: Balance,
		},
		/// An unhealthy vault was liquidated.
		VaultLiquidated {
			borrower: T::AccountId,
			liquidator: T::AccountId,
			asset: CurrencyIdOf<T>,
			debt_covered: Balance,
			collateral_seized: Balance,
		},
	}

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::call]
	impl<T: Config> Pallet<T> {}
}

impl<T: Config> Pallet<T> {
	/// Health factor of a position: collateral value discounted by the
	/// liquidation threshold, divided by the issued debt. Maximum when no
	/// debt is issued.
	pub fn health_factor(debt: Balance, collateral_value: Balance) -> Ratio {
		let adjusted = T::LiquidationThreshold::get().saturating_mul_int(collateral_value);
		Ratio::checked_from_rational(adjusted, debt).unwrap_or_else(Ratio::max_value)
	}

	/// The current health factor of `who`'s vault.
	pub fn account_health_factor(who: &T::AccountId) -> Result<Ratio, DispatchError> {
		let AccountSnapshot {
			debt,
			collateral_value,
		} = VaultsOf::<T>::account_snapshot(who)?;
		Ok(Self::health_factor(debt, collateral_value))
	}

	/// Fail unless `who`'s vault satisfies the solvency invariant.
	pub fn ensure_healthy(who: &T::AccountId) -> DispatchResult {
		ensure!(
			Self::account_health_factor(who)? >= T::MinimumHealthFactor::get(),
			Error::<T>::BelowMinimumHealthFactor
		);
		Ok(())
	}

	/// Deposit `amount` of `asset` into `who`'s vault and take custody of
	/// the tokens.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn deposit_collateral(
		who: &T::AccountId,
		asset: CurrencyIdOf<T>,
		amount: Balance,
	) -> DispatchResult {
		VaultsOf::<T>::deposit(who, asset, amount)?;
		T::Currency::transfer(
			asset,
			who,
			&VaultsOf::<T>::account_id(),
			amount,
			Preservation::Expendable,
		)?;

		Self::deposit_event(Event::CollateralDeposited {
			who: who.clone(),
			asset,
			amount,
		});
		Ok(())
	}

	/// Withdraw `amount` of `asset` from `who`'s vault back to `who`. The
	/// remaining position must stay healthy.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn redeem_collateral(
		who: &T::AccountId,
		asset: CurrencyIdOf<T>,
		amount: Balance,
	) -> DispatchResult {
		Self::release_collateral(who, who, asset, amount)?;
		Self::ensure_healthy(who)?;

		Self::deposit_event(Event::CollateralRedeemed {
			from: who.clone(),
			to: who.clone(),
			asset,
			amount,
		});
		Ok(())
	}

	/// Issue `amount` of the synthetic to `who` against their collateral.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn mint_synthetic(who: &T::AccountId, amount: Balance) -> DispatchResult {
		VaultsOf::<T>::increase_debt(who, amount)?;
		Self::ensure_healthy(who)?;
		T::Currency::mint_into(T::SyntheticCurrencyId::get(), who, amount)?;

		Self::deposit_event(Event::SyntheticIssued {
			who: who.clone(),
			amount,
		});
		Ok(())
	}

	/// Repay `amount` of `who`'s debt with synthetic supplied by `payer`,
	/// burning the repaid units.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn burn_synthetic(
		who: &T::AccountId,
		payer: &T::AccountId,
		amount: Balance,
	) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

		let synthetic = T::SyntheticCurrencyId::get();
		let custody = VaultsOf::<T>::account_id();
		T::Currency::transfer(synthetic, payer, &custody, amount, Preservation::Expendable)?;
		T::Currency::burn_from(
			synthetic,
			&custody,
			amount,
			Preservation::Expendable,
			Precision::Exact,
			Fortitude::Polite,
		)?;
		VaultsOf::<T>::decrease_debt(who, amount)?;

		Self::deposit_event(Event::SyntheticRepaid {
			who: who.clone(),
			payer: payer.clone(),
			amount,
		});
		Ok(())
	}

	/// Deposit collateral and issue synthetic in one call.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn deposit_and_mint(
		who: &T::AccountId,
		asset: CurrencyIdOf<T>,
		collateral_amount: Balance,
		mint_amount: Balance,
	) -> DispatchResult {
		Self::deposit_collateral(who, asset, collateral_amount)?;
		Self::mint_synthetic(who, mint_amount)
	}

	/// Repay debt and withdraw collateral in one call. The debt is burned
	/// first so the repayment relaxes the closing health check.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn repay_and_redeem(
		who: &T::AccountId,
		asset: CurrencyIdOf<T>,
		burn_amount: Balance,
		collateral_amount: Balance,
	) -> DispatchResult {
		Self::burn_synthetic(who, who, burn_amount)?;
		Self::redeem_collateral(who, asset, collateral_amount)
	}

	/// Cover `debt_to_cover` of `borrower`'s debt with the liquidator's
	/// synthetic, seizing the covered value's worth of `asset` plus the
	/// liquidation bonus from the borrower's vault.
	///
	/// Ensured atomic.
	#[transactional]
	pub fn liquidate(
		liquidator: &T::AccountId,
		borrower: &T::AccountId,
		asset: CurrencyIdOf<T>,
		debt_to_cover: Balance,
	) -> DispatchResult {
		ensure!(!debt_to_cover.is_zero(), Error::<T>::ZeroAmount);

		let start_health = Self::account_health_factor(borrower)?;
		ensure!(
			start_health < T::MinimumHealthFactor::get(),
			Error::<T>::MustBeUnsafe
		);

		let seized_base = <T as pallet_vaults::Config>::Valuation::asset_amount_for_usd(
			asset,
			debt_to_cover,
		)?;
		let bonus = T::LiquidationBonus::get().saturating_mul_int(seized_base);
		let collateral_seized = seized_base
			.checked_add(bonus)
			.ok_or(ArithmeticError::Overflow)?;

		// a seizure larger than the borrower's deposit fails outright, there
		// is no partial cap
		Self::release_collateral(borrower, liquidator, asset, collateral_seized)?;
		Self::burn_synthetic(borrower, liquidator, debt_to_cover)?;

		let end_health = Self::account_health_factor(borrower)?;
		ensure!(
			end_health > start_health,
			Error::<T>::HealthFactorNotImproved
		);
		Self::ensure_healthy(liquidator)?;

		Self::deposit_event(Event::VaultLiquidated {
			borrower: borrower.clone(),
			liquidator: liquidator.clone(),
			asset,
			debt_covered: debt_to_cover,
			collateral_seized,
		});
		Ok(())
	}

	// ledger decrement plus custody payout, shared by redemption and
	// liquidation seizure
	fn release_collateral(
		from: &T::AccountId,
		to: &T::AccountId,
		asset: CurrencyIdOf<T>,
		amount: Balance,
	) -> DispatchResult {
		VaultsOf::<T>::withdraw(from, asset, amount)?;
		T::Currency::transfer(
			asset,
			&VaultsOf::<T>::account_id(),
			to,
			amount,
			Preservation::Expendable,
		)?;
		Ok(())
	}
}
