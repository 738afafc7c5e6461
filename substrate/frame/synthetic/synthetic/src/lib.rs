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

//! # Synthetic Module
//!
//! ## Overview
//!
//! The entry of the synthetic USD protocol for users: deposit and redeem
//! collateral, issue and repay the synthetic against it, and liquidate
//! vaults that have fallen below the minimum health factor.
//!
//! Every dispatchable runs under an execution lock, so no guarded
//! operation can re-enter this pallet through an external collaborator
//! while another one is still executing.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

use frame_support::pallet_prelude::*;
use frame_system::pallet_prelude::*;
use pallet_synthetic_engine::CurrencyIdOf;
use pallet_traits::Balance;
use sp_runtime::traits::StaticLookup;
use sp_std::prelude::*;

mod mock;
pub mod weights;

pub use pallet::*;
pub use weights::WeightInfo;

pub type EngineOf<T> = pallet_synthetic_engine::Pallet<T>;

#[frame_support::pallet]
pub mod pallet {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config + pallet_synthetic_engine::Config {
		/// Weight information for the extrinsics in this module.
		type WeightInfo: WeightInfo;
	}

	#[pallet::error]
	pub enum Error<T> {
		/// A guarded operation is already executing.
		ReentrantCall,
	}

	/// Set while a guarded operation executes; released when it finishes.
	///
	/// ExecutionLock: bool
	#[pallet::storage]
	pub type ExecutionLock<T: Config> = StorageValue<_, bool, ValueQuery>;

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Deposit `amount` of `asset` into the caller's vault.
		///
		/// - `asset`: collateral currency id.
		/// - `amount`: amount to deposit, in the asset's native unit.
		#[pallet::call_index(0)]
		#[pallet::weight(<T as Config>::WeightInfo::deposit_collateral())]
		pub fn deposit_collateral(
			origin: OriginFor<T>,
			asset: CurrencyIdOf<T>,
			#[pallet::compact] amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_execution_lock(|| EngineOf::<T>::deposit_collateral(&who, asset, amount))
		}

		/// Withdraw `amount` of `asset` from the caller's vault. The
		/// remaining position must stay healthy.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as Config>::WeightInfo::redeem_collateral())]
		pub fn redeem_collateral(
			origin: OriginFor<T>,
			asset: CurrencyIdOf<T>,
			#[pallet::compact] amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_execution_lock(|| EngineOf::<T>::redeem_collateral(&who, asset, amount))
		}

		/// Issue `amount` of the synthetic to the caller against their
		/// deposited collateral.
		#[pallet::call_index(2)]
		#[pallet::weight(<T as Config>::WeightInfo::mint())]
		pub fn mint(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_execution_lock(|| EngineOf::<T>::mint_synthetic(&who, amount))
		}

		/// Repay `amount` of the caller's debt, burning the synthetic.
		#[pallet::call_index(3)]
		#[pallet::weight(<T as Config>::WeightInfo::burn())]
		pub fn burn(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_execution_lock(|| EngineOf::<T>::burn_synthetic(&who, &who, amount))
		}

		/// Deposit collateral and issue synthetic in one call.
		#[pallet::call_index(4)]
		#[pallet::weight(<T as Config>::WeightInfo::deposit_and_mint())]
		pub fn deposit_and_mint(
			origin: OriginFor<T>,
			asset: CurrencyIdOf<T>,
			#[pallet::compact] collateral_amount: Balance,
			#[pallet::compact] mint_amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_execution_lock(|| {
				EngineOf::<T>::deposit_and_mint(&who, asset, collateral_amount, mint_amount)
			})
		}

		/// Repay debt and withdraw collateral in one call; the repayment
		/// happens first and relaxes the closing health check.
		#[pallet::call_index(5)]
		#[pallet::weight(<T as Config>::WeightInfo::repay_and_redeem())]
		pub fn repay_and_redeem(
			origin: OriginFor<T>,
			asset: CurrencyIdOf<T>,
			#[pallet::compact] burn_amount: Balance,
			#[pallet::compact] collateral_amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::with_execution_lock(|| {
				EngineOf::<T>::repay_and_redeem(&who, asset, burn_amount, collateral_amount)
			})
		}

		/// Cover `debt_to_cover` of `borrower`'s debt with the caller's
		/// synthetic and seize the equivalent collateral plus the
		/// liquidation bonus.
		///
		/// - `borrower`: owner of the vault to liquidate.
		/// - `asset`: the collateral currency to seize.
		/// - `debt_to_cover`: amount of the borrower's debt to repay.
		#[pallet::call_index(6)]
		#[pallet::weight(<T as Config>::WeightInfo::liquidate())]
		pub fn liquidate(
			origin: OriginFor<T>,
			borrower: <T::Lookup as StaticLookup>::Source,
			asset: CurrencyIdOf<T>,
			#[pallet::compact] debt_to_cover: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let borrower = T::Lookup::lookup(borrower)?;
			Self::with_execution_lock(|| {
				EngineOf::<T>::liquidate(&who, &borrower, asset, debt_to_cover)
			})
		}
	}
}

impl<T: Config> Pallet<T> {
	// every public operation runs inside this guard: a re-entrant call
	// arriving through an external collaborator observes the held lock and
	// fails
	fn with_execution_lock(f: impl FnOnce() -> DispatchResult) -> DispatchResult {
		ensure!(!ExecutionLock::<T>::get(), Error::<T>::ReentrantCall);
		ExecutionLock::<T>::put(true);
		let result = f();
		ExecutionLock::<T>::kill();
		result
	}
}
