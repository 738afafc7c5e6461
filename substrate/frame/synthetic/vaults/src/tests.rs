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

//! Unit tests for the vaults module.

#![cfg(test)]

use super::*;
use frame_support::{assert_noop, assert_ok};
use mock::*;
use pallet_traits::AccountSnapshot;

#[test]
fn deposit_work() {
	ExtBuilder::default().build().execute_with(|| {
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 0);
		assert!(!Collaterals::<Runtime>::contains_key(&ALICE, ETH));

		assert_ok!(Vaults::deposit(&ALICE, ETH, 500));
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 500);
		assert_eq!(Vaults::total_collaterals(ETH), 500);

		// deposits accumulate
		assert_ok!(Vaults::deposit(&ALICE, ETH, 300));
		assert_ok!(Vaults::deposit(&BOB, ETH, 100));
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 800);
		assert_eq!(Vaults::collaterals(&BOB, ETH), 100);
		assert_eq!(Vaults::total_collaterals(ETH), 900);

		// per-asset records are independent
		assert_ok!(Vaults::deposit(&ALICE, WBTC, 7));
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 800);
		assert_eq!(Vaults::collaterals(&ALICE, WBTC), 7);
		assert_eq!(Vaults::total_collaterals(WBTC), 7);
	});
}

#[test]
fn deposit_rejects_zero_amount() {
	ExtBuilder::default().build().execute_with(|| {
		assert_noop!(Vaults::deposit(&ALICE, ETH, 0), Error::<Runtime>::ZeroAmount);
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 0);
	});
}

#[test]
fn deposit_rejects_unsupported_asset() {
	ExtBuilder::default().build().execute_with(|| {
		assert_noop!(
			Vaults::deposit(&ALICE, DOGE, 100),
			Error::<Runtime>::CollateralNotSupported
		);
		assert_eq!(Vaults::collaterals(&ALICE, DOGE), 0);
		assert_eq!(Vaults::total_collaterals(DOGE), 0);
	});
}

#[test]
fn withdraw_work() {
	ExtBuilder::default().build().execute_with(|| {
		assert_ok!(Vaults::deposit(&ALICE, ETH, 500));

		assert_ok!(Vaults::withdraw(&ALICE, ETH, 200));
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 300);
		assert_eq!(Vaults::total_collaterals(ETH), 300);

		// drained records are removed from storage
		assert_ok!(Vaults::withdraw(&ALICE, ETH, 300));
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 0);
		assert!(!Collaterals::<Runtime>::contains_key(&ALICE, ETH));
		assert_eq!(Vaults::total_collaterals(ETH), 0);
	});
}

#[test]
fn withdraw_rejects_excess_amount() {
	ExtBuilder::default().build().execute_with(|| {
		assert_ok!(Vaults::deposit(&ALICE, ETH, 500));
		assert_noop!(
			Vaults::withdraw(&ALICE, ETH, 501),
			Error::<Runtime>::CollateralNotEnough
		);
		assert_noop!(
			Vaults::withdraw(&BOB, ETH, 1),
			Error::<Runtime>::CollateralNotEnough
		);
		assert_noop!(Vaults::withdraw(&ALICE, ETH, 0), Error::<Runtime>::ZeroAmount);
		assert_eq!(Vaults::collaterals(&ALICE, ETH), 500);
	});
}

#[test]
fn debt_mutators_work() {
	ExtBuilder::default().build().execute_with(|| {
		assert_eq!(Vaults::debts(&ALICE), 0);

		assert_ok!(Vaults::increase_debt(&ALICE, 1_000));
		assert_ok!(Vaults::increase_debt(&ALICE, 500));
		assert_ok!(Vaults::increase_debt(&BOB, 200));
		assert_eq!(Vaults::debts(&ALICE), 1_500);
		assert_eq!(Vaults::debts(&BOB), 200);
		assert_eq!(Vaults::total_debt(), 1_700);

		assert_ok!(Vaults::decrease_debt(&ALICE, 700));
		assert_eq!(Vaults::debts(&ALICE), 800);
		assert_eq!(Vaults::total_debt(), 1_000);

		// repaid in full, the record disappears
		assert_ok!(Vaults::decrease_debt(&ALICE, 800));
		assert!(!Debts::<Runtime>::contains_key(&ALICE));
		assert_eq!(Vaults::total_debt(), 200);
	});
}

#[test]
fn debt_mutators_reject_bad_amounts() {
	ExtBuilder::default().build().execute_with(|| {
		assert_noop!(Vaults::increase_debt(&ALICE, 0), Error::<Runtime>::ZeroAmount);
		assert_noop!(Vaults::decrease_debt(&ALICE, 0), Error::<Runtime>::ZeroAmount);

		assert_ok!(Vaults::increase_debt(&ALICE, 100));
		assert_noop!(
			Vaults::decrease_debt(&ALICE, 101),
			Error::<Runtime>::DebtNotEnough
		);
		assert_eq!(Vaults::debts(&ALICE), 100);
		assert_eq!(Vaults::total_debt(), 100);
	});
}

#[test]
fn account_snapshot_work() {
	ExtBuilder::default().build().execute_with(|| {
		assert_eq!(
			Vaults::account_snapshot(&ALICE),
			Ok(AccountSnapshot::default())
		);

		assert_ok!(Vaults::deposit(&ALICE, ETH, 3));
		assert_ok!(Vaults::deposit(&ALICE, WBTC, 2));
		assert_ok!(Vaults::increase_debt(&ALICE, 500));

		// 3 ETH * 2000 + 2 WBTC * 40000
		assert_eq!(
			Vaults::account_snapshot(&ALICE),
			Ok(AccountSnapshot {
				debt: 500,
				collateral_value: 86_000,
			})
		);

		// other accounts are untouched
		assert_eq!(
			Vaults::account_snapshot(&BOB),
			Ok(AccountSnapshot::default())
		);
	});
}
