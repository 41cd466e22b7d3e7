// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entity mutations with their guards. Every check here runs before the
//! store is written to.

pub mod budgets;
pub mod categories;
pub mod goals;
pub mod transactions;
