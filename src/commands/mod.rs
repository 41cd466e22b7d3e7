// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod config;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod reports;
pub mod transactions;

use anyhow::Result;
use chrono::{Datelike, Local, Month};

use crate::utils::{MONTHS, parse_month_name};

/// `--month`/`--year`, each falling back to today.
pub fn period(sub: &clap::ArgMatches) -> Result<(Month, i32)> {
    let today = Local::now().date_naive();
    period_or(sub, MONTHS[today.month0() as usize], today.year())
}

/// `--month`/`--year`, each falling back to the given period.
pub fn period_or(sub: &clap::ArgMatches, month: Month, year: i32) -> Result<(Month, i32)> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month_name(m)?,
        None => month,
    };
    let year = sub.get_one::<i32>("year").copied().unwrap_or(year);
    Ok((month, year))
}
