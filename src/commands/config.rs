// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_setting, required, set_setting};
use anyhow::{Result, bail};
use rusqlite::Connection;

const KEYS: [&str; 1] = ["currency"];

fn known(key: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        bail!("Unknown setting '{}' (known: {})", key, KEYS.join(", "));
    }
    Ok(())
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = required(sub, "key")?;
            known(key)?;
            match get_setting(conn, key)? {
                Some(v) => println!("{} = {}", key, v),
                None => println!("{} is not set", key),
            }
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            known(key)?;
            let value = required(sub, "value")?.trim().to_uppercase();
            set_setting(conn, key, &value)?;
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
