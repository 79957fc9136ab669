// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// A record whose identity is `(region, id)`.
pub struct Account {
    pub region: String,
    pub id: u32,
    pub data: String,
}

impl Account {
    pub fn new(id: u32) -> Self {
        Self {
            region: format!("region{}", id % 8),
            id,
            data: format!("data{id}"),
        }
    }
}

/// Projects an account to its identity.
pub fn account_identity(account: &Account) -> (String, u32) {
    (account.region.clone(), account.id)
}
