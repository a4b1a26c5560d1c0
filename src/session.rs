// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::User;

/// Current identity. Login and signup accept any identifier without
/// verification; there is no server boundary to protect.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Session { user: None }
    }

    pub fn from_user(user: Option<User>) -> Self {
        Session { user }
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn login(&mut self, identifier: &str) -> Result<&User, StoreError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(StoreError::validation("user", "must not be empty"));
        }
        self.user = Some(User {
            name: identifier.to_string(),
        });
        Ok(self.user.as_ref().unwrap())
    }

    /// Identical to login in effect; no credentials are stored either way.
    pub fn signup(&mut self, identifier: &str) -> Result<&User, StoreError> {
        self.login(identifier)
    }

    pub fn logout(&mut self) -> Option<User> {
        self.user.take()
    }
}
