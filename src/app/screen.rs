// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Register,
    Users,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Register, Screen::Users];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Screen::Register => "Register",
            Screen::Users => "Users",
        }
    }
}
