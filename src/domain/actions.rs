//! Sub-operation selectors for the compound tools.
//!
//! Each selector parses from the `action` argument; anything outside the fixed
//! set comes back as the raw string so the executor can report it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

macro_rules! action_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|a| a.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

action_enum!(AttestationAction { Add => "add" });
action_enum!(RepoAction { List => "list", Enable => "enable", Disable => "disable" });
action_enum!(VexAction { Add => "add", List => "list" });
action_enum!(EnvironmentAction { List => "list", Set => "set" });
action_enum!(CacheAction { Df => "df", Prune => "prune" });
action_enum!(WatchAction { Enable => "enable", Disable => "disable" });
