use serde::{Deserialize, Serialize};

/// Returned when a string does not name a variant of one of the enums below.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value: {value:?}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Escalation urgency. Declaration order is the escalation order, so `Ord` ranks `High` above `Mild`.
    Severity {
        Mild => "mild",
        Moderate => "moderate",
        High => "high",
    }
);

str_enum!(IllnessType {
    Cold => "cold",
    Flu => "flu",
    Warning => "warning",
});

str_enum!(SymptomCategory {
    General => "general",
    Head => "head",
    Throat => "throat",
    Chest => "chest",
});

str_enum!(
    /// Top-level screens of the app.
    AppView {
        Home => "home",
        Guide => "guide",
        Chat => "chat",
        Library => "library",
        History => "history",
    }
);

str_enum!(ChatRole {
    User => "user",
    Assistant => "assistant",
});

str_enum!(
    /// How long symptoms have lasted; selects a care timeline phase.
    DurationLevel {
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
);

str_enum!(SyncStatus {
    Synced => "synced",
    Pending => "pending",
    Local => "local",
});
