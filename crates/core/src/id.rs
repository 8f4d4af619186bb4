//! Strongly-typed identifiers used across the domains.
//!
//! All three backends key their tables by database-assigned integers, so ids
//! are thin `i64` newtypes. Domain crates declare their own with [`int_id!`].

/// Declare an `i64`-backed identifier newtype.
///
/// The generated type is `Copy`, ordered, serializes transparently and parses
/// from its decimal string form.
#[macro_export]
macro_rules! int_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(i64);

        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl ::core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|e| $crate::DomainError::invalid_id(format!("{}: {}", $name, e)))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::DomainError;

    crate::int_id!(SampleId, "SampleId");

    #[test]
    fn parses_and_displays_decimal_form() {
        let id: SampleId = " 42".parse().unwrap();
        assert_eq!(id, SampleId::new(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<SampleId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("SampleId")));
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&SampleId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
