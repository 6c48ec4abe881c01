//! Macros for the code tables in `iana`.

/// Creates a protocol code type wrapping an integer.
///
/// Known values are associated constants carrying a mnemonic; every other
/// value of the integer type is still representable and survives a round
/// trip. This adds `From` both ways, `Debug`, `Display` and `FromStr`.
///
/// `Display` writes the mnemonic, or `$prefix` followed by the decimal
/// value. `FromStr` accepts a mnemonic in any case, the prefixed decimal
/// form, or a bare decimal value.
///
/// An optional `$mask` narrows the type to a bit field narrower than
/// `$inttype`: `from_int` drops the bits outside it and `FromStr` rejects
/// numbers that don't fit.
macro_rules! int_enum {
    ( $(#[$attr:meta])* =>
      $ianatype:ident, $inttype:ident, $prefix:expr $(, $mask:expr)?;
      $( $(#[$variant_attr:meta])* ( $variant:ident =>
                                        $value:expr, $mnemonic:expr) )* ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $ianatype($inttype);

        impl $ianatype {
            $(
                $(#[$variant_attr])*
                pub const $variant: $ianatype = $ianatype($value);
            )*
        }

        impl $ianatype {
            /// Returns a value from its raw integer value.
            #[must_use]
            pub const fn from_int(value: $inttype) -> Self {
                Self(value $(& $mask)?)
            }

            /// Returns the raw integer value.
            #[must_use]
            pub const fn to_int(self) -> $inttype {
                self.0
            }

            /// Returns the value for a mnemonic, ignoring ASCII case.
            #[must_use]
            pub fn from_mnemonic(m: &str) -> Option<Self> {
                $(
                    if m.eq_ignore_ascii_case($mnemonic) {
                        return Some($ianatype::$variant)
                    }
                )*
                None
            }

            /// Returns the mnemonic for this value if there is one.
            #[must_use]
            pub const fn mnemonic(self) -> Option<&'static str> {
                match self {
                    $(
                        $ianatype::$variant => Some($mnemonic),
                    )*
                    _ => None
                }
            }

            /// Returns whether the value has a mnemonic.
            #[must_use]
            pub const fn is_known(self) -> bool {
                self.mnemonic().is_some()
            }
        }

        impl From<$inttype> for $ianatype {
            fn from(value: $inttype) -> Self {
                $ianatype::from_int(value)
            }
        }

        impl From<$ianatype> for $inttype {
            fn from(value: $ianatype) -> Self {
                value.to_int()
            }
        }

        impl core::fmt::Debug for $ianatype {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self.mnemonic() {
                    Some(m) => write!(f, concat!(stringify!($ianatype), "::{}"), m),
                    None => f.debug_tuple(stringify!($ianatype)).field(&self.0).finish(),
                }
            }
        }

        impl core::fmt::Display for $ianatype {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self.mnemonic() {
                    Some(m) => f.write_str(m),
                    None => write!(f, "{}{}", $prefix, self.0),
                }
            }
        }

        impl core::str::FromStr for $ianatype {
            type Err = $crate::iana::FromStrError;

            fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
                if let Some(value) = $ianatype::from_mnemonic(s) {
                    return Ok(value);
                }
                let n = $prefix.len();
                let digits = s
                    .get(..n)
                    .filter(|p| p.eq_ignore_ascii_case($prefix))
                    .and_then(|_| s.get(n..))
                    .unwrap_or(s);
                digits
                    .parse::<$inttype>()
                    .ok()
                    .filter(|n| $ianatype::from_int(*n).to_int() == *n)
                    .map($ianatype::from_int)
                    .ok_or_else(|| $crate::iana::FromStrError::new(stringify!($ianatype), s))
            }
        }
    };
}
