//! Integral bounds table.
//!
//! The table is a `const` built at compile time, indexed by bit width and
//! signedness. Nothing can write to it, so lookups are independent of how many
//! descriptors were built before or in which order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive `(min, max)` range of an integral storage type.
///
/// `i128` holds every value in the table, including `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i128,
    pub max: i128,
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Supported bit widths, in ascending order.
pub const WIDTHS: [u32; 4] = [8, 16, 32, 64];

const fn signed(width: u32) -> Bounds {
    Bounds {
        min: -(1i128 << (width - 1)),
        max: (1i128 << (width - 1)) - 1,
    }
}

const fn unsigned(width: u32) -> Bounds {
    Bounds {
        min: 0,
        max: (1i128 << width) - 1,
    }
}

/// `(width, signed bounds, unsigned bounds)` per supported width.
pub const BOUNDS_TABLE: [(u32, Bounds, Bounds); 4] = [
    (8, signed(8), unsigned(8)),
    (16, signed(16), unsigned(16)),
    (32, signed(32), unsigned(32)),
    (64, signed(64), unsigned(64)),
];

/// Bounds for a given width and signedness; `None` for unsupported widths.
pub fn bounds_for_width(width: u32, is_signed: bool) -> Option<Bounds> {
    BOUNDS_TABLE
        .iter()
        .find(|(w, _, _)| *w == width)
        .map(|(_, s, u)| if is_signed { *s } else { *u })
}

/// Bounds for a native storage type name of the form `int<w>_t` / `uint<w>_t`.
pub fn bounds_for_native(native_type: &str) -> Option<Bounds> {
    let (is_signed, rest) = match native_type.strip_prefix("uint") {
        Some(rest) => (false, rest),
        None => (true, native_type.strip_prefix("int")?),
    };
    let width: u32 = rest.strip_suffix("_t")?.parse().ok()?;
    bounds_for_width(width, is_signed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_twos_complement_ranges() {
        assert_eq!(bounds_for_width(8, true), Some(Bounds { min: -128, max: 127 }));
        assert_eq!(bounds_for_width(8, false), Some(Bounds { min: 0, max: 255 }));
        assert_eq!(bounds_for_width(16, true), Some(Bounds { min: -32768, max: 32767 }));
        assert_eq!(bounds_for_width(16, false), Some(Bounds { min: 0, max: 65535 }));
        assert_eq!(
            bounds_for_width(32, true),
            Some(Bounds { min: -2147483648, max: 2147483647 })
        );
        assert_eq!(bounds_for_width(32, false), Some(Bounds { min: 0, max: 4294967295 }));
        assert_eq!(
            bounds_for_width(64, true),
            Some(Bounds {
                min: -9223372036854775808,
                max: 9223372036854775807
            })
        );
        assert_eq!(
            bounds_for_width(64, false),
            Some(Bounds { min: 0, max: 18446744073709551615 })
        );
    }

    #[test]
    fn table_agrees_with_std_limits() {
        assert_eq!(bounds_for_native("int64_t").unwrap().min, i64::MIN as i128);
        assert_eq!(bounds_for_native("uint64_t").unwrap().max, u64::MAX as i128);
        assert_eq!(bounds_for_native("int16_t").unwrap().max, i16::MAX as i128);
    }

    #[test]
    fn native_names_parse() {
        assert_eq!(bounds_for_native("uint8_t"), bounds_for_width(8, false));
        assert_eq!(bounds_for_native("int32_t"), bounds_for_width(32, true));
    }

    #[test]
    fn unsupported_native_names_have_no_bounds() {
        assert_eq!(bounds_for_native("int24_t"), None);
        assert_eq!(bounds_for_native("float"), None);
        assert_eq!(bounds_for_native("int8"), None);
        assert_eq!(bounds_for_native("uint"), None);
        assert_eq!(bounds_for_width(128, true), None);
    }

    #[test]
    fn repeated_lookups_are_stable() {
        let first = bounds_for_native("uint32_t");
        for _ in 0..3 {
            let _ = bounds_for_native("int8_t");
            assert_eq!(bounds_for_native("uint32_t"), first);
        }
    }

    #[test]
    fn display_shows_inclusive_range() {
        assert_eq!(bounds_for_width(8, true).unwrap().to_string(), "[-128, 127]");
    }
}
