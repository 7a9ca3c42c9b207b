//! Field-offset tables for fixed-layout account structures.
//!
//! Each structure declares its fields once, in wire order, with
//! [`account_layout!`](crate::account_layout). Offsets are computed from the
//! preceding field's end, and both the decoders (through
//! [`Reader::read_field`](crate::codec::Reader::read_field)) and the filter
//! builders read the resulting constants, so a layout change is made in one
//! place.

use serde::Serialize;

/// One field of a fixed layout: its name, byte offset and byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Field {
            name,
            offset,
            width,
        }
    }

    /// First byte past this field.
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Same field shifted by `base` bytes, for structures embedded in a parent.
    pub const fn shifted(&self, base: usize) -> Self {
        Field::new(self.name, self.offset + base, self.width)
    }

    /// The bytes of this field within `data`, if `data` is long enough.
    pub fn slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.offset..self.end())
    }
}

/// Declare a layout table.
///
/// ```
/// wasm_solana_codec::account_layout! {
///     /// Two fields.
///     pub struct PairLayout {
///         FIRST: 4,
///         SECOND: 8,
///     }
/// }
/// assert_eq!(PairLayout::SECOND.offset, 4);
/// assert_eq!(PairLayout::LEN, 12);
/// assert_eq!(PairLayout::FIELDS.len(), 2);
/// ```
#[macro_export]
macro_rules! account_layout {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $first:ident : $first_width:expr
            $(, $field:ident : $width:expr)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name;

        #[allow(dead_code)]
        impl $name {
            pub const $first: $crate::layout::Field =
                $crate::layout::Field::new(stringify!($first), 0, $first_width);

            $crate::account_layout!(@chain $first; $($field : $width),*);

            /// Every field, in wire order.
            pub const FIELDS: &'static [$crate::layout::Field] =
                &[Self::$first $(, Self::$field)*];

            /// Total width of the declared fields.
            pub const LEN: usize = $first_width $(+ $width)*;
        }
    };

    (@chain $prev:ident; ) => {};

    (@chain $prev:ident; $field:ident : $width:expr $(, $rest:ident : $rest_width:expr)*) => {
        pub const $field: $crate::layout::Field =
            $crate::layout::Field::new(stringify!($field), Self::$prev.end(), $width);

        $crate::account_layout!(@chain $field; $($rest : $rest_width),*);
    };
}

/// Check that a layout's fields are contiguous and start at zero.
pub fn is_contiguous(fields: &[Field]) -> bool {
    let mut expected = 0;
    for field in fields {
        if field.offset != expected {
            return false;
        }
        expected = field.end();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::account_layout! {
        struct SampleLayout {
            TAG: 1,
            AMOUNT: 8,
            OWNER: 32,
        }
    }

    #[test]
    fn test_offsets_follow_declaration_order() {
        assert_eq!(SampleLayout::TAG.offset, 0);
        assert_eq!(SampleLayout::AMOUNT.offset, 1);
        assert_eq!(SampleLayout::OWNER.offset, 9);
        assert_eq!(SampleLayout::LEN, 41);
        assert_eq!(SampleLayout::OWNER.end(), SampleLayout::LEN);
        assert_eq!(SampleLayout::AMOUNT.name, "AMOUNT");
    }

    #[test]
    fn test_fields_are_contiguous() {
        assert!(is_contiguous(SampleLayout::FIELDS));
        let gap = [Field::new("A", 0, 4), Field::new("B", 5, 4)];
        assert!(!is_contiguous(&gap));
    }

    #[test]
    fn test_slice_and_shift() {
        let data: Vec<u8> = (0..41).collect();
        assert_eq!(SampleLayout::AMOUNT.slice(&data), Some(&data[1..9]));
        assert_eq!(SampleLayout::OWNER.slice(&data[..20]), None);

        let shifted = SampleLayout::AMOUNT.shifted(100);
        assert_eq!(shifted.offset, 101);
        assert_eq!(shifted.width, 8);
    }
}
