//! Numeric element types.
//!
//! [`Element`] is the bound on every typed accessor. It is implemented for the
//! ten numeric types netCDF stores natively and sealed against outside
//! implementations. Engines never see `T` itself: accessors wrap the caller's
//! slice in a [`Buffer`] or [`BufferMut`] so one engine entry point serves
//! every element type.

use crate::status::Status;
use std::fmt;

/// Declared numeric type of a variable or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 8-bit integer (`NC_BYTE`).
    I8,
    /// Unsigned 8-bit integer (`NC_UBYTE`).
    U8,
    /// Signed 16-bit integer (`NC_SHORT`).
    I16,
    /// Unsigned 16-bit integer (`NC_USHORT`).
    U16,
    /// Signed 32-bit integer (`NC_INT`).
    I32,
    /// Unsigned 32-bit integer (`NC_UINT`).
    U32,
    /// Signed 64-bit integer (`NC_INT64`).
    I64,
    /// Unsigned 64-bit integer (`NC_UINT64`).
    U64,
    /// 32-bit float (`NC_FLOAT`).
    F32,
    /// 64-bit float (`NC_DOUBLE`).
    F64,
}

impl ElementType {
    /// Every supported element type.
    pub const ALL: [ElementType; 10] = [
        ElementType::I8,
        ElementType::U8,
        ElementType::I16,
        ElementType::U16,
        ElementType::I32,
        ElementType::U32,
        ElementType::I64,
        ElementType::U64,
        ElementType::F32,
        ElementType::F64,
    ];

    /// netCDF `nc_type` code.
    pub fn nc_code(&self) -> i32 {
        match self {
            ElementType::I8 => 1,
            ElementType::I16 => 3,
            ElementType::I32 => 4,
            ElementType::F32 => 5,
            ElementType::F64 => 6,
            ElementType::U8 => 7,
            ElementType::U16 => 8,
            ElementType::U32 => 9,
            ElementType::I64 => 10,
            ElementType::U64 => 11,
        }
    }

    /// Look up a numeric type by its `nc_type` code.
    pub fn from_nc_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.nc_code() == code)
    }

    /// netCDF (CDL) name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::I8 => "byte",
            ElementType::U8 => "ubyte",
            ElementType::I16 => "short",
            ElementType::U16 => "ushort",
            ElementType::I32 => "int",
            ElementType::U32 => "uint",
            ElementType::I64 => "int64",
            ElementType::U64 => "uint64",
            ElementType::F32 => "float",
            ElementType::F64 => "double",
        }
    }

    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod private {
    #[allow(unreachable_pub)]
    pub trait Sealed {}
}

/// A numeric type that can be moved between storage and a caller buffer.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + private::Sealed + 'static {
    /// Tag the storage layer uses for this type.
    const TYPE: ElementType;

    /// Borrow a source slice as an engine buffer.
    fn buffer(data: &[Self]) -> Buffer<'_>;

    /// Borrow a destination slice as an engine buffer.
    fn buffer_mut(data: &mut [Self]) -> BufferMut<'_>;
}

/// Source data for a write, one variant per element type.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Buffer<'a> {
    I8(&'a [i8]),
    U8(&'a [u8]),
    I16(&'a [i16]),
    U16(&'a [u16]),
    I32(&'a [i32]),
    U32(&'a [u32]),
    I64(&'a [i64]),
    U64(&'a [u64]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

/// Destination for a read, one variant per element type.
#[allow(missing_docs)]
#[derive(Debug, PartialEq)]
pub enum BufferMut<'a> {
    I8(&'a mut [i8]),
    U8(&'a mut [u8]),
    I16(&'a mut [i16]),
    U16(&'a mut [u16]),
    I32(&'a mut [i32]),
    U32(&'a mut [u32]),
    I64(&'a mut [i64]),
    U64(&'a mut [u64]),
    F32(&'a mut [f32]),
    F64(&'a mut [f64]),
}

/// Owned values, used by engines that keep data in memory.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Evaluate `$body` with `$inner` bound to the payload of whichever variant
/// `$value` holds. The body must have the same type for every variant.
macro_rules! with_payload {
    ($value:expr, $enum:ident, |$inner:ident| $body:expr) => {
        match $value {
            $enum::I8($inner) => $body,
            $enum::U8($inner) => $body,
            $enum::I16($inner) => $body,
            $enum::U16($inner) => $body,
            $enum::I32($inner) => $body,
            $enum::U32($inner) => $body,
            $enum::I64($inner) => $body,
            $enum::U64($inner) => $body,
            $enum::F32($inner) => $body,
            $enum::F64($inner) => $body,
        }
    };
}

/// Like [`with_payload`], rewrapping the result in the same variant of `$to`.
macro_rules! map_payload {
    ($value:expr, $from:ident => $to:ident, |$inner:ident| $body:expr) => {
        match $value {
            $from::I8($inner) => $to::I8($body),
            $from::U8($inner) => $to::U8($body),
            $from::I16($inner) => $to::I16($body),
            $from::U16($inner) => $to::U16($body),
            $from::I32($inner) => $to::I32($body),
            $from::U32($inner) => $to::U32($body),
            $from::I64($inner) => $to::I64($body),
            $from::U64($inner) => $to::U64($body),
            $from::F32($inner) => $to::F32($body),
            $from::F64($inner) => $to::F64($body),
        }
    };
}

pub(crate) use with_payload;

macro_rules! tag_of {
    ($value:expr, $enum:ident) => {
        match $value {
            $enum::I8(_) => ElementType::I8,
            $enum::U8(_) => ElementType::U8,
            $enum::I16(_) => ElementType::I16,
            $enum::U16(_) => ElementType::U16,
            $enum::I32(_) => ElementType::I32,
            $enum::U32(_) => ElementType::U32,
            $enum::I64(_) => ElementType::I64,
            $enum::U64(_) => ElementType::U64,
            $enum::F32(_) => ElementType::F32,
            $enum::F64(_) => ElementType::F64,
        }
    };
}

impl Buffer<'_> {
    /// Element type of the borrowed slice.
    pub fn element_type(&self) -> ElementType {
        tag_of!(self, Buffer)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        with_payload!(self, Buffer, |v| v.len())
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy into owned values.
    pub fn to_values(&self) -> Values {
        map_payload!(self, Buffer => Values, |v| v.to_vec())
    }
}

impl BufferMut<'_> {
    /// Element type of the borrowed slice.
    pub fn element_type(&self) -> ElementType {
        tag_of!(self, BufferMut)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        with_payload!(self, BufferMut, |v| v.len())
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Values {
    /// Element type of the stored values.
    pub fn element_type(&self) -> ElementType {
        tag_of!(self, Values)
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        with_payload!(self, Values, |v| v.len())
    }

    /// Whether no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A zero-filled array of `len` elements of type `ty`.
    pub fn zeroed(ty: ElementType, len: usize) -> Self {
        match ty {
            ElementType::I8 => Values::I8(vec![0; len]),
            ElementType::U8 => Values::U8(vec![0; len]),
            ElementType::I16 => Values::I16(vec![0; len]),
            ElementType::U16 => Values::U16(vec![0; len]),
            ElementType::I32 => Values::I32(vec![0; len]),
            ElementType::U32 => Values::U32(vec![0; len]),
            ElementType::I64 => Values::I64(vec![0; len]),
            ElementType::U64 => Values::U64(vec![0; len]),
            ElementType::F32 => Values::F32(vec![0.0; len]),
            ElementType::F64 => Values::F64(vec![0.0; len]),
        }
    }

    /// Copy every stored element into `out`.
    ///
    /// `out` must have the same element type and length.
    pub fn copy_into(&self, out: BufferMut<'_>) -> Result<(), Status> {
        if self.len() != out.len() {
            return Err(Status::EdgeOutOfBounds);
        }
        match (self, out) {
            (Values::I8(src), BufferMut::I8(dst)) => dst.copy_from_slice(src),
            (Values::U8(src), BufferMut::U8(dst)) => dst.copy_from_slice(src),
            (Values::I16(src), BufferMut::I16(dst)) => dst.copy_from_slice(src),
            (Values::U16(src), BufferMut::U16(dst)) => dst.copy_from_slice(src),
            (Values::I32(src), BufferMut::I32(dst)) => dst.copy_from_slice(src),
            (Values::U32(src), BufferMut::U32(dst)) => dst.copy_from_slice(src),
            (Values::I64(src), BufferMut::I64(dst)) => dst.copy_from_slice(src),
            (Values::U64(src), BufferMut::U64(dst)) => dst.copy_from_slice(src),
            (Values::F32(src), BufferMut::F32(dst)) => dst.copy_from_slice(src),
            (Values::F64(src), BufferMut::F64(dst)) => dst.copy_from_slice(src),
            _ => return Err(Status::BadType),
        }
        Ok(())
    }
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ElementType = ElementType::$variant;

            fn buffer(data: &[Self]) -> Buffer<'_> {
                Buffer::$variant(data)
            }

            fn buffer_mut(data: &mut [Self]) -> BufferMut<'_> {
                BufferMut::$variant(data)
            }
        }
    )*};
}

impl_element! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nc_codes_round_trip() {
        for ty in ElementType::ALL {
            assert_eq!(ElementType::from_nc_code(ty.nc_code()), Some(ty));
        }
        // NC_CHAR and NC_STRING are not numeric
        assert_eq!(ElementType::from_nc_code(2), None);
        assert_eq!(ElementType::from_nc_code(12), None);
    }

    #[test]
    fn element_tags_match_rust_types() {
        assert_eq!(<f64 as Element>::TYPE, ElementType::F64);
        assert_eq!(<u16 as Element>::TYPE, ElementType::U16);
        assert_eq!(<i8 as Element>::TYPE.size(), 1);
        assert_eq!(<u64 as Element>::TYPE.name(), "uint64");
    }

    #[test]
    fn buffer_reports_type_and_len() {
        let data = [1.0f32, 2.0, 3.0];
        let buffer = f32::buffer(&data);
        assert_eq!(buffer.element_type(), ElementType::F32);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.to_values(), Values::F32(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn copy_into_checks_type_and_len() {
        let values = Values::I32(vec![4, 5]);

        let mut out = [0i32; 2];
        values.copy_into(i32::buffer_mut(&mut out)).unwrap();
        assert_eq!(out, [4, 5]);

        let mut short = [0i32; 1];
        assert_eq!(
            values.copy_into(i32::buffer_mut(&mut short)),
            Err(Status::EdgeOutOfBounds)
        );

        let mut wrong = [0i64; 2];
        assert_eq!(
            values.copy_into(i64::buffer_mut(&mut wrong)),
            Err(Status::BadType)
        );
        assert_eq!(wrong, [0, 0]);
    }

    #[test]
    fn zeroed_has_requested_shape() {
        let values = Values::zeroed(ElementType::U8, 4);
        assert_eq!(values, Values::U8(vec![0; 4]));
        assert_eq!(values.element_type(), ElementType::U8);
    }
}
