use crate::{Error, Number, Result, Value};

const U32_WIDTH: usize = 4;
const U64_WIDTH: usize = 8;

const I64_MAX: u64 = 9_223_372_036_854_775_807;
const U64_MODULUS: i128 = 18_446_744_073_709_551_616;

/// Window into the backing region a view should cover.
#[derive(Debug, Clone, Default)]
pub struct ViewCreateInfo {
    pub byte_offset: usize,
    /// `None` extends the window to the end of the region.
    pub length: Option<usize>,
}

/// Read-only view over a borrowed byte region.
///
/// Every read takes a byte offset relative to the start of the view and a
/// `little_endian` flag. A read that does not fit fails with
/// [`Error::OutOfRange`] and consumes nothing.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn with_info(bytes: &'a [u8], info: &ViewCreateInfo) -> Result<Self> {
        let available = bytes.len().saturating_sub(info.byte_offset);
        let length = info.length.unwrap_or(available);
        let window = info
            .byte_offset
            .checked_add(length)
            .and_then(|end| bytes.get(info.byte_offset..end))
            .ok_or(Error::out_of_range(info.byte_offset, length, bytes.len()))?;
        log::trace!(
            "view over {} bytes at byte offset {}",
            window.len(),
            info.byte_offset
        );
        Ok(Self { bytes: window })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn read_u32(&self, offset: usize, little_endian: bool) -> Result<u32> {
        let bytes = self.window::<U32_WIDTH>(offset)?;
        Ok(if little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    pub fn read_u64(&self, offset: usize, little_endian: bool) -> Result<u64> {
        let bytes = self.window::<U64_WIDTH>(offset)?;
        Ok(if little_endian {
            u64::from_le_bytes(bytes)
        } else {
            u64::from_be_bytes(bytes)
        })
    }

    /// Two's-complement reinterpretation of [`ByteView::read_u64`].
    pub fn read_i64(&self, offset: usize, little_endian: bool) -> Result<i64> {
        let unsigned = self.read_u64(offset, little_endian)?;
        if unsigned > I64_MAX {
            // always lands in [-2^63, -1]
            Ok((unsigned as i128 - U64_MODULUS) as i64)
        } else {
            Ok(unsigned as i64)
        }
    }

    /// Reads a binary64 float; integral results come back as
    /// [`Number::Integer`].
    pub fn read_f64(&self, offset: usize, little_endian: bool) -> Result<Number> {
        let bits = self.read_u64(offset, little_endian)?;
        Ok(Number::from_f64(f64::from_bits(bits)))
    }

    fn window<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let len = self.bytes.len();
        offset
            .checked_add(N)
            .and_then(|end| self.bytes.get(offset..end))
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(Error::out_of_range(offset, N, len))
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> TryFrom<&'a Value> for ByteView<'a> {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self> {
        match value {
            Value::Bytes(bytes) => Ok(Self::new(bytes)),
            other => Err(Error::invalid("bytes", other.type_name())),
        }
    }
}
