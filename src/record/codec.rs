//! Field codec helpers shared by all record shapes.

use bytes::{Buf, BufMut};

use crate::error::{HotelError, Result};

/// Write `value` into a fixed `width`-byte slot, NUL padded
///
/// Values are checked before they reach a table; anything longer is cut
/// on a char boundary so the block size never changes.
pub fn put_text<B: BufMut>(buf: &mut B, value: &str, width: usize) {
    let mut len = value.len().min(width.saturating_sub(1));
    while !value.is_char_boundary(len) {
        len -= 1;
    }
    buf.put_slice(&value.as_bytes()[..len]);
    buf.put_bytes(0, width - len);
}

/// Check that `value` fits a `width`-byte slot with its terminating NUL
pub fn check_text(label: &str, value: &str, width: usize) -> Result<()> {
    if value.len() >= width {
        return Err(HotelError::InvalidInput(format!(
            "{}: at most {} bytes allowed",
            label,
            width.saturating_sub(1)
        )));
    }
    if value.contains('\0') {
        return Err(HotelError::InvalidInput(format!(
            "{}: NUL bytes are not allowed",
            label
        )));
    }
    Ok(())
}

/// Read a fixed `width`-byte slot, stopping at the first NUL
pub fn get_text<B: Buf>(buf: &mut B, width: usize) -> String {
    let mut raw = vec![0u8; width];
    buf.copy_to_slice(&mut raw);
    let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Cursor over raw field values typed by a user
pub struct Fields<'a> {
    values: std::slice::Iter<'a, &'a str>,
}

impl<'a> Fields<'a> {
    /// Wrap `values`, which must hold exactly `expected` entries
    pub fn new(values: &'a [&'a str], expected: usize) -> Result<Self> {
        if values.len() != expected {
            return Err(HotelError::InvalidInput(format!(
                "expected {} fields, got {}",
                expected,
                values.len()
            )));
        }
        Ok(Self {
            values: values.iter(),
        })
    }

    fn next(&mut self, label: &str) -> Result<&'a str> {
        self.values
            .next()
            .map(|v| v.trim())
            .ok_or_else(|| HotelError::InvalidInput(format!("missing value for {}", label)))
    }

    /// Next value as an integer
    pub fn int(&mut self, label: &str) -> Result<i32> {
        let raw = self.next(label)?;
        raw.parse().map_err(|_| {
            HotelError::InvalidInput(format!("{}: '{}' is not an integer", label, raw))
        })
    }

    /// Next value as a floating point number
    pub fn float(&mut self, label: &str) -> Result<f64> {
        let raw = self.next(label)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(HotelError::InvalidInput(format!(
                "{}: '{}' is not a number",
                label, raw
            ))),
        }
    }

    /// Next value as text that fits a `width`-byte slot (NUL included)
    pub fn text(&mut self, label: &str, width: usize) -> Result<String> {
        let raw = self.next(label)?;
        check_text(label, raw, width)?;
        Ok(raw.to_string())
    }
}
