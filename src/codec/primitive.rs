//! Fixed-width little-endian reads and writes against caller-owned buffers.
//!
//! Writes return the number of bytes written; reads return the value and the
//! number of bytes consumed. Both fail with [`CodecError::BufferTooShort`]
//! instead of panicking when the buffer ends early.

use crate::address::{Address, ADDRESS_BYTES};
use crate::error::CodecError;

fn too_short(field: &'static str, offset: usize, needed: usize, available: usize) -> CodecError {
    CodecError::BufferTooShort {
        structure: "buffer",
        field,
        offset,
        needed,
        available: available.saturating_sub(offset),
    }
}

fn window<'a>(
    buffer: &'a [u8],
    offset: usize,
    width: usize,
    field: &'static str,
) -> Result<&'a [u8], CodecError> {
    offset
        .checked_add(width)
        .and_then(|end| buffer.get(offset..end))
        .ok_or_else(|| too_short(field, offset, width, buffer.len()))
}

fn window_mut<'a>(
    buffer: &'a mut [u8],
    offset: usize,
    width: usize,
    field: &'static str,
) -> Result<&'a mut [u8], CodecError> {
    let len = buffer.len();
    offset
        .checked_add(width)
        .and_then(move |end| buffer.get_mut(offset..end))
        .ok_or_else(|| too_short(field, offset, width, len))
}

/// Copy exactly `N` bytes starting at `offset`.
pub fn read_array<const N: usize>(
    buffer: &[u8],
    offset: usize,
) -> Result<([u8; N], usize), CodecError> {
    let mut out = [0u8; N];
    out.copy_from_slice(window(buffer, offset, N, "bytes")?);
    Ok((out, N))
}

pub fn read_u8(buffer: &[u8], offset: usize) -> Result<(u8, usize), CodecError> {
    let bytes = window(buffer, offset, 1, "u8")?;
    Ok((bytes[0], 1))
}

pub fn read_u16_le(buffer: &[u8], offset: usize) -> Result<(u16, usize), CodecError> {
    let (bytes, n) = read_array::<2>(buffer, offset)?;
    Ok((u16::from_le_bytes(bytes), n))
}

pub fn read_u32_le(buffer: &[u8], offset: usize) -> Result<(u32, usize), CodecError> {
    let (bytes, n) = read_array::<4>(buffer, offset)?;
    Ok((u32::from_le_bytes(bytes), n))
}

pub fn read_u64_le(buffer: &[u8], offset: usize) -> Result<(u64, usize), CodecError> {
    let (bytes, n) = read_array::<8>(buffer, offset)?;
    Ok((u64::from_le_bytes(bytes), n))
}

pub fn read_i64_le(buffer: &[u8], offset: usize) -> Result<(i64, usize), CodecError> {
    let (bytes, n) = read_array::<8>(buffer, offset)?;
    Ok((i64::from_le_bytes(bytes), n))
}

pub fn read_f64_le(buffer: &[u8], offset: usize) -> Result<(f64, usize), CodecError> {
    let (bytes, n) = read_array::<8>(buffer, offset)?;
    Ok((f64::from_le_bytes(bytes), n))
}

pub fn read_address(buffer: &[u8], offset: usize) -> Result<(Address, usize), CodecError> {
    let (bytes, n) = read_array::<ADDRESS_BYTES>(buffer, offset)?;
    Ok((Address::from(bytes), n))
}

pub fn write_u8(value: u8, buffer: &mut [u8], offset: usize) -> Result<usize, CodecError> {
    window_mut(buffer, offset, 1, "u8")?[0] = value;
    Ok(1)
}

pub fn write_u16_le(value: u16, buffer: &mut [u8], offset: usize) -> Result<usize, CodecError> {
    window_mut(buffer, offset, 2, "u16")?.copy_from_slice(&value.to_le_bytes());
    Ok(2)
}

pub fn write_u32_le(value: u32, buffer: &mut [u8], offset: usize) -> Result<usize, CodecError> {
    window_mut(buffer, offset, 4, "u32")?.copy_from_slice(&value.to_le_bytes());
    Ok(4)
}

pub fn write_u64_le(value: u64, buffer: &mut [u8], offset: usize) -> Result<usize, CodecError> {
    window_mut(buffer, offset, 8, "u64")?.copy_from_slice(&value.to_le_bytes());
    Ok(8)
}

pub fn write_i64_le(value: i64, buffer: &mut [u8], offset: usize) -> Result<usize, CodecError> {
    window_mut(buffer, offset, 8, "i64")?.copy_from_slice(&value.to_le_bytes());
    Ok(8)
}

pub fn write_f64_le(value: f64, buffer: &mut [u8], offset: usize) -> Result<usize, CodecError> {
    window_mut(buffer, offset, 8, "f64")?.copy_from_slice(&value.to_le_bytes());
    Ok(8)
}

pub fn write_address(
    value: &Address,
    buffer: &mut [u8],
    offset: usize,
) -> Result<usize, CodecError> {
    window_mut(buffer, offset, ADDRESS_BYTES, "address")?.copy_from_slice(value.as_ref());
    Ok(ADDRESS_BYTES)
}
