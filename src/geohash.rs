//! Geohash encoding and decoding.
//!
//! A geohash interleaves longitude and latitude bisection bits, starting with longitude, and
//! writes them five at a time in a base-32 alphabet. Every character refines the previous cell
//! into 32 children.

use crate::error::{Result, SpatialError};
use crate::shape::Rectangle;

/// The geohash alphabet, in child order.
pub const BASE_32: [u8; 32] = *b"0123456789bcdefghjkmnpqrstuvwxyz";

/// The longest supported geohash.
pub const MAX_PRECISION: usize = 24;

/// The precision used by [`encode`].
pub const DEFAULT_PRECISION: usize = 12;

const BITS: [u8; 5] = [16, 8, 4, 2, 1];

const BASE_32_IDX: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < BASE_32.len() {
        table[BASE_32[i] as usize] = i as i8;
        table[BASE_32[i].to_ascii_uppercase() as usize] = i as i8;
        i += 1;
    }
    table
};

/// The 5-bit value of a geohash character. Upper case is accepted.
///
/// # Panics
///
/// Panics if `c` is not part of the geohash alphabet.
fn base32_value(c: u8) -> u8 {
    match BASE_32_IDX.get(c as usize) {
        Some(&value) if value >= 0 => value as u8,
        _ => panic!("invalid geohash character {:?}", c as char),
    }
}

/// Encode a location with [`DEFAULT_PRECISION`] characters.
pub fn encode(lat: f64, lon: f64) -> String {
    encode_with_precision(lat, lon, DEFAULT_PRECISION)
}

/// Encode a location with `precision` characters, capped at [`MAX_PRECISION`].
pub fn encode_with_precision(lat: f64, lon: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    let mut lat_interval = (-90.0f64, 90.0f64);
    let mut lon_interval = (-180.0f64, 180.0f64);
    let mut hash = String::with_capacity(precision);
    let mut is_even = true;
    let mut bit = 0;
    let mut ch = 0u8;

    while hash.len() < precision {
        if is_even {
            let mid = (lon_interval.0 + lon_interval.1) / 2.0;
            if lon > mid {
                ch |= BITS[bit];
                lon_interval.0 = mid;
            } else {
                lon_interval.1 = mid;
            }
        } else {
            let mid = (lat_interval.0 + lat_interval.1) / 2.0;
            if lat > mid {
                ch |= BITS[bit];
                lat_interval.0 = mid;
            } else {
                lat_interval.1 = mid;
            }
        }

        is_even = !is_even;
        if bit < 4 {
            bit += 1;
        } else {
            hash.push(BASE_32[ch as usize] as char);
            bit = 0;
            ch = 0;
        }
    }
    hash
}

/// Decode a geohash into the center of its cell, as `(lat, lon)`.
pub fn decode(hash: &str) -> Result<(f64, f64)> {
    let cell = decode_boundary(hash)?;
    Ok((
        (cell.min_y() + cell.max_y()) / 2.0,
        (cell.min_x() + cell.max_x()) / 2.0,
    ))
}

/// Decode a geohash into its cell.
///
/// # Panics
///
/// Panics if the hash contains a character outside the geohash alphabet.
pub fn decode_boundary(hash: &str) -> Result<Rectangle> {
    if hash.is_empty() {
        return Err(SpatialError::InvalidShape(
            "cannot decode an empty geohash".to_string(),
        ));
    }
    Ok(boundary(hash))
}

/// The cell of a geohash. The empty hash is the whole world.
pub(crate) fn boundary(hash: &str) -> Rectangle {
    let (mut min_y, mut max_y) = (-90.0f64, 90.0f64);
    let (mut min_x, mut max_x) = (-180.0f64, 180.0f64);
    let mut is_even = true;

    for c in hash.bytes() {
        let cd = base32_value(c);
        for mask in BITS {
            if is_even {
                let mid = (min_x + max_x) / 2.0;
                if cd & mask != 0 {
                    min_x = mid;
                } else {
                    max_x = mid;
                }
            } else {
                let mid = (min_y + max_y) / 2.0;
                if cd & mask != 0 {
                    min_y = mid;
                } else {
                    max_y = mid;
                }
            }
            is_even = !is_even;
        }
    }
    Rectangle::new(min_x, max_x, min_y, max_y)
}

/// The 32 child hashes of `hash`, in alphabet order.
pub fn sub_geohashes(hash: &str) -> impl Iterator<Item = String> + '_ {
    BASE_32.iter().map(move |&c| {
        let mut child = String::with_capacity(hash.len() + 1);
        child.push_str(hash);
        child.push(c as char);
        child
    })
}

/// The `(width, height)` in degrees of a cell with `len` characters.
pub fn lookup_degrees_size_for_hash_len(len: usize) -> (f64, f64) {
    let bits = 5 * len as i32;
    let lon_bits = (bits + 1) / 2;
    let lat_bits = bits / 2;
    (360.0 / 2f64.powi(lon_bits), 180.0 / 2f64.powi(lat_bits))
}

/// The shortest hash length whose cells are smaller than `lon_err` wide and `lat_err` high,
/// or [`MAX_PRECISION`] if none is.
pub fn lookup_hash_len_for_width_height(lon_err: f64, lat_err: f64) -> usize {
    (1..MAX_PRECISION)
        .find(|&len| {
            let (width, height) = lookup_degrees_size_for_hash_len(len);
            height < lat_err && width < lon_err
        })
        .unwrap_or(MAX_PRECISION)
}
