//! Byte-buffer boundary structure and allocator.
//!
//! `ByteArray` is the fixed two-field structure generated bridges use to move
//! variable-length buffers across the C-linkage boundary, exposed under the
//! stable symbol names `byte_array_alloc` and `byte_array_free`.
//!
//! Ownership discipline: the allocator owns the buffer until it is released;
//! `release` (or `byte_array_free`) must be called exactly once per
//! successful allocation. Double release and use-after-release are the
//! caller's undefined behavior to avoid, not this crate's to detect.

use std::alloc::{alloc, dealloc, Layout};
use std::os::raw::{c_int, c_longlong};

/// Errors from the allocation boundary.
#[derive(Debug, thiserror::Error)]
pub enum ByteArrayError {
    /// The request exceeds the boundary's representable size or the
    /// underlying allocator could not satisfy it.
    #[error("out of memory allocating {size} bytes")]
    OutOfMemory { size: usize },
}

/// The boundary buffer: an owning data pointer and its length in bytes.
///
/// Layout matches the generated C declaration
/// `struct ByteArray { unsigned char * data; int size; }` field for field;
/// requests wider than `int` are rejected before allocation.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ByteArray {
    pub data: *mut u8,
    pub size: c_int,
}

impl ByteArray {
    /// The empty buffer: null data, zero size.
    pub const fn empty() -> Self {
        ByteArray {
            data: std::ptr::null_mut(),
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size <= 0 || self.data.is_null()
    }
}

/// Allocate an uninitialized buffer of `size` bytes.
///
/// `allocate(0)` succeeds without touching the allocator and returns the
/// empty buffer; releasing it is a no-op. Sizes that do not fit the
/// boundary's `int` length field fail before allocating.
pub fn allocate(size: usize) -> Result<ByteArray, ByteArrayError> {
    if size == 0 {
        return Ok(ByteArray::empty());
    }
    if size > c_int::MAX as usize {
        return Err(ByteArrayError::OutOfMemory { size });
    }

    let layout =
        Layout::array::<u8>(size).map_err(|_| ByteArrayError::OutOfMemory { size })?;
    // SAFETY: layout has non-zero size.
    let data = unsafe { alloc(layout) };
    if data.is_null() {
        return Err(ByteArrayError::OutOfMemory { size });
    }

    Ok(ByteArray {
        data,
        size: size as c_int,
    })
}

/// Return a buffer's memory to the allocator.
///
/// Must be called exactly once per successful [`allocate`]; the empty buffer
/// is accepted and ignored.
pub fn release(buffer: ByteArray) {
    if buffer.data.is_null() || buffer.size <= 0 {
        return;
    }
    // SAFETY: a non-empty buffer from `allocate` was created with exactly
    // this layout; the single-release contract makes this the unique owner.
    unsafe {
        let layout = Layout::from_size_align_unchecked(buffer.size as usize, 1);
        dealloc(buffer.data, layout);
    }
}

/// C-linkage entry point for bridge modules.
///
/// Non-positive sizes, sizes beyond the `int` length field, and allocation
/// failure all yield the empty buffer; no error unwinds across the boundary.
#[no_mangle]
pub extern "C" fn byte_array_alloc(size: c_longlong) -> ByteArray {
    if size <= 0 {
        return ByteArray::empty();
    }
    allocate(size as usize).unwrap_or(ByteArray::empty())
}

/// C-linkage release entry point for bridge modules.
#[no_mangle]
pub extern "C" fn byte_array_free(byte_array: ByteArray) {
    release(byte_array);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_zero_succeeds() {
        let buffer = allocate(0).unwrap();
        assert_eq!(buffer.size, 0);
        assert!(buffer.is_empty());
        release(buffer);
    }

    #[test]
    fn allocate_round_trips_data() {
        let buffer = allocate(64).unwrap();
        assert_eq!(buffer.size, 64);
        assert!(!buffer.data.is_null());

        unsafe {
            for i in 0..64 {
                *buffer.data.add(i) = i as u8;
            }
            assert_eq!(*buffer.data.add(0), 0);
            assert_eq!(*buffer.data.add(63), 63);
        }

        release(buffer);
    }

    #[test]
    fn c_entry_points_match_safe_layer() {
        let buffer = byte_array_alloc(16);
        assert_eq!(buffer.size, 16);
        assert!(!buffer.data.is_null());
        byte_array_free(buffer);
    }

    #[test]
    fn c_alloc_rejects_non_positive_sizes() {
        let zero = byte_array_alloc(0);
        assert!(zero.is_empty());

        let negative = byte_array_alloc(-8);
        assert!(negative.data.is_null());
        assert_eq!(negative.size, 0);

        // Releasing empty buffers is a no-op.
        byte_array_free(zero);
        byte_array_free(negative);
    }

    #[test]
    fn oversize_request_rejected_before_allocating() {
        let too_big = c_int::MAX as usize + 1;
        let err = allocate(too_big).unwrap_err();
        assert!(matches!(err, ByteArrayError::OutOfMemory { size } if size == too_big));

        let from_c = byte_array_alloc(c_longlong::MAX);
        assert!(from_c.is_empty());
    }

    #[test]
    fn struct_layout_matches_declared_header() {
        // byte_array.hpp declares { unsigned char * data; int size; }: the
        // size field must sit directly after the pointer and be int-wide.
        let buffer = ByteArray {
            data: std::ptr::null_mut(),
            size: 7,
        };
        let base = &buffer as *const ByteArray as usize;
        let size_offset = &buffer.size as *const c_int as usize - base;
        assert_eq!(size_offset, std::mem::size_of::<*mut u8>());
        assert_eq!(std::mem::size_of::<c_int>(), 4);
    }

    #[test]
    fn release_empty_is_noop() {
        release(ByteArray::empty());
    }
}
