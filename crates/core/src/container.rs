//! Untyped container storage.
//!
//! `ScriptArray` and `ScriptMap` are the in-record representations of list
//! and map fields. They manage raw element storage only: they know element
//! sizes and alignments but not element types, so constructing and
//! destroying elements is the caller's job (see `rowsmith-memory`).
//! Dropping a container never runs element destructors; records release
//! them through their schema.

use core::ptr;
use std::alloc::{self, Layout};

/// Rounds `offset` up to the next multiple of `align` (a power of two).
#[inline]
pub const fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

/// Size and alignment of one container element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementLayout {
    pub size: usize,
    pub align: usize,
}

impl ElementLayout {
    pub const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    /// Layout of `count` contiguous elements.
    fn array(&self, count: usize) -> Layout {
        self.size
            .checked_mul(count)
            .and_then(|bytes| Layout::from_size_align(bytes, self.align).ok())
            .unwrap_or_else(|| capacity_overflow())
    }
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("container capacity overflow")
}

/// Contiguous element storage with explicit length and capacity.
#[repr(C)]
#[derive(Debug)]
pub struct ScriptArray {
    data: *mut u8,
    len: usize,
    capacity: usize,
}

impl ScriptArray {
    /// Creates an empty array with no storage.
    pub const fn new() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
            capacity: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Base pointer of the element storage (null when no storage).
    #[inline]
    pub fn data(&self) -> *mut u8 {
        self.data
    }

    /// Releases the storage and reserves room for exactly `slack` elements.
    ///
    /// # Safety
    ///
    /// All elements must already be destroyed, and `layout` must be the
    /// layout every previous call used.
    pub unsafe fn empty(&mut self, slack: usize, layout: ElementLayout) {
        self.release(layout);
        self.len = 0;
        if slack > 0 {
            self.reallocate(slack, layout);
        }
    }

    /// Appends `count` zero-filled elements and returns the index of the
    /// first one. Grows to exactly the required capacity.
    ///
    /// # Safety
    ///
    /// `layout` must match previous calls. The new elements are only
    /// zeroed; the caller must construct them before use.
    pub unsafe fn add_zeroed(&mut self, count: usize, layout: ElementLayout) -> usize {
        let index = self.len;
        if count == 0 {
            return index;
        }
        let required = self.len + count;
        if required > self.capacity {
            self.reallocate(required, layout);
        }
        ptr::write_bytes(self.data.add(index * layout.size), 0, count * layout.size);
        self.len = required;
        index
    }

    /// Pointer to element `index`.
    ///
    /// # Safety
    ///
    /// `index` must be below `len()` and `layout` must match.
    #[inline]
    pub unsafe fn element_ptr(&self, index: usize, layout: ElementLayout) -> *mut u8 {
        debug_assert!(index < self.len);
        self.data.add(index * layout.size)
    }

    unsafe fn reallocate(&mut self, capacity: usize, layout: ElementLayout) {
        debug_assert!(layout.size > 0);
        let new_layout = layout.array(capacity);
        let data = if self.data.is_null() {
            alloc::alloc(new_layout)
        } else {
            alloc::realloc(self.data, layout.array(self.capacity), new_layout.size())
        };
        if data.is_null() {
            alloc::handle_alloc_error(new_layout);
        }
        self.data = data;
        self.capacity = capacity;
    }

    unsafe fn release(&mut self, layout: ElementLayout) {
        if !self.data.is_null() {
            alloc::dealloc(self.data, layout.array(self.capacity));
        }
        self.data = ptr::null_mut();
        self.capacity = 0;
    }
}

impl Default for ScriptArray {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement of key and value inside one map entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapLayout {
    /// Byte offset of the value within an entry; the key sits at 0.
    pub value_offset: usize,
    /// Layout of a whole entry.
    pub entry: ElementLayout,
}

impl MapLayout {
    pub fn new(key: ElementLayout, value: ElementLayout) -> Self {
        let align = key.align.max(value.align);
        let value_offset = align_up(key.size, value.align);
        let size = align_up(value_offset + value.size, align);
        Self {
            value_offset,
            entry: ElementLayout::new(size, align),
        }
    }
}

/// Key/value entries stored contiguously in insertion order.
///
/// Lookups are not part of this type; entries are only ever rebuilt as a
/// whole and iterated.
#[repr(C)]
#[derive(Debug, Default)]
pub struct ScriptMap {
    entries: ScriptArray,
}

impl ScriptMap {
    pub const fn new() -> Self {
        Self {
            entries: ScriptArray::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// See [`ScriptArray::empty`].
    ///
    /// # Safety
    ///
    /// All keys and values must already be destroyed.
    pub unsafe fn empty(&mut self, slack: usize, layout: MapLayout) {
        self.entries.empty(slack, layout.entry);
    }

    /// Appends one zero-filled entry and returns its index.
    ///
    /// # Safety
    ///
    /// The caller must construct the key and value before use.
    pub unsafe fn add_uninitialized(&mut self, layout: MapLayout) -> usize {
        self.entries.add_zeroed(1, layout.entry)
    }

    /// Pointer to the key of entry `index`.
    ///
    /// # Safety
    ///
    /// `index` must be below `len()`.
    #[inline]
    pub unsafe fn key_ptr(&self, index: usize, layout: MapLayout) -> *mut u8 {
        self.entries.element_ptr(index, layout.entry)
    }

    /// Pointer to the value of entry `index`.
    ///
    /// # Safety
    ///
    /// `index` must be below `len()`.
    #[inline]
    pub unsafe fn value_ptr(&self, index: usize, layout: MapLayout) -> *mut u8 {
        self.key_ptr(index, layout).add(layout.value_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const U32: ElementLayout = ElementLayout::new(4, 4);

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(9, 4), 12);
        assert_eq!(align_up(12, 4), 12);
    }

    #[test]
    fn test_array_add_zeroed_and_empty() {
        let mut arr = ScriptArray::new();
        unsafe {
            let first = arr.add_zeroed(3, U32);
            assert_eq!(first, 0);
            assert_eq!(arr.len(), 3);
            assert_eq!(arr.capacity(), 3);
            for i in 0..3 {
                assert_eq!(*(arr.element_ptr(i, U32) as *const u32), 0);
                *(arr.element_ptr(i, U32) as *mut u32) = i as u32 + 10;
            }
            let next = arr.add_zeroed(2, U32);
            assert_eq!(next, 3);
            assert_eq!(*(arr.element_ptr(2, U32) as *const u32), 12);
            assert_eq!(*(arr.element_ptr(4, U32) as *const u32), 0);

            arr.empty(0, U32);
            assert_eq!(arr.len(), 0);
            assert_eq!(arr.capacity(), 0);
            assert!(arr.data().is_null());
        }
    }

    #[test]
    fn test_array_empty_with_slack() {
        let mut arr = ScriptArray::new();
        unsafe {
            arr.add_zeroed(8, U32);
            arr.empty(2, U32);
            assert_eq!(arr.len(), 0);
            assert_eq!(arr.capacity(), 2);
            arr.add_zeroed(2, U32);
            assert_eq!(arr.capacity(), 2);
            arr.empty(0, U32);
        }
    }

    #[test]
    fn test_map_layout() {
        // 4-byte key, 24-byte value aligned to 8
        let layout = MapLayout::new(ElementLayout::new(4, 4), ElementLayout::new(24, 8));
        assert_eq!(layout.value_offset, 8);
        assert_eq!(layout.entry, ElementLayout::new(32, 8));
    }

    #[test]
    fn test_map_entries() {
        let layout = MapLayout::new(U32, ElementLayout::new(8, 8));
        let mut map = ScriptMap::new();
        unsafe {
            let i = map.add_uninitialized(layout);
            *(map.key_ptr(i, layout) as *mut u32) = 5;
            *(map.value_ptr(i, layout) as *mut u64) = 99;
            assert_eq!(map.len(), 1);
            assert_eq!(*(map.value_ptr(0, layout) as *const u64), 99);
            map.empty(0, layout);
            assert!(map.is_empty());
        }
    }
}
