//! Container builders: whole-value rebuilds of list and map fields.
//!
//! Both builders discard the existing contents, reserve exactly `count`
//! slots and construct every slot before handing it to the caller. A zero
//! count leaves an emptied container with no storage.

use core::ptr;
use rowsmith_core::schema::TypeDescriptor;
use rowsmith_core::{MapLayout, ScriptArray, ScriptMap};
use rowsmith_memory::ops;

/// Rebuilds a list with `count` default-constructed elements and returns
/// the element base pointer (null when `count` is zero).
///
/// Element `i` lives at `base + i * element.size()`.
///
/// # Safety
///
/// `dst` must hold a live `ScriptArray` whose elements are `element`.
pub unsafe fn rebuild_list(dst: *mut u8, element: &TypeDescriptor, count: usize) -> *mut u8 {
    let array = &mut *dst.cast::<ScriptArray>();
    ops::clear_array(element, array, count);
    if count == 0 {
        return ptr::null_mut();
    }
    let layout = element.layout();
    array.add_zeroed(count, layout);
    for index in 0..count {
        ops::initialize_value(element, array.element_ptr(index, layout));
    }
    array.data()
}

/// Entry access for a map produced by [`rebuild_map`].
///
/// Holds the map exclusively for `'a`, so it cannot be moved, resized or
/// dropped while entry pointers are handed out.
pub struct MapEntries<'a> {
    map: &'a mut ScriptMap,
    layout: MapLayout,
    len: usize,
}

impl MapEntries<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Key and value pointers of entry `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn entry(&self, index: usize) -> (*mut u8, *mut u8) {
        assert!(index < self.len, "map entry {} out of bounds ({})", index, self.len);
        // SAFETY: `index < len`, and `len` entries were constructed by
        // `rebuild_map` into the map borrowed here.
        unsafe {
            (
                self.map.key_ptr(index, self.layout),
                self.map.value_ptr(index, self.layout),
            )
        }
    }

    /// Iterates `(key, value)` pointers in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (*mut u8, *mut u8)> + '_ {
        (0..self.len).map(move |index| self.entry(index))
    }
}

/// Rebuilds a map with `count` default-constructed entries.
///
/// # Safety
///
/// `dst` must hold a live `ScriptMap` with entries of `key` / `value`.
/// The caller picks `'a`: the map must stay valid and must not be accessed
/// through any other path while the returned handle is alive.
pub unsafe fn rebuild_map<'a>(
    dst: *mut u8,
    key: &TypeDescriptor,
    value: &TypeDescriptor,
    count: usize,
) -> MapEntries<'a> {
    let map = &mut *dst.cast::<ScriptMap>();
    let layout = MapLayout::new(key.layout(), value.layout());
    ops::clear_map(key, value, map, count);
    for _ in 0..count {
        let index = map.add_uninitialized(layout);
        ops::initialize_value(key, map.key_ptr(index, layout));
        ops::initialize_value(value, map.value_ptr(index, layout));
    }
    MapEntries {
        map,
        layout,
        len: count,
    }
}
