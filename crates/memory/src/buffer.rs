//! Owned, aligned record storage.

use crate::ops;
use core::fmt;
use core::ptr::NonNull;
use rowsmith_core::schema::{RecordSchema, TypeDescriptor};
use rowsmith_core::{Error, Result};
use std::alloc::{self, Layout};
use std::sync::Arc;

/// Source of raw record memory.
///
/// Allocation failure is reported as `None` and surfaces to callers as
/// [`Error::AllocationFailed`].
pub trait RawAllocator: Send + Sync {
    /// Allocates a block with the given layout.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Frees a block returned by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with the same `layout`.
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

impl RawAllocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        alloc::dealloc(ptr.as_ptr(), layout);
    }
}

/// A block of memory returned to its allocator on drop.
struct Allocation {
    ptr: NonNull<u8>,
    layout: Layout,
    allocator: Arc<dyn RawAllocator>,
}

impl Allocation {
    fn new(schema: &RecordSchema, allocator: Arc<dyn RawAllocator>) -> Result<Self> {
        let layout = schema.memory_layout()?;
        let ptr = allocator
            .allocate(layout)
            .ok_or_else(|| Error::allocation_failed(schema.name(), layout.size()))?;
        let allocation = Self {
            ptr,
            layout,
            allocator,
        };
        if (ptr.as_ptr() as usize) % layout.align() != 0 {
            return Err(Error::allocation_failed(schema.name(), layout.size()));
        }
        Ok(allocation)
    }
}

impl Drop for Allocation {
    fn drop(&mut self) {
        unsafe { self.allocator.free(self.ptr, self.layout) }
    }
}

/// Raw memory for one record, not yet constructed.
///
/// Dropping it frees the memory without running any destructor.
pub struct UninitRecord {
    allocation: Allocation,
    schema: Arc<RecordSchema>,
}

impl UninitRecord {
    /// Allocates `schema.size()` bytes aligned to `schema.align()`.
    pub fn allocate(schema: Arc<RecordSchema>, allocator: Arc<dyn RawAllocator>) -> Result<Self> {
        let allocation = Allocation::new(&schema, allocator)?;
        Ok(Self { allocation, schema })
    }

    #[inline]
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.allocation.layout.size()
    }

    /// Runs the schema's constructors and returns the live record.
    pub fn initialize(self) -> RecordBuffer {
        let UninitRecord { allocation, schema } = self;
        unsafe { ops::initialize_struct(&schema, allocation.ptr.as_ptr()) };
        RecordBuffer { allocation, schema }
    }
}

/// A live record: typed values at the offsets of its schema.
///
/// Dropping the buffer destroys every field before freeing the memory.
pub struct RecordBuffer {
    allocation: Allocation,
    schema: Arc<RecordSchema>,
}

// The buffer exclusively owns its contents, which are plain owned Rust
// values; shared references only permit reads.
unsafe impl Send for RecordBuffer {}
unsafe impl Sync for RecordBuffer {}

impl RecordBuffer {
    /// Allocates and default-constructs a record with the global allocator.
    pub fn new(schema: Arc<RecordSchema>) -> Result<Self> {
        Self::new_in(schema, Arc::new(SystemAllocator))
    }

    /// Allocates and default-constructs a record with `allocator`.
    pub fn new_in(schema: Arc<RecordSchema>, allocator: Arc<dyn RawAllocator>) -> Result<Self> {
        Ok(UninitRecord::allocate(schema, allocator)?.initialize())
    }

    #[inline]
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.allocation.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.allocation.ptr.as_ptr()
    }

    /// Assigns every field of `source` to this record.
    ///
    /// Fails if the two schemas are not layout compatible.
    pub fn copy_from(&mut self, source: &RecordBuffer) -> Result<()> {
        if !self.schema.is_compatible_with(&source.schema) {
            return Err(Error::invalid_operation(format!(
                "Cannot copy {} into {}",
                source.schema.name(),
                self.schema.name()
            )));
        }
        let schema = Arc::clone(&self.schema);
        unsafe { ops::copy_struct(&schema, self.as_mut_ptr(), source.as_ptr()) };
        Ok(())
    }

    /// Deep-copies the record into a new buffer from the same allocator.
    pub fn try_clone(&self) -> Result<RecordBuffer> {
        let mut copy = Self::new_in(
            Arc::clone(&self.schema),
            Arc::clone(&self.allocation.allocator),
        )?;
        copy.copy_from(self)?;
        Ok(copy)
    }

    /// Locates a field by dotted path and hands its address and type to `f`.
    ///
    /// Returns `None` if the path does not resolve.
    pub fn with_field_mut<R>(
        &mut self,
        path: &str,
        f: impl FnOnce(NonNull<u8>, &TypeDescriptor) -> R,
    ) -> Option<R> {
        let schema = Arc::clone(&self.schema);
        let field = schema.resolve(path)?;
        debug_assert!(field.offset() + field.descriptor().size() <= schema.size());
        let ptr = unsafe { NonNull::new_unchecked(self.as_mut_ptr().add(field.offset())) };
        Some(f(ptr, field.descriptor()))
    }

    /// Read-only counterpart of [`with_field_mut`](Self::with_field_mut).
    pub fn with_field<R>(
        &self,
        path: &str,
        f: impl FnOnce(*const u8, &TypeDescriptor) -> R,
    ) -> Option<R> {
        let field = self.schema.resolve(path)?;
        let ptr = unsafe { self.as_ptr().add(field.offset()) };
        Some(f(ptr, field.descriptor()))
    }
}

impl Drop for RecordBuffer {
    fn drop(&mut self) {
        unsafe { ops::destroy_struct(&self.schema, self.allocation.ptr.as_ptr()) }
    }
}

impl fmt::Debug for RecordBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordBuffer")
            .field("schema", &self.schema.name())
            .field("size", &self.schema.size())
            .field("value", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use rowsmith_core::schema::RecordSchemaBuilder;
    use rowsmith_core::{Name, ScriptArray, Text};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn item_schema() -> Arc<RecordSchema> {
        RecordSchemaBuilder::new("ItemRow")
            .unwrap()
            .add_field("Title", TypeDescriptor::Text)
            .unwrap()
            .add_field("Damage", TypeDescriptor::Int32)
            .unwrap()
            .add_field("Tags", TypeDescriptor::list(TypeDescriptor::String))
            .unwrap()
            .build()
            .unwrap()
    }

    /// Counts live blocks and can be told to fail.
    #[derive(Default)]
    struct CountingAllocator {
        live: AtomicUsize,
        fail: bool,
    }

    impl RawAllocator for CountingAllocator {
        fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
            if self.fail {
                return None;
            }
            self.live.fetch_add(1, Ordering::SeqCst);
            SystemAllocator.allocate(layout)
        }

        unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
            self.live.fetch_sub(1, Ordering::SeqCst);
            SystemAllocator.free(ptr, layout);
        }
    }

    fn push_tag(buffer: &mut RecordBuffer, tag: &str) {
        buffer
            .with_field_mut("Tags", |ptr, desc| unsafe {
                let array = &mut *ptr.as_ptr().cast::<ScriptArray>();
                let element = match desc {
                    TypeDescriptor::List(element) => element.as_ref(),
                    _ => unreachable!(),
                };
                let index = array.add_zeroed(1, element.layout());
                let slot = array.element_ptr(index, element.layout());
                ops::initialize_value(element, slot);
                *slot.cast::<String>() = tag.to_string();
            })
            .unwrap();
    }

    #[test]
    fn test_new_is_default_constructed() {
        let buffer = RecordBuffer::new(item_schema()).unwrap();
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.field("Damage"), Some(&FieldValue::Int32(0)));
        assert_eq!(snapshot.field("Title"), Some(&FieldValue::Text(Text::default())));
        assert_eq!(snapshot.field("Tags"), Some(&FieldValue::List(Vec::new())));
        assert_eq!(buffer.as_ptr() as usize % buffer.schema().align(), 0);
    }

    #[test]
    fn test_allocation_failure() {
        let allocator = Arc::new(CountingAllocator {
            fail: true,
            ..Default::default()
        });
        let err = RecordBuffer::new_in(item_schema(), allocator).unwrap_err();
        assert!(matches!(err, Error::AllocationFailed { .. }));
    }

    #[test]
    fn test_drop_frees_memory() {
        let allocator = Arc::new(CountingAllocator::default());
        {
            let mut buffer = RecordBuffer::new_in(item_schema(), allocator.clone()).unwrap();
            push_tag(&mut buffer, "Melee");
            let copy = buffer.try_clone().unwrap();
            assert_eq!(allocator.live.load(Ordering::SeqCst), 2);
            drop(copy);
            assert_eq!(allocator.live.load(Ordering::SeqCst), 1);
        }
        assert_eq!(allocator.live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_uninit_drop_frees_without_destroying() {
        let allocator = Arc::new(CountingAllocator::default());
        let uninit = UninitRecord::allocate(item_schema(), allocator.clone()).unwrap();
        assert_eq!(uninit.size(), item_schema().size());
        drop(uninit);
        assert_eq!(allocator.live.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_copy_is_deep() {
        let mut source = RecordBuffer::new(item_schema()).unwrap();
        push_tag(&mut source, "Melee");
        push_tag(&mut source, "Rare");
        source
            .with_field_mut("Damage", |ptr, _| unsafe { *ptr.as_ptr().cast::<i32>() = 10 })
            .unwrap();

        let mut target = RecordBuffer::new(item_schema()).unwrap();
        push_tag(&mut target, "Stale");
        target.copy_from(&source).unwrap();
        drop(source);

        let snapshot = target.snapshot();
        assert_eq!(snapshot.field("Damage"), Some(&FieldValue::Int32(10)));
        assert_eq!(
            snapshot.field("Tags"),
            Some(&FieldValue::List(vec![
                FieldValue::String("Melee".into()),
                FieldValue::String("Rare".into()),
            ]))
        );
    }

    #[test]
    fn test_copy_rejects_incompatible_schema() {
        let other = RecordSchemaBuilder::new("Other")
            .unwrap()
            .add_field("Id", TypeDescriptor::Name)
            .unwrap()
            .build()
            .unwrap();
        let mut target = RecordBuffer::new(item_schema()).unwrap();
        let source = RecordBuffer::new(other).unwrap();
        assert!(matches!(
            target.copy_from(&source),
            Err(Error::InvalidOperation { .. })
        ));
        assert!(source
            .with_field("Id", |ptr, _| unsafe { *ptr.cast::<Name>() })
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_unknown_path() {
        let mut buffer = RecordBuffer::new(item_schema()).unwrap();
        assert!(buffer.with_field_mut("Missing", |_, _| ()).is_none());
        assert!(buffer.with_field("Damage.Inner", |_, _| ()).is_none());
    }
}
