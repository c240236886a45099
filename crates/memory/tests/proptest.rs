//! Property-based tests for rowsmith-memory using proptest.

use proptest::prelude::*;
use rowsmith_core::schema::{RecordSchema, RecordSchemaBuilder, TypeDescriptor};
use rowsmith_core::ScriptArray;
use rowsmith_memory::{ops, FieldValue, RecordBuffer};
use std::sync::Arc;

fn schema() -> Arc<RecordSchema> {
    RecordSchemaBuilder::new("Row")
        .unwrap()
        .add_field("Count", TypeDescriptor::Int32)
        .unwrap()
        .add_field("Labels", TypeDescriptor::list(TypeDescriptor::String))
        .unwrap()
        .add_field(
            "Grid",
            TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::Int32)),
        )
        .unwrap()
        .build()
        .unwrap()
}

fn fill_labels(buffer: &mut RecordBuffer, labels: &[String]) {
    buffer
        .with_field_mut("Labels", |ptr, desc| unsafe {
            let TypeDescriptor::List(element) = desc else {
                unreachable!()
            };
            let layout = element.layout();
            let array = &mut *ptr.as_ptr().cast::<ScriptArray>();
            ops::clear_array(element, array, labels.len());
            array.add_zeroed(labels.len(), layout);
            for (i, label) in labels.iter().enumerate() {
                let slot = array.element_ptr(i, layout);
                ops::initialize_value(element, slot);
                (*slot.cast::<String>()).push_str(label);
            }
        })
        .unwrap();
}

fn fill_grid(buffer: &mut RecordBuffer, grid: &[Vec<i32>]) {
    buffer
        .with_field_mut("Grid", |ptr, desc| unsafe {
            let TypeDescriptor::List(row) = desc else {
                unreachable!()
            };
            let TypeDescriptor::List(cell) = row.as_ref() else {
                unreachable!()
            };
            let outer = &mut *ptr.as_ptr().cast::<ScriptArray>();
            outer.add_zeroed(grid.len(), row.layout());
            for (i, cells) in grid.iter().enumerate() {
                let slot = outer.element_ptr(i, row.layout());
                ops::initialize_value(row, slot);
                let inner = &mut *slot.cast::<ScriptArray>();
                inner.add_zeroed(cells.len(), cell.layout());
                for (j, value) in cells.iter().enumerate() {
                    *inner.element_ptr(j, cell.layout()).cast::<i32>() = *value;
                }
            }
        })
        .unwrap();
}

proptest! {
    /// Copying a record reproduces every element in order, and the copy
    /// outlives its source.
    #[test]
    fn copy_preserves_list_contents(
        labels in prop::collection::vec("[a-z]{0,12}", 0..24),
        stale in prop::collection::vec("[A-Z]{1,4}", 0..8),
    ) {
        let mut source = RecordBuffer::new(schema()).unwrap();
        fill_labels(&mut source, &labels);

        let mut target = RecordBuffer::new(schema()).unwrap();
        fill_labels(&mut target, &stale);
        target.copy_from(&source).unwrap();
        drop(source);

        let expected: Vec<FieldValue> = labels.iter().cloned().map(FieldValue::String).collect();
        prop_assert_eq!(target.read_field("Labels"), Some(FieldValue::List(expected)));
    }

    /// Nested lists are deep-copied.
    #[test]
    fn clone_preserves_nested_lists(
        grid in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..6), 0..6),
    ) {
        let mut source = RecordBuffer::new(schema()).unwrap();
        fill_grid(&mut source, &grid);
        let copy = source.try_clone().unwrap();
        drop(source);

        let expected = FieldValue::List(
            grid.iter()
                .map(|cells| FieldValue::List(cells.iter().copied().map(FieldValue::Int32).collect()))
                .collect(),
        );
        prop_assert_eq!(copy.read_field("Grid"), Some(expected));
    }
}
