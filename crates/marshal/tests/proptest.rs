//! Property-based tests for rowsmith-marshal using proptest.

use proptest::prelude::*;
use rowsmith_core::schema::{RecordSchema, RecordSchemaBuilder, TypeDescriptor};
use rowsmith_core::{DynamicValue, Mapping};
use rowsmith_marshal::ValueWriter;
use rowsmith_memory::{FieldValue, RecordBuffer};
use rowsmith_storage::ObjectRegistry;
use std::sync::Arc;

fn schema() -> Arc<RecordSchema> {
    let recipe = RecordSchemaBuilder::new("Recipe")
        .unwrap()
        .add_field("Count", TypeDescriptor::Int32)
        .unwrap()
        .build()
        .unwrap();
    RecordSchemaBuilder::new("Row")
        .unwrap()
        .add_field("Count", TypeDescriptor::Int32)
        .unwrap()
        .add_field("Ratio", TypeDescriptor::Float32)
        .unwrap()
        .add_field("Weight", TypeDescriptor::Float64)
        .unwrap()
        .add_field("Enabled", TypeDescriptor::Boolean)
        .unwrap()
        .add_field("Label", TypeDescriptor::String)
        .unwrap()
        .add_field("Labels", TypeDescriptor::list(TypeDescriptor::String))
        .unwrap()
        .add_field(
            "Recipes",
            TypeDescriptor::map(TypeDescriptor::Name, TypeDescriptor::Struct(recipe)),
        )
        .unwrap()
        .build()
        .unwrap()
}

fn write(row: &mut RecordBuffer, registry: &ObjectRegistry, path: &str, value: DynamicValue) {
    let mut writer = ValueWriter::new(registry.names(), registry);
    writer.write_field(row, path, &value);
    assert!(writer.issues().is_empty(), "{:?}", writer.issues());
}

proptest! {
    /// Primitive fields read back exactly what was written; float32 only
    /// loses single-precision rounding.
    #[test]
    fn primitive_round_trip(
        count in any::<i32>(),
        ratio in -1.0e6f64..1.0e6,
        weight in any::<f64>().prop_filter("finite", |w| w.is_finite()),
        enabled in any::<bool>(),
        label in ".{0,32}",
    ) {
        let registry = ObjectRegistry::default();
        let mut row = RecordBuffer::new(schema()).unwrap();
        write(&mut row, &registry, "Count", DynamicValue::Integer(count as i64));
        write(&mut row, &registry, "Ratio", DynamicValue::Number(ratio));
        write(&mut row, &registry, "Weight", DynamicValue::Number(weight));
        write(&mut row, &registry, "Enabled", DynamicValue::Boolean(enabled));
        write(&mut row, &registry, "Label", DynamicValue::from(label.as_str()));

        prop_assert_eq!(row.read_field("Count"), Some(FieldValue::Int32(count)));
        prop_assert_eq!(row.read_field("Weight"), Some(FieldValue::Float64(weight)));
        prop_assert_eq!(row.read_field("Enabled"), Some(FieldValue::Boolean(enabled)));
        prop_assert_eq!(row.read_field("Label"), Some(FieldValue::String(label.clone())));

        let stored = row.read_field("Ratio").and_then(|v| v.as_f32()).unwrap();
        prop_assert_eq!(stored, ratio as f32);
        let bound = ratio.abs() * f32::EPSILON as f64 + f32::MIN_POSITIVE as f64;
        prop_assert!((stored as f64 - ratio).abs() <= bound);
    }

    /// A list write yields exactly the supplied elements in order, whatever
    /// the container held before.
    #[test]
    fn list_rebuild_matches_input(
        before in prop::collection::vec("[a-z]{0,8}", 0..16),
        after in prop::collection::vec("[a-z]{0,8}", 0..16),
    ) {
        let registry = ObjectRegistry::default();
        let mut row = RecordBuffer::new(schema()).unwrap();
        write(&mut row, &registry, "Labels", DynamicValue::list(before.iter().map(String::as_str)));
        write(&mut row, &registry, "Labels", DynamicValue::list(after.iter().map(String::as_str)));

        let expected: Vec<FieldValue> = after.iter().cloned().map(FieldValue::String).collect();
        prop_assert_eq!(row.read_field("Labels"), Some(FieldValue::List(expected)));
    }

    /// A map write yields one entry per supplied key, in order.
    #[test]
    fn map_rebuild_matches_input(
        before in prop::collection::vec(("[A-Z][a-z]{0,6}", any::<i32>()), 0..8),
        after in prop::collection::vec(("[A-Z][a-z]{0,6}", any::<i32>()), 0..8),
    ) {
        let registry = ObjectRegistry::default();
        let mut row = RecordBuffer::new(schema()).unwrap();
        let as_value = |entries: &[(String, i32)]| -> DynamicValue {
            entries
                .iter()
                .map(|(k, c)| (k.as_str(), DynamicValue::mapping([("Count", *c)])))
                .collect::<Mapping>()
                .into()
        };
        write(&mut row, &registry, "Recipes", as_value(&before));
        write(&mut row, &registry, "Recipes", as_value(&after));

        let recipes = row.read_field("Recipes").unwrap();
        let entries = recipes.as_map().unwrap();
        prop_assert_eq!(entries.len(), after.len());
        for ((key, value), (name, count)) in entries.iter().zip(&after) {
            let interned = registry.names().find(name).unwrap();
            prop_assert_eq!(key, &FieldValue::Name(interned));
            prop_assert_eq!(value.field("Count"), Some(&FieldValue::Int32(*count)));
        }
    }
}
