//! Property kind tags.
//!
//! A `PropertyKind` names the closed set of field kinds a record schema can
//! describe. The full description (nested schema, element types) lives in
//! `TypeDescriptor`; the kind is the cheap, `Copy` tag used for dispatch
//! diagnostics and error reporting.

/// Kind of a reflected property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// 32-bit signed integer
    Int32,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Boolean
    Boolean,
    /// Localized text
    Text,
    /// Owned string
    String,
    /// Interned name
    Name,
    /// Enumeration with a u8 discriminant
    Enum,
    /// Unresolved asset path
    SoftReference,
    /// Resolved object handle
    ObjectReference,
    /// Nested record
    Struct,
    /// Ordered list
    List,
    /// Key → value map
    Map,
}

impl PropertyKind {
    /// Returns the host-facing type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyKind::Int32 => "int32",
            PropertyKind::Float32 => "float",
            PropertyKind::Float64 => "double",
            PropertyKind::Boolean => "bool",
            PropertyKind::Text => "FText",
            PropertyKind::String => "FString",
            PropertyKind::Name => "FName",
            PropertyKind::Enum => "enum",
            PropertyKind::SoftReference => "TSoftObjectPtr",
            PropertyKind::ObjectReference => "UObject*",
            PropertyKind::Struct => "struct",
            PropertyKind::List => "TArray",
            PropertyKind::Map => "TMap",
        }
    }

    /// Returns whether values of this kind own heap storage and therefore
    /// need explicit construction and destruction.
    pub fn owns_storage(&self) -> bool {
        matches!(
            self,
            PropertyKind::Text
                | PropertyKind::String
                | PropertyKind::SoftReference
                | PropertyKind::Struct
                | PropertyKind::List
                | PropertyKind::Map
        )
    }

    /// Returns whether this kind is a container.
    pub fn is_container(&self) -> bool {
        matches!(self, PropertyKind::List | PropertyKind::Map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owns_storage() {
        assert!(!PropertyKind::Int32.owns_storage());
        assert!(!PropertyKind::Name.owns_storage());
        assert!(!PropertyKind::ObjectReference.owns_storage());
        assert!(PropertyKind::String.owns_storage());
        assert!(PropertyKind::Text.owns_storage());
        assert!(PropertyKind::List.owns_storage());
    }

    #[test]
    fn test_is_container() {
        assert!(PropertyKind::List.is_container());
        assert!(PropertyKind::Map.is_container());
        assert!(!PropertyKind::Struct.is_container());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(PropertyKind::Text.type_name(), "FText");
        assert_eq!(PropertyKind::Float32.type_name(), "float");
    }
}
