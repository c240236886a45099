//! In-memory representations for text and object reference fields.

use core::fmt;
use core::num::NonZeroU64;

/// Localized text.
///
/// Script writes produce culture-invariant text: empty namespace and key,
/// the caller's string as source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    namespace: String,
    key: String,
    source: String,
}

impl Text {
    /// Creates localized text.
    pub fn localized(
        namespace: impl Into<String>,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            source: source.into(),
        }
    }

    /// Creates text with no localization key.
    pub fn invariant(source: impl Into<String>) -> Self {
        Self::localized("", "", source)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the source string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// An unresolved asset reference: `/Game/Path/Asset.Asset:SubObject`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SoftObjectPath {
    asset_path: String,
    sub_path: String,
}

impl SoftObjectPath {
    /// Parses a path, splitting off the sub-object after the first `:`.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        match path.split_once(':') {
            Some((asset, sub)) => Self {
                asset_path: asset.to_string(),
                sub_path: sub.to_string(),
            },
            None => Self {
                asset_path: path.to_string(),
                sub_path: String::new(),
            },
        }
    }

    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }

    pub fn sub_path(&self) -> &str {
        &self.sub_path
    }

    /// Returns true if no asset is referenced.
    pub fn is_null(&self) -> bool {
        self.asset_path.is_empty()
    }
}

impl fmt::Display for SoftObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sub_path.is_empty() {
            f.write_str(&self.asset_path)
        } else {
            write!(f, "{}:{}", self.asset_path, self.sub_path)
        }
    }
}

/// Handle of a live host object.
///
/// Non-zero so that an object-reference field, stored as
/// `Option<ObjectHandle>`, stays pointer sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ObjectHandle(NonZeroU64);

impl ObjectHandle {
    /// Creates a handle from a raw id; zero is not a valid id.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(ObjectHandle)
    }

    #[inline]
    pub fn id(self) -> u64 {
        self.0.get()
    }
}

/// Resolves fully-qualified object paths to live objects.
pub trait ObjectResolver {
    /// Returns the object registered under `path`, if any.
    fn find_object(&self, path: &str) -> Option<ObjectHandle>;
}
