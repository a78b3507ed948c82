//! Domain types for the wrapper taxonomy.
//!
//! A [`TypeDescriptor`] is derived from a [`TypeDecl`] and nothing else: every
//! identifier is a string composition of the declaration's `api` name and its
//! title form, so re-deriving a descriptor always yields the same value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::{bounds_for_native, Bounds};
use crate::error::RegistryError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Taxonomy branch of a primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Boolean; no arithmetic, no bounds.
    Base,
    Integral,
    Floating,
}

/// Hand-written parent names that generated wrappers derive from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub primitive: &'static str,
    pub array: &'static str,
}

/// Indexed by category: base, integral, floating.
const TAXONOMY: [Taxonomy; 3] = [
    Taxonomy { primitive: "MDSPrimitiveBase", array: "MDSArrayBase" },
    Taxonomy { primitive: "MDSIntPrimitiveBase", array: "MDSIntArrayBase" },
    Taxonomy { primitive: "MDSFloatPrimitiveBase", array: "MDSFloatArrayBase" },
];

impl Category {
    /// Parent names for this category.
    pub fn taxonomy(self) -> Taxonomy {
        match self {
            Category::Base => TAXONOMY[0],
            Category::Integral => TAXONOMY[1],
            Category::Floating => TAXONOMY[2],
        }
    }

    /// Whether wrappers get the add/sub/mul/div fragment.
    pub fn has_arithmetic(self) -> bool {
        matches!(self, Category::Integral | Category::Floating)
    }

    /// Whether wrappers get the MIN/MAX fragment.
    pub fn has_bounds(self) -> bool {
        matches!(self, Category::Integral)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Base => write!(f, "base"),
            Category::Integral => write!(f, "integral"),
            Category::Floating => write!(f, "floating"),
        }
    }
}

/// The wrapper flavour rendered into one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Primitive,
    Array,
    Namespace,
    RecordField,
    ConcreteType,
}

impl TemplateKind {
    /// All template kinds in a stable order.
    pub fn all() -> &'static [TemplateKind] {
        &[
            TemplateKind::Primitive,
            TemplateKind::Array,
            TemplateKind::Namespace,
            TemplateKind::RecordField,
            TemplateKind::ConcreteType,
        ]
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Primitive => write!(f, "primitive"),
            TemplateKind::Array => write!(f, "array"),
            TemplateKind::Namespace => write!(f, "namespace"),
            TemplateKind::RecordField => write!(f, "record_field"),
            TemplateKind::ConcreteType => write!(f, "concrete_type"),
        }
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Static declaration of one supported type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDecl {
    pub api: &'static str,
    pub native_type: &'static str,
    pub category: Category,
    /// Literal used to coerce the scripting-side element type, if any.
    pub script_type: Option<&'static str>,
}

impl TypeDecl {
    pub const fn new(api: &'static str, native_type: &'static str, category: Category) -> Self {
        Self { api, native_type, category, script_type: None }
    }

    pub const fn with_script_type(mut self, script_type: &'static str) -> Self {
        self.script_type = Some(script_type);
        self
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Title form of an `api` name.
///
/// Plain title case, except that a leading `U` also uppercases the second
/// character of `api`: `ubyte` → `UByte`, `uint` → `UInt`.
pub fn display_name(api: &str) -> String {
    let mut chars = api.chars();
    let naive: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    if !naive.starts_with('U') {
        return naive;
    }
    let split = api.char_indices().nth(2).map(|(i, _)| i).unwrap_or(api.len());
    format!("{}{}", api[..split].to_uppercase(), &api[split..])
}

/// Immutable metadata for one supported primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub api: String,
    pub category: Category,
    pub native_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,

    pub title: String,
    pub title_array: String,
    pub title_array_init: String,
    pub title_record_member: String,
    pub title_const_record_member: String,

    pub primitive: String,
    pub array: String,
    pub managed_value: String,
    pub managed_array: String,
    pub managed_type_handle: String,
    pub record_field: String,
    pub const_record_field: String,
    /// Constant form, e.g. `mds::api::kind::UBYTE`.
    pub kind: String,
    pub create_array_fn: String,
    pub bind_fn: String,

    pub primitive_parent: String,
    pub array_parent: String,
}

impl TypeDescriptor {
    /// Derive a descriptor from its declaration.
    ///
    /// Fails if an integral declaration names a native type outside the
    /// bounds table.
    pub fn new(decl: &TypeDecl) -> Result<Self, RegistryError> {
        let api = decl.api;
        let bounds = if decl.category.has_bounds() {
            Some(bounds_for_native(decl.native_type).ok_or_else(|| {
                RegistryError::UnsupportedNativeType {
                    api: api.to_owned(),
                    native_type: decl.native_type.to_owned(),
                }
            })?)
        } else {
            None
        };

        let title = display_name(api);
        let title_array = format!("{title}Array");
        let title_record_member = format!("{title}RecordMember");
        let taxonomy = decl.category.taxonomy();

        Ok(Self {
            api: api.to_owned(),
            category: decl.category,
            native_type: decl.native_type.to_owned(),
            bounds,
            script_type: decl.script_type.map(str::to_owned),

            title_array_init: format!("{title_array}_Init"),
            title_const_record_member: format!("Const{title_record_member}"),
            title_array,
            title_record_member,
            title,

            primitive: format!("h_m{api}_t"),
            array: format!("h_array_{api}_t"),
            managed_value: format!("mv_{api}"),
            managed_array: format!("h_marray_{api}_t"),
            managed_type_handle: format!("managed_{api}_type_handle"),
            record_field: format!("h_rfield_{api}_t"),
            const_record_field: format!("h_const_rfield_{api}_t"),
            kind: format!("mds::api::kind::{}", api.to_uppercase()),
            create_array_fn: format!("create_{api}_marray"),
            bind_fn: format!("bind_{api}"),

            primitive_parent: taxonomy.primitive.to_owned(),
            array_parent: taxonomy.array.to_owned(),
        })
    }

    pub fn is_integral(&self) -> bool {
        self.category == Category::Integral
    }

    pub fn has_arithmetic(&self) -> bool {
        self.category.has_arithmetic()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rule_for_unsigned_names() {
        assert_eq!(display_name("ubyte"), "UByte");
        assert_eq!(display_name("ushort"), "UShort");
        assert_eq!(display_name("uint"), "UInt");
        assert_eq!(display_name("ulong"), "ULong");
    }

    #[test]
    fn title_rule_for_plain_names() {
        assert_eq!(display_name("bool"), "Bool");
        assert_eq!(display_name("double"), "Double");
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("u"), "U");
    }

    #[test]
    fn descriptor_identifiers() {
        let d = TypeDescriptor::new(&TypeDecl::new("ubyte", "uint8_t", Category::Integral))
            .expect("descriptor");
        assert_eq!(d.title_array, "UByteArray");
        assert_eq!(d.title_array_init, "UByteArray_Init");
        assert_eq!(d.title_record_member, "UByteRecordMember");
        assert_eq!(d.title_const_record_member, "ConstUByteRecordMember");
        assert_eq!(d.primitive, "h_mubyte_t");
        assert_eq!(d.array, "h_array_ubyte_t");
        assert_eq!(d.managed_value, "mv_ubyte");
        assert_eq!(d.managed_array, "h_marray_ubyte_t");
        assert_eq!(d.managed_type_handle, "managed_ubyte_type_handle");
        assert_eq!(d.record_field, "h_rfield_ubyte_t");
        assert_eq!(d.const_record_field, "h_const_rfield_ubyte_t");
        assert_eq!(d.kind, "mds::api::kind::UBYTE");
        assert_eq!(d.create_array_fn, "create_ubyte_marray");
        assert_eq!(d.bind_fn, "bind_ubyte");
        assert_eq!(d.primitive_parent, "MDSIntPrimitiveBase");
        assert_eq!(d.array_parent, "MDSIntArrayBase");
        assert_eq!(d.bounds, Some(Bounds { min: 0, max: 255 }));
    }

    #[test]
    fn derivation_is_deterministic() {
        let decl = TypeDecl::new("short", "int16_t", Category::Integral);
        assert_eq!(TypeDescriptor::new(&decl), TypeDescriptor::new(&decl));
    }

    #[test]
    fn integral_with_unknown_width_is_rejected() {
        let err = TypeDescriptor::new(&TypeDecl::new("huge", "int128_t", Category::Integral))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedNativeType { .. }));
    }

    #[test]
    fn non_integral_has_no_bounds() {
        let d = TypeDescriptor::new(&TypeDecl::new("float", "float", Category::Floating))
            .expect("descriptor");
        assert!(d.bounds.is_none());
        assert!(d.has_arithmetic());
        assert_eq!(d.primitive_parent, "MDSFloatPrimitiveBase");
    }

    #[test]
    fn each_category_has_its_own_parents() {
        assert_eq!(
            Category::Base.taxonomy(),
            Taxonomy { primitive: "MDSPrimitiveBase", array: "MDSArrayBase" }
        );
        assert_eq!(
            Category::Integral.taxonomy(),
            Taxonomy { primitive: "MDSIntPrimitiveBase", array: "MDSIntArrayBase" }
        );
        assert_eq!(
            Category::Floating.taxonomy(),
            Taxonomy { primitive: "MDSFloatPrimitiveBase", array: "MDSFloatArrayBase" }
        );
    }

    #[test]
    fn category_tables() {
        assert_eq!(Category::Base.taxonomy().array, "MDSArrayBase");
        assert!(!Category::Base.has_arithmetic());
        assert!(Category::Integral.has_bounds());
        assert!(!Category::Floating.has_bounds());
    }

    #[test]
    fn template_kind_display_matches_serde_name() {
        for kind in TemplateKind::all() {
            let yaml = serde_yaml::to_string(kind).expect("serialize");
            assert_eq!(yaml.trim(), kind.to_string());
        }
    }
}
