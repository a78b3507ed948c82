//! The closed set of supported types.
//!
//! # Declaration order
//!
//! ```text
//! bool  byte  ubyte  short  ushort  int  uint  long  ulong  float  double
//! ```
//!
//! This order is the emission order for every generated block. [`TypeRegistry::all`]
//! and every narrowed registry from [`TypeRegistry::select`] preserve it.

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::types::{Category, TypeDecl, TypeDescriptor};

/// Declarations of every supported type, in emission order.
pub const BUILTIN_TYPES: [TypeDecl; 11] = [
    TypeDecl::new("bool", "bool", Category::Base).with_script_type("True"),
    TypeDecl::new("byte", "int8_t", Category::Integral),
    TypeDecl::new("ubyte", "uint8_t", Category::Integral),
    TypeDecl::new("short", "int16_t", Category::Integral),
    TypeDecl::new("ushort", "uint16_t", Category::Integral),
    TypeDecl::new("int", "int32_t", Category::Integral),
    TypeDecl::new("uint", "uint32_t", Category::Integral),
    TypeDecl::new("long", "int64_t", Category::Integral),
    TypeDecl::new("ulong", "uint64_t", Category::Integral),
    TypeDecl::new("float", "float", Category::Floating),
    TypeDecl::new("double", "double", Category::Floating),
];

/// Ordered, immutable collection of descriptors with lookup by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    descriptors: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Registry of every built-in type.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_decls(&BUILTIN_TYPES)
    }

    /// Build a registry from declarations, keeping their order.
    pub fn from_decls(decls: &[TypeDecl]) -> Result<Self, RegistryError> {
        let descriptors = decls
            .iter()
            .map(TypeDescriptor::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_descriptors(descriptors))
    }

    fn from_descriptors(descriptors: Vec<TypeDescriptor>) -> Self {
        let index = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.api.clone(), i))
            .collect();
        Self { descriptors, index }
    }

    /// All descriptors in declaration order.
    pub fn all(&self) -> &[TypeDescriptor] {
        &self.descriptors
    }

    /// Descriptor for `name`, or [`RegistryError::UnknownType`].
    pub fn get(&self, name: &str) -> Result<&TypeDescriptor, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.descriptors[i])
            .ok_or_else(|| RegistryError::UnknownType { name: name.to_owned() })
    }

    /// Narrow to the named types, still in declaration order.
    ///
    /// Every name must be known; duplicates are collapsed.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, RegistryError> {
        for name in names {
            self.get(name.as_ref())?;
        }
        let descriptors = self
            .descriptors
            .iter()
            .filter(|d| names.iter().any(|n| n.as_ref() == d.api))
            .cloned()
            .collect();
        Ok(Self::from_descriptors(descriptors))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeDescriptor> {
        self.descriptors.iter()
    }
}

impl<'a> IntoIterator for &'a TypeRegistry {
    type Item = &'a TypeDescriptor;
    type IntoIter = std::slice::Iter<'a, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;

    fn registry() -> TypeRegistry {
        TypeRegistry::builtin().expect("builtin registry")
    }

    #[test]
    fn all_follows_declaration_order() {
        let reg = registry();
        let names: Vec<&str> = reg.all().iter().map(|d| d.api.as_str()).collect();
        assert_eq!(
            names,
            [
                "bool", "byte", "ubyte", "short", "ushort", "int", "uint", "long", "ulong",
                "float", "double"
            ]
        );
    }

    #[test]
    fn get_unknown_fails() {
        let err = registry().get("unknown").unwrap_err();
        assert_eq!(err, RegistryError::UnknownType { name: "unknown".to_string() });
        assert!(err.to_string().contains("unknown type 'unknown'"));
    }

    #[test]
    fn get_double_is_floating_without_bounds() {
        let reg = registry();
        let d = reg.get("double").expect("double");
        assert_eq!(d.category, Category::Floating);
        assert!(d.bounds.is_none());
    }

    #[test]
    fn get_long_has_signed_64_bit_bounds() {
        let reg = registry();
        let d = reg.get("long").expect("long");
        assert_eq!(d.bounds, Some(Bounds { min: i64::MIN as i128, max: i64::MAX as i128 }));
    }

    #[test]
    fn select_keeps_declaration_order() {
        let narrowed = registry().select(&["byte", "bool"]).expect("select");
        let names: Vec<&str> = narrowed.iter().map(|d| d.api.as_str()).collect();
        assert_eq!(names, ["bool", "byte"]);
        assert!(narrowed.get("ubyte").is_err());
    }

    #[test]
    fn select_rejects_unknown_names() {
        let err = registry().select(&["bool", "quad"]).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownType { name } if name == "quad"));
    }

    #[test]
    fn select_collapses_duplicates() {
        let narrowed = registry().select(&["int", "int"]).expect("select");
        assert_eq!(narrowed.len(), 1);
    }

    #[test]
    fn building_twice_yields_identical_registries() {
        assert_eq!(registry(), registry());
    }
}
