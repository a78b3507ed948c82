//! Template context: serializable rendering payload built from [`TypeDescriptor`].

use serde::{Deserialize, Serialize};

use wrapgen_core::types::TypeDescriptor;

use crate::error::RenderError;

/// Payload handed to every template.
///
/// Descriptor fields live under `t`; category switches are precomputed so
/// templates only test booleans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    pub t: DescriptorCtx,
    /// Integral and floating types get add/sub/mul/div stubs.
    pub use_arithmetic: bool,
    /// Integral types get MIN/MAX properties.
    pub is_integral: bool,
    /// Mutable and `const_` record-field variants, in emission order.
    pub record_variants: Vec<RecordVariantCtx>,
}

/// Flat string view of a descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorCtx {
    pub api: String,
    pub category: String,
    pub c_type: String,
    pub kind: String,
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
    pub f_create_array: String,
    pub f_bind: String,
    pub primitive_parent: String,
    pub array_parent: String,
    pub script_type: Option<String>,
    pub bounds: Option<BoundsCtx>,
}

/// Bounds rendered as decimal strings; `u64::MAX` does not fit a JSON `i64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsCtx {
    pub min: String,
    pub max: String,
}

/// One record-field wrapper variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordVariantCtx {
    /// `""` or `"const_"`.
    pub prefix: String,
    pub wrapper: String,
}

impl TemplateContext {
    /// Build a [`TemplateContext`] from a [`TypeDescriptor`].
    pub fn from_descriptor(d: &TypeDescriptor) -> Self {
        let t = DescriptorCtx {
            api: d.api.clone(),
            category: d.category.to_string(),
            c_type: d.native_type.clone(),
            kind: d.kind.clone(),
            title: d.title.clone(),
            title_array: d.title_array.clone(),
            title_array_init: d.title_array_init.clone(),
            title_record_member: d.title_record_member.clone(),
            title_const_record_member: d.title_const_record_member.clone(),
            primitive: d.primitive.clone(),
            array: d.array.clone(),
            managed_value: d.managed_value.clone(),
            managed_array: d.managed_array.clone(),
            managed_type_handle: d.managed_type_handle.clone(),
            record_field: d.record_field.clone(),
            const_record_field: d.const_record_field.clone(),
            f_create_array: d.create_array_fn.clone(),
            f_bind: d.bind_fn.clone(),
            primitive_parent: d.primitive_parent.clone(),
            array_parent: d.array_parent.clone(),
            script_type: d.script_type.clone(),
            bounds: d.bounds.map(|b| BoundsCtx {
                min: b.min.to_string(),
                max: b.max.to_string(),
            }),
        };

        let record_variants = vec![
            RecordVariantCtx {
                prefix: String::new(),
                wrapper: d.record_field.clone(),
            },
            RecordVariantCtx {
                prefix: "const_".to_string(),
                wrapper: d.const_record_field.clone(),
            },
        ];

        TemplateContext {
            t,
            use_arithmetic: d.has_arithmetic(),
            is_integral: d.is_integral(),
            record_variants,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
