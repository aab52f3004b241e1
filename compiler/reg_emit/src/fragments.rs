//! Fragment rendering.
//!
//! The builder half of the builder/director pair: each method renders one
//! atomic fragment of the generated registry (header, tables, accessors,
//! enumeration, lookup methods) into the emission context. The director
//! decides the sequence.
//!
//! Path rendering: dotted host paths (`app.shapes.Circle`) become
//! crate-anchored Rust paths (`crate::app::shapes::Circle`); single-segment
//! names (primitives, local types) render unchanged.

use heck::ToSnakeCase;

use reg_graph::{
    AccessMode, ConstructorSignature, Name, RegistryModel, StringLookup, TypeRef, ValueDescriptor,
};

use crate::context::EmitContext;
use crate::error::EmitError;
use crate::literal;

pub(crate) struct FragmentBuilder<'a> {
    model: &'a RegistryModel,
    names: &'a dyn StringLookup,
    ctx: EmitContext,
}

impl<'a> FragmentBuilder<'a> {
    pub(crate) fn new(model: &'a RegistryModel, names: &'a dyn StringLookup) -> Self {
        FragmentBuilder {
            model,
            names,
            ctx: EmitContext::new(),
        }
    }

    // Returns `&'a str` (not `&self`-bound) so resolved names can be held
    // across mutations of the emission context.
    fn resolve(&self, name: Name) -> &'a str {
        self.names.resolve(name)
    }

    /// Render a type reference as a Rust path.
    fn rust_path(&self, reference: &TypeRef) -> String {
        let raw = self.resolve(reference.name);
        let mut path = if raw.contains('.') {
            format!("crate::{}", raw.replace('.', "::"))
        } else {
            raw.to_owned()
        };
        if !reference.args.is_empty() {
            let args: Vec<String> = reference.args.iter().map(|a| self.rust_path(a)).collect();
            path.push('<');
            path.push_str(&args.join(", "));
            path.push('>');
        }
        path
    }

    /// The concrete Rust path of one value's type.
    fn value_path(&self, value: &ValueDescriptor) -> String {
        format!("crate::{}", self.resolve(value.fqn).replace('.', "::"))
    }

    /// snake_case accessor stem from the display name.
    fn stem(&self, value: &ValueDescriptor) -> String {
        self.resolve(value.display).to_snake_case()
    }

    /// Whether a value gets a cached singleton accessor.
    fn is_singleton(&self, value: &ValueDescriptor) -> bool {
        self.model.mode == AccessMode::Singleton && !value.force_factory
    }

    /// Values that appear in the enumeration tables.
    fn enumerable(&self) -> impl Iterator<Item = &'a ValueDescriptor> {
        self.model
            .values
            .iter()
            .filter(|v| v.default_ctor.is_some())
    }

    /// A full constructor invocation using declared default literals.
    /// Only called for default-constructible signatures.
    fn ctor_call(
        &self,
        value: &ValueDescriptor,
        ctor: &ConstructorSignature,
    ) -> Result<String, EmitError> {
        let mut args = Vec::with_capacity(ctor.params.len());
        for param in &ctor.params {
            let Some(default) = param.default else {
                continue;
            };
            let raw = self.resolve(default);
            let Some(rendered) = literal::render(raw) else {
                return Err(EmitError::MalformedDefault {
                    option_type: self.resolve(value.fqn).to_owned(),
                    param: self.resolve(param.name).to_owned(),
                    literal: raw.to_owned(),
                });
            };
            args.push(rendered);
        }
        Ok(format!("{}::new({})", self.value_path(value), args.join(", ")))
    }

    /// The expression producing one enumeration entry, converted to the
    /// registry return type.
    fn entry_expr(&self, value: &ValueDescriptor) -> Result<String, EmitError> {
        if self.is_singleton(value) {
            return Ok(format!("{}().clone().into()", self.stem(value)));
        }
        let Some(ctor_idx) = value.default_ctor else {
            // Enumerable values always carry a default constructor.
            return Ok(String::new());
        };
        Ok(format!(
            "{}.into()",
            self.ctor_call(value, &value.constructors[ctor_idx])?
        ))
    }

    /// File header comment.
    pub(crate) fn header(&mut self) {
        self.ctx.raw_line("// Generated by regc. Do not edit manually.");
        self.ctx.raw_line(&format!(
            "// Registry `{}` over `{}`.",
            self.resolve(self.model.collection),
            self.resolve(self.model.base_fqn)
        ));
        self.ctx.blank();
    }

    /// Module opening, including the conditional `OnceLock` import.
    pub(crate) fn module_open(&mut self) {
        self.ctx.raw_line(&format!(
            "/// Generated accessors for the `{}` registry.",
            self.resolve(self.model.collection)
        ));
        self.ctx.open(&format!(
            "pub mod {} {{",
            self.resolve(self.model.collection).to_snake_case()
        ));

        let needs_once_lock = self.model.values.iter().any(|v| self.is_singleton(v));
        if needs_once_lock {
            self.ctx.line("use std::sync::OnceLock;");
            self.ctx.blank();
        }
    }

    /// `COUNT` and the display-name table.
    pub(crate) fn tables(&mut self) {
        let displays: Vec<String> = self
            .enumerable()
            .map(|v| format!("\"{}\"", self.resolve(v.display)))
            .collect();

        self.ctx.line("/// Number of enumerable values.");
        self.ctx
            .line(&format!("pub const COUNT: usize = {};", displays.len()));
        self.ctx.blank();
        self.ctx.line("/// Display names, indexed by id.");
        self.ctx.line(&format!(
            "pub const NAMES: [&str; COUNT] = [{}];",
            displays.join(", ")
        ));
        self.ctx.blank();
    }

    /// Singleton accessors and factory functions, one block per value.
    pub(crate) fn accessors(&mut self) -> Result<(), EmitError> {
        let model = self.model;
        for value in &model.values {
            if self.is_singleton(value) {
                self.singleton_accessor(value)?;
            } else {
                self.factory_functions(value)?;
            }
        }
        Ok(())
    }

    fn singleton_accessor(&mut self, value: &ValueDescriptor) -> Result<(), EmitError> {
        let path = self.value_path(value);
        let Some(ctor_idx) = value.default_ctor else {
            return Ok(());
        };
        let init = self.ctor_call(value, &value.constructors[ctor_idx])?;

        self.ctx.line(&format!(
            "/// Cached `{}` instance.",
            self.resolve(value.display)
        ));
        self.ctx.open(&format!(
            "pub fn {}() -> &'static {path} {{",
            self.stem(value)
        ));
        self.ctx
            .line(&format!("static VALUE: OnceLock<{path}> = OnceLock::new();"));
        self.ctx.line(&format!("VALUE.get_or_init(|| {init})"));
        self.ctx.close("}");
        self.ctx.blank();
        Ok(())
    }

    fn factory_functions(&mut self, value: &ValueDescriptor) -> Result<(), EmitError> {
        let path = self.value_path(value);
        for (i, ctor) in value.constructors.iter().enumerate() {
            let mut params = Vec::with_capacity(ctor.params.len());
            for param in &ctor.params {
                // Validate defaults even on factory paths, so a malformed
                // literal is caught no matter which constructor carries it.
                if let Some(default) = param.default {
                    let raw = self.resolve(default);
                    if literal::render(raw).is_none() {
                        return Err(EmitError::MalformedDefault {
                            option_type: self.resolve(value.fqn).to_owned(),
                            param: self.resolve(param.name).to_owned(),
                            literal: raw.to_owned(),
                        });
                    }
                }
                params.push(format!(
                    "{}: {}",
                    self.resolve(param.name).to_snake_case(),
                    self.rust_path(&param.ty)
                ));
            }
            let args: Vec<String> = ctor
                .params
                .iter()
                .map(|p| self.resolve(p.name).to_snake_case())
                .collect();

            let stem = self.stem(value);
            let fn_name = if i == 0 {
                format!("new_{stem}")
            } else {
                format!("new_{stem}_v{}", i + 1)
            };

            self.ctx.line(&format!(
                "/// Construct a `{}`.",
                self.resolve(value.display)
            ));
            self.ctx.open(&format!(
                "pub fn {fn_name}({}) -> {path} {{",
                params.join(", ")
            ));
            self.ctx
                .line(&format!("{path}::new({})", args.join(", ")));
            self.ctx.close("}");
            self.ctx.blank();
        }
        Ok(())
    }

    /// `all`, `by_id`, `by_name`, and `name_of`.
    pub(crate) fn enumeration(&mut self) -> Result<(), EmitError> {
        let ret = self.rust_path(&self.model.return_type);
        let entries: Vec<(String, String)> = self
            .enumerable()
            .map(|v| Ok((self.resolve(v.display).to_owned(), self.entry_expr(v)?)))
            .collect::<Result<_, EmitError>>()?;

        self.ctx.line("/// Every registered value, in registry order.");
        self.ctx.open(&format!("pub fn all() -> Vec<{ret}> {{"));
        if entries.is_empty() {
            self.ctx.line("Vec::new()");
        } else {
            let exprs: Vec<&str> = entries.iter().map(|(_, e)| e.as_str()).collect();
            self.ctx.line(&format!("vec![{}]", exprs.join(", ")));
        }
        self.ctx.close("}");
        self.ctx.blank();

        self.ctx.line("/// Value by numeric id.");
        self.ctx
            .open(&format!("pub fn by_id(id: usize) -> Option<{ret}> {{"));
        self.ctx.open("match id {");
        for (i, (_, expr)) in entries.iter().enumerate() {
            self.ctx.line(&format!("{i} => Some({expr}),"));
        }
        self.ctx.line("_ => None,");
        self.ctx.close("}");
        self.ctx.close("}");
        self.ctx.blank();

        self.ctx.line("/// Value by display name.");
        self.ctx
            .open(&format!("pub fn by_name(name: &str) -> Option<{ret}> {{"));
        self.ctx.open("match name {");
        for (display, expr) in &entries {
            self.ctx.line(&format!("\"{display}\" => Some({expr}),"));
        }
        self.ctx.line("_ => None,");
        self.ctx.close("}");
        self.ctx.close("}");
        self.ctx.blank();

        self.ctx.line("/// Display name by numeric id.");
        self.ctx
            .open("pub fn name_of(id: usize) -> Option<&'static str> {");
        self.ctx.line("NAMES.get(id).copied()");
        self.ctx.close("}");
        self.ctx.blank();
        Ok(())
    }

    /// One method per lookup property on the base type's chain.
    pub(crate) fn lookup_methods(&mut self) {
        let model = self.model;
        let ret = self.rust_path(&model.return_type);
        for lookup in &model.lookups {
            let method = self.resolve(lookup.method);
            let property = self.resolve(lookup.property).to_snake_case();
            let key = self.rust_path(&lookup.value_type);

            match lookup.cardinality {
                reg_graph::Cardinality::Single => {
                    self.ctx.line(&format!(
                        "/// First value whose `{}` equals `value`.",
                        self.resolve(lookup.property)
                    ));
                    self.ctx.open(&format!(
                        "pub fn {method}(value: {key}) -> Option<{ret}> {{"
                    ));
                    self.ctx.line(&format!(
                        "all().into_iter().find(|v| v.{property}() == value)"
                    ));
                }
                reg_graph::Cardinality::Multiple => {
                    self.ctx.line(&format!(
                        "/// Every value whose `{}` equals `value`.",
                        self.resolve(lookup.property)
                    ));
                    self.ctx.open(&format!(
                        "pub fn {method}(value: {key}) -> Vec<{ret}> {{"
                    ));
                    self.ctx.line(&format!(
                        "all().into_iter().filter(|v| v.{property}() == value).collect()"
                    ));
                }
            }
            self.ctx.close("}");
            self.ctx.blank();
        }
    }

    /// Module close.
    pub(crate) fn module_close(&mut self) {
        self.ctx.close("}");
    }

    /// Finalize the source text.
    pub(crate) fn finish(self) -> String {
        self.ctx.finish()
    }
}
