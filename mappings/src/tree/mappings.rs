//! The mappings data model (component B): an immutable, multi-namespace symbol table.
//!
//! `names[i]` in every entity below is that entity's name in `Mappings::namespaces[i]`. A
//! descriptor is always expressed in terms of namespace 0 (invariant 3) — every algebra
//! operation in [`crate::algebra`] that reshapes the namespace list is responsible for
//! re-expressing descriptors so this stays true of its output.

use indexmap::IndexMap;
use crate::error::{MappingsError, Result};

/// An immutable, multi-namespace mapping document.
///
/// Once built, a `Mappings` is never mutated in place; every operation in [`crate::algebra`]
/// returns a fresh value.
#[derive(Debug, Clone, PartialEq)]
pub struct Mappings {
	pub namespaces: Vec<String>,
	pub classes: Vec<MappedClass>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappedClass {
	pub names: Vec<String>,
	pub comments: Vec<String>,
	pub fields: Vec<MappedField>,
	pub methods: Vec<MappedMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedField {
	pub names: Vec<String>,
	pub comments: Vec<String>,
	/// The field's type descriptor, expressed in namespace 0. Optional since not every format
	/// that can be read into a `Mappings` carries field descriptors.
	pub desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedMethod {
	pub names: Vec<String>,
	pub comments: Vec<String>,
	/// The method's descriptor, always expressed in namespace 0 (invariant 3).
	pub desc: String,
	pub parameters: Vec<MappedParameter>,
	pub variables: Vec<MappedLocal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedParameter {
	/// Zero-based formal parameter index (not an LVT slot index: see [`MappedLocal::index`]).
	pub index: u16,
	pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedLocal {
	/// The local variable table slot index, as used by `iload`/`astore`/... instructions.
	pub index: u16,
	/// Disambiguates two local variables that reuse the same slot in disjoint live ranges.
	pub start_offset: Option<u16>,
	pub names: Vec<String>,
}

fn check_arity(what: &'static str, names: &[String], expected: usize) -> Result<()> {
	if names.len() != expected {
		return Err(MappingsError::ArityMismatch { what, expected, got: names.len() });
	}
	Ok(())
}

impl Mappings {
	/// Creates an empty mappings document over the given namespaces.
	///
	/// Fails if fewer than one namespace is given (invariant 2).
	pub fn new(namespaces: Vec<String>) -> Result<Mappings> {
		if namespaces.is_empty() {
			return Err(MappingsError::ArityMismatch { what: "Mappings::namespaces", expected: 1, got: 0 });
		}
		Ok(Mappings { namespaces, classes: Vec::new() })
	}

	/// Finds the index of the namespace with the given label.
	pub fn namespace_index(&self, name: &str) -> Result<usize> {
		self.namespaces.iter().position(|n| n == name)
			.ok_or_else(|| MappingsError::NamespaceNotFound { name: name.to_owned(), available: self.namespaces.clone() })
	}

	/// Appends a class, checking that its `names` has one entry per namespace (invariant 1) and
	/// that no other class in this document already uses the same namespace-0 name (invariant 4).
	pub fn add_class(&mut self, class: MappedClass) -> Result<()> {
		check_arity("MappedClass::names", &class.names, self.namespaces.len())?;
		if let Some(existing) = self.classes.iter().find(|c| c.names[0] == class.names[0]) {
			return Err(MappingsError::InvalidName(anyhow::anyhow!(
				"duplicate class name {:?} in namespace 0 (already used by {:?})", class.names[0], existing.names,
			)));
		}
		self.classes.push(class);
		Ok(())
	}

	/// The number of namespaces this document has.
	pub fn namespace_count(&self) -> usize {
		self.namespaces.len()
	}

	/// Builds the flat remapping table described in spec §6: a plain string-to-string map from
	/// every class/field/method's name in `from` to its name in `to`.
	///
	/// - class entry key: `<from_internal>`
	/// - field entry key: `<from_owner>.<from_name>`
	/// - method entry key: `<from_owner>.<from_name><desc in namespace 0>`
	pub fn as_flat_map(&self, from: &str, to: &str, include_methods: bool, include_fields: bool) -> Result<IndexMap<String, String>> {
		let from_i = self.namespace_index(from)?;
		let to_i = self.namespace_index(to)?;

		let mut map = IndexMap::new();
		for class in &self.classes {
			let owner_from = &class.names[from_i];
			let owner_to = &class.names[to_i];
			map.insert(owner_from.clone(), owner_to.clone());

			if include_fields {
				for field in &class.fields {
					let key = format!("{owner_from}.{}", field.names[from_i]);
					map.insert(key, field.names[to_i].clone());
				}
			}

			if include_methods {
				for method in &class.methods {
					let key = format!("{owner_from}.{}{}", method.names[from_i], method.desc);
					map.insert(key, method.names[to_i].clone());
				}
			}
		}

		Ok(map)
	}
}

impl MappedClass {
	pub fn new(names: Vec<String>) -> MappedClass {
		MappedClass { names, comments: Vec::new(), fields: Vec::new(), methods: Vec::new() }
	}

	pub fn add_field(&mut self, field: MappedField) -> Result<()> {
		check_arity("MappedField::names", &field.names, self.names.len())?;
		if let Some(existing) = self.fields.iter().find(|f| f.names[0] == field.names[0]) {
			return Err(MappingsError::InvalidName(anyhow::anyhow!(
				"duplicate field name {:?} in class {:?} (already used by {:?})", field.names[0], self.names, existing.names,
			)));
		}
		self.fields.push(field);
		Ok(())
	}

	pub fn add_method(&mut self, method: MappedMethod) -> Result<()> {
		check_arity("MappedMethod::names", &method.names, self.names.len())?;
		if let Some(existing) = self.methods.iter().find(|m| m.names[0] == method.names[0] && m.desc == method.desc) {
			return Err(MappingsError::InvalidName(anyhow::anyhow!(
				"duplicate method {:?}{} in class {:?} (already used by {:?}{})",
				method.names[0], method.desc, self.names, existing.names[0], existing.desc,
			)));
		}
		self.methods.push(method);
		Ok(())
	}
}

impl MappedMethod {
	pub fn new(names: Vec<String>, desc: String) -> MappedMethod {
		MappedMethod { names, comments: Vec::new(), desc, parameters: Vec::new(), variables: Vec::new() }
	}

	/// Constructor and class-initializer names never participate in cross-namespace translation
	/// (invariant 5): every namespace column holds the same special name.
	pub fn is_special(&self) -> bool {
		self.names.first().is_some_and(|n| n == "<init>" || n == "<clinit>")
	}
}

impl MappedField {
	pub fn new(names: Vec<String>) -> MappedField {
		MappedField { names, comments: Vec::new(), desc: None }
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	fn ns(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn add_class_checks_arity() {
		let mut m = Mappings::new(ns(&["obf", "named"])).unwrap();
		let bad = MappedClass::new(ns(&["a"]));
		assert!(m.add_class(bad).is_err());
	}

	#[test]
	fn add_class_rejects_duplicate() {
		let mut m = Mappings::new(ns(&["obf", "named"])).unwrap();
		m.add_class(MappedClass::new(ns(&["a", "Foo"]))).unwrap();
		assert!(m.add_class(MappedClass::new(ns(&["a", "Bar"]))).is_err());
	}

	#[test]
	fn flat_map_has_class_field_method_entries() {
		let mut m = Mappings::new(ns(&["obf", "named"])).unwrap();
		let mut c = MappedClass::new(ns(&["a", "Foo"]));
		c.add_field(MappedField::new(ns(&["f", "bar"]))).unwrap();
		c.add_method(MappedMethod::new(ns(&["m", "baz"]), "(I)V".to_owned())).unwrap();
		m.add_class(c).unwrap();

		let flat = m.as_flat_map("obf", "named", true, true).unwrap();
		assert_eq!(flat.get("a").unwrap(), "Foo");
		assert_eq!(flat.get("a.f").unwrap(), "bar");
		assert_eq!(flat.get("a.m(I)V").unwrap(), "baz");
	}
}
