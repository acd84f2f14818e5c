//! Remappers for remapping class names, descriptors, fields and methods.
//!
//! For remapping just classes and descriptors, use [`ARemapper`]. To also remap field and
//! method names (which requires walking superclasses to resolve inherited members), use
//! [`BRemapper`].
//!
//! A remapper answers the question "what is the name of X in namespace `to`, given its name in
//! namespace `from`?" — built once from a [`Mappings`] via [`Mappings::remapper_a`] /
//! [`Mappings::remapper_b`], then reused for every class, field, method and descriptor that
//! needs translating.

use indexmap::IndexMap;
use duke::tree::class::ClassName;
use crate::error::Result;
use crate::tree::mappings::Mappings;

/// Supplies the direct supertypes (superclass first, then interfaces, in declaration order) of
/// a class, so [`BRemapper`] can resolve a field or method access declared on an ancestor.
///
/// Lives in this crate only as an interface: the `mappings` crate has no notion of a classpath
/// or a class loader. A concrete implementation that actually walks a classpath belongs to
/// whatever crate has that classpath, which then hands an `&impl SuperClassProvider` back in.
pub trait SuperClassProvider {
	/// Returns `None` if the class is unknown to this provider (e.g. not found on the
	/// classpath); `Some(&[])` if it is known to have no supertypes (only `java/lang/Object`
	/// itself should answer this way).
	fn get_super_classes(&self, class: &str) -> anyhow::Result<Option<Vec<String>>>;
}

/// A [`SuperClassProvider`] that never knows about any class.
///
/// Useful when remapping descriptors or class names only, where no inheritance-aware member
/// resolution is ever attempted.
pub struct NoSuperClassProvider;

impl NoSuperClassProvider {
	pub fn new_ref() -> &'static NoSuperClassProvider {
		static INSTANCE: NoSuperClassProvider = NoSuperClassProvider;
		&INSTANCE
	}
}

impl SuperClassProvider for NoSuperClassProvider {
	fn get_super_classes(&self, _class: &str) -> anyhow::Result<Option<Vec<String>>> {
		Ok(None)
	}
}

impl<S: SuperClassProvider> SuperClassProvider for Vec<S> {
	fn get_super_classes(&self, class: &str) -> anyhow::Result<Option<Vec<String>>> {
		for provider in self {
			if let Some(supers) = provider.get_super_classes(class)? {
				return Ok(Some(supers));
			}
		}
		Ok(None)
	}
}

/// Remaps class names and, built on top of those, type descriptors.
pub trait ARemapper {
	/// Returns the mapped name, or `None` if this remapper has no entry for `class` (in which
	/// case callers are expected to pass the name through unchanged, per invariant: unmapped
	/// entities keep their name).
	fn map_class_fail(&self, class: &str) -> Option<String>;

	fn map_class(&self, class: &str) -> String {
		self.map_class_fail(class).unwrap_or_else(|| class.to_owned())
	}

	fn map_field_desc(&self, desc: &str) -> Result<String> {
		Ok(duke::descriptor_ops::map_type_desc(desc, |name| self.map_class_name_slice(name))?)
	}

	fn map_method_desc(&self, desc: &str) -> Result<String> {
		Ok(duke::descriptor_ops::map_method_desc(desc, |name| self.map_class_name_slice(name))?)
	}

	fn map_class_name_slice(&self, name: &duke::tree::class::ClassNameSlice) -> ClassName {
		let mapped = self.map_class(name.as_inner());
		// A `Mappings` entry's names are plain strings (see `tree::mappings`), trusted to be
		// well-formed internal class names rather than re-validated on every remap.
		unsafe { ClassName::from_inner_unchecked(mapped) }
	}
}

#[derive(Debug)]
pub struct ARemapperImpl<'m> {
	mappings: &'m Mappings,
	from: String,
	to: String,
	classes: IndexMap<&'m str, &'m str>,
}

impl ARemapper for ARemapperImpl<'_> {
	fn map_class_fail(&self, class: &str) -> Option<String> {
		self.classes.get(class).map(|&s| s.to_owned())
	}
}

impl<'m> ARemapperImpl<'m> {
	/// The same mappings, with `from` and `to` swapped.
	pub fn reverse(&self) -> Result<ARemapperImpl<'m>> {
		self.mappings.remapper_a(&self.to, &self.from)
	}
}

impl Mappings {
	/// Builds a remapper translating class names (and, derived from those, descriptors) from
	/// namespace `from` to namespace `to`.
	pub fn remapper_a(&self, from: &str, to: &str) -> Result<ARemapperImpl<'_>> {
		let from_i = self.namespace_index(from)?;
		let to_i = self.namespace_index(to)?;

		let mut classes = IndexMap::new();
		for class in &self.classes {
			classes.insert(class.names[from_i].as_str(), class.names[to_i].as_str());
		}
		Ok(ARemapperImpl { mappings: self, from: from.to_owned(), to: to.to_owned(), classes })
	}
}

/// Remaps field and method names (in addition to everything [`ARemapper`] remaps), resolving
/// inherited members through a [`SuperClassProvider`].
pub trait BRemapper: ARemapper {
	fn map_field_fail(&self, owner: &str, name: &str, desc: &str) -> anyhow::Result<Option<(String, String)>>;

	fn map_field(&self, owner: &str, name: &str, desc: &str) -> anyhow::Result<(String, String)> {
		match self.map_field_fail(owner, name, desc)? {
			Some(mapped) => Ok(mapped),
			None => Ok((name.to_owned(), self.map_field_desc(desc)?)),
		}
	}

	/// Looks up a field's mapped name alone, by walking inheritance the same way
	/// [`map_field_fail`](Self::map_field_fail) does but without matching on a descriptor:
	/// a field name is already unique within a class, so callers with no descriptor in hand
	/// (e.g. a mixin annotation's `field = "..."` value) can still resolve it.
	fn map_field_name_fail(&self, owner: &str, name: &str) -> anyhow::Result<Option<String>>;

	fn map_field_name(&self, owner: &str, name: &str) -> anyhow::Result<String> {
		Ok(self.map_field_name_fail(owner, name)?.unwrap_or_else(|| name.to_owned()))
	}

	fn map_method_fail(&self, owner: &str, name: &str, desc: &str) -> anyhow::Result<Option<(String, String)>>;

	fn map_method(&self, owner: &str, name: &str, desc: &str) -> anyhow::Result<(String, String)> {
		if name == "<init>" || name == "<clinit>" {
			return Ok((name.to_owned(), self.map_method_desc(desc)?));
		}
		match self.map_method_fail(owner, name, desc)? {
			Some(mapped) => Ok(mapped),
			None => Ok((name.to_owned(), self.map_method_desc(desc)?)),
		}
	}
}

#[derive(Debug)]
struct BRemapperClass {
	name: String,
	// keyed by name alone: a field name is unique within a class regardless of its descriptor
	fields: IndexMap<String, String>,
	// keyed by (name, desc) in namespace `from`, with `desc` always expressed in namespace 0
	methods: IndexMap<(String, String), (String, String)>,
}

/// A [`BRemapper`] built from a [`Mappings`] plus a [`SuperClassProvider`] for inheritance.
///
/// Building one eagerly constructs a second, "base" remapper translating `from` to namespace 0:
/// callers give method descriptors already expressed in `from`'s vocabulary (as produced
/// by an earlier pass, or read off a class file already partially remapped), while this
/// remapper's own lookup tables are keyed on descriptors in namespace 0 (so they can be built
/// directly from [`MappedMethod::desc`] with no translation). The base remapper bridges the two
/// without needing a lazily-initialized, globally shared sibling.
pub struct BRemapperImpl<'m, 'i, I> {
	mappings: &'m Mappings,
	from: String,
	to: String,
	classes: IndexMap<&'m str, BRemapperClass>,
	inheritance: &'i I,
	base: Option<Box<BRemapperImpl<'m, 'i, I>>>,
}

impl<'m, 'i, I: SuperClassProvider> BRemapperImpl<'m, 'i, I> {
	/// The same mappings and inheritance provider, with `from` and `to` swapped.
	pub fn reverse(&self) -> Result<BRemapperImpl<'m, 'i, I>> {
		self.mappings.remapper_b(&self.to, &self.from, self.inheritance)
	}
}

impl<I> ARemapper for BRemapperImpl<'_, '_, I> {
	fn map_class_fail(&self, class: &str) -> Option<String> {
		self.classes.get(class).map(|c| c.name.clone())
	}
}

impl<I: SuperClassProvider> BRemapper for BRemapperImpl<'_, '_, I> {
	fn map_field_fail(&self, owner: &str, name: &str, desc: &str) -> anyhow::Result<Option<(String, String)>> {
		match self.map_field_name_fail(owner, name)? {
			Some(mapped_name) => Ok(Some((mapped_name, self.map_field_desc(desc)?))),
			None => Ok(None),
		}
	}

	fn map_field_name_fail(&self, owner: &str, name: &str) -> anyhow::Result<Option<String>> {
		if let Some(class) = self.classes.get(owner) {
			if let Some(mapped_name) = class.fields.get(name) {
				return Ok(Some(mapped_name.clone()));
			}

			if let Some(supers) = self.inheritance.get_super_classes(owner)? {
				for super_class in &supers {
					if let Some(found) = self.map_field_name_fail(super_class, name)? {
						return Ok(Some(found));
					}
				}
			}
		}

		Ok(None)
	}

	fn map_method_fail(&self, owner: &str, name: &str, desc: &str) -> anyhow::Result<Option<(String, String)>> {
		let desc0 = match &self.base {
			Some(base) => base.map_method_desc(desc)?,
			None => desc.to_owned(),
		};

		if let Some(class) = self.classes.get(owner) {
			if let Some((mapped_name, mapped_desc)) = class.methods.get(&(name.to_owned(), desc0.clone())) {
				return Ok(Some((mapped_name.clone(), mapped_desc.clone())));
			}

			if let Some(supers) = self.inheritance.get_super_classes(owner)? {
				for super_class in &supers {
					if let Some(found) = self.map_method_fail(super_class, name, desc)? {
						return Ok(Some(found));
					}
				}
			}
		}

		Ok(None)
	}
}

impl Mappings {
	/// Builds a remapper translating field/method/class names from namespace `from` to `to`,
	/// resolving members inherited through `inheritance`.
	pub fn remapper_b<'m, 'i, I: SuperClassProvider>(&'m self, from: &str, to: &str, inheritance: &'i I) -> Result<BRemapperImpl<'m, 'i, I>> {
		self.remapper_b_impl(from, to, inheritance, true)
	}

	fn remapper_b_impl<'m, 'i, I: SuperClassProvider>(&'m self, from: &str, to: &str, inheritance: &'i I, build_base: bool) -> Result<BRemapperImpl<'m, 'i, I>> {
		let from_i = self.namespace_index(from)?;
		let to_i = self.namespace_index(to)?;

		// method descriptors are always recorded in namespace 0 (see `tree::mappings`); this
		// re-expresses them in `to`'s vocabulary once, up front, rather than on every lookup.
		let desc_remapper = self.remapper_a(&self.namespaces[0], to)?;

		let mut classes = IndexMap::new();
		for class in &self.classes {
			let mut fields = IndexMap::new();
			for field in &class.fields {
				fields.insert(field.names[from_i].clone(), field.names[to_i].clone());
			}

			let mut methods = IndexMap::new();
			for method in &class.methods {
				let mapped_desc = desc_remapper.map_method_desc(&method.desc)?;
				methods.insert((method.names[from_i].clone(), method.desc.clone()), (method.names[to_i].clone(), mapped_desc));
			}

			classes.insert(class.names[from_i].as_str(), BRemapperClass { name: class.names[to_i].clone(), fields, methods });
		}

		// namespace 0 is `from`'s own vocabulary: no translation needed, no base remapper.
		let base = if build_base && from_i != 0 {
			Some(Box::new(self.remapper_b_impl(from, &self.namespaces[0], inheritance, false)?))
		} else {
			None
		};

		Ok(BRemapperImpl { mappings: self, from: from.to_owned(), to: to.to_owned(), classes, inheritance, base })
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::tree::mappings::{MappedClass, MappedField, MappedMethod};
	use super::*;

	fn sample() -> Mappings {
		let mut m = Mappings::new(vec!["obf".to_owned(), "named".to_owned()]).unwrap();
		let mut c = MappedClass::new(vec!["a".to_owned(), "Foo".to_owned()]);
		c.add_field(MappedField { names: vec!["f".to_owned(), "bar".to_owned()], comments: vec![], desc: Some("I".to_owned()) }).unwrap();
		c.add_method(MappedMethod::new(vec!["m".to_owned(), "baz".to_owned()], "(La;)V".to_owned())).unwrap();
		m.add_class(c).unwrap();
		m
	}

	#[test]
	fn a_remapper_maps_class_and_desc() {
		let m = sample();
		let re = m.remapper_a("obf", "named").unwrap();
		assert_eq!(re.map_class("a"), "Foo");
		assert_eq!(re.map_class("unknown"), "unknown");
		assert_eq!(re.map_field_desc("La;").unwrap(), "LFoo;");
	}

	#[test]
	fn b_remapper_maps_field_and_method_names() {
		let m = sample();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		assert_eq!(re.map_field("a", "f", "I").unwrap(), ("bar".to_owned(), "I".to_owned()));
		assert_eq!(re.map_field_name("a", "f").unwrap(), "bar".to_owned());
		assert_eq!(re.map_method("a", "m", "(La;)V").unwrap(), ("baz".to_owned(), "(LFoo;)V".to_owned()));
	}

	#[test]
	fn a_remapper_reverse_swaps_from_and_to() {
		let m = sample();
		let re = m.remapper_a("obf", "named").unwrap().reverse().unwrap();
		assert_eq!(re.map_class("Foo"), "a");
	}

	#[test]
	fn b_remapper_reverse_swaps_from_and_to() {
		let m = sample();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap().reverse().unwrap();
		assert_eq!(re.map_field("Foo", "bar", "I").unwrap(), ("f".to_owned(), "I".to_owned()));
		assert_eq!(re.map_method("Foo", "baz", "(LFoo;)V").unwrap(), ("m".to_owned(), "(La;)V".to_owned()));
	}

	#[test]
	fn b_remapper_falls_through_to_super_class() {
		struct OneLevel;
		impl SuperClassProvider for OneLevel {
			fn get_super_classes(&self, class: &str) -> anyhow::Result<Option<Vec<String>>> {
				if class == "b" {
					Ok(Some(vec!["a".to_owned()]))
				} else {
					Ok(None)
				}
			}
		}

		let m = sample();
		let re = m.remapper_b("obf", "named", &OneLevel).unwrap();
		assert_eq!(re.map_field("b", "f", "I").unwrap(), ("bar".to_owned(), "I".to_owned()));
	}
}
