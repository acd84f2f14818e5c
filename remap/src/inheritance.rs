//! Resolves a class's direct supertypes through a classpath (component C).
//!
//! [`mappings::remapper::SuperClassProvider`] is only an interface: the `mappings` crate has no
//! notion of a classpath. This module supplies the concrete implementation, backed by whatever
//! [`ClassLoader`] the embedder hands in (a directory of `.class` files, a jar, an in-memory map
//! for tests, ...).

use std::cell::RefCell;
use anyhow::Result;
use indexmap::IndexMap;
use duke::tree::class::ClassFile;
use mappings::remapper::SuperClassProvider;

/// Loads a class file by its internal name, for walking the classpath's inheritance graph.
///
/// `Ok(None)` means the class is genuinely absent from the classpath (e.g. it's a JDK class not
/// bundled alongside the input), which callers treat as "supertypes unknown" rather than an
/// error: a remapper still has to do something reasonable when inheritance can't be resolved
/// fully, per the fallback described on [`SuperClassProvider::get_super_classes`].
pub trait ClassLoader {
	fn load(&self, internal_name: &str) -> Result<Option<ClassFile>>;
}

/// A [`ClassLoader`] backed by an in-memory table, for tests and small offline tools.
#[derive(Debug, Default)]
pub struct MapClassLoader {
	pub classes: IndexMap<String, ClassFile>,
}

impl ClassLoader for MapClassLoader {
	fn load(&self, internal_name: &str) -> Result<Option<ClassFile>> {
		Ok(self.classes.get(internal_name).cloned())
	}
}

/// Finds the first class among `start` and its ancestors (walking superclass before interfaces,
/// depth-first, per class) for which `found` returns `Some`. `start` itself is tried before any
/// parent is inspected.
///
/// This mirrors the resolution order the JVM itself uses for fields and non-interface methods:
/// a member declared on a superclass is preferred over one declared on an implemented interface,
/// even if the interface is "closer" in the declaration.
pub fn find_ancestor<T>(loader: &impl ClassLoader, start: &str, mut found: impl FnMut(&str) -> Option<T>) -> Result<Option<T>> {
	if let Some(result) = found(start) {
		return Ok(Some(result));
	}

	let mut seen = indexmap::IndexSet::new();
	seen.insert(start.to_owned());
	find_ancestor_rec(loader, start, &mut found, &mut seen)
}

fn find_ancestor_rec<T>(
	loader: &impl ClassLoader,
	current: &str,
	found: &mut impl FnMut(&str) -> Option<T>,
	seen: &mut indexmap::IndexSet<String>,
) -> Result<Option<T>> {
	if !seen.insert(current.to_owned()) {
		return Ok(None);
	}

	let Some(class) = loader.load(current)? else {
		return Ok(None);
	};

	for supertype in class.direct_supertypes() {
		if let Some(result) = found(supertype.as_inner()) {
			return Ok(Some(result));
		}
		if let Some(result) = find_ancestor_rec(loader, supertype.as_inner(), found, seen)? {
			return Ok(Some(result));
		}
	}

	Ok(None)
}

/// Adapts a [`ClassLoader`] into a [`SuperClassProvider`], caching each class's direct
/// supertypes the first time it's asked about.
pub struct ClassLoaderSuperClassProvider<'l, L> {
	loader: &'l L,
	cache: RefCell<IndexMap<String, Option<Vec<String>>>>,
}

impl<'l, L: ClassLoader> ClassLoaderSuperClassProvider<'l, L> {
	pub fn new(loader: &'l L) -> Self {
		ClassLoaderSuperClassProvider { loader, cache: RefCell::new(IndexMap::new()) }
	}
}

impl<L: ClassLoader> SuperClassProvider for ClassLoaderSuperClassProvider<'_, L> {
	fn get_super_classes(&self, class: &str) -> Result<Option<Vec<String>>> {
		if let Some(cached) = self.cache.borrow().get(class) {
			return Ok(cached.clone());
		}

		let result = self.loader.load(class)?
			.map(|class_file| class_file.direct_supertypes().map(|c| c.as_inner().to_owned()).collect());

		self.cache.borrow_mut().insert(class.to_owned(), result.clone());
		Ok(result)
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use duke::tree::class::{ClassAccess, ClassFile, ClassName};
	use duke::tree::version::Version;
	use super::*;

	fn class(name: &str, super_class: Option<&str>, interfaces: &[&str]) -> ClassFile {
		ClassFile::new(
			Version::V17,
			ClassAccess::default(),
			ClassName::try_from(name).unwrap(),
			super_class.map(|s| ClassName::try_from(s).unwrap()),
			interfaces.iter().map(|s| ClassName::try_from(*s).unwrap()).collect(),
		)
	}

	fn loader() -> MapClassLoader {
		let mut classes = IndexMap::new();
		classes.insert("c".to_owned(), class("c", Some("b"), &["i"]));
		classes.insert("b".to_owned(), class("b", Some("a"), &[]));
		classes.insert("a".to_owned(), class("a", None, &[]));
		classes.insert("i".to_owned(), class("i", None, &[]));
		MapClassLoader { classes }
	}

	#[test]
	fn find_ancestor_prefers_superclass_over_interface() {
		let loader = loader();
		let mut order = Vec::new();
		find_ancestor(&loader, "c", |name| {
			order.push(name.to_owned());
			None::<()>
		}).unwrap();
		assert_eq!(order, vec!["c".to_owned(), "b".to_owned(), "a".to_owned(), "i".to_owned()]);
	}

	#[test]
	fn super_class_provider_reports_direct_supertypes() {
		let loader = loader();
		let provider = ClassLoaderSuperClassProvider::new(&loader);
		assert_eq!(provider.get_super_classes("c").unwrap(), Some(vec!["b".to_owned(), "i".to_owned()]));
		assert_eq!(provider.get_super_classes("a").unwrap(), Some(vec![]));
		assert_eq!(provider.get_super_classes("unknown").unwrap(), None);
	}
}
