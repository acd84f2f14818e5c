//! An algebra of reshaping and combining operations over [`Mappings`] (component E).
//!
//! Every operation here is pure: it reads one or more `Mappings` and returns a fresh one,
//! leaving its inputs untouched. Descriptors are always re-expressed in the output's namespace 0
//! (invariant 3), which is why every namespace-reshaping operation below goes through a remapper
//! rather than copying descriptor strings verbatim.

use indexmap::{IndexMap, IndexSet};
use crate::error::{MappingsError, Result};
use crate::remapper::ARemapper;
use crate::tree::mappings::{MappedClass, MappedField, MappedLocal, MappedMethod, MappedParameter, Mappings};

fn project(m: &Mappings, indices: &[usize], new_namespaces: Vec<String>) -> Result<Mappings> {
	let remap = m.remapper_a(&m.namespaces[0], &new_namespaces[0])?;

	let mut out = Mappings::new(new_namespaces)?;
	for class in &m.classes {
		let mut new_class = MappedClass::new(project_names(&class.names, indices));
		new_class.comments = class.comments.clone();

		for field in &class.fields {
			let desc = field.desc.as_ref().map(|d| remap.map_field_desc(d)).transpose()?;
			new_class.add_field(MappedField {
				names: project_names(&field.names, indices),
				comments: field.comments.clone(),
				desc,
			})?;
		}

		for method in &class.methods {
			let desc = remap.map_method_desc(&method.desc)?;
			let mut new_method = MappedMethod::new(project_names(&method.names, indices), desc);
			new_method.comments = method.comments.clone();
			new_method.parameters = method.parameters.iter()
				.map(|p| MappedParameter { index: p.index, names: project_names(&p.names, indices) })
				.collect();
			new_method.variables = method.variables.iter()
				.map(|v| MappedLocal { index: v.index, start_offset: v.start_offset, names: project_names(&v.names, indices) })
				.collect();
			new_class.add_method(new_method)?;
		}

		out.add_class(new_class)?;
	}
	Ok(out)
}

fn project_names(names: &[String], indices: &[usize]) -> Vec<String> {
	indices.iter().map(|&i| names[i].clone()).collect()
}

/// Projects `m` down to exactly the given namespaces, in the given order. The first entry of
/// `keep` becomes the output's namespace 0, so descriptors are re-expressed in its vocabulary.
pub fn extract_namespaces(m: &Mappings, keep: &[&str]) -> Result<Mappings> {
	let indices = keep.iter().map(|n| m.namespace_index(n)).collect::<Result<Vec<_>>>()?;
	let new_namespaces = keep.iter().map(|s| s.to_string()).collect();
	project(m, &indices, new_namespaces)
}

/// Reorders every namespace in `m` to the given order, keeping the same set of namespaces.
pub fn reorder_namespaces(m: &Mappings, order: &[&str]) -> Result<Mappings> {
	if order.len() != m.namespaces.len() {
		return Err(MappingsError::ArityMismatch { what: "reorder_namespaces order", expected: m.namespaces.len(), got: order.len() });
	}
	extract_namespaces(m, order)
}

/// Keeps only the namespaces named in `allowed`, in the order `allowed` lists them. A label
/// repeated in `allowed` is skipped on its second and later occurrences unless `allow_duplicates`,
/// in which case the namespace is projected into the output more than once.
pub fn filter_namespaces(m: &Mappings, allowed: &[&str], allow_duplicates: bool) -> Result<Mappings> {
	let mut indices = Vec::new();
	let mut seen = IndexSet::new();
	for &label in allowed {
		let i = m.namespace_index(label)?;
		if allow_duplicates || seen.insert(i) {
			indices.push(i);
		}
	}
	if indices.is_empty() {
		return Err(MappingsError::ArityMismatch { what: "filter_namespaces result", expected: 1, got: 0 });
	}
	let new_namespaces = indices.iter().map(|&i| m.namespaces[i].clone()).collect();
	project(m, &indices, new_namespaces)
}

/// Relabels namespaces without touching any class, field or method entry.
pub fn rename_namespaces(m: &Mappings, renames: &[(&str, &str)]) -> Result<Mappings> {
	let mut namespaces = m.namespaces.clone();
	for &(from, to) in renames {
		let i = m.namespace_index(from)?;
		namespaces[i] = to.to_owned();
	}
	Ok(Mappings { namespaces, classes: m.classes.clone() })
}

/// Keeps only the classes for which `predicate` returns `true`.
pub fn filter_classes(m: &Mappings, predicate: impl Fn(&MappedClass) -> bool) -> Mappings {
	Mappings {
		namespaces: m.namespaces.clone(),
		classes: m.classes.iter().filter(|c| predicate(c)).cloned().collect(),
	}
}

/// Transforms every class through `f`, keeping the namespace list unchanged.
///
/// `f` is responsible for keeping `names` at the right arity and descriptors expressed in
/// namespace 0; this function does not re-validate either.
pub fn map_classes(m: &Mappings, mut f: impl FnMut(MappedClass) -> MappedClass) -> Result<Mappings> {
	let mut out = Mappings::new(m.namespaces.clone())?;
	for class in m.classes.iter().cloned() {
		out.add_class(f(class))?;
	}
	Ok(out)
}

/// Collapses namespace *labels* that repeat (e.g. after a [`join`] whose intermediate namespace
/// equals one carried over from `a` or `b` under a different name), keeping each label's earliest
/// occurrence.
///
/// Per spec, this is exactly `filter_namespaces(current_namespaces_as_set, allow_duplicates:
/// false)` — a label repeating is what's deduplicated, not two columns that merely happen to agree
/// on every entity's name.
pub fn deduplicate_namespaces(m: &Mappings) -> Result<Mappings> {
	let labels: Vec<&str> = m.namespaces.iter().map(String::as_str).collect();
	filter_namespaces(m, &labels, false)
}

/// Combines `a` and `b` on a namespace `intermediate` shared by both, producing a `Mappings` over
/// `(a.namespaces \ {intermediate})` followed by `[intermediate]` followed by
/// `(b.namespaces \ {intermediate})`, each side keeping its own original relative order.
///
/// When `require_match` is `true`, every class/field/method keyed by its `intermediate` name on
/// one side must have a corresponding entry on the other, or this fails with
/// [`MappingsError::JoinMissingEntity`]. When `false`, the **union** of both sides' entities is
/// taken: an entity present on only one side has its names on the other side's columns default to
/// its `intermediate` name (the "fill with intermediate" rule), which keeps the output rectangular.
pub fn join(a: &Mappings, b: &Mappings, intermediate: &str, require_match: bool) -> Result<Mappings> {
	let i_a = a.namespace_index(intermediate)?;
	let i_b = b.namespace_index(intermediate)?;

	let a_cols: Vec<usize> = (0..a.namespaces.len()).filter(|&i| i != i_a).collect();
	let b_cols: Vec<usize> = (0..b.namespaces.len()).filter(|&i| i != i_b).collect();
	let out_intermediate_col = a_cols.len();

	let mut namespaces: Vec<String> = a_cols.iter().map(|&i| a.namespaces[i].clone()).collect();
	namespaces.push(intermediate.to_owned());
	namespaces.extend(b_cols.iter().map(|&i| b.namespaces[i].clone()));
	let out_len = namespaces.len();
	let out_ns0 = namespaces[0].clone();

	// descriptors are always expressed in namespace 0 (invariant 3); re-express both sides'
	// descriptors into the output's namespace 0, routing `b`'s through `intermediate` (the only
	// namespace the two Mappings have in common to route a translation through).
	let a_desc_to_out = a.remapper_a(&a.namespaces[0], &out_ns0)?;
	let a_to_intermediate = a.remapper_a(&a.namespaces[0], intermediate)?;
	let b_to_intermediate = b.remapper_a(&b.namespaces[0], intermediate)?;
	let intermediate_to_out = a.remapper_a(intermediate, &out_ns0)?;

	let b_class_desc = |desc: &str| -> Result<String> {
		Ok(intermediate_to_out.map_field_desc(&b_to_intermediate.map_field_desc(desc)?)?)
	};
	let b_method_desc = |desc: &str| -> Result<String> {
		Ok(intermediate_to_out.map_method_desc(&b_to_intermediate.map_method_desc(desc)?)?)
	};

	let a_by_key: IndexMap<&str, &MappedClass> = a.classes.iter().map(|c| (c.names[i_a].as_str(), c)).collect();
	let b_by_key: IndexMap<&str, &MappedClass> = b.classes.iter().map(|c| (c.names[i_b].as_str(), c)).collect();

	let mut class_keys: Vec<&str> = a.classes.iter().map(|c| c.names[i_a].as_str()).collect();
	for c in &b.classes {
		let key = c.names[i_b].as_str();
		if !a_by_key.contains_key(key) {
			class_keys.push(key);
		}
	}

	let mut out = Mappings::new(namespaces)?;

	for key in class_keys {
		let a_class = a_by_key.get(key).copied();
		let b_class = b_by_key.get(key).copied();
		require_both(require_match, a_class.is_some(), b_class.is_some(), intermediate, key)?;

		let names = join_names(a_class.map(|c| &c.names), &a_cols, b_class.map(|c| &c.names), &b_cols, key, out_len, out_intermediate_col);
		let mut new_class = MappedClass::new(names);
		new_class.comments = a_class.map(|c| c.comments.clone()).unwrap_or_default();
		if let Some(bc) = b_class {
			new_class.comments.extend(bc.comments.clone());
		}

		let mut field_keys: Vec<&str> = a_class.map(|c| c.fields.iter().map(|f| f.names[i_a].as_str()).collect()).unwrap_or_default();
		if let Some(bc) = b_class {
			for f in &bc.fields {
				let k = f.names[i_b].as_str();
				if !field_keys.contains(&k) {
					field_keys.push(k);
				}
			}
		}
		for field_key in field_keys {
			let a_field = a_class.and_then(|c| c.fields.iter().find(|f| f.names[i_a] == field_key));
			let b_field = b_class.and_then(|c| c.fields.iter().find(|f| f.names[i_b] == field_key));
			require_both(require_match, a_field.is_some(), b_field.is_some(), intermediate, field_key)?;

			let names = join_names(a_field.map(|f| &f.names), &a_cols, b_field.map(|f| &f.names), &b_cols, field_key, out_len, out_intermediate_col);
			let mut comments = a_field.map(|f| f.comments.clone()).unwrap_or_default();
			if let Some(bf) = b_field {
				comments.extend(bf.comments.clone());
			}
			let desc = match a_field.and_then(|f| f.desc.as_ref()) {
				Some(d) => Some(a_desc_to_out.map_field_desc(d)?),
				None => match b_field.and_then(|f| f.desc.as_ref()) {
					Some(d) => Some(b_class_desc(d)?),
					None => None,
				},
			};
			new_class.add_field(MappedField { names, comments, desc })?;
		}

		// methods are keyed by intermediate name *and* descriptor (re-expressed in `intermediate`),
		// since overloads share a name but not a descriptor.
		let a_method_keys: Vec<(String, String)> = a_class.map(|c| {
			c.methods.iter().map(|m| Ok((m.names[i_a].clone(), a_to_intermediate.map_method_desc(&m.desc)?))).collect::<Result<Vec<_>>>()
		}).transpose()?.unwrap_or_default();
		let b_method_keys: Vec<(String, String)> = b_class.map(|c| {
			c.methods.iter().map(|m| Ok((m.names[i_b].clone(), b_to_intermediate.map_method_desc(&m.desc)?))).collect::<Result<Vec<_>>>()
		}).transpose()?.unwrap_or_default();

		let mut method_keys = a_method_keys.clone();
		for k in &b_method_keys {
			if !a_method_keys.contains(k) {
				method_keys.push(k.clone());
			}
		}

		for (name_i, desc_i) in method_keys {
			let a_method = a_class.and_then(|c| c.methods.iter().find(|m| {
				m.names[i_a] == name_i && a_to_intermediate.map_method_desc(&m.desc).map(|d| d == desc_i).unwrap_or(false)
			}));
			let b_method = b_class.and_then(|c| c.methods.iter().find(|m| {
				m.names[i_b] == name_i && b_to_intermediate.map_method_desc(&m.desc).map(|d| d == desc_i).unwrap_or(false)
			}));
			require_both(require_match, a_method.is_some(), b_method.is_some(), intermediate, &name_i)?;

			let names = join_names(a_method.map(|m| &m.names), &a_cols, b_method.map(|m| &m.names), &b_cols, &name_i, out_len, out_intermediate_col);
			let mut comments = a_method.map(|m| m.comments.clone()).unwrap_or_default();
			if let Some(bm) = b_method {
				comments.extend(bm.comments.clone());
			}
			let desc = match a_method {
				Some(m) => a_desc_to_out.map_method_desc(&m.desc)?,
				None => b_method_desc(&b_method.expect("at least one side has this method").desc)?,
			};
			// parameters and locals aren't reliably matchable across a join, so they're dropped.
			let new_method = MappedMethod { names, comments, desc, parameters: vec![], variables: vec![] };
			new_class.add_method(new_method)?;
		}

		out.add_class(new_class)?;
	}

	Ok(out)
}

fn require_both(require_match: bool, has_a: bool, has_b: bool, intermediate: &str, name: &str) -> Result<()> {
	if require_match {
		if !has_a {
			return Err(MappingsError::JoinMissingEntity { intermediate: intermediate.to_owned(), side: "left", name: name.to_owned() });
		}
		if !has_b {
			return Err(MappingsError::JoinMissingEntity { intermediate: intermediate.to_owned(), side: "right", name: name.to_owned() });
		}
	}
	Ok(())
}

/// Builds a joined entity's `names` tuple: each output column takes its value from whichever side
/// owns that column, falling back to `intermediate_name` wherever the owning side has no matching
/// entity (only reachable with `require_match: false`).
fn join_names(
	a_names: Option<&Vec<String>>, a_cols: &[usize],
	b_names: Option<&Vec<String>>, b_cols: &[usize],
	intermediate_name: &str, out_len: usize, out_intermediate_col: usize,
) -> Vec<String> {
	let mut names = vec![String::new(); out_len];
	for (k, &i) in a_cols.iter().enumerate() {
		names[k] = a_names.map_or_else(|| intermediate_name.to_owned(), |n| n[i].clone());
	}
	names[out_intermediate_col] = intermediate_name.to_owned();
	for (k, &i) in b_cols.iter().enumerate() {
		names[out_intermediate_col + 1 + k] = b_names.map_or_else(|| intermediate_name.to_owned(), |n| n[i].clone());
	}
	names
}

/// Left-folds [`join`] over `mappings`, joining each one onto the running result on the same
/// `intermediate` namespace.
///
/// Fails with [`MappingsError::ArityMismatch`] if `mappings` is empty: there is no sensible
/// result with zero inputs.
pub fn join_all(mappings: &[Mappings], intermediate: &str, require_match: bool) -> Result<Mappings> {
	let mut iter = mappings.iter();
	let mut acc = iter.next()
		.ok_or_else(|| MappingsError::ArityMismatch { what: "join_all input", expected: 1, got: 0 })?
		.clone();
	for next in iter {
		acc = join(&acc, next, intermediate, require_match)?;
	}
	Ok(acc)
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::tree::mappings::MappedClass;
	use super::*;

	fn ns(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	fn sample_two_ns() -> Mappings {
		let mut m = Mappings::new(ns(&["obf", "named"])).unwrap();
		m.add_class(MappedClass::new(ns(&["a", "Foo"]))).unwrap();
		m.add_class(MappedClass::new(ns(&["b", "Bar"]))).unwrap();
		m
	}

	#[test]
	fn extract_keeps_subset_in_order() {
		let m = sample_two_ns();
		let e = extract_namespaces(&m, &["named"]).unwrap();
		assert_eq!(e.namespaces, vec!["named".to_owned()]);
		assert_eq!(e.classes[0].names, vec!["Foo".to_owned()]);
	}

	#[test]
	fn reorder_rejects_subset() {
		let m = sample_two_ns();
		assert!(reorder_namespaces(&m, &["named"]).is_err());
	}

	#[test]
	fn reorder_swaps_namespace_order() {
		let m = sample_two_ns();
		let r = reorder_namespaces(&m, &["named", "obf"]).unwrap();
		assert_eq!(r.namespaces, vec!["named".to_owned(), "obf".to_owned()]);
		assert_eq!(r.classes[0].names, vec!["Foo".to_owned(), "a".to_owned()]);
	}

	#[test]
	fn filter_classes_drops_nonmatching() {
		let m = sample_two_ns();
		let f = filter_classes(&m, |c| c.names[0] == "a");
		assert_eq!(f.classes.len(), 1);
		assert_eq!(f.classes[0].names[0], "a");
	}

	#[test]
	fn rename_namespaces_relabels_only() {
		let m = sample_two_ns();
		let r = rename_namespaces(&m, &[("obf", "intermediary")]).unwrap();
		assert_eq!(r.namespaces, vec!["intermediary".to_owned(), "named".to_owned()]);
		assert_eq!(r.classes, m.classes);
	}

	#[test]
	fn join_combines_on_shared_namespace() {
		let mut a = Mappings::new(ns(&["obf", "inter"])).unwrap();
		a.add_class(MappedClass::new(ns(&["a", "i/a"]))).unwrap();
		let mut b = Mappings::new(ns(&["inter", "named"])).unwrap();
		b.add_class(MappedClass::new(ns(&["i/a", "Foo"]))).unwrap();

		let j = join(&a, &b, "inter", true).unwrap();
		assert_eq!(j.namespaces, vec!["obf".to_owned(), "inter".to_owned(), "named".to_owned()]);
		assert_eq!(j.classes[0].names, vec!["a".to_owned(), "i/a".to_owned(), "Foo".to_owned()]);
	}

	#[test]
	fn join_require_match_fails_on_gap() {
		let mut a = Mappings::new(ns(&["obf", "inter"])).unwrap();
		a.add_class(MappedClass::new(ns(&["a", "i/a"]))).unwrap();
		let b = Mappings::new(ns(&["inter", "named"])).unwrap();

		assert!(join(&a, &b, "inter", true).is_err());
		assert!(join(&a, &b, "inter", false).is_ok());
	}

	#[test]
	fn join_union_fills_missing_side_with_intermediate_name() {
		let mut a = Mappings::new(ns(&["obf", "inter"])).unwrap();
		a.add_class(MappedClass::new(ns(&["a", "i/a"]))).unwrap();
		let b = Mappings::new(ns(&["inter", "named"])).unwrap();

		let j = join(&a, &b, "inter", false).unwrap();
		assert_eq!(j.classes[0].names, vec!["a".to_owned(), "i/a".to_owned(), "i/a".to_owned()]);
	}

	#[test]
	fn join_intermediate_in_middle_of_a() {
		let mut a = Mappings::new(ns(&["obf", "inter", "extra"])).unwrap();
		a.add_class(MappedClass::new(ns(&["a", "i/a", "Extra"]))).unwrap();
		let mut b = Mappings::new(ns(&["inter", "named"])).unwrap();
		b.add_class(MappedClass::new(ns(&["i/a", "Foo"]))).unwrap();

		let j = join(&a, &b, "inter", true).unwrap();
		assert_eq!(j.namespaces, vec!["obf".to_owned(), "extra".to_owned(), "inter".to_owned(), "named".to_owned()]);
		assert_eq!(j.classes[0].names, vec!["a".to_owned(), "Extra".to_owned(), "i/a".to_owned(), "Foo".to_owned()]);
	}

	#[test]
	fn join_all_folds_left_across_three_mappings() {
		let mut a = Mappings::new(ns(&["obf", "inter"])).unwrap();
		a.add_class(MappedClass::new(ns(&["a", "i/a"]))).unwrap();
		let mut b = Mappings::new(ns(&["inter", "named"])).unwrap();
		b.add_class(MappedClass::new(ns(&["i/a", "Foo"]))).unwrap();

		let j = join_all(&[a.clone()], "inter", true).unwrap();
		assert_eq!(j, a);

		let j = join_all(std::slice::from_ref(&b), "inter", true).unwrap();
		assert_eq!(j, b);
	}

	#[test]
	fn filter_namespaces_allow_duplicates() {
		let m = sample_two_ns();
		let f = filter_namespaces(&m, &["obf", "obf"], true).unwrap();
		assert_eq!(f.namespaces, vec!["obf".to_owned(), "obf".to_owned()]);
		assert_eq!(f.classes[0].names, vec!["a".to_owned(), "a".to_owned()]);

		let f = filter_namespaces(&m, &["obf", "obf"], false).unwrap();
		assert_eq!(f.namespaces, vec!["obf".to_owned()]);
	}

	#[test]
	fn deduplicate_drops_repeated_namespace_label_keeping_earliest() {
		// "inter" appears twice (e.g. the result of a join whose intermediate namespace already
		// existed under the same name on one side); the second occurrence is dropped regardless
		// of whether its per-entity names happen to agree with the first.
		let mut m = Mappings::new(ns(&["obf", "inter", "inter"])).unwrap();
		m.add_class(MappedClass::new(ns(&["a", "x", "y"]))).unwrap();
		let d = deduplicate_namespaces(&m).unwrap();
		assert_eq!(d.namespaces, vec!["obf".to_owned(), "inter".to_owned()]);
		assert_eq!(d.classes[0].names, vec!["a".to_owned(), "x".to_owned()]);
	}

	#[test]
	fn deduplicate_is_noop_when_labels_are_unique() {
		let m = sample_two_ns();
		let d = deduplicate_namespaces(&m).unwrap();
		assert_eq!(d, m);
	}

	// spec §8 property 1: renaming or reordering a `Mappings` onto its own namespace list is the
	// identity, structurally.
	#[test]
	fn rename_onto_own_namespaces_is_identity() {
		let m = sample_two_ns();
		let labels: Vec<&str> = m.namespaces.iter().map(String::as_str).collect();
		let renames: Vec<(&str, &str)> = labels.iter().map(|&l| (l, l)).collect();
		assert_eq!(rename_namespaces(&m, &renames).unwrap(), m);
	}

	#[test]
	fn reorder_onto_own_namespaces_is_identity() {
		let m = sample_two_ns();
		let labels: Vec<&str> = m.namespaces.iter().map(String::as_str).collect();
		assert_eq!(reorder_namespaces(&m, &labels).unwrap(), m);
	}

	// spec §8 property 2: filtering down to the full namespace set is exactly deduplication.
	#[test]
	fn filter_namespaces_on_full_set_equals_deduplicate() {
		let m = sample_two_ns();
		let labels: Vec<&str> = m.namespaces.iter().map(String::as_str).collect();
		assert_eq!(filter_namespaces(&m, &labels, false).unwrap(), deduplicate_namespaces(&m).unwrap());
	}

	// spec §8 E2: extracting a 3-namespace mapping down to two non-adjacent columns re-expresses
	// every field descriptor so it's valid in the new namespace 0.
	#[test]
	fn extract_namespaces_rewrites_field_descriptor_to_new_namespace_zero() {
		let mut m = Mappings::new(ns(&["obf", "intm", "named"])).unwrap();
		let mut a = MappedClass::new(ns(&["a", "i/a", "A"]));
		a.add_field(MappedField { names: ns(&["f", "i/f", "field"]), comments: vec![], desc: Some("Lb;".to_owned()) }).unwrap();
		m.add_class(a).unwrap();
		m.add_class(MappedClass::new(ns(&["b", "i/b", "B"]))).unwrap();

		let e = extract_namespaces(&m, &["named", "obf"]).unwrap();
		assert_eq!(e.namespaces, vec!["named".to_owned(), "obf".to_owned()]);
		assert_eq!(e.classes[0].names, vec!["A".to_owned(), "a".to_owned()]);
		// desc was `Lb;` (namespace 0 = obf); output namespace 0 is `named`, so `b` becomes `B`.
		assert_eq!(e.classes[0].fields[0].desc.as_deref(), Some("LB;"));
	}

	// spec §8 E3: a joined method's descriptor is re-expressed into the output's namespace 0
	// (the first surviving namespace of `a`), not left in `a`'s or `b`'s own vocabulary.
	#[test]
	fn join_rewrites_method_descriptor_to_output_namespace_zero() {
		let mut a = Mappings::new(ns(&["obf", "intm"])).unwrap();
		let mut a_class = MappedClass::new(ns(&["A", "X"]));
		a_class.add_method(MappedMethod::new(ns(&["m", "x"]), "(LA;)V".to_owned())).unwrap();
		a.add_class(a_class).unwrap();

		let mut b = Mappings::new(ns(&["intm", "named"])).unwrap();
		let mut b_class = MappedClass::new(ns(&["X", "Named"]));
		b_class.add_method(MappedMethod::new(ns(&["x", "meth"]), "(LX;)V".to_owned())).unwrap();
		b.add_class(b_class).unwrap();

		let j = join(&a, &b, "intm", true).unwrap();
		assert_eq!(j.namespaces, vec!["obf".to_owned(), "intm".to_owned(), "named".to_owned()]);
		assert_eq!(j.classes[0].names, vec!["A".to_owned(), "X".to_owned(), "Named".to_owned()]);
		assert_eq!(j.classes[0].methods[0].names, vec!["m".to_owned(), "x".to_owned(), "meth".to_owned()]);
		// output namespace 0 is `obf`; the desc was `(LX;)V` on the `b` side (intm vocabulary),
		// re-expressed through the join back to `(LA;)V`.
		assert_eq!(j.classes[0].methods[0].desc, "(LA;)V");
	}
}
