//! Rewrites string-encoded member references embedded inside mixin-style annotations (component G).
//!
//! Annotations under `net/weavemc/api/mixin` smuggle an `owner.name(desc)ret` or bare
//! `name(desc)ret` reference inside a plain string annotation value, because the class-file
//! annotation grammar has no constant-pool slot for "a reference to this other method". This is
//! the one place that knows how to find those strings (on methods of a class carrying a
//! class-level `@Mixin` annotation) and remap them through the same [`BRemapper`] that
//! [`crate::rewrite`] uses for real instruction operands.
//!
//! Parse failures here are soft: mixin annotations are written by mod authors, not generated by
//! this crate, so a malformed value is logged and passed through unchanged rather than aborting
//! the whole class's rewrite (spec policy for this component).

use duke::descriptor_ops::{parse_method_decl, parse_target, ParsedTarget};
use duke::tree::annotation::{Annotation, ElementValue, Object};
use duke::tree::class::{ClassFile, ClassName};
use mappings::remapper::BRemapper;

const MIXIN_PREFIX: &str = "Lnet/weavemc/api/mixin";
const MIXIN_ANNOTATION: &str = "Lnet/weavemc/api/mixin/Mixin;";

fn is_mixin_annotation(annotation_type: &str) -> bool {
	annotation_type.starts_with(MIXIN_PREFIX)
}

/// Rewrites every mixin annotation on every method of `class`, resolving `method`/`field`/`target`
/// string values against the class(es) named by the class-level `@Mixin` annotation.
///
/// A class with no `@Mixin` annotation (the vast majority of classes in any jar) is returned
/// unchanged without inspecting its methods' annotations at all.
pub fn rewrite_mixin_annotations(mut class: ClassFile, remapper: &impl BRemapper) -> anyhow::Result<ClassFile> {
	let targets = mixin_targets(&class);
	if targets.is_empty() {
		return Ok(class);
	}

	for method in &mut class.methods {
		rewrite_annotations(&mut method.runtime_visible_annotations, &targets, remapper);
		rewrite_annotations(&mut method.runtime_invisible_annotations, &targets, remapper);
	}

	Ok(class)
}

/// Reads the class name(s) named by the class's `@Mixin` annotation's first element value
/// (`@Mixin({Foo.class})` style, but a bare `@Mixin(Foo.class)` single-value form works the same
/// since both are `ElementValue::Class` or an `ElementValue::ArrayType` of those).
fn mixin_targets(class: &ClassFile) -> Vec<ClassName> {
	class.runtime_visible_annotations.iter()
		.chain(class.runtime_invisible_annotations.iter())
		.filter(|a| a.annotation_type.as_inner() == MIXIN_ANNOTATION)
		.filter_map(|a| a.element_value_pairs.first())
		.flat_map(|pair| class_literals(&pair.value))
		.collect()
}

fn class_literals(value: &ElementValue) -> Vec<ClassName> {
	match value {
		ElementValue::Class(desc) => {
			desc.as_slice().parse().ok()
				.and_then(|parsed| parsed.0)
				.and_then(|ty| ty.class_name().map(|s| s.to_owned()))
				.into_iter().collect()
		}
		ElementValue::ArrayType(items) => items.iter().flat_map(class_literals).collect(),
		_ => vec![],
	}
}

fn rewrite_annotations(annotations: &mut [Annotation], targets: &[ClassName], remapper: &impl BRemapper) {
	for annotation in annotations {
		if is_mixin_annotation(annotation.annotation_type.as_inner()) && annotation.annotation_type.as_inner() != MIXIN_ANNOTATION {
			rewrite_annotation_pairs(annotation, targets, remapper);
		}
	}
}

/// Rewrites every string-valued pair of `annotation`, recursing into array and nested-annotation
/// values (e.g. `@Inject(method = "...", at = @At(target = "..."))`) so a reference buried two
/// annotations deep still gets remapped.
fn rewrite_annotation_pairs(annotation: &mut Annotation, targets: &[ClassName], remapper: &impl BRemapper) {
	for pair in &mut annotation.element_value_pairs {
		rewrite_value(&mut pair.value, &pair.name, targets, remapper);
	}
}

fn rewrite_value(value: &mut ElementValue, key: &str, targets: &[ClassName], remapper: &impl BRemapper) {
	match value {
		ElementValue::Object(Object::String(s)) => {
			if let Some(mapped) = rewrite_string(key, s, targets, remapper) {
				*s = mapped;
			}
		}
		ElementValue::ArrayType(items) => {
			for item in items {
				rewrite_value(item, key, targets, remapper);
			}
		}
		ElementValue::AnnotationInterface(nested) => rewrite_annotation_pairs(nested, targets, remapper),
		_ => {}
	}
}

fn rewrite_string(key: &str, value: &str, targets: &[ClassName], remapper: &impl BRemapper) -> Option<String> {
	match key {
		"method" => {
			let target = targets.first()?;
			rewrite_method_decl(target, value, remapper)
		}
		"field" => {
			let target = targets.first()?;
			rewrite_field_decl(target, value, remapper)
		}
		"target" => rewrite_target(value, remapper),
		_ => None,
	}
}

fn rewrite_method_decl(target: &ClassName, value: &str, remapper: &impl BRemapper) -> Option<String> {
	let (name, desc) = match parse_method_decl(value) {
		Ok(parsed) => parsed,
		Err(e) => {
			log::warn!("skipping malformed mixin method reference {value:?}: {e}");
			return None;
		}
	};
	match remapper.map_method(target.as_inner(), name.as_inner(), &desc) {
		Ok((mapped_name, mapped_desc)) => Some(format!("{mapped_name}{mapped_desc}")),
		Err(e) => {
			log::warn!("failed to remap mixin method reference {value:?} on {target}: {e}");
			None
		}
	}
}

fn rewrite_field_decl(target: &ClassName, value: &str, remapper: &impl BRemapper) -> Option<String> {
	if value.contains('(') {
		log::warn!("skipping mixin field reference {value:?}: looks like a method declaration");
		return None;
	}
	match remapper.map_field_name(target.as_inner(), value) {
		Ok(mapped) => Some(mapped),
		Err(e) => {
			log::warn!("failed to remap mixin field reference {value:?} on {target}: {e}");
			None
		}
	}
}

fn rewrite_target(value: &str, remapper: &impl BRemapper) -> Option<String> {
	let parsed = match parse_target(value) {
		Ok(parsed) => parsed,
		Err(e) => {
			log::warn!("skipping malformed mixin target {value:?}: {e}");
			return None;
		}
	};

	// the owner is implied by the `target` slot itself (it's either given explicitly here, or
	// defaults to the mixin's own target class elsewhere); either way the output re-expresses
	// only the member, never re-prepending an owner that wasn't in the input.
	match parsed {
		ParsedTarget::Method { owner, name, desc } => {
			match remapper.map_method(owner.as_inner(), name.as_inner(), &desc) {
				Ok((mapped_name, mapped_desc)) => Some(format!("{mapped_name}{mapped_desc}")),
				Err(e) => {
					log::warn!("failed to remap mixin target {value:?}: {e}");
					None
				}
			}
		}
		ParsedTarget::Field { owner, name } => {
			match remapper.map_field_name(owner.as_inner(), name.as_inner()) {
				Ok(mapped) => Some(mapped),
				Err(e) => {
					log::warn!("failed to remap mixin target {value:?}: {e}");
					None
				}
			}
		}
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use duke::tree::class::{ClassAccess, ClassName};
	use duke::tree::field::FieldDescriptor;
	use duke::tree::method::{Method, MethodAccess, MethodDescriptor, MethodName};
	use duke::tree::version::Version;
	use mappings::remapper::NoSuperClassProvider;
	use mappings::tree::mappings::{MappedClass, MappedField, MappedMethod};
	use mappings::Mappings;
	use super::*;

	fn sample_mappings() -> Mappings {
		let mut m = Mappings::new(vec!["obf".to_owned(), "named".to_owned()]).unwrap();
		let mut c = MappedClass::new(vec!["Foo".to_owned(), "Foo_mapped".to_owned()]);
		c.add_field(MappedField { names: vec!["f".to_owned(), "bar".to_owned()], comments: vec![], desc: Some("I".to_owned()) }).unwrap();
		c.add_method(MappedMethod::new(vec!["bar".to_owned(), "zap".to_owned()], "(I)V".to_owned())).unwrap();
		m.add_class(c).unwrap();
		m
	}

	fn class_literal(name: &str) -> ElementValue {
		let class_name = ClassName::try_from(name).unwrap();
		ElementValue::Class(FieldDescriptor::from_class(class_name.as_slice()).into())
	}

	fn string(s: &str) -> ElementValue {
		ElementValue::Object(Object::String(s.to_owned()))
	}

	fn mixin_annotation(target: &str) -> Annotation {
		let mut a = Annotation::new(FieldDescriptor::try_from(MIXIN_ANNOTATION).unwrap());
		a.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "value".to_owned(),
			value: ElementValue::ArrayType(vec![class_literal(target)]),
		});
		a
	}

	fn class_with_mixin(target: &str) -> ClassFile {
		let mut class = ClassFile::new(
			Version::V17, ClassAccess::default(), ClassName::try_from("FooMixin").unwrap(), None, vec![],
		);
		class.runtime_visible_annotations.push(mixin_annotation(target));
		class
	}

	fn add_method_with_annotation(class: &mut ClassFile, annotation: Annotation) {
		let mut method = Method::new(MethodAccess::from(0), MethodName::try_from("handler").unwrap(), MethodDescriptor::try_from("()V").unwrap());
		method.runtime_visible_annotations.push(annotation);
		class.methods.push(method);
	}

	#[test]
	fn non_mixin_class_is_untouched() {
		let m = sample_mappings();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		let class = ClassFile::new(Version::V17, ClassAccess::default(), ClassName::try_from("Plain").unwrap(), None, vec![]);
		let out = rewrite_mixin_annotations(class.clone(), &re).unwrap();
		assert_eq!(out, class);
	}

	#[test]
	fn method_key_remaps_bare_method_declaration() {
		let m = sample_mappings();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		let mut class = class_with_mixin("Foo");

		let mut overwrite = Annotation::new(FieldDescriptor::try_from("Lnet/weavemc/api/mixin/Overwrite;").unwrap());
		overwrite.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "method".to_owned(),
			value: string("bar(I)V"),
		});
		add_method_with_annotation(&mut class, overwrite);

		let out = rewrite_mixin_annotations(class, &re).unwrap();
		let value = &out.methods[0].runtime_visible_annotations[0].element_value_pairs[0].value;
		assert_eq!(value, &string("zap(I)V"));
	}

	#[test]
	fn field_key_remaps_bare_field_name() {
		let m = sample_mappings();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		let mut class = class_with_mixin("Foo");

		let mut shadow = Annotation::new(FieldDescriptor::try_from("Lnet/weavemc/api/mixin/Shadow;").unwrap());
		shadow.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "field".to_owned(),
			value: string("f"),
		});
		add_method_with_annotation(&mut class, shadow);

		let out = rewrite_mixin_annotations(class, &re).unwrap();
		let value = &out.methods[0].runtime_visible_annotations[0].element_value_pairs[0].value;
		assert_eq!(value, &string("bar"));
	}

	#[test]
	fn target_key_remaps_owner_qualified_method_reference() {
		let m = sample_mappings();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		let mut class = class_with_mixin("Foo");

		let mut at = Annotation::new(FieldDescriptor::try_from("Lnet/weavemc/api/mixin/At;").unwrap());
		at.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "target".to_owned(),
			value: string("Foo.bar(I)V"),
		});
		add_method_with_annotation(&mut class, at);

		let out = rewrite_mixin_annotations(class, &re).unwrap();
		let value = &out.methods[0].runtime_visible_annotations[0].element_value_pairs[0].value;
		assert_eq!(value, &string("zap(I)V"));
	}

	#[test]
	fn nested_annotation_values_are_remapped() {
		let m = sample_mappings();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		let mut class = class_with_mixin("Foo");

		let mut at = Annotation::new(FieldDescriptor::try_from("Lnet/weavemc/api/mixin/At;").unwrap());
		at.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "target".to_owned(),
			value: string("Foo.bar(I)V"),
		});
		let mut inject = Annotation::new(FieldDescriptor::try_from("Lnet/weavemc/api/mixin/Inject;").unwrap());
		inject.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "method".to_owned(),
			value: string("bar(I)V"),
		});
		inject.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "at".to_owned(),
			value: ElementValue::AnnotationInterface(at),
		});
		add_method_with_annotation(&mut class, inject);

		let out = rewrite_mixin_annotations(class, &re).unwrap();
		let pairs = &out.methods[0].runtime_visible_annotations[0].element_value_pairs;
		assert_eq!(pairs[0].value, string("zap(I)V"));
		let ElementValue::AnnotationInterface(nested) = &pairs[1].value else { panic!("expected nested annotation") };
		assert_eq!(nested.element_value_pairs[0].value, string("zap(I)V"));
	}

	#[test]
	fn malformed_value_passes_through_unchanged() {
		let m = sample_mappings();
		let re = m.remapper_b("obf", "named", NoSuperClassProvider::new_ref()).unwrap();
		let mut class = class_with_mixin("Foo");

		let mut overwrite = Annotation::new(FieldDescriptor::try_from("Lnet/weavemc/api/mixin/Overwrite;").unwrap());
		overwrite.element_value_pairs.push(duke::tree::annotation::ElementValuePair {
			name: "method".to_owned(),
			value: string("not a method decl"),
		});
		add_method_with_annotation(&mut class, overwrite);

		let out = rewrite_mixin_annotations(class, &re).unwrap();
		let value = &out.methods[0].runtime_visible_annotations[0].element_value_pairs[0].value;
		assert_eq!(value, &string("not a method decl"));
	}
}
