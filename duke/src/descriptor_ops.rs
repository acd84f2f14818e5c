//! Pure, string-level operations over descriptors and the small `owner.name(desc)ret`
//! reference grammar used by mixin-style annotation values.
//!
//! Unlike [`crate::tree::descriptor`], which parses a descriptor into a [`Type`](crate::tree::descriptor::Type)
//! tree, these functions never build a tree: they scan the descriptor text once and substitute
//! each `L<internal>;` occurrence in place. This is the fast path a remapper uses to rewrite a
//! descriptor without allocating an intermediate tree for every call.

use thiserror::Error;
use crate::tree::class::{ClassName, ClassNameSlice};
use crate::tree::field::FieldName;
use crate::tree::method::MethodName;

/// A descriptor, or a `name(desc)ret`/`owner.name(desc)ret` reference string, failed to parse.
#[derive(Debug, Error)]
#[error("malformed descriptor {input:?} at byte offset {offset}: {reason}")]
pub struct DescriptorError {
	pub input: String,
	pub offset: usize,
	pub reason: String,
}

fn err(input: &str, offset: usize, reason: impl Into<String>) -> DescriptorError {
	DescriptorError { input: input.to_owned(), offset, reason: reason.into() }
}

/// Scans a field, return or method descriptor and replaces every `L<internal>;` occurrence with
/// `f(internal)`. Primitives and array markers (`[`) pass through unchanged.
///
/// This also accepts a whole method descriptor's parameter list (several field types
/// concatenated with no separator) since it doesn't care about descriptor *boundaries*, only
/// about substituting object-type names wherever they occur.
pub fn map_type_desc(desc: &str, mut f: impl FnMut(&ClassNameSlice) -> ClassName) -> Result<String, DescriptorError> {
	let mut out = String::with_capacity(desc.len());
	let mut chars = desc.char_indices().peekable();

	while let Some((i, c)) = chars.next() {
		out.push(c);

		if c == 'L' {
			let start = i + 1;
			let mut end = None;
			while let Some(&(j, c2)) = chars.peek() {
				chars.next();
				if c2 == ';' {
					end = Some(j);
					break;
				}
			}
			let end = end.ok_or_else(|| err(desc, i, "missing ';' terminating object type"))?;

			let internal = &desc[start..end];
			// SAFETY: `internal` is the class-name portion of a well-formed `L...;`, which is
			// exactly the grammar a class name must satisfy.
			let class_name = unsafe { ClassNameSlice::from_inner_unchecked(internal) };
			let mapped = f(class_name);

			out.push_str(mapped.as_inner());
			out.push(';');
		}
	}

	Ok(out)
}

/// Splits a method descriptor into its parameter list and return descriptor, maps both via
/// [`map_type_desc`], and reassembles them.
pub fn map_method_desc(desc: &str, mut f: impl FnMut(&ClassNameSlice) -> ClassName) -> Result<String, DescriptorError> {
	if !desc.starts_with('(') {
		return Err(err(desc, 0, "method descriptor must start with '('"));
	}
	let close = desc.find(')').ok_or_else(|| err(desc, desc.len(), "missing ')' in method descriptor"))?;

	let params = &desc[1..close];
	let ret = &desc[close + 1..];

	let mut out = String::with_capacity(desc.len());
	out.push('(');
	out.push_str(&map_type_desc(params, &mut f)?);
	out.push(')');
	out.push_str(&map_type_desc(ret, &mut f)?);

	Ok(out)
}

/// Splits `name(params)ret` into `(name, desc)`, as found in mixin `method` annotation values.
pub fn parse_method_decl(s: &str) -> Result<(MethodName, String), DescriptorError> {
	let paren = s.find('(').ok_or_else(|| err(s, 0, "missing '(' in method declaration"))?;

	let name = &s[..paren];
	let desc = &s[paren..];

	let name = MethodName::try_from(name)
		.map_err(|e| err(s, 0, format!("invalid method name {name:?}: {e}")))?;

	Ok((name, desc.to_owned()))
}

/// The parsed form of a mixin `target` value: either a method reference (`owner.name(desc)ret`)
/// or a field reference (`owner.name`).
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTarget {
	Method {
		owner: ClassName,
		name: MethodName,
		desc: String,
	},
	Field {
		owner: ClassName,
		name: FieldName,
	},
}

/// Splits `owner.name(...)ret` or `owner.field` into owner, name and an optional descriptor.
pub fn parse_target(s: &str) -> Result<ParsedTarget, DescriptorError> {
	let dot = s.find('.').ok_or_else(|| err(s, 0, "missing '.' separating owner from member"))?;

	let owner = &s[..dot];
	let rest = &s[dot + 1..];

	let owner = ClassName::try_from(owner)
		.map_err(|e| err(s, 0, format!("invalid owner class name {owner:?}: {e}")))?;

	if let Some(paren) = rest.find('(') {
		let name = &rest[..paren];
		let desc = &rest[paren..];

		let name = MethodName::try_from(name)
			.map_err(|e| err(s, dot + 1, format!("invalid method name {name:?}: {e}")))?;

		Ok(ParsedTarget::Method { owner, name, desc: desc.to_owned() })
	} else {
		let name = FieldName::try_from(rest)
			.map_err(|e| err(s, dot + 1, format!("invalid field name {rest:?}: {e}")))?;

		Ok(ParsedTarget::Field { owner, name })
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::tree::class::ClassName;
	use super::*;

	fn ident(c: &ClassNameSlice) -> ClassName {
		c.to_owned()
	}

	fn upper(c: &ClassNameSlice) -> ClassName {
		ClassName::try_from(c.as_inner().to_uppercase()).unwrap()
	}

	#[test]
	fn map_type_desc_identity() {
		assert_eq!(map_type_desc("I", ident).unwrap(), "I");
		assert_eq!(map_type_desc("[[[D", ident).unwrap(), "[[[D");
		assert_eq!(map_type_desc("Ljava/lang/String;", ident).unwrap(), "Ljava/lang/String;");
	}

	#[test]
	fn map_type_desc_substitutes() {
		assert_eq!(map_type_desc("La;", upper).unwrap(), "LA;");
		assert_eq!(map_type_desc("[La;", upper).unwrap(), "[LA;");
		assert_eq!(map_type_desc("La;La;", upper).unwrap(), "LA;LA;");
	}

	#[test]
	fn map_type_desc_missing_semicolon() {
		assert!(map_type_desc("La", ident).is_err());
	}

	#[test]
	fn map_method_desc_params_and_return() {
		assert_eq!(map_method_desc("(La;)La;", upper).unwrap(), "(LA;)LA;");
		assert_eq!(map_method_desc("()V", upper).unwrap(), "()V");
		assert_eq!(map_method_desc("(IDLthread;)V", upper).unwrap(), "(IDLTHREAD;)V");
	}

	#[test]
	fn parse_method_decl_splits() {
		let (name, desc) = parse_method_decl("hello(I)V").unwrap();
		assert_eq!(name.as_inner(), "hello");
		assert_eq!(desc, "(I)V");
	}

	#[test]
	fn parse_method_decl_rejects_missing_paren() {
		assert!(parse_method_decl("hello").is_err());
	}

	#[test]
	fn parse_target_method() {
		let target = parse_target("Foo.bar(I)V").unwrap();
		assert_eq!(target, ParsedTarget::Method {
			owner: ClassName::try_from("Foo").unwrap(),
			name: MethodName::try_from("bar").unwrap(),
			desc: "(I)V".to_owned(),
		});
	}

	#[test]
	fn parse_target_field() {
		let target = parse_target("Foo.bar").unwrap();
		assert_eq!(target, ParsedTarget::Field {
			owner: ClassName::try_from("Foo").unwrap(),
			name: FieldName::try_from("bar").unwrap(),
		});
	}

	#[test]
	fn parse_target_missing_dot() {
		assert!(parse_target("Foo").is_err());
	}
}
