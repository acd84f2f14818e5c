//! Rewrites generic signatures (JVMS 4.7.9.1), substituting class names the same way
//! [`duke::descriptor_ops`] substitutes them in descriptors.
//!
//! Unlike a descriptor, a signature can nest: a `ClassTypeSignature` carries optional
//! `TypeArguments` (`<...>`) and optional inner-class suffixes (`.Name<...>`), either of which
//! can themselves contain further class type signatures. This module walks that structure with a
//! small recursive-descent scanner rather than building an intermediate tree, mirroring the
//! "substitute in place" style of [`duke::descriptor_ops::map_type_desc`].
//!
//! Inner-class suffixes (the part after a `.`) name a *simple* class name relative to the outer
//! type, not a full internal name, so they carry no information a class-name remapper can act
//! on: this module copies them through unchanged.

use std::iter::Peekable;
use std::str::Chars;
use anyhow::{anyhow, bail, Result};

/// Rewrites every class name referenced in a class, field or method signature, via `f`.
///
/// Accepts `ClassSignature`, `FieldSignature` and `MethodSignature` alike: all three share the
/// same `ClassTypeSignature`/`TypeVariableSignature`/`ArrayTypeSignature` grammar for an
/// individual type, but assemble it differently at the top level:
/// - a field signature is exactly one type;
/// - a class signature is the superclass type followed by zero or more interface types;
/// - a method signature wraps its parameter types in `(...)`, followed by a result type (a type,
///   or `V` for `void`) and zero or more `^`-prefixed thrown-exception types.
pub fn map_signature(sig: &str, mut f: impl FnMut(&str) -> String) -> Result<String> {
	let mut out = String::with_capacity(sig.len());
	let mut chars = sig.chars().peekable();

	if chars.peek() == Some(&'<') {
		copy_formal_type_parameters(&mut chars, &mut out, &mut f)?;
	}

	if chars.peek() == Some(&'(') {
		out.push(chars.next().unwrap());
		while chars.peek() != Some(&')') {
			copy_one_type(&mut chars, &mut out, &mut f)?;
		}
		out.push(chars.next().unwrap()); // ')'

		if chars.peek() == Some(&'V') {
			out.push(chars.next().unwrap());
		} else {
			copy_one_type(&mut chars, &mut out, &mut f)?;
		}

		while chars.peek() == Some(&'^') {
			out.push(chars.next().unwrap());
			copy_one_type(&mut chars, &mut out, &mut f)?;
		}

		return Ok(out);
	}

	// a class signature is the superclass type followed by zero or more interface types; a field
	// signature is exactly one type, so this loop runs once and stops (nothing left to consume).
	while chars.peek().is_some() {
		copy_one_type(&mut chars, &mut out, &mut f)?;
	}

	Ok(out)
}

fn copy_formal_type_parameters(chars: &mut Peekable<Chars>, out: &mut String, f: &mut impl FnMut(&str) -> String) -> Result<()> {
	out.push(chars.next().unwrap()); // '<'
	loop {
		// Identifier ':' ClassBound InterfaceBound*
		while chars.peek().is_some_and(|&c| c != ':') {
			out.push(chars.next().unwrap());
		}
		loop {
			match chars.peek() {
				Some(&':') => {
					out.push(chars.next().unwrap());
					// a class bound can be empty (no upper bound but an interface follows)
					if chars.peek() == Some(&':') {
						continue;
					}
					if chars.peek() != Some(&'>') {
						copy_one_type(chars, out, f)?;
					}
				}
				_ => break,
			}
		}
		if chars.peek() == Some(&'>') {
			out.push(chars.next().unwrap());
			return Ok(());
		}
	}
}

fn copy_one_type(chars: &mut Peekable<Chars>, out: &mut String, f: &mut impl FnMut(&str) -> String) -> Result<()> {
	match chars.peek().copied() {
		Some('L') => copy_class_type_signature(chars, out, f),
		Some('T') => {
			out.push(chars.next().unwrap());
			while let Some(&c) = chars.peek() {
				out.push(chars.next().unwrap());
				if c == ';' {
					break;
				}
			}
			Ok(())
		}
		Some('[') => {
			out.push(chars.next().unwrap());
			copy_one_type(chars, out, f)
		}
		Some('+') | Some('-') => {
			out.push(chars.next().unwrap());
			copy_one_type(chars, out, f)
		}
		Some('*') => {
			out.push(chars.next().unwrap());
			Ok(())
		}
		Some(c @ ('B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' | 'V')) => {
			out.push(c);
			chars.next();
			Ok(())
		}
		Some(c) => bail!("unexpected char {c:?} at start of type in signature"),
		None => bail!("unexpected end of signature, expected a type"),
	}
}

fn copy_class_type_signature(chars: &mut Peekable<Chars>, out: &mut String, f: &mut impl FnMut(&str) -> String) -> Result<()> {
	chars.next(); // 'L'
	let mut name = String::new();
	loop {
		match chars.next().ok_or_else(|| anyhow!("unexpected end of signature inside a class type"))? {
			';' => {
				out.push('L');
				out.push_str(&f(&name));
				out.push(';');
				return Ok(());
			}
			'<' => {
				out.push('L');
				out.push_str(&f(&name));
				out.push('<');
				while chars.peek() != Some(&'>') {
					copy_one_type(chars, out, f)?;
				}
				chars.next(); // '>'
				out.push('>');
				break;
			}
			'.' => {
				out.push('L');
				out.push_str(&f(&name));
				out.push('.');
				break;
			}
			c => name.push(c),
		}
	}

	// any number of `.Name<...>` suffixes (simple inner-class names, left untranslated) followed
	// by the closing ';'
	loop {
		match chars.next().ok_or_else(|| anyhow!("unexpected end of signature inside an inner class type suffix"))? {
			';' => {
				out.push(';');
				return Ok(());
			}
			'<' => {
				out.push('<');
				while chars.peek() != Some(&'>') {
					copy_one_type(chars, out, f)?;
				}
				chars.next();
				out.push('>');
			}
			'.' => out.push('.'),
			c => out.push(c),
		}
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use super::*;

	fn upcase(name: &str) -> String {
		name.to_uppercase()
	}

	#[test]
	fn plain_class_type() {
		assert_eq!(map_signature("Ljava/lang/Object;", upcase).unwrap(), "LJAVA/LANG/OBJECT;");
	}

	#[test]
	fn type_variable_passes_through() {
		assert_eq!(map_signature("TT;", upcase).unwrap(), "TT;");
	}

	#[test]
	fn generic_class_with_type_argument() {
		assert_eq!(
			map_signature("Ljava/util/List<Ljava/lang/String;>;", upcase).unwrap(),
			"LJAVA/UTIL/LIST<LJAVA/LANG/STRING;>;",
		);
	}

	#[test]
	fn array_of_type_variable() {
		assert_eq!(map_signature("[TT;", upcase).unwrap(), "[TT;");
	}

	#[test]
	fn wildcard_type_argument() {
		assert_eq!(
			map_signature("Ljava/util/List<+Ljava/lang/Object;>;", upcase).unwrap(),
			"LJAVA/UTIL/LIST<+LJAVA/LANG/OBJECT;>;",
		);
		assert_eq!(map_signature("Ljava/util/List<*>;", upcase).unwrap(), "LJAVA/UTIL/LIST<*>;");
	}

	#[test]
	fn formal_type_parameters_on_class_signature() {
		assert_eq!(
			map_signature("<T:Ljava/lang/Object;>Ljava/lang/Object;", upcase).unwrap(),
			"<T:LJAVA/LANG/OBJECT;>LJAVA/LANG/OBJECT;",
		);
	}

	#[test]
	fn method_signature_with_multiple_parameters() {
		assert_eq!(
			map_signature("(Ljava/lang/String;TT;)Ljava/lang/Object;", upcase).unwrap(),
			"(LJAVA/LANG/STRING;TT;)LJAVA/LANG/OBJECT;",
		);
	}

	#[test]
	fn method_signature_with_void_return() {
		assert_eq!(map_signature("(I)V", upcase).unwrap(), "(I)V");
	}

	#[test]
	fn method_signature_with_throws_clause() {
		assert_eq!(
			map_signature("()V^Ljava/io/IOException;", upcase).unwrap(),
			"()V^LJAVA/IO/IOEXCEPTION;",
		);
	}

	#[test]
	fn class_signature_with_interfaces() {
		assert_eq!(
			map_signature("Ljava/lang/Object;Ljava/lang/Comparable;Ljava/io/Serializable;", upcase).unwrap(),
			"LJAVA/LANG/OBJECT;LJAVA/LANG/COMPARABLE;LJAVA/IO/SERIALIZABLE;",
		);
	}

	#[test]
	fn inner_class_suffix_left_untranslated() {
		assert_eq!(
			map_signature("Lorg/Outer<Ljava/lang/String;>.Inner;", upcase).unwrap(),
			"LORG/OUTER<LJAVA/LANG/STRING;>.Inner;",
		);
	}
}
