/// Declares a pair of owned/borrowed string-like newtypes, e.g. `ClassName`/`ClassNameSlice`.
///
/// The owned type derefs to the slice type, the way `String` derefs to `str`. Validity of the
/// inner string is the caller's responsibility when going through `from_inner_unchecked`; the
/// checked paths (`TryFrom<String>`/`TryFrom<&str>`) call the type's own `check_valid` function,
/// which every invocation of this macro must define in an `impl $owned` block right after.
macro_rules! make_string_str_like {
	(
		$(#[$owned_meta:meta])*
		$owned_vis:vis $owned:ident(String);
		$(#[$slice_meta:meta])*
		$slice_vis:vis $slice:ident(str);
	) => {
		$(#[$owned_meta])*
		#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
		$owned_vis struct $owned(String);

		$(#[$slice_meta])*
		#[derive(Eq, PartialEq, Ord, PartialOrd, Hash)]
		#[repr(transparent)]
		$slice_vis struct $slice(str);

		impl $owned {
			/// Wraps `s` without checking that it is well-formed.
			///
			/// # Safety
			/// The caller must ensure `s` satisfies this type's validity rules.
			pub unsafe fn from_inner_unchecked(s: String) -> $owned {
				$owned(s)
			}

			pub fn into_inner(self) -> String {
				self.0
			}

			pub fn as_inner(&self) -> &str {
				&self.0
			}

			pub fn as_slice(&self) -> &$slice {
				// SAFETY: `$slice` is a `#[repr(transparent)]` wrapper around `str`, and every
				// `$owned` was constructed under the same validity rules as `$slice`.
				unsafe { $slice::from_inner_unchecked(&self.0) }
			}
		}

		impl $slice {
			/// Wraps `s` without checking that it is well-formed.
			///
			/// # Safety
			/// The caller must ensure `s` satisfies this type's validity rules.
			pub const unsafe fn from_inner_unchecked(s: &str) -> &$slice {
				// SAFETY: `$slice` is `#[repr(transparent)]` around `str`.
				unsafe { &*(s as *const str as *const $slice) }
			}

			pub fn as_inner(&self) -> &str {
				&self.0
			}

			pub fn to_owned(&self) -> $owned {
				$owned(self.0.to_owned())
			}
		}

		impl std::ops::Deref for $owned {
			type Target = $slice;
			fn deref(&self) -> &$slice {
				self.as_slice()
			}
		}

		impl std::borrow::Borrow<$slice> for $owned {
			fn borrow(&self) -> &$slice {
				self.as_slice()
			}
		}

		impl ToOwned for $slice {
			type Owned = $owned;
			fn to_owned(&self) -> $owned {
				$slice::to_owned(self)
			}
		}

		impl std::fmt::Debug for $owned {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Debug::fmt(&self.0, f)
			}
		}
		impl std::fmt::Debug for $slice {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Debug::fmt(&self.0, f)
			}
		}

		impl TryFrom<String> for $owned {
			type Error = anyhow::Error;
			fn try_from(s: String) -> anyhow::Result<$owned> {
				$owned::check_valid(&s)?;
				Ok($owned(s))
			}
		}
		impl TryFrom<&str> for $owned {
			type Error = anyhow::Error;
			fn try_from(s: &str) -> anyhow::Result<$owned> {
				$owned::check_valid(s)?;
				Ok($owned(s.to_owned()))
			}
		}

		impl From<$owned> for String {
			fn from(value: $owned) -> String {
				value.0
			}
		}
		impl<'a> From<&'a $owned> for &'a str {
			fn from(value: &'a $owned) -> &'a str {
				&value.0
			}
		}

		impl PartialEq<str> for $owned {
			fn eq(&self, other: &str) -> bool { self.0 == other }
		}
		impl PartialEq<&str> for $owned {
			fn eq(&self, other: &&str) -> bool { self.0 == *other }
		}
		impl PartialEq<$slice> for $owned {
			fn eq(&self, other: &$slice) -> bool { self.0 == other.0 }
		}
		impl PartialEq<$owned> for $slice {
			fn eq(&self, other: &$owned) -> bool { self.0 == other.0 }
		}

		impl AsRef<str> for $owned {
			fn as_ref(&self) -> &str { &self.0 }
		}
		impl AsRef<str> for $slice {
			fn as_ref(&self) -> &str { &self.0 }
		}
	};
}

/// Adds a `Display` impl for a pair declared with [`make_string_str_like`], printing the inner
/// string as-is.
macro_rules! make_display {
	($owned:ident, $slice:ident) => {
		impl std::fmt::Display for $owned {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Display::fmt(self.as_inner(), f)
			}
		}
		impl std::fmt::Display for $slice {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Display::fmt(self.as_inner(), f)
			}
		}
	};
}

pub(crate) use make_string_str_like;
pub(crate) use make_display;
