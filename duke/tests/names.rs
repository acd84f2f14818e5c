use duke::tree::class::ClassName;
use duke::tree::field::FieldName;
use duke::tree::method::MethodName;

#[test]
fn valid_class_names() {
	let valid_class_names = [
		"foo",
		"foo$bar",
		"java/lang/Object",
		"org/example/MyClassName",
		"[[[D",
		"[[Ljava/lang/Integer;",
	];

	for i in valid_class_names {
		assert!(
			ClassName::try_from(i).is_ok(),
			"{:?} is a valid class name", i
		);
	}
}

#[test]
fn invalid_class_names() {
	let invalid_class_names = [
		"",
		".",
		"/",
		";",
		"[",
		"a/",
		"/a",
		"//a",
		"a//",
		"a.b",
		"a;b",
		"a[b",
		"a//a",
	];

	for i in invalid_class_names {
		assert!(
			ClassName::try_from(i).is_err(),
			"{:?} is an invalid class name", i
		);
	}
}

#[test]
fn valid_field_names() {
	let valid_field_names = [
		"foo",
		"bar",
		"L<foo>",
		"---",
		"1234",
		"do",
		"while",
	];

	for i in valid_field_names {
		assert!(
			FieldName::try_from(i).is_ok(),
			"{:?} is a valid field name", i
		);
	}
}

#[test]
fn invalid_field_names() {
	let invalid_field_names = [
		"",
		".",
		";",
		"[",
		"/",
	];

	for i in invalid_field_names {
		assert!(
			FieldName::try_from(i).is_err(),
			"{:?} is an invalid field name", i
		);
	}
}

#[test]
fn valid_method_names() {
	let valid_method_names = [
		"foo",
		"<init>",
		"<clinit>",
		"123",
		"---",
		"bar",
		"$foo$",
	];

	for i in valid_method_names {
		assert!(
			MethodName::try_from(i).is_ok(),
			"{:?} is a valid method name", i
		);
	}
}

#[test]
fn invalid_method_names() {
	let invalid_method_names = [
		"",
		"<foo>",
		"<clinit",
		"clinit>",
		".",
		";",
		"[",
		"/",
		"<",
		">",
	];

	for i in invalid_method_names {
		assert!(
			MethodName::try_from(i).is_err(),
			"{:?} is an invalid method name", i
		);
	}
}
