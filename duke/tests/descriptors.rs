use duke::tree::field::FieldDescriptor;
use duke::tree::method::MethodDescriptor;
use duke::tree::descriptor::ReturnDescriptor;

#[test]
fn valid_field_descriptors() {
	let valid_field_descriptors = [
		"B",
		"C",
		"D",
		"F",
		"I",
		"J",
		"Ljava/lang/Object;",
		"Lorg/example/MyClassName;",
		"S",
		"Z",
		"[[[D",
	];

	for i in valid_field_descriptors {
		assert!(
			FieldDescriptor::try_from(i).is_ok(),
			"{:?} is a valid field desc", i
		);
	}
}

#[test]
fn invalid_field_descriptors() {
	let invalid_field_descriptors = [
		"",
		"V",
		"(",
		")",
		"()",
		"[V",
		"L;",
		"()V",
		"foo",
		"(D)I",
		"L;DV",
	];

	for i in invalid_field_descriptors {
		assert!(
			FieldDescriptor::try_from(i).is_err(),
			"{:?} is an invalid field desc", i
		);
	}
}

#[test]
fn valid_method_descriptors() {
	let valid_method_descriptors = [
		"()V",
		"(D)I",
		"(Ljava/lang/Object;)Ljava/lang/Object;",
	];

	for i in valid_method_descriptors {
		assert!(
			MethodDescriptor::try_from(i).is_ok(),
			"{:?} is a valid method desc", i
		);
	}
}

#[test]
fn invalid_method_descriptors() {
	let invalid_method_descriptors = [
		"B",
		"C",
		"D",
		"F",
		"I",
		"J",
		"Ljava/lang/Object;",
		"Lorg/example/MyClassName;",
		"S",
		"Z",
		"[[[D",
		"",
		"V",
		"(",
		")",
		"()",
		"[V",
		"L;",
		"foo",
		"L;DV",
		"(L;)V",
	];

	for i in invalid_method_descriptors {
		assert!(
			MethodDescriptor::try_from(i).is_err(),
			"{:?} is an invalid method desc", i
		);
	}
}

#[test]
fn valid_return_descriptors() {
	let valid_return_descriptors = [
		"B",
		"C",
		"D",
		"F",
		"I",
		"J",
		"Ljava/lang/Object;",
		"Lorg/example/MyClassName;",
		"S",
		"V",
		"Z",
		"[[[D",
	];

	for i in valid_return_descriptors {
		assert!(
			ReturnDescriptor::try_from(i).is_ok(),
			"{:?} is a valid return desc", i
		);
	}
}

#[test]
fn invalid_return_descriptors() {
	let invalid_return_descriptors = [
		"",
		"(",
		")",
		"()",
		"[V",
		"L;",
		"()V",
		"foo",
		"(D)I",
		"L;DV",
	];

	for i in invalid_return_descriptors {
		assert!(
			ReturnDescriptor::try_from(i).is_err(),
			"{:?} is an invalid return desc", i
		);
	}
}
