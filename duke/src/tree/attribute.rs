/// A raw, unrecognized `class`-file attribute: a name paired with its undecoded bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
	pub name: String,
	pub bytes: Vec<u8>,
}
