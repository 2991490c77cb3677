use slotdec::data::{TypeDescriptor, describe_strategy};

/// Print the parsed form of a type identifier and the strategy that would decode it.
pub fn run(identifier: &str) -> slotdec::data::Result<()> {
	let ty = TypeDescriptor::parse(identifier)?;

	println!("identifier: {ty}");
	println!("class: {}", ty.type_class());
	println!("reference: {}", ty.is_reference());
	println!("location: {}", ty.reference_category().map_or("-", |location| location.as_str()));
	if let Some(element) = ty.element_type() {
		println!("element: {element}");
	}
	if let Some(declaration) = ty.declaration_id() {
		println!("declaration: {declaration}");
	}
	println!("strategy: {}", describe_strategy(&ty));

	Ok(())
}
