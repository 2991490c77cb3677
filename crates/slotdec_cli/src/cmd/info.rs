use std::path::PathBuf;

use slotdec::data::{DeclId, DecodeError, Snapshot};

/// Print snapshot summary, or the member layout of one declaration.
pub fn run(path: PathBuf, decl_id: Option<u64>) -> slotdec::data::Result<()> {
	let snapshot = Snapshot::open(&path)?;

	if let Some(id) = decl_id {
		let id = DeclId(id);
		let decl = snapshot.registry.struct_by_id(id).ok_or(DecodeError::MissingDeclaration { id: id.0 })?;
		println!("declaration: {id}");
		println!("name: {}", decl.name);
		println!("members: {}", decl.members.len());
		for member in &decl.members {
			println!("  {} {}", member.ty, member.name);
		}
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", snapshot.compression.as_str());
	println!("memory_bytes: {}", snapshot.memory.len());
	println!("storage_slots: {}", snapshot.storage.len());
	println!("declarations: {}", snapshot.registry.len());
	for id in snapshot.registry.ids() {
		if let Some(decl) = snapshot.registry.struct_by_id(id) {
			println!("  {id} {} ({} members)", decl.name, decl.members.len());
		}
	}

	Ok(())
}
