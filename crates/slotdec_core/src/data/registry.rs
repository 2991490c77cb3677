use std::collections::HashMap;

use crate::data::{DecodeError, DeclId, Result, TypeDescriptor};

/// Struct declarations keyed by declaration id.
#[derive(Debug, Default)]
pub struct Registry {
	structs: HashMap<DeclId, StructDecl>,
}

/// One struct declaration.
#[derive(Debug, Clone)]
pub struct StructDecl {
	/// Declared struct name.
	pub name: Box<str>,
	/// Members in declaration order.
	pub members: Vec<MemberDecl>,
}

/// One named struct member.
#[derive(Debug, Clone)]
pub struct MemberDecl {
	/// Member name.
	pub name: Box<str>,
	/// Declared member type.
	pub ty: TypeDescriptor,
}

impl MemberDecl {
	/// Build a member from name and type.
	pub fn new(name: &str, ty: TypeDescriptor) -> Self {
		Self { name: name.into(), ty }
	}
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a declaration; ids must be unique.
	pub fn insert(&mut self, id: DeclId, decl: StructDecl) -> Result<()> {
		if self.structs.contains_key(&id) {
			return Err(DecodeError::DuplicateDeclaration { id: id.0 });
		}
		self.structs.insert(id, decl);
		Ok(())
	}

	/// Look up a declaration by id.
	pub fn struct_by_id(&self, id: DeclId) -> Option<&StructDecl> {
		self.structs.get(&id)
	}

	/// Ordered members of a declaration.
	pub fn members_of(&self, id: DeclId) -> Option<&[MemberDecl]> {
		self.struct_by_id(id).map(|item| item.members.as_slice())
	}

	/// Number of registered declarations.
	pub fn len(&self) -> usize {
		self.structs.len()
	}

	/// Whether no declarations are registered.
	pub fn is_empty(&self) -> bool {
		self.structs.is_empty()
	}

	/// Declaration ids in ascending order.
	pub fn ids(&self) -> Vec<DeclId> {
		let mut ids: Vec<DeclId> = self.structs.keys().copied().collect();
		ids.sort_unstable();
		ids
	}
}
