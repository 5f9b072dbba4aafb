//! Go relationship resolution
//!
//! Post-pass over one package's symbol table:
//! - attaches receiver methods to their structs
//! - computes the interfaces each struct satisfies (implicit in Go)
//! - computes same-package references from signatures and fields
//!
//! Only names from the package's own index are resolved; anything else
//! (builtins, imported types, pointers, slices) produces no edge.

use crate::indexing::SymbolTable;
use crate::symbol::{Entity, ImplementationInfo, PackageDocs, ReferenceInfo, type_token};
use crate::types::EntityKind;
use tracing::debug;

/// Resolves relationships against one package's symbol table
pub struct GoRelationshipResolver<'a> {
    table: &'a SymbolTable,
}

impl<'a> GoRelationshipResolver<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Run the post-pass and produce the package's final documentation.
    pub fn resolve(mut table: SymbolTable) -> PackageDocs {
        let mut entities = std::mem::take(&mut table.entities);
        let resolver = GoRelationshipResolver::new(&table);

        for entity in &mut entities {
            resolver.resolve_entity(entity);
        }

        PackageDocs {
            info: table.package,
            entities,
            imports: table.imports,
        }
    }

    fn resolve_entity(&self, entity: &mut Entity) {
        entity.references = self.find_references(entity);

        if entity.kind != EntityKind::Struct {
            return;
        }

        entity.methods = self.attach_methods(&entity.name);
        entity.implements = self.implemented_interfaces(entity);
        for method in &mut entity.methods {
            method.references = self.find_references(method);
        }

        debug!(
            "struct {}: {} methods, {} interfaces, {} references",
            entity.name,
            entity.methods.len(),
            entity.implements.len(),
            entity.references.len()
        );
    }

    /// Methods declared on `Name`, or on `*Name` when there are none on the
    /// value type. The two sets are never merged.
    pub fn attach_methods(&self, struct_name: &str) -> Vec<Entity> {
        let by_receiver = &self.table.methods_by_receiver;

        if let Some(methods) = by_receiver.get(struct_name).filter(|m| !m.is_empty()) {
            return methods.clone();
        }
        by_receiver
            .get(&format!("*{struct_name}"))
            .cloned()
            .unwrap_or_default()
    }

    /// Interfaces of the package satisfied by the struct, sorted by name.
    pub fn implemented_interfaces(&self, entity: &Entity) -> Vec<ImplementationInfo> {
        self.table
            .interfaces
            .iter()
            .filter(|(_, iface)| implements_interface(entity, iface))
            .map(|(name, iface)| ImplementationInfo {
                interface_name: name.clone(),
                package: iface.package.clone(),
            })
            .collect()
    }

    /// Same-package entities named by parameter, return and field types.
    /// Deduplicated, in first-seen order.
    pub fn find_references(&self, entity: &Entity) -> Vec<ReferenceInfo> {
        let mut references: Vec<ReferenceInfo> = Vec::new();

        let tokens = entity
            .parameter_types()
            .chain(entity.return_types())
            .chain(entity.fields.iter().map(|f| f.type_name.as_str()));

        for token in tokens {
            let Some(target) = self.table.lookup(&entity.package, token) else {
                continue;
            };
            let reference = ReferenceInfo {
                name: token.to_string(),
                package: target.package.clone(),
                package_url: target.package_url.clone(),
                package_path: target.package_path.clone(),
            };
            if !references.contains(&reference) {
                references.push(reference);
            }
        }

        references
    }
}

/// Every interface method has a same-named struct method with a matching
/// signature. An interface without methods is satisfied by every struct.
pub fn implements_interface(entity: &Entity, iface: &Entity) -> bool {
    iface.methods.iter().all(|wanted| {
        entity
            .method(&wanted.name)
            .is_some_and(|found| methods_match(wanted, found))
    })
}

/// Parameter and return type sequences are pairwise equal. Parameter names
/// are not compared.
pub fn methods_match(iface_method: &Entity, struct_method: &Entity) -> bool {
    iface_method.parameters.len() == struct_method.parameters.len()
        && iface_method.returns.len() == struct_method.returns.len()
        && iface_method
            .parameter_types()
            .eq(struct_method.parameter_types())
        && iface_method.return_types().eq(struct_method.return_types())
}
