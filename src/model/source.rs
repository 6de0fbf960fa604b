//! In-memory semantic model backed by symbol tables.
//!
//! `SourceModel` is a resolved-symbol snapshot: whatever produced it
//! (a binder, a test fixture, a serialized dump) has already done the
//! parsing and resolution. It implements [`SemanticModel`] directly and
//! serializes to JSON, which is the format the CLI loads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{
    FieldSymbol, MethodSymbol, NamespaceSymbol, OperationBody, SemanticModel, SourceUnit,
    TypeSymbol,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnitTable {
    name: String,
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    types: Vec<TypeSymbol>,
}

/// A semantic model held entirely in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceModel {
    name: String,
    origin: String,
    #[serde(default)]
    namespaces: Vec<NamespaceSymbol>,
    #[serde(default)]
    units: Vec<UnitTable>,
    #[serde(default)]
    fields: IndexMap<String, Vec<FieldSymbol>>,
    #[serde(default)]
    methods: IndexMap<String, Vec<MethodSymbol>>,
    #[serde(default)]
    bodies: IndexMap<String, OperationBody>,
    #[serde(default = "default_root")]
    universal_root: String,
}

fn default_root() -> String {
    "object".to_string()
}

impl SourceModel {
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            namespaces: Vec::new(),
            units: Vec::new(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            bodies: IndexMap::new(),
            universal_root: default_root(),
        }
    }

    /// Load a serialized model snapshot from a JSON file.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| crate::error::Error::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| crate::error::Error::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn add_namespace(&mut self, namespace: NamespaceSymbol) {
        self.namespaces.push(namespace);
    }

    pub fn add_unit(&mut self, name: impl Into<String>, path: Option<PathBuf>) {
        self.units.push(UnitTable {
            name: name.into(),
            path,
            types: Vec::new(),
        });
    }

    /// Attach a type declaration to a unit. Unknown unit names are
    /// ignored with a warning; this mirrors provider lookups that
    /// resolve to nothing.
    pub fn add_type(&mut self, unit: &str, symbol: TypeSymbol) {
        match self.units.iter_mut().find(|u| u.name == unit) {
            Some(table) => table.types.push(symbol),
            None => tracing::warn!(unit, "dropping type for unknown unit"),
        }
    }

    pub fn add_field(&mut self, symbol: FieldSymbol) {
        self.fields
            .entry(symbol.containing_type.clone())
            .or_default()
            .push(symbol);
    }

    pub fn add_method(&mut self, symbol: MethodSymbol) {
        self.methods
            .entry(symbol.containing_type.clone())
            .or_default()
            .push(symbol);
    }

    pub fn set_body(&mut self, method: impl Into<String>, body: OperationBody) {
        self.bodies.insert(method.into(), body);
    }

    pub fn set_universal_root(&mut self, name: impl Into<String>) {
        self.universal_root = name.into();
    }
}

impl SemanticModel for SourceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn units(&self) -> Vec<SourceUnit> {
        self.units
            .iter()
            .map(|u| SourceUnit {
                name: u.name.clone(),
                path: u.path.clone(),
            })
            .collect()
    }

    fn namespaces(&self) -> Vec<NamespaceSymbol> {
        self.namespaces.clone()
    }

    fn declared_types(&self, unit: &str) -> Vec<TypeSymbol> {
        self.units
            .iter()
            .find(|u| u.name == unit)
            .map(|u| u.types.clone())
            .unwrap_or_default()
    }

    fn fields_of(&self, type_name: &str) -> Vec<FieldSymbol> {
        self.fields.get(type_name).cloned().unwrap_or_default()
    }

    fn methods_of(&self, type_name: &str) -> Vec<MethodSymbol> {
        self.methods.get(type_name).cloned().unwrap_or_default()
    }

    fn body_of(&self, method_name: &str) -> Option<OperationBody> {
        self.bodies.get(method_name).cloned()
    }

    fn universal_root(&self) -> &str {
        &self.universal_root
    }
}
