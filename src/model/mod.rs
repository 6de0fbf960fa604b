//! The semantic-model provider seam.
//!
//! Extraction consumes a [`SemanticModel`]: an already-resolved view of
//! a body of source code — compilation units, a namespace tree, and
//! type/member symbols with their cross-references bound to qualified
//! names. Parsing, symbol binding and overload resolution happen behind
//! this trait, not in this crate.
//!
//! Qualified names follow the `namespace.Type.member(params)` string
//! convention throughout; unresolved references simply do not appear in
//! the symbol data.

mod source;

pub use source::SourceModel;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A compiled unit, optionally backed by a file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceUnit {
    pub name: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// One namespace in the tree below the (implicit) global namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceSymbol {
    pub qualified_name: String,
    pub simple_name: String,
    #[serde(default)]
    pub children: Vec<NamespaceSymbol>,
}

impl NamespaceSymbol {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = last_segment(&qualified_name).to_string();
        Self {
            qualified_name,
            simple_name,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NamespaceSymbol) -> Self {
        self.children.push(child);
        self
    }
}

/// Declared accessibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
    NotApplicable,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::NotApplicable => "not applicable",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind discriminator for type symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    AbstractClass,
    Interface,
    Struct,
    Enum,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::AbstractClass => "abstract class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
        }
    }
}

/// A named type declaration resolved to a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub qualified_name: String,
    pub simple_name: String,
    pub kind: TypeKind,
    /// Owning namespace; empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub doc_comment: String,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub nested_types: Vec<String>,
    /// True for symbols outside the analyzed source set.
    #[serde(default)]
    pub external: bool,
}

impl TypeSymbol {
    /// Simple name and namespace are derived from the qualified name;
    /// nested types should override the namespace via [`in_namespace`].
    ///
    /// [`in_namespace`]: TypeSymbol::in_namespace
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = last_segment(&qualified_name).to_string();
        let namespace = prefix_of(&qualified_name).to_string();
        Self {
            qualified_name,
            simple_name,
            kind,
            namespace,
            visibility: Visibility::Public,
            doc_comment: String::new(),
            base_type: None,
            interfaces: Vec::new(),
            nested_types: Vec::new(),
            external: false,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_nested(mut self, nested: impl Into<String>) -> Self {
        self.nested_types.push(nested.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = doc.into();
        self
    }

    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }
}

/// A field declaration resolved to a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSymbol {
    /// `Type.field` form; containing type and simple name derive from it.
    pub qualified_name: String,
    pub simple_name: String,
    pub containing_type: String,
    pub type_name: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub source_text: String,
    #[serde(default)]
    pub doc_comment: String,
    /// Resolved calls/instantiations in the field initializer, if any.
    #[serde(default)]
    pub initializer: Option<InitializerBody>,
}

impl FieldSymbol {
    pub fn new(qualified_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = last_segment(&qualified_name).to_string();
        let containing_type = prefix_of(&qualified_name).to_string();
        Self {
            qualified_name,
            simple_name,
            containing_type,
            type_name: type_name.into(),
            visibility: Visibility::Private,
            source_text: String::new(),
            doc_comment: String::new(),
            initializer: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_text = source.into();
        self
    }

    pub fn with_initializer(mut self, initializer: InitializerBody) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

/// Resolved references inside a field initializer expression.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitializerBody {
    #[serde(default)]
    pub calls: Vec<String>,
    #[serde(default)]
    pub instantiations: Vec<String>,
}

impl InitializerBody {
    pub fn with_call(mut self, target: impl Into<String>) -> Self {
        self.calls.push(target.into());
        self
    }

    pub fn with_instantiation(mut self, target: impl Into<String>) -> Self {
        self.instantiations.push(target.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.instantiations.is_empty()
    }
}

/// Method vs constructor discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Method,
    Constructor,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Method => "method",
            OperationKind::Constructor => "constructor",
        }
    }
}

/// One formal parameter of an operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    pub type_name: String,
    pub position: usize,
}

/// A method or constructor declaration resolved to a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Full signature form, e.g. `A.B.M(int)`.
    pub qualified_name: String,
    pub simple_name: String,
    pub containing_type: String,
    #[serde(default = "default_operation_kind")]
    pub kind: OperationKind,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub doc_comment: String,
    #[serde(default)]
    pub source_text: String,
    /// `None` means void.
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    /// Immediately overridden method, if any.
    #[serde(default)]
    pub overrides: Option<String>,
}

impl MethodSymbol {
    pub fn new(qualified_name: impl Into<String>, containing_type: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let head = qualified_name
            .split('(')
            .next()
            .unwrap_or(&qualified_name);
        let simple_name = last_segment(head).to_string();
        Self {
            qualified_name,
            simple_name,
            containing_type: containing_type.into(),
            kind: OperationKind::Method,
            visibility: Visibility::Public,
            doc_comment: String::new(),
            source_text: String::new(),
            return_type: None,
            parameters: Vec::new(),
            overrides: None,
        }
    }

    pub fn constructor(mut self) -> Self {
        self.kind = OperationKind::Constructor;
        self
    }

    pub fn returning(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let position = self.parameters.len();
        self.parameters.push(ParameterSymbol {
            name: name.into(),
            type_name: type_name.into(),
            position,
        });
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_text = source.into();
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = doc.into();
        self
    }

    pub fn overriding(mut self, overridden: impl Into<String>) -> Self {
        self.overrides = Some(overridden.into());
        self
    }
}

/// One token of an operation body, as classified by the provider.
/// Feeds the Halstead calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyToken {
    /// A `this` reference.
    This,
    /// An identifier usage; `is_type` marks identifiers that resolve to
    /// a type symbol.
    Identifier { text: String, is_type: bool },
    /// A literal token's textual value.
    Literal(String),
    /// A binary, unary, postfix or assignment operator token.
    Operator(String),
    /// A keyword token (filtered against the calculator's fixed set).
    Keyword(String),
    /// One ternary conditional expression (`?` and `:`).
    Conditional,
}

/// The resolved view of one operation's declaration body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationBody {
    /// Count of top-level statements.
    pub statements: usize,
    /// Resolved invocation targets, one entry per call site.
    #[serde(default)]
    pub calls: Vec<String>,
    /// Resolved types of object-construction expressions.
    #[serde(default)]
    pub instantiations: Vec<String>,
    /// Fields reached through qualified member accesses.
    #[serde(default)]
    pub field_accesses: Vec<String>,
    /// Fields reached through implicit-`this` identifier reads. Kept as
    /// a separate detection path; both feed `uses` edges.
    #[serde(default)]
    pub field_reads: Vec<String>,
    /// Token stream for metric calculation.
    #[serde(default)]
    pub tokens: Vec<BodyToken>,
}

impl OperationBody {
    pub fn new(statements: usize) -> Self {
        Self {
            statements,
            ..Self::default()
        }
    }

    pub fn with_call(mut self, target: impl Into<String>) -> Self {
        self.calls.push(target.into());
        self
    }

    pub fn with_instantiation(mut self, target: impl Into<String>) -> Self {
        self.instantiations.push(target.into());
        self
    }

    pub fn with_field_access(mut self, target: impl Into<String>) -> Self {
        self.field_accesses.push(target.into());
        self
    }

    pub fn with_field_read(mut self, target: impl Into<String>) -> Self {
        self.field_reads.push(target.into());
        self
    }

    pub fn with_token(mut self, token: BodyToken) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = BodyToken>) -> Self {
        self.tokens.extend(tokens);
        self
    }
}

/// The capability set extraction consumes.
///
/// Implementations own symbol binding; every lookup that fails on the
/// provider side is expressed as absence, never as an error.
pub trait SemanticModel {
    /// Name of the analyzed unit (graph and Project node naming).
    fn name(&self) -> &str;

    /// Origin path or locator of the analyzed unit.
    fn origin(&self) -> &str;

    /// Compiled units, in a stable order.
    fn units(&self) -> Vec<SourceUnit>;

    /// Namespace tree below the global namespace (which itself gets no
    /// node).
    fn namespaces(&self) -> Vec<NamespaceSymbol>;

    /// Type declarations of one unit, resolved to symbols.
    fn declared_types(&self, unit: &str) -> Vec<TypeSymbol>;

    fn fields_of(&self, type_name: &str) -> Vec<FieldSymbol>;

    fn methods_of(&self, type_name: &str) -> Vec<MethodSymbol>;

    /// Body of a method, `None` when it has no declaration (abstract or
    /// interface methods).
    fn body_of(&self, method_name: &str) -> Option<OperationBody>;

    /// The universal root type every type implicitly specializes; it is
    /// skipped when emitting `specializes` edges.
    fn universal_root(&self) -> &str {
        "object"
    }
}

fn default_visibility() -> Visibility {
    Visibility::Public
}

fn default_operation_kind() -> OperationKind {
    OperationKind::Method
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn prefix_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) => &name[..i],
        None => "",
    }
}
