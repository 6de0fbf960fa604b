//! Label and relationship vocabulary of the extracted graph.

/// Node labels.
pub mod labels {
    pub const PROJECT: &str = "Project";
    pub const FOLDER: &str = "Folder";
    pub const FILE: &str = "File";
    pub const SCOPE: &str = "Scope";
    pub const TYPE: &str = "Type";
    pub const OPERATION: &str = "Operation";
    pub const VARIABLE: &str = "Variable";
    pub const SCRIPT: &str = "Script";
    pub const METRIC: &str = "Metric";
}

/// Edge labels.
pub mod relations {
    pub const INCLUDES: &str = "includes";
    pub const CONTAINS: &str = "contains";
    pub const ENCLOSES: &str = "encloses";
    pub const DECLARES: &str = "declares";
    pub const SPECIALIZES: &str = "specializes";
    pub const ENCAPSULATES: &str = "encapsulates";
    pub const PARAMETERIZES: &str = "parameterizes";
    pub const TYPED: &str = "typed";
    pub const RETURNS: &str = "returns";
    pub const INVOKES: &str = "invokes";
    pub const INSTANTIATES: &str = "instantiates";
    pub const USES: &str = "uses";
    pub const OVERRIDES: &str = "overrides";
    pub const MEASURES: &str = "measures";
}

/// Property keys shared across phases.
pub mod props {
    pub const SIMPLE_NAME: &str = "simpleName";
    pub const QUALIFIED_NAME: &str = "qualifiedName";
    pub const KIND: &str = "kind";
    pub const VISIBILITY: &str = "visibility";
    pub const DOC_COMMENT: &str = "docComment";
    pub const SOURCE_TEXT: &str = "sourceText";
    pub const PARAMETER_POSITION: &str = "parameterPosition";
}
