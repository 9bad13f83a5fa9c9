//! Syntax model fixture shaped like a typical business-application DSL.

use std::sync::Arc;

use dsl_analysis::project::ProjectContextProvider;
use dsl_analysis::syntax::{ConceptTypeId, DslSyntax};
use once_cell::sync::Lazy;

pub const ROOT_PATH: &str = "/work/app";

pub const MODEL: &str = r#"{
    "version": "5.4.0",
    "concept_types": [
        { "type_name": "ModuleInfo", "keyword": "Module",
          "documentation": "A group of related data structures.",
          "members": [ { "name": "Name", "value": { "kind": "string" }, "is_key": true } ] },
        { "type_name": "DataStructureInfo", "keyword": "DataStructure",
          "members": [
            { "name": "Module", "value": { "kind": "concept", "concept_type": "ModuleInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true } ] },
        { "type_name": "EntityInfo", "keyword": "Entity", "base_types": ["DataStructureInfo"],
          "documentation": "A data structure stored in a database table.",
          "members": [
            { "name": "Module", "value": { "kind": "concept", "concept_type": "ModuleInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true } ] },
        { "type_name": "BrowseDataStructureInfo", "keyword": "Browse", "base_types": ["DataStructureInfo"],
          "members": [
            { "name": "Module", "value": { "kind": "concept", "concept_type": "ModuleInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true },
            { "name": "Source", "value": { "kind": "concept", "concept_type": "DataStructureInfo" } } ] },
        { "type_name": "PropertyInfo",
          "members": [
            { "name": "DataStructure", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true } ] },
        { "type_name": "ShortStringPropertyInfo", "keyword": "ShortString", "base_types": ["PropertyInfo"],
          "documentation": "A text property of up to 256 characters.",
          "members": [
            { "name": "DataStructure", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true } ] },
        { "type_name": "IntegerPropertyInfo", "keyword": "Integer", "base_types": ["PropertyInfo"],
          "members": [
            { "name": "DataStructure", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true } ] },
        { "type_name": "ReferencePropertyInfo", "keyword": "Reference", "base_types": ["PropertyInfo"],
          "documentation": "A property referencing another data structure.",
          "members": [
            { "name": "DataStructure", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true },
            { "name": "Referenced", "value": { "kind": "concept", "concept_type": "DataStructureInfo" } } ] },
        { "type_name": "SimpleReferencePropertyInfo", "keyword": "Reference", "base_types": ["ReferencePropertyInfo"],
          "documentation": "A reference to a data structure with the same name in the same module.",
          "members": [
            { "name": "DataStructure", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true },
            { "name": "Referenced", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_parsable": false } ] },
        { "type_name": "AutoCodePropertyInfo", "keyword": "AutoCode",
          "members": [
            { "name": "Property", "value": { "kind": "concept", "concept_type": "PropertyInfo" }, "is_key": true } ] },
        { "type_name": "RequiredPropertyInfo", "keyword": "Required",
          "members": [
            { "name": "Property", "value": { "kind": "concept", "concept_type": "PropertyInfo" }, "is_key": true } ] },
        { "type_name": "ItemFilterInfo", "keyword": "ItemFilter",
          "members": [
            { "name": "Source", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Name", "value": { "kind": "string" }, "is_key": true },
            { "name": "Expression", "value": { "kind": "string" } } ] },
        { "type_name": "OrderByInfo", "keyword": "OrderBy",
          "members": [
            { "name": "DataStructure", "value": { "kind": "concept", "concept_type": "DataStructureInfo" }, "is_key": true },
            { "name": "Property", "value": { "kind": "string" }, "is_key": true },
            { "name": "Direction", "value": { "kind": "enum", "values": ["Ascending", "Descending"] } } ] },
        { "type_name": "TagInfo", "keyword": "Tag",
          "members": [
            { "name": "Target", "value": { "kind": "any_concept" }, "is_key": true },
            { "name": "Value", "value": { "kind": "string" }, "is_key": true } ] }
    ]
}"#;

static SYNTAX: Lazy<DslSyntax> = Lazy::new(|| DslSyntax::from_json(MODEL).expect("fixture model is valid"));

pub fn syntax() -> &'static DslSyntax {
    &SYNTAX
}

/// Concept type id by type name.
pub fn id(type_name: &str) -> ConceptTypeId {
    syntax()
        .by_type_name(type_name)
        .unwrap_or_else(|| panic!("unknown fixture type {}", type_name))
        .id
}

/// A provider initialized with the fixture model at [`ROOT_PATH`].
pub fn provider() -> Arc<ProjectContextProvider> {
    Arc::new(ProjectContextProvider::from_syntax(ROOT_PATH, syntax().clone()))
}

/// Write the fixture model where a project at `root` publishes it.
pub fn write_model(root: &std::path::Path) {
    let path = dsl_analysis::project::ServerConfig::default().syntax_model_file(root);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, MODEL).unwrap();
}
