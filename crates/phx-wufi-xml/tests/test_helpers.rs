#![allow(dead_code)]

use std::path::PathBuf;

use phx::{AssemblyOptions, PhxProject};

/// Source models shared with the `phx` crate's tests.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("phx")
        .join("tests")
        .join("data")
        .join(name)
}

pub fn assemble(name: &str) -> PhxProject {
    let path = fixture_path(name);
    let model = phx::read_hbjson_file(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    phx::convert_hbjson_model(&model, &AssemblyOptions::default()).expect("Assembly failed")
}

pub fn child<'a, 'i>(node: roxmltree::Node<'a, 'i>, name: &str) -> roxmltree::Node<'a, 'i> {
    node.children()
        .find(|c| c.has_tag_name(name))
        .unwrap_or_else(|| panic!("<{}> has no <{name}>", node.tag_name().name()))
}

/// Follow a `/`-separated chain of child element names.
pub fn path<'a, 'i>(node: roxmltree::Node<'a, 'i>, chain: &str) -> roxmltree::Node<'a, 'i> {
    chain.split('/').fold(node, |n, name| child(n, name))
}

pub fn elements<'a, 'i>(node: roxmltree::Node<'a, 'i>) -> Vec<roxmltree::Node<'a, 'i>> {
    node.children().filter(|c| c.is_element()).collect()
}

pub fn text<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> &'a str {
    child(node, name).text().unwrap_or("")
}
