//! HTML loading for the Pinpoint selector engine.
//!
//! # Scope
//!
//! Parses HTML with html5ever's reference `RcDom` and converts the result into
//! a [`pinpoint_dom::DomTree`]. Converting avoids implementing `TreeSink`
//! directly while still giving the engine a tree built by a standards-compliant
//! parser (implicit `<html>`/`<head>`/`<body>`, foster parenting, etc.).
//!
//! # Not Converted
//!
//! - Doctype and processing-instruction nodes
//! - Whitespace-only text nodes
//! - `<template>` contents (they live outside the main tree)

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use html5ever::{ParseOpts, parse_document};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use pinpoint_dom::{Attributes, DomTree, ElementData, NodeId};
use thiserror::Error;

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the input file.
    #[error("failed to read '{}'", path.display())]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The byte stream failed while being fed to the parser.
    #[error("failed to parse HTML input")]
    Parse(#[source] io::Error),
}

/// Parse an HTML string into a DOM tree.
///
/// HTML parsing never fails on text input: malformed markup is repaired the
/// way a browser would repair it.
#[must_use]
pub fn parse_html(html: &str) -> DomTree {
    tracing::debug!(bytes = html.len(), "parsing HTML document");
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    convert(&dom)
}

/// Parse HTML from a byte stream (decoded as UTF-8).
///
/// # Errors
///
/// Returns [`LoadError::Parse`] when reading from `reader` fails.
pub fn parse_reader(reader: &mut impl Read) -> Result<DomTree, LoadError> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(reader)
        .map_err(LoadError::Parse)?;
    Ok(convert(&dom))
}

/// Read and parse an HTML file.
///
/// # Errors
///
/// Returns [`LoadError::Read`] when the file cannot be opened and
/// [`LoadError::Parse`] when reading its contents fails midway.
pub fn load_file(path: impl AsRef<Path>) -> Result<DomTree, LoadError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading HTML file");
    let mut file = fs::File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(&mut file)
}

fn convert(dom: &RcDom) -> DomTree {
    let mut tree = DomTree::new();
    convert_node(&dom.document, &mut tree, NodeId::ROOT);
    tracing::debug!(nodes = tree.len(), "converted HTML document");
    tree
}

/// Convert an RcDom node (and its subtree) into `tree` under `parent`.
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow();
            if !text.trim().is_empty() {
                let id = tree.create_text(text.to_string());
                tree.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(contents.to_string());
            tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let attrs: Attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let id = tree.create_element(ElementData {
                tag_name: name.local.to_string(),
                attrs,
            });
            tree.append_child(parent, id);

            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
    }
}
