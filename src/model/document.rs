//! Document-level types.

use super::{ContentNode, Element};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// An already-parsed post body: the ordered top-level content nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Top-level nodes in document order
    pub nodes: Vec<ContentNode>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from nodes.
    pub fn from_nodes(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    /// Load a document from a JSON array of nodes.
    ///
    /// # Example
    ///
    /// ```
    /// use unscroll::Document;
    ///
    /// let doc = Document::from_json(r#"[{"tag": "h2", "children": ["Intro"]}, "Body"]"#)?;
    /// assert_eq!(doc.len(), 2);
    /// # Ok::<(), unscroll::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Load a document from a reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Document = serde_json::from_reader(reader)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Load a document from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Serialize the document back to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Get the number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node.
    pub fn push(&mut self, node: impl Into<ContentNode>) {
        self.nodes.push(node.into());
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(ContentNode::text_content)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn validate(&self) -> Result<()> {
        fn check(el: &Element, path: &mut Vec<usize>) -> Result<()> {
            if el.tag.trim().is_empty() {
                let at = path
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join("/");
                return Err(Error::InvalidDocument(format!(
                    "element at {} has an empty tag",
                    at
                )));
            }
            for (i, child) in el.children.iter().enumerate() {
                if let ContentNode::Element(child) = child {
                    path.push(i);
                    check(child, path)?;
                    path.pop();
                }
            }
            Ok(())
        }

        let mut path = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if let ContentNode::Element(el) = node {
                path.push(i);
                check(el, &mut path)?;
                path.pop();
            }
        }
        Ok(())
    }
}

impl FromIterator<ContentNode> for Document {
    fn from_iter<I: IntoIterator<Item = ContentNode>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let doc = Document::from_json(
            r#"[{"tag": "h1", "children": ["Title"]}, "stray text", {"tag": "hr"}]"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.nodes[0].heading_level(), Some(1));
        assert!(doc.nodes[1].is_text());
        assert!(doc.nodes[2].is_hard_break());
    }

    #[test]
    fn test_from_json_not_array() {
        let result = Document::from_json(r#"{"tag": "p"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_from_json_empty_tag() {
        let result = Document::from_json(r#"[{"tag": "p", "children": [{"tag": " "}]}]"#);
        match result {
            Err(Error::InvalidDocument(msg)) => assert!(msg.contains("0/0")),
            other => panic!("Expected InvalidDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_json_roundtrip_shape() {
        let doc: Document = vec![ContentNode::paragraph("a"), ContentNode::hard_break()]
            .into_iter()
            .collect();
        let json = doc.to_json(false).unwrap();
        assert_eq!(json, r#"[{"tag":"p","children":["a"]},{"tag":"hr"}]"#);
    }
}
