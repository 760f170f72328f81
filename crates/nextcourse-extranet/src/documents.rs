//! Document listing endpoints.
//!
//! These are plain authenticated GETs with no selection logic of their own.
//! The document tree endpoint embeds JavaScript icon calls inside what is
//! otherwise JSON; they are scrubbed before parsing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{ExtranetError, ExtranetResult};
use crate::session::ExtranetSession;

const DOCUMENT_TREE_PATH: &str = "/Student/Home/GetDocumentTree";
const DOCUMENTS_PATH: &str = "/Student/Home/GetDocuments";

/// Icon helper calls the server leaves embedded in the tree response.
static ICON_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"X\.net\.RM\.getIcon\("\w+"\)"#).expect("Invalid icon-call regex")
});

impl ExtranetSession {
    /// Fetches the document category tree: category id to label.
    pub fn fetch_document_categories(&mut self) -> ExtranetResult<BTreeMap<String, String>> {
        let no_query: [(&str, &str); 0] = [];
        let body = self.authenticated_get(DOCUMENT_TREE_PATH, &no_query)?;
        let scrubbed = ICON_CALL.replace_all(&body, "\"\"");

        let tree: Value = serde_json::from_str(&scrubbed).map_err(|e| {
            ExtranetError::InvalidResponse(format!("document tree is not valid JSON: {e}"))
        })?;

        let children = tree
            .get("children")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ExtranetError::InvalidResponse(
                    "document tree has no \"children\" array".to_string(),
                )
            })?;

        let mut categories = BTreeMap::new();
        for child in children {
            let (Some(id), Some(text)) = (
                child.get("id").and_then(Value::as_str),
                child.get("text").and_then(Value::as_str),
            ) else {
                continue;
            };
            categories.insert(id.to_string(), text.to_string());
        }

        debug!(count = categories.len(), "fetched document categories");
        Ok(categories)
    }

    /// Fetches one page of documents for a category.
    ///
    /// Parameter names (`document_type`, `page`, `start`, `limit`) follow
    /// the portal's paging contract.
    pub fn fetch_documents(
        &mut self,
        category_id: &str,
        page: u32,
        limit: u32,
    ) -> ExtranetResult<Value> {
        let start = page.saturating_sub(1) * limit;
        let query = [
            ("document_type", category_id.to_string()),
            ("page", page.to_string()),
            ("start", start.to_string()),
            ("limit", limit.to_string()),
        ];
        let body = self.authenticated_get(DOCUMENTS_PATH, &query)?;

        serde_json::from_str(&body).map_err(|e| {
            ExtranetError::InvalidResponse(format!("document listing is not valid JSON: {e}"))
        })
    }
}
