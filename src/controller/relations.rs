//! Relation draining for one-to-many sub-collections
//!
//! A parent record (team, user, role, inventory) resolves its related
//! collection by fetching page 1 to learn the count, consuming that page's
//! results, then walking the remaining pages sequentially. Page and
//! in-page order is preserved; a parent with zero related items yields an
//! empty list without any extra fetch.

use serde_json::Value;

use crate::error::{AuditError, Result};

use super::paging::relation_pages_needed;
use super::ControllerClient;

impl ControllerClient {
    /// Drain all pages of a relation endpoint, projecting each item
    ///
    /// `project` returns `None` when an item is missing the projection
    /// key, which is a malformed-response error for the current resource.
    pub async fn resolve_relation<T, F>(
        &self,
        path: &str,
        page_size: u32,
        context: &str,
        mut project: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&Value) -> Option<T>,
    {
        let first = self.get_page(path, 1, page_size, context).await?;
        let total = first.total_count(context)?;
        let pages = relation_pages_needed(total, page_size);
        if pages == 0 {
            return Ok(Vec::new());
        }

        // The reported count drives page arithmetic only; it is not
        // trusted for allocation sizing.
        let mut resolved = Vec::new();
        Self::project_page(&first.results, context, &mut project, &mut resolved)?;

        for page in 2..=pages {
            let next = self.get_page(path, page, page_size, context).await?;
            Self::project_page(&next.results, context, &mut project, &mut resolved)?;
        }

        Ok(resolved)
    }

    fn project_page<T, F>(
        results: &[Value],
        context: &str,
        project: &mut F,
        resolved: &mut Vec<T>,
    ) -> Result<()>
    where
        F: FnMut(&Value) -> Option<T>,
    {
        for item in results {
            let value = project(item).ok_or_else(|| {
                AuditError::Malformed(format!("{}: related item missing projection field", context))
            })?;
            resolved.push(value);
        }
        Ok(())
    }

    /// Resolve a relation to a list of string fields, e.g. `name` or `username`
    pub async fn resolve_related_names(
        &self,
        path: &str,
        key: &str,
        page_size: u32,
        context: &str,
    ) -> Result<Vec<String>> {
        self.resolve_relation(path, page_size, context, |item| {
            item.get(key).and_then(Value::as_str).map(str::to_string)
        })
        .await
    }

    /// Resolve a relation to `(field, field)` string pairs, e.g. credential
    /// `(name, kind)` tuples
    pub async fn resolve_related_pairs(
        &self,
        path: &str,
        keys: (&str, &str),
        page_size: u32,
        context: &str,
    ) -> Result<Vec<(String, String)>> {
        self.resolve_relation(path, page_size, context, |item| {
            let first = item.get(keys.0).and_then(Value::as_str)?;
            let second = item.get(keys.1).and_then(Value::as_str)?;
            Some((first.to_string(), second.to_string()))
        })
        .await
    }
}
