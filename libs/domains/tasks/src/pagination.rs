//! Cursor pagination over an ordered list.
//!
//! A cursor is the base64 encoding of `cursor:<index>`, where `index` is the
//! item's zero-based position in the full list.

use async_graphql::SimpleObject;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;

use crate::error::{TaskError, TaskResult};

const CURSOR_PREFIX: &str = "cursor:";

pub fn encode_cursor(index: usize) -> String {
    STANDARD.encode(format!("{CURSOR_PREFIX}{index}"))
}

pub fn decode_cursor(cursor: &str) -> Option<usize> {
    let bytes = STANDARD.decode(cursor.trim()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.strip_prefix(CURSOR_PREFIX)?.parse().ok()
}

/// Relay-style window arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    pub first: Option<usize>,
    pub after: Option<String>,
    pub last: Option<usize>,
    pub before: Option<String>,
}

impl PageArgs {
    pub fn forward(first: usize, after: Option<String>) -> Self {
        Self {
            first: Some(first),
            after,
            ..Default::default()
        }
    }

    /// Validate raw GraphQL arguments; negative counts are rejected.
    pub fn from_graphql(
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> TaskResult<Self> {
        Ok(Self {
            first: non_negative("first", first)?,
            after,
            last: non_negative("last", last)?,
            before,
        })
    }
}

fn non_negative(name: &str, value: Option<i32>) -> TaskResult<Option<usize>> {
    value
        .map(|v| {
            usize::try_from(v)
                .map_err(|_| TaskError::Validation(format!("{name} must not be negative")))
        })
        .transpose()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    pub total_count: usize,
}

fn resolve_cursor(name: &str, cursor: Option<&str>) -> Option<usize> {
    let cursor = cursor?;
    let index = decode_cursor(cursor);
    if index.is_none() {
        tracing::warn!(argument = name, cursor, "Ignoring undecodable cursor");
    }
    index
}

/// Slice `items` to the window described by `args`.
///
/// `after`/`before` bound the window, then `first` keeps its head and `last`
/// keeps its tail. With neither count the whole window is returned.
pub fn paginate<T>(items: Vec<T>, args: &PageArgs) -> Page<T> {
    let total = items.len();

    let mut start = resolve_cursor("after", args.after.as_deref())
        .map_or(0, |i| i.saturating_add(1))
        .min(total);
    let mut end = resolve_cursor("before", args.before.as_deref())
        .unwrap_or(total)
        .min(total)
        .max(start);

    if let Some(first) = args.first {
        end = end.min(start.saturating_add(first));
    }
    if let Some(last) = args.last {
        start = start.max(end.saturating_sub(last));
    }

    let edges: Vec<Edge<T>> = items
        .into_iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(index, node)| Edge {
            node,
            cursor: encode_cursor(index),
        })
        .collect();

    let page_info = PageInfo {
        has_next_page: end < total,
        has_previous_page: start > 0,
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
    };

    Page {
        edges,
        page_info,
        total_count: total,
    }
}
