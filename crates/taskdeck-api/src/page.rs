//! Spring-style page metadata for paginated listings.

use serde::{Deserialize, Serialize};

/// One page of a larger ordered result set.
///
/// `number` is the 0-based page index. The backend guarantees
/// `content.len() <= size` and, when the result is non-empty,
/// `number < total_pages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_page_metadata() {
        let json = r#"{
            "content": ["a", "b"],
            "totalPages": 3,
            "totalElements": 25,
            "size": 10,
            "number": 1,
            "first": false,
            "last": false,
            "empty": false
        }"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec!["a", "b"]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.number, 1);
        assert!(!page.first && !page.last && !page.empty);
        assert!(page.content.len() <= page.size as usize);
    }
}
