use serde::Deserialize;

/// List endpoints answer with a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
    },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Page { results, .. } => results,
            Listing::Plain(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_paginated() {
        let plain: Listing<u32> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2, 3]);

        let page: Listing<u32> =
            serde_json::from_str(r#"{"count":2,"next":null,"previous":null,"results":[7,8]}"#)
                .unwrap();
        assert_eq!(page.into_vec(), vec![7, 8]);
    }
}
