//! Category API operations.

use serde_json::{json, Value};
use timetable_core::timetable::{
    parse_category_items, parse_category_page, CategoryItem, CategoryPage, CategoryType,
};
use uuid::Uuid;

use super::ScientiaClient;
use crate::error::{ClientError, Result};

/// Request body selecting items of one category type by identity.
pub(crate) fn identities_body(category_type: CategoryType, identities: &[Uuid]) -> Value {
    json!({
        "CategoryTypeIdentity": category_type.identity(),
        "CategoryIdentities": identities,
    })
}

impl ScientiaClient {
    /// Fetch one page (1-based) of a category listing.
    ///
    /// Upstream always serves 20 items per page. A blank query lists everything.
    pub async fn get_category_page(
        &self,
        category_type: CategoryType,
        page: u32,
        query: Option<&str>,
    ) -> Result<CategoryPage> {
        let path = format!(
            "CategoryTypes/{}/Categories/FilterWithCache/{}",
            category_type.identity(),
            self.institution_id
        );
        let params = [
            ("pageNumber", page.to_string()),
            ("query", query.map(str::trim).unwrap_or_default().to_string()),
        ];

        let value = self.send(&path, &params, None).await?;
        parse_category_page(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Fetch the items with the given identities.
    pub async fn get_category_items(
        &self,
        category_type: CategoryType,
        identities: &[Uuid],
    ) -> Result<Vec<CategoryItem>> {
        let path = format!("CategoryTypes/Categories/Filter/{}", self.institution_id);
        let body = json!({
            "CategoryTypesWithIdentities": [identities_body(category_type, identities)],
        });

        let value = self.send(&path, &[], Some(&body)).await?;
        parse_category_items(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use mockito::{Matcher, Server};
    use timetable_core::retry::RetryPolicy;

    const INSTITUTION: &str = "a1fdee6b-68eb-47b8-b2ac-a4c60c8e6177";

    #[tokio::test]
    async fn test_get_category_page() {
        let mut server = Server::new_async().await;
        let path = format!(
            "/CategoryTypes/525fe79b-73c3-4b5c-8186-83c652b3adcc/Categories/FilterWithCache/{}",
            INSTITUTION
        );
        let mock = server
            .mock("POST", path.as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pageNumber".into(), "2".into()),
                Matcher::UrlEncoded("query".into(), "CSC1003".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "TotalPages": 3,
                    "Count": 41,
                    "Results": [{
                        "Identity": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                        "Name": "CSC1003[1] Computer Programming I",
                        "CategoryTypeIdentity": "525fe79b-73c3-4b5c-8186-83c652b3adcc",
                    }],
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server.url(), RetryPolicy::none());
        let page = client
            .get_category_page(CategoryType::Modules, 2, Some("  CSC1003 "))
            .await
            .unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.count, 41);
        assert_eq!(page.results[0].code, "CSC1003[1]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_category_page_without_query_sends_empty_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .match_query(Matcher::UrlEncoded("query".into(), "".into()))
            .with_status(200)
            .with_body(r#"{"TotalPages": 1, "Count": 0, "Results": []}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), RetryPolicy::none());
        let page = client
            .get_category_page(CategoryType::Locations, 1, None)
            .await
            .unwrap();

        assert!(page.results.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_category_items_posts_identities() {
        let mut server = Server::new_async().await;
        let identity = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
        let mock = server
            .mock(
                "POST",
                format!("/CategoryTypes/Categories/Filter/{}", INSTITUTION).as_str(),
            )
            .match_body(Matcher::Json(json!({
                "CategoryTypesWithIdentities": [{
                    "CategoryTypeIdentity": "241e4d36-60e0-49f8-b27e-99416745d98d",
                    "CategoryIdentities": ["6ba7b810-9dad-11d1-80b4-00c04fd430c8"],
                }],
            })))
            .with_status(200)
            .with_body(
                json!([{
                    "Identity": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                    "Name": "COMSCI1",
                    "Description": "BSc in Computer Science",
                    "CategoryTypeIdentity": "241e4d36-60e0-49f8-b27e-99416745d98d",
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server.url(), RetryPolicy::none());
        let items = client
            .get_category_items(CategoryType::ProgrammesOfStudy, &[identity])
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].identity, identity);
        assert_eq!(items[0].code, "COMSCI1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_category_items_malformed_payload() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), RetryPolicy::none());
        let result = client
            .get_category_items(CategoryType::Modules, &[Uuid::new_v4()])
            .await;

        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    }
}
