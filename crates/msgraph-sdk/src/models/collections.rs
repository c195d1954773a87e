//! Paged collection responses.

use msgraph_abstractions::Parsable;

use super::{
    DirectoryObject, Drive, DriveItem, Group, User, WorkbookChart, WorkbookTable,
    WorkbookTableColumn, WorkbookTableRow, WorkbookWorksheet,
};

/// A page of a collection, linked to the next page by `@odata.nextLink`.
pub trait CollectionResponse: Parsable {
    type Item: Parsable;

    /// Items on this page; an absent `value` reads as empty.
    fn items(&self) -> Vec<Self::Item>;

    /// URL of the next page, when there is one.
    fn next_link(&self) -> Option<String>;
}

collection_response!(UserCollectionResponse => User);
collection_response!(GroupCollectionResponse => Group);
collection_response!(DirectoryObjectCollectionResponse => DirectoryObject);
collection_response!(DriveCollectionResponse => Drive);
collection_response!(DriveItemCollectionResponse => DriveItem);
collection_response!(WorkbookWorksheetCollectionResponse => WorkbookWorksheet);
collection_response!(WorkbookTableCollectionResponse => WorkbookTable);
collection_response!(WorkbookTableRowCollectionResponse => WorkbookTableRow);
collection_response!(WorkbookTableColumnCollectionResponse => WorkbookTableColumn);
collection_response!(WorkbookChartCollectionResponse => WorkbookChart);

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use msgraph_abstractions::JsonParseNode;
    use serde_json::json;

    #[test]
    fn test_page_with_next_link() {
        let payload = json!({
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users",
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/users?$skiptoken=X",
            "value": [{"id": "u1"}, {"id": "u2"}]
        });
        let page =
            UserCollectionResponse::create_from_discriminator_value(&JsonParseNode::new(&payload)).unwrap();
        let ids: Vec<_> = page.items().iter().filter_map(User::id).collect();
        assert_eq!(ids, vec!["u1".to_string(), "u2".to_string()]);
        assert_eq!(
            page.next_link().as_deref(),
            Some("https://graph.microsoft.com/v1.0/users?$skiptoken=X")
        );
        assert!(page.additional_data().contains_key("@odata.context"));
    }

    #[test]
    fn test_malformed_element_skipped() {
        let payload = json!({
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/users?$skiptoken=Y",
            "value": [{"id": "u1"}, null, "oops", {"id": "u4"}]
        });
        let page =
            UserCollectionResponse::create_from_discriminator_value(&JsonParseNode::new(&payload)).unwrap();
        let ids: Vec<_> = page.items().iter().filter_map(User::id).collect();
        assert_eq!(ids, vec!["u1".to_string(), "u4".to_string()]);
        assert!(page.next_link().is_some());
    }

    #[test]
    fn test_last_page() {
        let payload = json!({"value": [], "@odata.count": 0});
        let page =
            GroupCollectionResponse::create_from_discriminator_value(&JsonParseNode::new(&payload)).unwrap();
        assert!(page.items().is_empty());
        assert!(page.next_link().is_none());
        assert_eq!(page.odata_count(), Some(0));
    }

    #[test]
    fn test_missing_value_is_empty() {
        let payload = json!({});
        let page =
            DriveItemCollectionResponse::create_from_discriminator_value(&JsonParseNode::new(&payload)).unwrap();
        assert!(page.items().is_empty());
    }
}
