use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Page size for bulk reads. The store truncates larger requests, so every
/// bulk query pages with a cursor until a short page comes back.
pub const PAGE_SIZE: usize = 100;

/// Settings for the hosted document store, read from the environment at
/// startup.
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub reminders_collection: String,
    pub destinations_collection: String,
    pub medications_collection: String,
}

impl DocumentStoreConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: require_env("APPWRITE_ENDPOINT"),
            project_id: require_env("APPWRITE_PROJECT_ID"),
            api_key: require_env("APPWRITE_API_KEY"),
            database_id: require_env("DATABASE_ID"),
            reminders_collection: require_env("COLLECTION_REMINDERS"),
            destinations_collection: require_env("COLLECTION_TOKENS"),
            medications_collection: require_env("COLLECTION_MEDICINES"),
        }
    }
}

fn require_env(var: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| panic!("{} env var to be present.", var))
}

/// One filter / modifier of a document list query, serialized to the store's
/// JSON query strings.
#[derive(Debug, Clone)]
pub enum Query {
    Equal(&'static str, Vec<Value>),
    GreaterThan(&'static str, Value),
    GreaterThanEqual(&'static str, Value),
    LessThanEqual(&'static str, Value),
    And(Vec<Query>),
    Or(Vec<Query>),
    Limit(usize),
    CursorAfter(String),
}

impl Query {
    pub fn equal<V: Into<Value>>(attribute: &'static str, value: V) -> Self {
        Query::Equal(attribute, vec![value.into()])
    }

    /// Matches documents whose attribute equals any of the given values
    pub fn equal_any<V: Into<Value>>(attribute: &'static str, values: Vec<V>) -> Self {
        Query::Equal(attribute, values.into_iter().map(Into::into).collect())
    }

    pub fn greater_than<V: Into<Value>>(attribute: &'static str, value: V) -> Self {
        Query::GreaterThan(attribute, value.into())
    }

    pub fn greater_than_equal<V: Into<Value>>(attribute: &'static str, value: V) -> Self {
        Query::GreaterThanEqual(attribute, value.into())
    }

    pub fn less_than_equal<V: Into<Value>>(attribute: &'static str, value: V) -> Self {
        Query::LessThanEqual(attribute, value.into())
    }

    pub fn and(queries: Vec<Query>) -> Self {
        Query::And(queries)
    }

    pub fn or(queries: Vec<Query>) -> Self {
        Query::Or(queries)
    }

    pub fn limit(limit: usize) -> Self {
        Query::Limit(limit)
    }

    pub fn cursor_after(document_id: String) -> Self {
        Query::CursorAfter(document_id)
    }

    fn to_json(&self) -> Value {
        match self {
            Query::Equal(attribute, values) => {
                json!({ "method": "equal", "attribute": attribute, "values": values })
            }
            Query::GreaterThan(attribute, value) => {
                json!({ "method": "greaterThan", "attribute": attribute, "values": [value] })
            }
            Query::GreaterThanEqual(attribute, value) => {
                json!({ "method": "greaterThanEqual", "attribute": attribute, "values": [value] })
            }
            Query::LessThanEqual(attribute, value) => {
                json!({ "method": "lessThanEqual", "attribute": attribute, "values": [value] })
            }
            Query::And(queries) => {
                json!({ "method": "and", "values": queries.iter().map(Query::to_json).collect::<Vec<_>>() })
            }
            Query::Or(queries) => {
                json!({ "method": "or", "values": queries.iter().map(Query::to_json).collect::<Vec<_>>() })
            }
            Query::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
            Query::CursorAfter(document_id) => {
                json!({ "method": "cursorAfter", "values": [document_id] })
            }
        }
    }

    pub fn to_query_string(&self) -> String {
        self.to_json().to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    pub total: i64,
    pub documents: Vec<T>,
}

/// Thin client for the hosted document store's REST API. Collection level
/// repositories compose it with their raw document types.
pub struct DocumentClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
}

impl DocumentClient {
    pub fn new(config: &DocumentStoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
        }
    }

    fn collection_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn document_url(&self, collection_id: &str, document_id: &str) -> String {
        format!("{}/{}", self.collection_url(collection_id), document_id)
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> anyhow::Result<DocumentList<T>> {
        let params = queries
            .iter()
            .map(|q| ("queries[]".to_string(), q.to_query_string()))
            .collect::<Vec<_>>();
        let res = self
            .auth(self.http.get(&self.collection_url(collection_id)))
            .query(&params)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!(
                "Listing documents in collection {} failed with status {}: {}",
                collection_id,
                status,
                res.text().await.unwrap_or_default()
            );
        }
        Ok(res.json().await?)
    }

    /// Lists every document matching the filters, following the page cursor
    /// so results beyond a single page are never silently dropped.
    pub async fn list_all<T, F>(
        &self,
        collection_id: &str,
        filters: &[Query],
        document_id_of: F,
    ) -> anyhow::Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> String,
    {
        let mut documents = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut queries = filters.to_vec();
            queries.push(Query::limit(PAGE_SIZE));
            if let Some(cursor) = cursor.take() {
                queries.push(Query::cursor_after(cursor));
            }

            let page: DocumentList<T> = self.list(collection_id, &queries).await?;
            let page_len = page.documents.len();
            cursor = page.documents.last().map(&document_id_of);
            documents.extend(page.documents);

            if page_len < PAGE_SIZE {
                return Ok(documents);
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> anyhow::Result<Option<T>> {
        let res = self
            .auth(self.http.get(&self.document_url(collection_id, document_id)))
            .send()
            .await?;
        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            anyhow::bail!(
                "Fetching document {} from collection {} failed with status {}",
                document_id,
                collection_id,
                status
            );
        }
        Ok(Some(res.json().await?))
    }

    pub async fn create(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> anyhow::Result<()> {
        let res = self
            .auth(self.http.post(&self.collection_url(collection_id)))
            .json(&json!({ "documentId": document_id, "data": data }))
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!(
                "Creating document {} in collection {} failed with status {}: {}",
                document_id,
                collection_id,
                status,
                res.text().await.unwrap_or_default()
            );
        }
        Ok(())
    }

    /// Partial update: only the attributes present in `data` change.
    pub async fn update(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> anyhow::Result<()> {
        let res = self
            .auth(self.http.patch(&self.document_url(collection_id, document_id)))
            .json(&json!({ "data": data }))
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!(
                "Updating document {} in collection {} failed with status {}: {}",
                document_id,
                collection_id,
                status,
                res.text().await.unwrap_or_default()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_serializes_filter_queries() {
        assert_eq!(
            Query::equal("taken", false).to_query_string(),
            r#"{"attribute":"taken","method":"equal","values":[false]}"#
        );
        assert_eq!(
            Query::greater_than("totalRemindersLeft", 0).to_query_string(),
            r#"{"attribute":"totalRemindersLeft","method":"greaterThan","values":[0]}"#
        );
    }

    #[test]
    fn it_serializes_composed_queries() {
        let query = Query::or(vec![
            Query::and(vec![
                Query::equal("taken", false),
                Query::equal("notificationSend", false),
            ]),
            Query::and(vec![
                Query::equal("repeatSchedule", true),
                Query::greater_than("totalRemindersLeft", 0),
            ]),
        ]);
        let json = query.to_query_string();
        assert!(json.starts_with(r#"{"method":"or""#));
        assert!(json.contains(r#""method":"and""#));
        assert!(json.contains(r#""attribute":"repeatSchedule""#));
    }

    #[test]
    fn it_serializes_pagination_queries() {
        assert_eq!(
            Query::limit(100).to_query_string(),
            r#"{"method":"limit","values":[100]}"#
        );
        assert_eq!(
            Query::cursor_after("abc".into()).to_query_string(),
            r#"{"method":"cursorAfter","values":["abc"]}"#
        );
    }
}
