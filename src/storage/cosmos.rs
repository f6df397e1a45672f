use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use super::gateway::StarshipRepository;
use super::protocol::{COSMOS_API_VERSION, ContainerProperties, DocumentPage, SqlQuery};
use crate::model::types::{Franchise, Starship};
use crate::provisioning::provisioner::ProvisioningStore;

type HmacSha256 = Hmac<Sha256>;

/// Name of the single container holding starship documents.
pub const CONTAINER_NAME: &str = "starships";

/// Thin client for the Cosmos DB REST API.
///
/// Each request carries a master-key authorization token: HMAC-SHA256 over
/// `{verb}\n{resource_type}\n{resource_link}\n{date}\n\n` with the
/// base64-decoded account key. Only the operations this service needs are
/// implemented.
#[derive(Debug)]
pub struct CosmosClient {
    http: reqwest::Client,
    endpoint: String,
    mac: HmacSha256,
}

impl CosmosClient {
    pub fn new(endpoint: &str, master_key: &str) -> Result<Self> {
        let key = STANDARD
            .decode(master_key)
            .context("Cosmos master key is not valid base64")?;
        let mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| anyhow!("Cosmos master key rejected: {}", e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            mac,
        })
    }

    pub(crate) fn auth_token(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> String {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type,
            resource_link,
            date.to_lowercase()
        );

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        urlencoding::encode(&format!("type=master&ver=1.0&sig={}", signature)).into_owned()
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        resource_type: &str,
        resource_link: &str,
    ) -> reqwest::RequestBuilder {
        let date = rfc1123_date();
        let token = self.auth_token(method.as_str(), resource_type, resource_link, &date);

        self.http
            .request(method, format!("{}{}", self.endpoint, path))
            .header("authorization", token)
            .header("x-ms-date", date)
            .header("x-ms-version", COSMOS_API_VERSION)
    }

    /// Read-then-create for the database. Returns the raw status code the
    /// caller inspects: 200 means the database already existed, 201 means it
    /// was just created, anything else is surfaced untouched.
    pub async fn create_database_if_not_exists(&self, database: &str) -> Result<u16> {
        let link = format!("dbs/{}", database);
        let read = self
            .request(Method::GET, &format!("/dbs/{}", database), "dbs", &link)
            .send()
            .await
            .with_context(|| format!("reading database {}", database))?;

        let status = read.status().as_u16();
        if status != 404 {
            return Ok(status);
        }

        let create = self
            .request(Method::POST, "/dbs", "dbs", "")
            .json(&serde_json::json!({ "id": database }))
            .send()
            .await
            .with_context(|| format!("creating database {}", database))?;

        Ok(create.status().as_u16())
    }

    /// Read-then-create for a container, with autoscaled throughput on the
    /// create path. Same status contract as the database variant.
    pub async fn create_container_if_not_exists(
        &self,
        database: &str,
        properties: &ContainerProperties,
        max_throughput: u32,
    ) -> Result<u16> {
        let link = format!("dbs/{}/colls/{}", database, properties.id);
        let read = self
            .request(
                Method::GET,
                &format!("/dbs/{}/colls/{}", database, properties.id),
                "colls",
                &link,
            )
            .send()
            .await
            .with_context(|| format!("reading container {}", properties.id))?;

        let status = read.status().as_u16();
        if status != 404 {
            return Ok(status);
        }

        let parent_link = format!("dbs/{}", database);
        let create = self
            .request(
                Method::POST,
                &format!("/dbs/{}/colls", database),
                "colls",
                &parent_link,
            )
            .header(
                "x-ms-cosmos-offer-autopilot-settings",
                format!("{{\"maxThroughput\":{}}}", max_throughput),
            )
            .json(properties)
            .send()
            .await
            .with_context(|| format!("creating container {}", properties.id))?;

        Ok(create.status().as_u16())
    }

    /// Runs a cross-partition SQL query against a container, following
    /// `x-ms-continuation` tokens until the feed is exhausted.
    pub async fn query_documents<T: DeserializeOwned>(
        &self,
        database: &str,
        container: &str,
        query: &SqlQuery,
    ) -> Result<Vec<T>> {
        let link = format!("dbs/{}/colls/{}", database, container);
        let path = format!("/dbs/{}/colls/{}/docs", database, container);
        let body = serde_json::to_vec(query)?;

        let mut documents = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::POST, &path, "docs", &link)
                .header("content-type", "application/query+json")
                .header("x-ms-documentdb-isquery", "True")
                .header("x-ms-documentdb-query-enablecrosspartition", "True")
                .body(body.clone());

            if let Some(token) = &continuation {
                request = request.header("x-ms-continuation", token.clone());
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("querying container {}", container))?;

            if !response.status().is_success() {
                return Err(anyhow!(
                    "query on container {} failed with status {}",
                    container,
                    response.status()
                ));
            }

            continuation = response
                .headers()
                .get("x-ms-continuation")
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string());

            let page: DocumentPage<T> = response.json().await?;
            documents.extend(page.documents);

            if continuation.is_none() {
                break;
            }
        }

        Ok(documents)
    }

    /// Upserts a document into a container under the given partition key
    /// value and returns the stored document as the server echoes it.
    pub async fn upsert_document<T>(
        &self,
        database: &str,
        container: &str,
        document: &T,
        partition_key: &str,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let link = format!("dbs/{}/colls/{}", database, container);
        let path = format!("/dbs/{}/colls/{}/docs", database, container);

        let response = self
            .request(Method::POST, &path, "docs", &link)
            .header("x-ms-documentdb-is-upsert", "True")
            .header(
                "x-ms-documentdb-partitionkey",
                format!("[\"{}\"]", partition_key),
            )
            .json(document)
            .send()
            .await
            .with_context(|| format!("upserting into container {}", container))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "upsert into container {} failed with status {}",
                container,
                response.status()
            ));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProvisioningStore for CosmosClient {
    async fn create_database_if_not_exists(&self, database: &str) -> Result<u16> {
        CosmosClient::create_database_if_not_exists(self, database).await
    }

    async fn create_container_if_not_exists(
        &self,
        database: &str,
        properties: &ContainerProperties,
        max_throughput: u32,
    ) -> Result<u16> {
        CosmosClient::create_container_if_not_exists(self, database, properties, max_throughput)
            .await
    }
}

/// Current UTC time in the RFC 1123 form Cosmos expects in `x-ms-date`.
pub(crate) fn rfc1123_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Cosmos-backed implementation of the persistence gateway, bound to one
/// database and the `starships` container.
pub struct CosmosStarshipRepository {
    client: Arc<CosmosClient>,
    database: String,
}

impl CosmosStarshipRepository {
    pub fn new(client: Arc<CosmosClient>, database: String) -> Self {
        Self { client, database }
    }
}

#[async_trait]
impl StarshipRepository for CosmosStarshipRepository {
    async fn find_all(&self) -> Result<Vec<Starship>> {
        let query = SqlQuery::new("SELECT * FROM c");
        self.client
            .query_documents(&self.database, CONTAINER_NAME, &query)
            .await
    }

    async fn find_all_by_franchise(&self, franchise: Franchise) -> Result<Vec<Starship>> {
        let query = SqlQuery::new("SELECT * FROM c WHERE c.franchise = @franchise")
            .with_parameter("@franchise", serde_json::json!(franchise));
        self.client
            .query_documents(&self.database, CONTAINER_NAME, &query)
            .await
    }

    async fn save(&self, mut starship: Starship) -> Result<Starship> {
        if starship.id.is_none() {
            starship.id = Some(Uuid::new_v4().to_string());
        }

        let partition_key = starship.franchise.to_string();
        self.client
            .upsert_document(&self.database, CONTAINER_NAME, &starship, &partition_key)
            .await
    }
}
