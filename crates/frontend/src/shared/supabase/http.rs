use contracts::shared::database_error::DatabaseError;
use contracts::system::auth::AuthUser;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use super::SupabaseClient;
use crate::shared::api_utils::{
    auth_url, decode_error, eq_filter, http_error, network_error, rest_url, storage_object_url,
    storage_public_url,
};

impl SupabaseClient {
    fn authorized(&self, builder: RequestBuilder, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", self.anon_key())
            .header("Authorization", &format!("Bearer {}", bearer))
    }

    /// `GET /rest/v1/<table>` newest first
    pub async fn select_newest_first<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        operation: &str,
    ) -> Result<Vec<T>, DatabaseError> {
        let url = rest_url(
            self.base_url(),
            table,
            &[("select", columns), ("order", "created_at.desc")],
        );
        let request = self
            .authorized(Request::get(&url), &self.bearer_token())
            .build()
            .map_err(|e| builder_error(operation, e))?;

        let response = send(request, operation).await?;
        // An empty body means an empty table
        let rows: Option<Vec<T>> = read_json(response, operation).await?;
        Ok(rows.unwrap_or_default())
    }

    /// `POST /rest/v1/<table>` without reading the row back
    pub async fn insert_row<B: Serialize>(
        &self,
        table: &str,
        row: &B,
        operation: &str,
    ) -> Result<(), DatabaseError> {
        let url = rest_url(self.base_url(), table, &[]);
        let request = self
            .authorized(Request::post(&url), &self.bearer_token())
            .header("Prefer", "return=minimal")
            .json(row)
            .map_err(|e| builder_error(operation, e))?;

        send(request, operation).await.map(|_| ())
    }

    /// `PATCH /rest/v1/<table>?id=eq.<id>`
    pub async fn update_row<B: Serialize>(
        &self,
        table: &str,
        id: &str,
        changes: &B,
        operation: &str,
    ) -> Result<(), DatabaseError> {
        let url = rest_url(self.base_url(), table, &[("id", &eq_filter(id))]);
        let request = self
            .authorized(Request::patch(&url), &self.bearer_token())
            .header("Prefer", "return=minimal")
            .json(changes)
            .map_err(|e| builder_error(operation, e))?;

        send(request, operation).await.map(|_| ())
    }

    /// `DELETE /rest/v1/<table>?id=eq.<id>`
    pub async fn delete_row(&self, table: &str, id: &str, operation: &str) -> Result<(), DatabaseError> {
        let url = rest_url(self.base_url(), table, &[("id", &eq_filter(id))]);
        let request = self
            .authorized(Request::delete(&url), &self.bearer_token())
            .build()
            .map_err(|e| builder_error(operation, e))?;

        send(request, operation).await.map(|_| ())
    }

    /// Store an object and return its public URL
    pub async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        body: JsValue,
        content_type: &str,
        operation: &str,
    ) -> Result<String, DatabaseError> {
        let url = storage_object_url(self.base_url(), bucket, object);
        let request = self
            .authorized(Request::post(&url), &self.bearer_token())
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(body)
            .map_err(|e| builder_error(operation, e))?;

        send(request, operation).await?;
        Ok(storage_public_url(self.base_url(), bucket, object))
    }

    /// `POST /auth/v1/<path>` authorised with the anon key
    pub async fn auth_post<B, T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
        operation: &str,
    ) -> Result<T, DatabaseError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = auth_url(self.base_url(), path, query);
        let request = self
            .authorized(Request::post(&url), self.anon_key())
            .json(body)
            .map_err(|e| builder_error(operation, e))?;

        let response = send(request, operation).await?;
        read_json::<T>(response, operation)
            .await?
            .ok_or_else(|| decode_error(operation))
    }

    /// `POST /auth/v1/logout` for the given access token
    pub async fn auth_logout(&self, access_token: &str, operation: &str) -> Result<(), DatabaseError> {
        let url = auth_url(self.base_url(), "logout", &[]);
        let request = self
            .authorized(Request::post(&url), access_token)
            .build()
            .map_err(|e| builder_error(operation, e))?;

        send(request, operation).await.map(|_| ())
    }

    /// `GET /auth/v1/user` for the given access token
    pub async fn auth_user(&self, access_token: &str, operation: &str) -> Result<AuthUser, DatabaseError> {
        let url = auth_url(self.base_url(), "user", &[]);
        let request = self
            .authorized(Request::get(&url), access_token)
            .build()
            .map_err(|e| builder_error(operation, e))?;

        let response = send(request, operation).await?;
        read_json::<AuthUser>(response, operation)
            .await?
            .ok_or_else(|| decode_error(operation))
    }
}

async fn send(request: Request, operation: &str) -> Result<Response, DatabaseError> {
    let response = request.send().await.map_err(|e| {
        log::warn!("{}: transport failure: {}", operation, e);
        network_error(operation)
    })?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = http_error(operation, status, &body);
    log::warn!(
        "{}: HTTP {} code={} message={}",
        operation,
        status,
        error.code.as_deref().unwrap_or("-"),
        error.message
    );
    Err(error)
}

/// Decode a JSON body; a blank body yields `None`
async fn read_json<T: DeserializeOwned>(
    response: Response,
    operation: &str,
) -> Result<Option<T>, DatabaseError> {
    let text = response.text().await.map_err(|e| {
        log::warn!("{}: body unreadable: {}", operation, e);
        network_error(operation)
    })?;

    if text.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<T>(&text).map(Some).map_err(|e| {
        log::warn!("{}: unexpected body: {}", operation, e);
        decode_error(operation)
    })
}

fn builder_error(operation: &str, e: gloo_net::Error) -> DatabaseError {
    log::warn!("{}: request could not be built: {}", operation, e);
    network_error(operation)
}
