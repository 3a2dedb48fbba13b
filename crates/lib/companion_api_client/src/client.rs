//! HTTP client for the companion API.

use async_trait::async_trait;
use companion_core::models::{
    Ack, AdminLogin, AdminMe, AdminToken, AuthValidation, ChatRequest, ChatResponse, Event,
    EventCreate, EventItem, EventList, EventUpdate, ItemFilters, Location, MapData, Module,
    ModuleCreate, ModuleReorder, ModuleTypeDefinition, ModuleUpdate, News, Registration,
    RegistrationCheck, RegistrationResult, Speaker, User,
};
use companion_core::store::{ModuleStore, StoreError};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::credential::{Credential, TokenStore};
use crate::error::{ApiError, ApiResult, error_message};

/// Typed client. Holds at most one bearer credential, attached to every
/// request while present.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    credential: Option<Credential>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credential: None,
        }
    }

    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -- plumbing --------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.config.endpoint(path)?;
        log::debug!("{method} {url}");
        let mut builder = self.http.request(method, url);
        if let Some(credential) = &self.credential {
            builder = builder.header(
                reqwest::header::AUTHORIZATION,
                credential.authorization_header(),
            );
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            log::debug!("request failed: {status} {message}");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)?).await
    }

    async fn get_with<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::POST, path)?).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    // -- auth ------------------------------------------------------------

    /// Validate the current credential as attendee init data.
    pub async fn validate_auth(&self) -> ApiResult<AuthValidation> {
        self.post_empty("/auth/validate").await
    }

    pub async fn me(&self) -> ApiResult<User> {
        self.get("/auth/me").await
    }

    /// Log in as admin, keep the token for later requests and persist it.
    pub async fn login(
        &mut self,
        login: &AdminLogin,
        store: &dyn TokenStore,
    ) -> ApiResult<AdminToken> {
        login.validate()?;
        let token: AdminToken = self.post("/admin/login", login).await?;
        let credential = Credential::new(token.access_token.clone()).ok_or_else(|| {
            ApiError::Http {
                status: 500,
                message: "Server returned an empty token".to_string(),
            }
        })?;
        store.save(&credential)?;
        self.set_credential(credential);
        log::debug!("logged in as {}", login.username);
        Ok(token)
    }

    /// Forget the credential locally and in `store`.
    pub fn logout(&mut self, store: &dyn TokenStore) -> ApiResult<()> {
        self.clear_credential();
        store.clear()
    }

    pub async fn admin_me(&self) -> ApiResult<AdminMe> {
        self.get("/admin/me").await
    }

    // -- events ----------------------------------------------------------

    pub async fn events(&self) -> ApiResult<EventList> {
        self.get("/events").await
    }

    pub async fn active_event(&self) -> ApiResult<Event> {
        self.get("/events/active").await
    }

    pub async fn event(&self, event_id: &str) -> ApiResult<Event> {
        self.get(&format!("/events/{event_id}")).await
    }

    /// Enabled modules of an event, as attendees see them.
    pub async fn event_modules(&self, event_id: &str) -> ApiResult<Vec<Module>> {
        self.get(&format!("/events/{event_id}/modules")).await
    }

    pub async fn event_items(
        &self,
        event_id: &str,
        filters: &ItemFilters,
    ) -> ApiResult<Vec<EventItem>> {
        self.get_with(&format!("/events/{event_id}/items"), filters)
            .await
    }

    pub async fn event_days(&self, event_id: &str) -> ApiResult<Vec<String>> {
        self.get(&format!("/events/{event_id}/days")).await
    }

    pub async fn event_types(&self, event_id: &str) -> ApiResult<Vec<String>> {
        self.get(&format!("/events/{event_id}/types")).await
    }

    pub async fn event_speakers(&self, event_id: &str) -> ApiResult<Vec<Speaker>> {
        self.get(&format!("/events/{event_id}/speakers")).await
    }

    pub async fn map_data(&self, event_id: &str) -> ApiResult<MapData> {
        self.get(&format!("/events/{event_id}/map")).await
    }

    pub async fn location(&self, location_id: &str) -> ApiResult<Location> {
        self.get(&format!("/locations/{location_id}")).await
    }

    // -- items and registrations -----------------------------------------

    pub async fn event_item(&self, item_id: &str) -> ApiResult<EventItem> {
        self.get(&format!("/event-items/{item_id}")).await
    }

    pub async fn register(&self, item_id: &str) -> ApiResult<RegistrationResult> {
        self.post_empty(&format!("/event-items/{item_id}/register"))
            .await
    }

    pub async fn cancel_registration(&self, item_id: &str) -> ApiResult<Ack> {
        self.delete(&format!("/event-items/{item_id}/register"))
            .await
    }

    pub async fn my_registrations(&self, event_id: Option<&str>) -> ApiResult<Vec<Registration>> {
        match event_id {
            Some(id) => self.get_with("/registrations/my", &[("event_id", id)]).await,
            None => self.get("/registrations/my").await,
        }
    }

    pub async fn check_registration(&self, item_id: &str) -> ApiResult<RegistrationCheck> {
        self.get(&format!("/registrations/{item_id}/check")).await
    }

    // -- speakers and news -----------------------------------------------

    pub async fn speaker(&self, speaker_id: &str) -> ApiResult<Speaker> {
        self.get(&format!("/speakers/{speaker_id}")).await
    }

    pub async fn event_news(&self, event_id: &str) -> ApiResult<Vec<News>> {
        self.get(&format!("/news/events/{event_id}/news")).await
    }

    pub async fn news(&self, news_id: &str) -> ApiResult<News> {
        self.get(&format!("/news/{news_id}")).await
    }

    // -- assistant -------------------------------------------------------

    pub async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatResponse> {
        self.post("/assistant/chat", request).await
    }

    // -- modules ---------------------------------------------------------

    pub async fn module(&self, module_id: &str) -> ApiResult<Module> {
        self.get(&format!("/modules/{module_id}")).await
    }

    pub async fn create_module(&self, module: &ModuleCreate) -> ApiResult<Module> {
        self.post("/modules", module).await
    }

    pub async fn update_module(&self, module_id: &str, update: &ModuleUpdate) -> ApiResult<Module> {
        self.put(&format!("/modules/{module_id}"), update).await
    }

    pub async fn delete_module(&self, module_id: &str) -> ApiResult<Ack> {
        self.delete(&format!("/modules/{module_id}")).await
    }

    pub async fn reorder_modules(&self, event_id: &str, module_ids: &[String]) -> ApiResult<Ack> {
        let body = ModuleReorder {
            module_ids: module_ids.to_vec(),
        };
        self.put(&format!("/modules/reorder/{event_id}"), &body)
            .await
    }

    // -- admin -----------------------------------------------------------

    pub async fn admin_events(&self) -> ApiResult<EventList> {
        self.get("/admin/events").await
    }

    pub async fn admin_create_event(&self, event: &EventCreate) -> ApiResult<Event> {
        event.validate()?;
        self.post("/admin/events", event).await
    }

    pub async fn admin_update_event(&self, event_id: &str, update: &EventUpdate) -> ApiResult<Event> {
        update.validate()?;
        self.put(&format!("/admin/events/{event_id}"), update).await
    }

    pub async fn admin_delete_event(&self, event_id: &str) -> ApiResult<Ack> {
        self.delete(&format!("/admin/events/{event_id}")).await
    }

    /// All modules of an event, disabled ones included.
    pub async fn admin_event_modules(&self, event_id: &str) -> ApiResult<Vec<Module>> {
        self.get(&format!("/admin/events/{event_id}/modules")).await
    }

    pub async fn admin_module_types(&self) -> ApiResult<Vec<ModuleTypeDefinition>> {
        self.get("/admin/modules/types").await
    }
}

fn store_error(e: ApiError) -> StoreError {
    Box::new(e)
}

#[async_trait]
impl ModuleStore for ApiClient {
    async fn list_modules(&self, event_id: &str) -> Result<Vec<Module>, StoreError> {
        self.admin_event_modules(event_id).await.map_err(store_error)
    }

    async fn create_module(&self, module: &ModuleCreate) -> Result<Module, StoreError> {
        ApiClient::create_module(self, module).await.map_err(store_error)
    }

    async fn update_module(
        &self,
        module_id: &str,
        update: &ModuleUpdate,
    ) -> Result<Module, StoreError> {
        ApiClient::update_module(self, module_id, update)
            .await
            .map_err(store_error)
    }

    async fn delete_module(&self, module_id: &str) -> Result<(), StoreError> {
        ApiClient::delete_module(self, module_id)
            .await
            .map(|_| ())
            .map_err(store_error)
    }

    async fn reorder_modules(
        &self,
        event_id: &str,
        module_ids: &[String],
    ) -> Result<(), StoreError> {
        ApiClient::reorder_modules(self, event_id, module_ids)
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}
