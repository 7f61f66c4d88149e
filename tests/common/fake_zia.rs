//! Fake ZIA API client for testing
//!
//! An in-memory implementation of [`ZiaApi`] that records every call, so
//! tests can assert on the exact sequence of operations.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use zia_probe::zia::{ApiError, NewUrlCategory, UrlCategory, User, ZiaApi};

use crate::common::fixtures;

/// A call made against the fake client.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
  ListUsers,
  ListUrlCategories,
  AddUrlCategory(NewUrlCategory),
  DeleteUrlCategory(String),
}

/// A fake ZIA client backed by in-memory users and categories
pub struct FakeZiaClient {
  users: Vec<User>,
  categories: Mutex<Vec<UrlCategory>>,
  calls: Mutex<Vec<Call>>,
  next_custom_id: Mutex<u32>,
  fail_users: bool,
  fail_delete: bool,
  fail_create: bool,
}

impl FakeZiaClient {
  /// Create a fake client with no users or categories
  pub fn new() -> Self {
    Self {
      users: Vec::new(),
      categories: Mutex::new(Vec::new()),
      calls: Mutex::new(Vec::new()),
      next_custom_id: Mutex::new(10),
      fail_users: false,
      fail_delete: false,
      fail_create: false,
    }
  }

  /// Create a fake client seeded with sample users and categories
  pub fn with_categories(categories: serde_json::Value) -> Self {
    let mut client = Self::new();
    client.users = serde_json::from_value(fixtures::sample_users_response()).expect("valid users fixture");
    client.categories = Mutex::new(serde_json::from_value(categories).expect("valid categories fixture"));
    client
  }

  /// Make `list_users` fail with a 401
  pub fn failing_users(mut self) -> Self {
    self.fail_users = true;
    self
  }

  /// Make `delete_url_category` fail with a 403
  pub fn failing_delete(mut self) -> Self {
    self.fail_delete = true;
    self
  }

  /// Make `add_url_category` fail with a 409 carrying a JSON body
  pub fn failing_create(mut self) -> Self {
    self.fail_create = true;
    self
  }

  /// Every call made so far, in order
  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().unwrap().clone()
  }

  /// Current categories
  pub fn categories(&self) -> Vec<UrlCategory> {
    self.categories.lock().unwrap().clone()
  }

  fn record(&self, call: Call) {
    self.calls.lock().unwrap().push(call);
  }
}

impl Default for FakeZiaClient {
  fn default() -> Self {
    Self::new()
  }
}

fn api_error(status: u16, method: &str, path: &str, body: String) -> anyhow::Error {
  ApiError {
    status,
    method: method.to_string(),
    path: path.to_string(),
    body,
  }
  .into()
}

#[async_trait]
impl ZiaApi for FakeZiaClient {
  async fn list_users(&self) -> Result<Vec<User>> {
    self.record(Call::ListUsers);
    if self.fail_users {
      return Err(api_error(401, "GET", "/users", "{\"code\":\"NOT_AUTHENTICATED\"}".to_string()));
    }
    Ok(self.users.clone())
  }

  async fn list_url_categories(&self) -> Result<Vec<UrlCategory>> {
    self.record(Call::ListUrlCategories);
    Ok(self.categories())
  }

  async fn add_url_category(&self, payload: &NewUrlCategory) -> Result<UrlCategory> {
    self.record(Call::AddUrlCategory(payload.clone()));
    if self.fail_create {
      return Err(api_error(
        409,
        "POST",
        "/urlCategories",
        fixtures::duplicate_item_error().to_string(),
      ));
    }

    let id = {
      let mut next = self.next_custom_id.lock().unwrap();
      *next += 1;
      let number = *next;
      format!("CUSTOM_{number:02}")
    };

    let created: UrlCategory = serde_json::from_value(serde_json::json!({
      "id": id,
      "configuredName": payload.configured_name,
      "urls": payload.urls,
      "type": payload.category_type,
      "scope": payload.scope,
      "description": payload.description,
      "customCategory": true
    }))?;

    self.categories.lock().unwrap().push(created.clone());
    Ok(created)
  }

  async fn delete_url_category(&self, id: &str) -> Result<()> {
    self.record(Call::DeleteUrlCategory(id.to_string()));
    if self.fail_delete {
      return Err(api_error(403, "DELETE", &format!("/urlCategories/{id}"), String::new()));
    }

    let mut categories = self.categories.lock().unwrap();
    let before = categories.len();
    categories.retain(|category| category.id != id);
    if categories.len() == before {
      return Err(anyhow!("No URL category with id {id}"));
    }
    Ok(())
  }
}
