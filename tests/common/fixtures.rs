//! Test fixtures for ZIA API responses
//!
//! Sample payloads shaped like the ZIA admin API's JSON.

use serde_json::json;

// Users returned by GET /users
pub fn sample_users_response() -> serde_json::Value {
  json!([
    {
      "id": 1001,
      "name": "Jane Admin",
      "email": "jane@example.com",
      "department": {"id": 7, "name": "Engineering"},
      "groups": [{"id": 9, "name": "Admins"}],
      "adminUser": true
    },
    {
      "id": 1002,
      "name": "Service Account",
      "email": "svc@example.com",
      "groups": []
    }
  ])
}

// Categories returned by GET /urlCategories, including the probe category
pub fn sample_categories_with_probe() -> serde_json::Value {
  json!([
    {
      "id": "NEWS_AND_MEDIA",
      "urls": [],
      "type": "URL_CATEGORY",
      "customCategory": false
    },
    {
      "id": "CUSTOM_07",
      "configuredName": "hoverfly_test_category_1",
      "urls": ["old.example.com"],
      "type": "URL_CATEGORY",
      "customCategory": true,
      "description": "left over from a previous run"
    }
  ])
}

// Categories returned by GET /urlCategories without the probe category
pub fn sample_categories_without_probe() -> serde_json::Value {
  json!([
    {
      "id": "NEWS_AND_MEDIA",
      "urls": [],
      "type": "URL_CATEGORY",
      "customCategory": false
    }
  ])
}

// Body ZIA sends back for a rejected category
pub fn duplicate_item_error() -> serde_json::Value {
  json!({
    "code": "DUPLICATE_ITEM",
    "message": "A URL category with this name already exists"
  })
}
