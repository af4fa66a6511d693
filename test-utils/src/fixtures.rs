//! Sample MailChimp payloads.

use serde_json::{Value, json};

/// A single audience list.
#[must_use]
pub fn list(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "web_id": 1_234_567,
        "name": name,
        "contact": {
            "company": "Acme Corp",
            "address1": "675 Ponce de Leon Ave NE",
            "address2": "Suite 5000",
            "city": "Atlanta",
            "state": "GA",
            "zip": "30308",
            "country": "US"
        },
        "permission_reminder": "You signed up on our website.",
        "campaign_defaults": {
            "from_name": "Acme",
            "from_email": "news@acme.example",
            "subject": "Monthly news",
            "language": "en"
        },
        "email_type_option": true,
        "stats": { "member_count": 2 }
    })
}

/// The `lists` collection response.
#[must_use]
pub fn list_collection(lists: Vec<Value>) -> Value {
    let total = lists.len();
    json!({
        "lists": lists,
        "total_items": total,
    })
}

/// A single list member.
#[must_use]
pub fn member(list_id: &str, hash: &str, email: &str) -> Value {
    json!({
        "id": hash,
        "email_address": email,
        "unique_email_id": "882e9bec19",
        "status": "subscribed",
        "language": "en",
        "vip": false,
        "list_id": list_id
    })
}

/// Body for creating a list.
#[must_use]
pub fn new_list_request(name: &str) -> Value {
    let mut body = list("", name);
    if let Some(map) = body.as_object_mut() {
        map.remove("id");
        map.remove("web_id");
        map.remove("stats");
    }
    body
}

/// Error problem document, as returned on non-2xx responses.
#[must_use]
pub fn problem(status: u16, title: &str, detail: &str) -> Value {
    json!({
        "type": "https://mailchimp.com/developer/marketing/docs/errors/",
        "title": title,
        "status": status,
        "detail": detail,
        "instance": "995c5cb0-3280-4a6e-808b-3b096d0bb219"
    })
}
