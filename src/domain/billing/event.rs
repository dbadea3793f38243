//! LemonSqueezy billing event parsing.
//!
//! Events arrive as `{ "meta": { "event_name": ... }, "data": { ... } }`.
//! Only the envelope is validated here; individual fields are read through
//! [`EventData`] accessors that tolerate the provider's shape variations.

use serde_json::{Map, Value};

use super::webhook_errors::WebhookError;

/// The event kinds this service reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingEventKind {
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionCancelled,
    SubscriptionExpired,
    SubscriptionResumed,
    OrderCreated,
}

impl BillingEventKind {
    /// Maps a provider event name. Unknown names yield `None`.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "subscription_created" => Some(Self::SubscriptionCreated),
            "subscription_updated" => Some(Self::SubscriptionUpdated),
            "subscription_cancelled" => Some(Self::SubscriptionCancelled),
            "subscription_expired" => Some(Self::SubscriptionExpired),
            "subscription_resumed" => Some(Self::SubscriptionResumed),
            "order_created" => Some(Self::OrderCreated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated => "subscription_created",
            Self::SubscriptionUpdated => "subscription_updated",
            Self::SubscriptionCancelled => "subscription_cancelled",
            Self::SubscriptionExpired => "subscription_expired",
            Self::SubscriptionResumed => "subscription_resumed",
            Self::OrderCreated => "order_created",
        }
    }
}

impl std::fmt::Display for BillingEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingEvent {
    /// Raw event name as sent by the provider.
    pub event_name: String,
    pub data: EventData,
}

impl BillingEvent {
    /// Parses the raw request body.
    ///
    /// # Errors
    ///
    /// - `InvalidEventStructure` - not JSON, no event name, or no `data` object
    pub fn parse(body: &[u8]) -> Result<Self, WebhookError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| WebhookError::InvalidEventStructure(format!("invalid JSON: {}", e)))?;

        let meta = value.get("meta");
        let event_name = meta
            .and_then(|m| m.get("event_name").or_else(|| m.get("eventName")))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                WebhookError::InvalidEventStructure("missing meta.event_name".to_string())
            })?;

        let data = match value.get("data") {
            Some(Value::Object(map)) => map.clone(),
            _ => {
                return Err(WebhookError::InvalidEventStructure(
                    "missing data object".to_string(),
                ))
            }
        };

        Ok(Self {
            event_name: event_name.to_string(),
            data: EventData(data),
        })
    }

    /// The recognised kind, if any.
    pub fn kind(&self) -> Option<BillingEventKind> {
        BillingEventKind::from_event_name(&self.event_name)
    }
}

/// The `data` object of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventData(Map<String, Value>);

const EMAIL_KEYS: [&str; 4] = ["user_email", "customer_email", "userEmail", "customerEmail"];

impl EventData {
    /// `data.id`: the subscription id for subscription events.
    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(id_string)
    }

    /// First non-empty email attribute.
    pub fn email(&self) -> Option<String> {
        EMAIL_KEYS
            .iter()
            .filter_map(|key| self.attribute(key).and_then(Value::as_str))
            .map(str::trim)
            .find(|email| !email.is_empty())
            .map(str::to_string)
    }

    pub fn display_name(&self) -> Option<String> {
        self.attribute("user_name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    pub fn customer_id(&self) -> Option<String> {
        self.attribute("customer_id")
            .and_then(id_string)
            .or_else(|| self.relationship_id("customer"))
    }

    pub fn variant_id(&self) -> Option<String> {
        self.attribute("variant_id")
            .and_then(id_string)
            .or_else(|| self.relationship_id("variant"))
    }

    /// Variant ids of an order's line items, in payload order.
    ///
    /// Falls back to `attributes.first_order_item` when the relationship
    /// list carries no variant ids.
    pub fn order_line_variant_ids(&self) -> Vec<String> {
        let relationships = self.0.get("relationships");
        let items = relationships
            .and_then(|r| r.get("order_items").or_else(|| r.get("orderItems")))
            .and_then(|items| items.get("data"))
            .and_then(Value::as_array);

        let from_items: Vec<String> = items
            .into_iter()
            .flatten()
            .filter_map(|item| {
                item.get("variant_id")
                    .or_else(|| item.get("attributes").and_then(|a| a.get("variant_id")))
                    .and_then(id_string)
            })
            .collect();

        if !from_items.is_empty() {
            return from_items;
        }

        self.attribute("first_order_item")
            .and_then(|item| item.get("variant_id"))
            .and_then(id_string)
            .into_iter()
            .collect()
    }

    /// Order-derived id used to tag credit grants.
    ///
    /// `None` when the payload carries neither an identifier nor an id; the
    /// caller decides the fallback.
    pub fn order_reference(&self) -> Option<String> {
        self.attribute("identifier")
            .and_then(id_string)
            .or_else(|| self.id())
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.0.get("attributes").and_then(|attrs| attrs.get(key))
    }

    fn relationship_id(&self, name: &str) -> Option<String> {
        self.0
            .get("relationships")
            .and_then(|r| r.get(name))
            .and_then(|rel| rel.get("data"))
            .and_then(|data| data.get("id"))
            .and_then(id_string)
    }
}

impl From<Map<String, Value>> for EventData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Provider ids are sent as either strings or numbers.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
