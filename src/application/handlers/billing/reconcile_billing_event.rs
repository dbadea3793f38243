//! BillingEventReconciler - applies LemonSqueezy webhook deliveries to accounts.
//!
//! Authenticity is checked before the body is parsed. Deliveries that are
//! authentic but cannot be applied (no email, unknown plan, unknown
//! subscription) are logged and acknowledged so the provider stops
//! redelivering them.

use std::sync::Arc;

use crate::domain::account::{normalize_email, FieldUpdate, SubscriptionUpdate};
use crate::domain::billing::{
    BillingEvent, BillingEventKind, EventData, WebhookError, WebhookSignatureVerifier,
};
use crate::domain::foundation::{PlanId, Timestamp, UserId};
use crate::application::handlers::credits::PlanCreditAllocator;
use crate::ports::{PlanCatalog, UserDirectory};

/// Why an authentic event changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingEmail,
    InvalidEmail { email: String },
    MissingSubscriptionId,
    PlanNotFound { variant_id: Option<String> },
    UserNotFound { subscription_id: String },
}

/// Result of reconciling one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Created or updated subscription applied to the user.
    SubscriptionActivated {
        user_id: UserId,
        plan_id: PlanId,
        grants: usize,
    },
    /// Cancelled or expired subscription; user back on the default plan.
    SubscriptionEnded { user_id: UserId },
    /// Resumed subscription; the plan is re-applied when resolvable.
    SubscriptionResumed {
        user_id: UserId,
        plan_id: Option<PlanId>,
        grants: usize,
    },
    /// One-time order; each line item matching a plan was applied in order.
    OrderProcessed {
        user_id: UserId,
        plans_applied: usize,
        grants: usize,
    },
    /// Authentic event that could not be applied.
    Skipped(SkipReason),
    /// Event name this service does not handle.
    Ignored { event_name: String },
}

/// Verifies, parses and applies billing events.
pub struct BillingEventReconciler {
    verifier: Option<WebhookSignatureVerifier>,
    users: Arc<dyn UserDirectory>,
    plans: Arc<dyn PlanCatalog>,
    allocator: PlanCreditAllocator,
}

impl BillingEventReconciler {
    /// `verifier` is `None` when no signing secret is configured; every
    /// delivery is then refused with `SecretNotConfigured`.
    pub fn new(
        verifier: Option<WebhookSignatureVerifier>,
        users: Arc<dyn UserDirectory>,
        plans: Arc<dyn PlanCatalog>,
        allocator: PlanCreditAllocator,
    ) -> Self {
        Self {
            verifier,
            users,
            plans,
            allocator,
        }
    }

    /// Reconciles one raw delivery.
    ///
    /// # Errors
    ///
    /// - `SecretNotConfigured` - no signing secret
    /// - `InvalidSignature` - header missing or wrong
    /// - `InvalidEventStructure` - body not a billing event
    /// - `Internal` - a collaborator failed
    pub async fn reconcile(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<ReconcileOutcome, WebhookError> {
        let verifier = self.verifier.as_ref().ok_or_else(|| {
            tracing::error!("LemonSqueezy webhook secret not configured");
            WebhookError::SecretNotConfigured
        })?;

        if let Err(e) = verifier.verify(payload, signature) {
            tracing::warn!("Rejected webhook delivery: {}", e);
            return Err(e);
        }

        let event = BillingEvent::parse(payload)?;
        tracing::info!(event_name = %event.event_name, "LemonSqueezy webhook event received");

        let Some(kind) = event.kind() else {
            tracing::info!("Unhandled event type: {}", event.event_name);
            return Ok(ReconcileOutcome::Ignored {
                event_name: event.event_name,
            });
        };

        let outcome = match kind {
            BillingEventKind::SubscriptionCreated | BillingEventKind::SubscriptionUpdated => {
                self.activate_subscription(&event.data).await?
            }
            BillingEventKind::SubscriptionCancelled | BillingEventKind::SubscriptionExpired => {
                self.end_subscription(&event.data).await?
            }
            BillingEventKind::SubscriptionResumed => self.resume_subscription(&event.data).await?,
            BillingEventKind::OrderCreated => self.process_order(&event.data).await?,
        };

        if let ReconcileOutcome::Skipped(reason) = &outcome {
            tracing::warn!(event_name = kind.as_str(), ?reason, "Billing event skipped");
        }
        Ok(outcome)
    }

    async fn activate_subscription(&self, data: &EventData) -> Result<ReconcileOutcome, WebhookError> {
        let email = match contact_email(data) {
            Ok(email) => email,
            Err(reason) => return Ok(ReconcileOutcome::Skipped(reason)),
        };
        let Some(subscription_id) = data.id() else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::MissingSubscriptionId));
        };

        let user = self
            .users
            .find_or_create_user(&email, data.display_name())
            .await?
            .user;

        let variant_id = data.variant_id();
        let plan = match &variant_id {
            Some(variant_id) => self.plans.find_plan_by_variant_id(variant_id).await?,
            None => None,
        };
        let Some(plan) = plan else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::PlanNotFound { variant_id }));
        };

        let update = SubscriptionUpdate {
            customer_id: FieldUpdate::from(data.customer_id()),
            subscription_id: FieldUpdate::Set(subscription_id.clone()),
            plan_id: FieldUpdate::Set(plan.id),
        };
        self.users.update_user_subscription(&user.id, update).await?;

        let grants = self
            .allocator
            .grant_plan_credits(&user.id, &plan, &subscription_id)
            .await?;

        tracing::info!(user_id = %user.id, plan = %plan.codename, "Subscription updated for user");
        Ok(ReconcileOutcome::SubscriptionActivated {
            user_id: user.id,
            plan_id: plan.id,
            grants: grants.len(),
        })
    }

    async fn end_subscription(&self, data: &EventData) -> Result<ReconcileOutcome, WebhookError> {
        let Some(subscription_id) = data.id() else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::MissingSubscriptionId));
        };
        let Some(user) = self.users.find_user_by_subscription_id(&subscription_id).await? else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::UserNotFound {
                subscription_id: subscription_id.clone(),
            }));
        };

        self.users.downgrade_user_to_default_plan(&user.id).await?;
        self.users
            .update_user_subscription(&user.id, SubscriptionUpdate::clear_subscription())
            .await?;

        tracing::info!(user_id = %user.id, "Subscription cancelled for user");
        Ok(ReconcileOutcome::SubscriptionEnded { user_id: user.id })
    }

    async fn resume_subscription(&self, data: &EventData) -> Result<ReconcileOutcome, WebhookError> {
        let Some(subscription_id) = data.id() else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::MissingSubscriptionId));
        };
        let Some(user) = self.users.find_user_by_subscription_id(&subscription_id).await? else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::UserNotFound {
                subscription_id: subscription_id.clone(),
            }));
        };

        let plan = match data.variant_id() {
            Some(variant_id) => self.plans.find_plan_by_variant_id(&variant_id).await?,
            None => None,
        };

        let mut grants = 0;
        if let Some(plan) = &plan {
            self.users
                .update_user_subscription(&user.id, SubscriptionUpdate::plan(plan.id))
                .await?;
            grants = self
                .allocator
                .grant_plan_credits(&user.id, plan, &subscription_id)
                .await?
                .len();
        } else {
            tracing::warn!("No plan found for resumed subscription {}", subscription_id);
        }

        tracing::info!(user_id = %user.id, "Subscription resumed for user");
        Ok(ReconcileOutcome::SubscriptionResumed {
            user_id: user.id,
            plan_id: plan.map(|p| p.id),
            grants,
        })
    }

    async fn process_order(&self, data: &EventData) -> Result<ReconcileOutcome, WebhookError> {
        let email = match contact_email(data) {
            Ok(email) => email,
            Err(reason) => return Ok(ReconcileOutcome::Skipped(reason)),
        };

        let user = self
            .users
            .find_or_create_user(&email, data.display_name())
            .await?
            .user;

        let origin_id = data
            .order_reference()
            .unwrap_or_else(|| format!("order_{}", Timestamp::now().as_unix_millis()));

        let mut plans_applied = 0;
        let mut grants = 0;
        for variant_id in data.order_line_variant_ids() {
            let Some(plan) = self.plans.find_plan_by_onetime_variant_id(&variant_id).await? else {
                tracing::warn!("No one-time plan for order variant {}", variant_id);
                continue;
            };

            self.users
                .update_user_subscription(&user.id, SubscriptionUpdate::plan(plan.id))
                .await?;
            grants += self
                .allocator
                .grant_plan_credits(&user.id, &plan, &origin_id)
                .await?
                .len();
            plans_applied += 1;
        }

        tracing::info!(user_id = %user.id, plans_applied, "Order processed for user");
        Ok(ReconcileOutcome::OrderProcessed {
            user_id: user.id,
            plans_applied,
            grants,
        })
    }
}

/// Normalised customer email, or why the event cannot be tied to a user.
fn contact_email(data: &EventData) -> Result<String, SkipReason> {
    let email = data.email().ok_or(SkipReason::MissingEmail)?;
    normalize_email(&email).map_err(|_| SkipReason::InvalidEmail { email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCreditLedger, InMemoryPlanCatalog, InMemoryUserDirectory};
    use crate::domain::account::{Plan, User};
    use crate::domain::billing::compute_signature;
    use crate::domain::credits::{CreditType, CreditsConfig};
    use crate::domain::foundation::DomainError;
    use crate::ports::CreditLedger;
    use crate::domain::credits::CreditGrant;
    use async_trait::async_trait;
    use secrecy::SecretString;
    use serde_json::{json, Value};

    const SECRET: &str = "whsec_reconciler";

    struct Fixture {
        reconciler: BillingEventReconciler,
        users: InMemoryUserDirectory,
        ledger: InMemoryCreditLedger,
        professional: Plan,
        premium: Plan,
        booster: Plan,
    }

    fn fixture() -> Fixture {
        let professional = Plan::new("Professional", "professional")
            .with_monthly_variant("100")
            .with_yearly_variant("101");
        let premium = Plan::new("Premium", "premium")
            .with_monthly_variant("200")
            .with_onetime_variant("202");
        let booster = Plan::new("Booster", "professional").with_onetime_variant("302");

        let users = InMemoryUserDirectory::new();
        let ledger = InMemoryCreditLedger::new();
        let catalog = InMemoryPlanCatalog::with_plans(vec![
            professional.clone(),
            premium.clone(),
            booster.clone(),
        ]);
        let allocator =
            PlanCreditAllocator::new(Arc::new(ledger.clone()), Arc::new(CreditsConfig::default()));
        let verifier = WebhookSignatureVerifier::new(SecretString::new(SECRET.to_string()));

        Fixture {
            reconciler: BillingEventReconciler::new(
                verifier,
                Arc::new(users.clone()),
                Arc::new(catalog),
                allocator,
            ),
            users,
            ledger,
            professional,
            premium,
            booster,
        }
    }

    fn body(event_name: &str, data: Value) -> Vec<u8> {
        json!({ "meta": { "event_name": event_name }, "data": data })
            .to_string()
            .into_bytes()
    }

    fn sign(body: &[u8]) -> String {
        compute_signature(SECRET.as_bytes(), body).unwrap()
    }

    async fn deliver(f: &Fixture, body: &[u8]) -> Result<ReconcileOutcome, WebhookError> {
        f.reconciler.reconcile(body, Some(&sign(body))).await
    }

    fn subscription(id: &str, email: &str, variant_id: u64) -> Value {
        json!({
            "type": "subscriptions",
            "id": id,
            "attributes": {
                "customer_id": 4242,
                "variant_id": variant_id,
                "user_email": email,
                "user_name": "Pat Buyer"
            }
        })
    }

    async fn subscribed_user(f: &Fixture, subscription_id: &str) -> User {
        let body = body(
            "subscription_created",
            subscription(subscription_id, "pat@example.com", 100),
        );
        deliver(f, &body).await.unwrap();
        f.users
            .find_user_by_email("pat@example.com")
            .await
            .unwrap()
            .unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Authenticity
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_secret_refuses_delivery() {
        let f = fixture();
        let reconciler = BillingEventReconciler::new(
            None,
            Arc::new(f.users.clone()),
            Arc::new(InMemoryPlanCatalog::new()),
            PlanCreditAllocator::new(Arc::new(f.ledger.clone()), Arc::new(CreditsConfig::default())),
        );

        let result = reconciler.reconcile(b"{}", Some("abc")).await;

        assert_eq!(result, Err(WebhookError::SecretNotConfigured));
    }

    #[tokio::test]
    async fn invalid_signature_changes_nothing() {
        let f = fixture();
        let body = body("subscription_created", subscription("1", "pat@example.com", 100));

        let result = f.reconciler.reconcile(&body, Some("deadbeef")).await;

        assert_eq!(result, Err(WebhookError::InvalidSignature));
        assert_eq!(f.users.user_count().await, 0);
    }

    #[tokio::test]
    async fn signature_checked_before_parsing() {
        let f = fixture();

        let result = f.reconciler.reconcile(b"not json", None).await;

        assert_eq!(result, Err(WebhookError::InvalidSignature));
    }

    #[tokio::test]
    async fn authentic_garbage_is_invalid_structure() {
        let f = fixture();

        let result = deliver(&f, b"not json").await;

        assert!(matches!(result, Err(WebhookError::InvalidEventStructure(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Subscription created / updated
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn subscription_created_creates_user_and_grants_plan_credits() {
        let f = fixture();
        let body = body("subscription_created", subscription("sub_1", "Pat@Example.com", 101));

        let outcome = deliver(&f, &body).await.unwrap();

        let user = f
            .users
            .find_user_by_email("pat@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            outcome,
            ReconcileOutcome::SubscriptionActivated {
                user_id: user.id,
                plan_id: f.professional.id,
                grants: 1,
            }
        );
        assert_eq!(user.plan_id, Some(f.professional.id));
        assert_eq!(user.lemon_squeezy_customer_id.as_deref(), Some("4242"));
        assert_eq!(user.lemon_squeezy_subscription_id.as_deref(), Some("sub_1"));
        assert_eq!(user.display_name.as_deref(), Some("Pat Buyer"));

        let grants = f.ledger.grants_for_user(&user.id).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].credit_type, CreditType::ImageGeneration);
        assert_eq!(grants[0].amount, 200);
        assert_eq!(grants[0].origin_id, "sub_1");
    }

    #[tokio::test]
    async fn replayed_subscription_created_grants_twice() {
        let f = fixture();
        let body = body("subscription_created", subscription("sub_1", "pat@example.com", 100));

        deliver(&f, &body).await.unwrap();
        deliver(&f, &body).await.unwrap();

        assert_eq!(f.users.user_count().await, 1);
        assert_eq!(f.ledger.all_grants().await.len(), 2);
    }

    #[tokio::test]
    async fn subscription_updated_switches_plan() {
        let f = fixture();
        let user = subscribed_user(&f, "sub_1").await;
        let body = body("subscription_updated", subscription("sub_1", "pat@example.com", 200));

        deliver(&f, &body).await.unwrap();

        let user = f.users.get(&user.id).await.unwrap();
        assert_eq!(user.plan_id, Some(f.premium.id));
        // 200 image on professional, then 500 image + 200 video on premium
        assert_eq!(f.ledger.all_grants().await.len(), 3);
    }

    #[tokio::test]
    async fn customer_id_from_relationships_and_kept_when_absent() {
        let f = fixture();
        let with_relationship = body(
            "subscription_created",
            json!({
                "id": "sub_1",
                "attributes": { "user_email": "pat@example.com", "variant_id": "100" },
                "relationships": { "customer": { "data": { "id": "cus_rel" } } }
            }),
        );
        let without_customer = body(
            "subscription_updated",
            json!({
                "id": "sub_1",
                "attributes": { "user_email": "pat@example.com", "variant_id": "101" }
            }),
        );

        deliver(&f, &with_relationship).await.unwrap();
        deliver(&f, &without_customer).await.unwrap();

        let user = f
            .users
            .find_user_by_email("pat@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.lemon_squeezy_customer_id.as_deref(), Some("cus_rel"));
    }

    #[tokio::test]
    async fn subscription_without_email_is_acknowledged() {
        let f = fixture();
        let body = body(
            "subscription_created",
            json!({ "id": "sub_1", "attributes": { "variant_id": 100 } }),
        );

        let outcome = deliver(&f, &body).await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::MissingEmail));
        assert_eq!(f.users.user_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_email_is_acknowledged_without_creating_user() {
        let f = fixture();
        let subscription = body("subscription_created", subscription("sub_1", "not-an-email", 100));
        let order = body(
            "order_created",
            json!({
                "attributes": {
                    "user_email": "not-an-email",
                    "first_order_item": { "variant_id": "202" }
                }
            }),
        );

        for delivery in [subscription, order] {
            let outcome = deliver(&f, &delivery).await.unwrap();
            assert_eq!(
                outcome,
                ReconcileOutcome::Skipped(SkipReason::InvalidEmail {
                    email: "not-an-email".to_string()
                })
            );
        }
        assert_eq!(f.users.user_count().await, 0);
        assert!(f.ledger.all_grants().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_variant_is_acknowledged_without_plan_change() {
        let f = fixture();
        let body = body("subscription_created", subscription("sub_1", "pat@example.com", 999));

        let outcome = deliver(&f, &body).await.unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::PlanNotFound {
                variant_id: Some("999".to_string())
            })
        );
        let user = f
            .users
            .find_user_by_email("pat@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(!user.has_plan());
        assert!(f.ledger.all_grants().await.is_empty());
    }

    // ══════════════════════════════════════════════════════════════
    // Cancelled / expired / resumed
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn subscription_cancelled_downgrades_and_clears_subscription() {
        let f = fixture();
        let user = subscribed_user(&f, "sub_1").await;

        let outcome = deliver(&f, &body("subscription_cancelled", json!({ "id": "sub_1" })))
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::SubscriptionEnded { user_id: user.id });
        let user = f.users.get(&user.id).await.unwrap();
        assert!(!user.has_plan());
        assert!(user.lemon_squeezy_subscription_id.is_none());
        assert_eq!(user.lemon_squeezy_customer_id.as_deref(), Some("4242"));
    }

    #[tokio::test]
    async fn subscription_expired_behaves_like_cancelled() {
        let f = fixture();
        let user = subscribed_user(&f, "sub_7").await;

        deliver(&f, &body("subscription_expired", json!({ "id": "sub_7" })))
            .await
            .unwrap();

        assert!(!f.users.get(&user.id).await.unwrap().has_plan());
    }

    #[tokio::test]
    async fn cancelled_for_unknown_subscription_is_acknowledged() {
        let f = fixture();

        let outcome = deliver(&f, &body("subscription_cancelled", json!({ "id": "sub_x" })))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::UserNotFound {
                subscription_id: "sub_x".to_string()
            })
        );
    }

    #[tokio::test]
    async fn resumed_for_unknown_subscription_changes_nothing() {
        let f = fixture();
        subscribed_user(&f, "sub_1").await;
        let grants_before = f.ledger.all_grants().await.len();

        let outcome = deliver(
            &f,
            &body(
                "subscription_resumed",
                json!({ "id": "sub_unknown", "attributes": { "variant_id": 200 } }),
            ),
        )
        .await
        .unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::Skipped(SkipReason::UserNotFound { .. })
        ));
        assert_eq!(f.ledger.all_grants().await.len(), grants_before);
    }

    #[tokio::test]
    async fn resumed_reapplies_plan_and_grants() {
        let f = fixture();
        let user = subscribed_user(&f, "sub_1").await;

        let outcome = deliver(
            &f,
            &body(
                "subscription_resumed",
                json!({ "id": "sub_1", "attributes": { "variant_id": 200 } }),
            ),
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::SubscriptionResumed {
                user_id: user.id,
                plan_id: Some(f.premium.id),
                grants: 2,
            }
        );
        assert_eq!(f.users.get(&user.id).await.unwrap().plan_id, Some(f.premium.id));
    }

    #[tokio::test]
    async fn resumed_with_unknown_variant_is_acknowledged() {
        let f = fixture();
        let user = subscribed_user(&f, "sub_1").await;

        let outcome = deliver(
            &f,
            &body(
                "subscription_resumed",
                json!({ "id": "sub_1", "attributes": { "variant_id": 12345 } }),
            ),
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::SubscriptionResumed {
                user_id: user.id,
                plan_id: None,
                grants: 0,
            }
        );
        assert_eq!(
            f.users.get(&user.id).await.unwrap().plan_id,
            Some(f.professional.id)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Orders
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn order_with_two_one_time_plans_applies_both_last_wins() {
        let f = fixture();
        let body = body(
            "order_created",
            json!({
                "id": 55,
                "attributes": { "user_email": "buyer@example.com", "identifier": "ord-abc" },
                "relationships": {
                    "order_items": { "data": [ { "variant_id": 202 }, { "variant_id": 302 } ] }
                }
            }),
        );

        let outcome = deliver(&f, &body).await.unwrap();

        let user = f
            .users
            .find_user_by_email("buyer@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            outcome,
            ReconcileOutcome::OrderProcessed {
                user_id: user.id,
                plans_applied: 2,
                // premium grants two types, professional-tier booster one
                grants: 3,
            }
        );
        assert_eq!(user.plan_id, Some(f.booster.id));
        let grants = f.ledger.grants_for_user(&user.id).await.unwrap();
        assert!(grants.iter().all(|g| g.origin_id == "ord-abc"));
    }

    #[tokio::test]
    async fn order_ignores_recurring_variants() {
        let f = fixture();
        let body = body(
            "order_created",
            json!({
                "attributes": {
                    "customer_email": "buyer@example.com",
                    "first_order_item": { "variant_id": 100 }
                }
            }),
        );

        let outcome = deliver(&f, &body).await.unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::OrderProcessed { plans_applied: 0, grants: 0, .. }
        ));
        assert_eq!(f.users.user_count().await, 1);
    }

    #[tokio::test]
    async fn order_without_reference_uses_generated_origin() {
        let f = fixture();
        let body = body(
            "order_created",
            json!({
                "attributes": {
                    "user_email": "buyer@example.com",
                    "first_order_item": { "variant_id": "202" }
                }
            }),
        );

        deliver(&f, &body).await.unwrap();

        let grants = f.ledger.all_grants().await;
        assert!(!grants.is_empty());
        assert!(grants.iter().all(|g| g.origin_id.starts_with("order_")));
    }

    // ══════════════════════════════════════════════════════════════
    // Dispatch and failures
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unknown_event_is_ignored() {
        let f = fixture();

        let outcome = deliver(&f, &body("license_key_created", json!({ "id": 1 })))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Ignored {
                event_name: "license_key_created".to_string()
            }
        );
    }

    struct FailingLedger;

    #[async_trait]
    impl CreditLedger for FailingLedger {
        async fn record_grant(&self, _grant: &CreditGrant) -> Result<(), DomainError> {
            Err(DomainError::database("ledger offline"))
        }

        async fn grants_for_user(&self, _user_id: &UserId) -> Result<Vec<CreditGrant>, DomainError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn collaborator_failure_is_internal_error() {
        let f = fixture();
        let reconciler = BillingEventReconciler::new(
            WebhookSignatureVerifier::new(SecretString::new(SECRET.to_string())),
            Arc::new(f.users.clone()),
            Arc::new(InMemoryPlanCatalog::with_plans(vec![f.professional.clone()])),
            PlanCreditAllocator::new(Arc::new(FailingLedger), Arc::new(CreditsConfig::default())),
        );
        let body = body("subscription_created", subscription("sub_1", "pat@example.com", 100));

        let result = reconciler.reconcile(&body, Some(&sign(&body))).await;

        assert!(matches!(result, Err(WebhookError::Internal(ref m)) if m.contains("ledger offline")));
    }
}
