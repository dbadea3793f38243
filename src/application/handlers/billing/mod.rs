//! Billing handlers.

mod reconcile_billing_event;

pub use reconcile_billing_event::{BillingEventReconciler, ReconcileOutcome, SkipReason};
