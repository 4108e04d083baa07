use crate::application::checkout_service::CheckoutSession;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{BaseStatus, CardDetails, PixDetails};
use crate::domain::Order;
use crate::ports::payment_gateway_port::{GATEWAY_STATUS_CONFIRMED, PaymentResult};
use crate::ports::{IdempotencyStorePort, OrderStorePort};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::{info, warn};

/// Card brand recorded when the gateway did not report one.
const UNKNOWN_BRAND: &str = "Desconhecida";

/// Outcome of handing a gateway result to the adapter. A payment id this
/// adapter already saw is skipped silently rather than raised as an error.
#[derive(Debug)]
pub enum PaymentOutcome {
    Created(Order),
    Duplicate,
}

/// Translates gateway-specific result shapes into the generic order-creation
/// call. Keeps its own session-scoped set of seen payment ids, on top of the
/// checkout flow's guards.
pub struct PaymentMethodAdapter<S: OrderStorePort, I: IdempotencyStorePort> {
    session: CheckoutSession<S, I>,
    processed_payment_ids: Mutex<HashSet<String>>,
}

impl<S: OrderStorePort, I: IdempotencyStorePort> PaymentMethodAdapter<S, I> {
    pub fn new(session: CheckoutSession<S, I>) -> Self {
        Self {
            session,
            processed_payment_ids: Mutex::new(HashSet::new()),
        }
    }

    /// Card result: `CONFIRMED` confirms, anything else stays pending.
    pub async fn handle_card_payment(
        &self,
        payment: PaymentResult,
    ) -> DomainResult<PaymentOutcome> {
        let payment_id = payment.payment_id_or_unknown();
        info!(
            "Processing card payment: id={} status={:?} brand={:?} card={:?}",
            payment_id,
            payment.status,
            payment.brand,
            payment.card_number.as_deref().map(mask_card_number),
        );

        if !self.mark_processed(&payment_id) {
            warn!(
                "Payment ID {} was already processed, skipping duplicate",
                payment_id
            );
            return Ok(PaymentOutcome::Duplicate);
        }

        let base_status = if payment.status.as_deref() == Some(GATEWAY_STATUS_CONFIRMED) {
            BaseStatus::Confirmed
        } else {
            BaseStatus::Pending
        };

        let card_details = CardDetails {
            number: payment.card_number.unwrap_or_default(),
            expiry_month: payment.expiry_month.unwrap_or_default(),
            expiry_year: payment.expiry_year.unwrap_or_default(),
            cvv: payment.cvv.unwrap_or_default(),
            brand: payment.brand.unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
        };

        let order = self
            .session
            .create_order(&payment_id, base_status, Some(card_details), None)
            .await?;

        Ok(PaymentOutcome::Created(order))
    }

    /// PIX result: always lands pending, carrying the QR payload so the buyer
    /// can still pay.
    pub async fn handle_pix_payment(
        &self,
        payment: PaymentResult,
    ) -> DomainResult<PaymentOutcome> {
        let payment_id = payment.payment_id_or_unknown();
        info!(
            "Processing PIX payment: id={} has_qr_code={} has_qr_code_image={}",
            payment_id,
            payment.qr_code.is_some(),
            payment.qr_code_image.is_some(),
        );

        if !self.mark_processed(&payment_id) {
            warn!(
                "Payment ID {} was already processed, skipping duplicate",
                payment_id
            );
            return Ok(PaymentOutcome::Duplicate);
        }

        let pix_details = PixDetails {
            qr_code: payment.qr_code,
            qr_code_image: payment.qr_code_image,
            expiration_date: payment.expiration_date,
        };

        let order = self
            .session
            .create_order(&payment_id, BaseStatus::Pending, None, Some(pix_details))
            .await?;

        Ok(PaymentOutcome::Created(order))
    }

    /// Returns false when the id was seen before on this adapter.
    fn mark_processed(&self, payment_id: &str) -> bool {
        self.processed_payment_ids
            .lock()
            .unwrap()
            .insert(payment_id.to_string())
    }
}

fn mask_card_number(number: &str) -> String {
    let tail: String = number.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::checkout_service::{CheckoutService, CompletionHandler};
    use crate::application::dto::{CheckoutForm, ProductDetails};
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::value_objects::{DeviceType, Money, PaymentMethod, PaymentStatus};
    use crate::domain::OrderDraft;
    use crate::infrastructure::adapters::memory_idempotency::InMemoryIdempotencyStore;
    use crate::ports::payment_gateway_port::UNKNOWN_PAYMENT_ID;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingStore {
        orders: Mutex<Vec<crate::domain::Order>>,
        next_id: AtomicI64,
    }

    #[async_trait]
    impl OrderStorePort for RecordingStore {
        async fn add_order(&self, draft: OrderDraft) -> DomainResult<crate::domain::Order> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let order = crate::domain::Order {
                id,
                customer: draft.customer,
                product_id: draft.product_id,
                product_name: draft.product_name,
                product_price: draft.product_price,
                payment_method: draft.payment_method,
                payment_status: draft.payment_status,
                payment_id: draft.payment_id,
                card_details: draft.card_details,
                pix_details: draft.pix_details,
                order_date: draft.order_date,
                device_type: draft.device_type,
                is_digital_product: draft.is_digital_product,
            };
            self.orders.lock().unwrap().push(order.clone());
            Ok(order)
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "João Souza".to_string(),
            email: "joao@example.com".to_string(),
            cpf: "987.654.321-00".to_string(),
            phone: "+55 21 99876-5432".to_string(),
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
            cep: "20040-020".to_string(),
            use_custom_processing: false,
            manual_card_status: None,
        }
    }

    fn product() -> ProductDetails {
        ProductDetails {
            id: "prod-7".to_string(),
            name: "Ebook".to_string(),
            price: Money::from_cents(4990),
            is_digital: true,
        }
    }

    fn noop() -> CompletionHandler {
        Box::new(|_| {})
    }

    fn adapter(
        store: Arc<RecordingStore>,
    ) -> PaymentMethodAdapter<RecordingStore, InMemoryIdempotencyStore> {
        let guard = Arc::new(InMemoryIdempotencyStore::default());
        let service = CheckoutService::new(store, guard);
        let session = service.begin_session(form(), product(), DeviceType::Mobile, noop());
        PaymentMethodAdapter::new(session)
    }

    fn card_result(payment_id: &str, status: &str) -> PaymentResult {
        PaymentResult {
            payment_id: Some(payment_id.to_string()),
            status: Some(status.to_string()),
            card_number: Some("5555444433332222".to_string()),
            expiry_month: Some("11".to_string()),
            expiry_year: Some("2029".to_string()),
            cvv: Some("321".to_string()),
            brand: Some("mastercard".to_string()),
            ..PaymentResult::default()
        }
    }

    fn pix_result(payment_id: &str) -> PaymentResult {
        PaymentResult {
            payment_id: Some(payment_id.to_string()),
            qr_code: Some("00020126580014br.gov.bcb.pix".to_string()),
            qr_code_image: Some("data:image/png;base64,AAAA".to_string()),
            expiration_date: Some("2026-08-23T12:00:00Z".to_string()),
            ..PaymentResult::default()
        }
    }

    #[tokio::test]
    async fn test_confirmed_card_payment_creates_paid_order() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        let outcome = adapter
            .handle_card_payment(card_result("card-1", "CONFIRMED"))
            .await
            .unwrap();

        let PaymentOutcome::Created(order) = outcome else {
            panic!("expected order");
        };
        assert_eq!(order.payment_method, PaymentMethod::CreditCard);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.card_details.as_ref().unwrap().brand, "mastercard");
    }

    #[tokio::test]
    async fn test_unconfirmed_card_payment_stays_pending() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        let outcome = adapter
            .handle_card_payment(card_result("card-2", "ANALYSIS"))
            .await
            .unwrap();

        let PaymentOutcome::Created(order) = outcome else {
            panic!("expected order");
        };
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_missing_brand_falls_back_to_unknown() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        let mut payment = card_result("card-3", "CONFIRMED");
        payment.brand = None;

        let outcome = adapter.handle_card_payment(payment).await.unwrap();
        let PaymentOutcome::Created(order) = outcome else {
            panic!("expected order");
        };
        assert_eq!(order.card_details.as_ref().unwrap().brand, UNKNOWN_BRAND);
    }

    #[tokio::test]
    async fn test_pix_payment_is_always_pending_with_details() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        let outcome = adapter.handle_pix_payment(pix_result("pix-1")).await.unwrap();
        let PaymentOutcome::Created(order) = outcome else {
            panic!("expected order");
        };
        assert_eq!(order.payment_method, PaymentMethod::Pix);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        let pix = order.pix_details.as_ref().unwrap();
        assert!(pix.qr_code.is_some());
        assert!(pix.expiration_date.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_payment_id_is_skipped_silently() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        adapter.handle_pix_payment(pix_result("pix-1")).await.unwrap();
        let outcome = adapter.handle_pix_payment(pix_result("pix-1")).await.unwrap();

        assert!(matches!(outcome, PaymentOutcome::Duplicate));
        assert_eq!(store.orders.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_check_spans_card_and_pix() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        adapter
            .handle_card_payment(card_result("shared-id", "CONFIRMED"))
            .await
            .unwrap();
        let outcome = adapter
            .handle_pix_payment(pix_result("shared-id"))
            .await
            .unwrap();

        assert!(matches!(outcome, PaymentOutcome::Duplicate));
    }

    #[tokio::test]
    async fn test_missing_payment_id_uses_placeholder() {
        let store = Arc::new(RecordingStore::default());
        let adapter = adapter(store.clone());

        let mut payment = pix_result("ignored");
        payment.payment_id = None;

        let outcome = adapter.handle_pix_payment(payment).await.unwrap();
        let PaymentOutcome::Created(order) = outcome else {
            panic!("expected order");
        };
        assert_eq!(order.payment_id, UNKNOWN_PAYMENT_ID);
    }

    #[tokio::test]
    async fn test_checkout_guard_error_propagates() {
        // Two adapters (fresh sessions) sharing the process-wide store: the
        // second one's own seen-set is empty, so the rejection must come from
        // the checkout flow.
        let store = Arc::new(RecordingStore::default());
        let guard = Arc::new(InMemoryIdempotencyStore::default());
        let service = CheckoutService::new(store.clone(), guard.clone());

        let first = PaymentMethodAdapter::new(service.begin_session(
            form(),
            product(),
            DeviceType::Mobile,
            noop(),
        ));
        first.handle_pix_payment(pix_result("pix-1")).await.unwrap();

        let second = PaymentMethodAdapter::new(service.begin_session(
            form(),
            product(),
            DeviceType::Mobile,
            noop(),
        ));
        let err = second
            .handle_pix_payment(pix_result("pix-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePayment(_)));
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111111111111111"), "****1111");
    }
}
