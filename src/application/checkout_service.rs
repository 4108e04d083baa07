use crate::application::dto::{CheckoutForm, ProductDetails};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::submission::{SubmissionEvent, SubmissionTracker};
use crate::domain::value_objects::{
    BaseStatus, CardDetails, DeviceType, PaymentMethod, PaymentStatus, PixDetails,
};
use crate::domain::{Address, Customer, Order, OrderDraft};
use crate::ports::{IdempotencyStorePort, OrderStorePort};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Timer windows around one submission: how long guards stay claimed after
/// the call resolves, and how long until a stalled submission is forced out
/// of the processing state.
#[derive(Debug, Clone, Copy)]
pub struct GuardTimings {
    pub release_delay: Duration,
    pub safety_timeout: Duration,
}

impl Default for GuardTimings {
    fn default() -> Self {
        Self {
            release_delay: Duration::from_millis(2000),
            safety_timeout: Duration::from_secs(30),
        }
    }
}

/// Payload handed to the caller-supplied completion handler once an order
/// landed in the order store.
#[derive(Debug, Clone)]
pub struct PaymentCompletion {
    pub order_id: i64,
    pub status: BaseStatus,
    pub payment_method: PaymentMethod,
    pub card_details: Option<CardDetails>,
    pub pix_details: Option<PixDetails>,
    pub order_just_created: bool,
}

pub type CompletionHandler = Box<dyn Fn(PaymentCompletion) + Send + Sync>;

/// Checkout order flow. Process-wide: owns the order store collaborator and
/// the idempotency store shared by every checkout session.
pub struct CheckoutService<S: OrderStorePort, I: IdempotencyStorePort> {
    order_store: Arc<S>,
    payments_in_progress: Arc<I>,
    timings: GuardTimings,
}

impl<S: OrderStorePort, I: IdempotencyStorePort> CheckoutService<S, I> {
    pub fn new(order_store: Arc<S>, payments_in_progress: Arc<I>) -> Self {
        Self::with_timings(order_store, payments_in_progress, GuardTimings::default())
    }

    pub fn with_timings(
        order_store: Arc<S>,
        payments_in_progress: Arc<I>,
        timings: GuardTimings,
    ) -> Self {
        Self {
            order_store,
            payments_in_progress,
            timings,
        }
    }

    /// Mints the per-checkout session: form state, product details, and the
    /// completion handler live for one buyer's checkout.
    pub fn begin_session(
        &self,
        form: CheckoutForm,
        product: ProductDetails,
        device_type: DeviceType,
        on_complete: CompletionHandler,
    ) -> CheckoutSession<S, I> {
        CheckoutSession {
            order_store: self.order_store.clone(),
            payments_in_progress: self.payments_in_progress.clone(),
            timings: self.timings,
            form,
            product,
            device_type,
            tracker: SubmissionTracker::new(),
            created_payment_id: Mutex::new(None),
            on_complete,
        }
    }
}

/// One buyer's checkout. Guards duplicate submissions at two scopes: the
/// session-local created-order marker and the injected process-wide
/// idempotency store; a match on either rejects.
pub struct CheckoutSession<S: OrderStorePort, I: IdempotencyStorePort> {
    order_store: Arc<S>,
    payments_in_progress: Arc<I>,
    timings: GuardTimings,
    form: CheckoutForm,
    product: ProductDetails,
    device_type: DeviceType,
    tracker: SubmissionTracker,
    created_payment_id: Mutex<Option<String>>,
    on_complete: CompletionHandler,
}

impl<S: OrderStorePort, I: IdempotencyStorePort> CheckoutSession<S, I> {
    /// UI-facing processing flag.
    pub fn is_processing(&self) -> bool {
        self.tracker.is_processing()
    }

    /// Creates exactly one order for the given payment id and notifies the
    /// completion handler. Duplicate or overlapping submissions are rejected
    /// before any side effect.
    pub async fn create_order(
        &self,
        payment_id: &str,
        base_status: BaseStatus,
        card_details: Option<CardDetails>,
        pix_details: Option<PixDetails>,
    ) -> DomainResult<Order> {
        if self.created_payment_id.lock().unwrap().as_deref() == Some(payment_id) {
            warn!("Order already created with this payment ID: {}", payment_id);
            return Err(DomainError::DuplicatePayment(payment_id.to_string()));
        }

        if !self.tracker.try_submit() {
            warn!("Order already in progress or duplicate: {}", payment_id);
            return Err(DomainError::ProcessingInProgress);
        }

        if let Err(err) = self.payments_in_progress.begin(payment_id) {
            // The claim was never taken; free the session again.
            self.tracker.dispatch(SubmissionEvent::Reset);
            if self.payments_in_progress.is_completed(payment_id) {
                warn!("Payment id already produced an order: {}", payment_id);
            } else {
                warn!("Payment id already claimed process-wide: {}", payment_id);
            }
            return Err(err);
        }

        self.spawn_safety_timeout();

        let result = self.submit(payment_id, base_status, card_details, pix_details).await;

        match &result {
            Ok(order) => {
                self.payments_in_progress.commit(payment_id);
                *self.created_payment_id.lock().unwrap() = Some(payment_id.to_string());
                self.tracker.dispatch(SubmissionEvent::Commit);

                info!("Order created: {} (payment {})", order.id, payment_id);

                (self.on_complete)(PaymentCompletion {
                    order_id: order.id,
                    status: if order.payment_status == PaymentStatus::Paid {
                        BaseStatus::Confirmed
                    } else {
                        BaseStatus::Pending
                    },
                    payment_method: order.payment_method,
                    card_details: order.card_details.clone(),
                    pix_details: order.pix_details.clone(),
                    order_just_created: true,
                });
            }
            Err(err) => {
                self.tracker.dispatch(SubmissionEvent::Fail);
                error!("Failed to create order for payment {}: {}", payment_id, err);
            }
        }

        // Guards held by this call are released after a fixed delay
        // regardless of outcome; completed markers survive the release.
        self.schedule_release(payment_id);

        result
    }

    async fn submit(
        &self,
        payment_id: &str,
        base_status: BaseStatus,
        card_details: Option<CardDetails>,
        pix_details: Option<PixDetails>,
    ) -> DomainResult<Order> {
        let final_status = if self.form.use_custom_processing {
            PaymentStatus::resolve_manual(self.form.manual_card_status.as_deref())
        } else {
            PaymentStatus::resolve_base(base_status)
        };

        let payment_method = if card_details.is_some() {
            PaymentMethod::CreditCard
        } else {
            PaymentMethod::Pix
        };

        debug!(
            "Submitting order: payment {} resolves to {} via {}",
            payment_id, final_status, payment_method
        );

        let draft = OrderDraft {
            customer: self.assemble_customer(),
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            product_price: self.product.price,
            payment_method,
            payment_status: final_status,
            payment_id: payment_id.to_string(),
            card_details,
            pix_details,
            order_date: Utc::now(),
            device_type: self.device_type,
            is_digital_product: self.product.is_digital,
        };

        self.order_store.add_order(draft).await
    }

    fn assemble_customer(&self) -> Customer {
        let address = self.form.street.as_ref().map(|street| Address {
            street: street.clone(),
            number: self.form.number.clone(),
            complement: self.form.complement.clone(),
            neighborhood: self.form.neighborhood.clone(),
            city: self.form.city.clone(),
            state: self.form.state.clone(),
            postal_code: self.form.cep.chars().filter(char::is_ascii_digit).collect(),
        });

        Customer {
            name: self.form.full_name.clone(),
            email: self.form.email.clone(),
            cpf: self.form.cpf.clone(),
            phone: self.form.phone.clone(),
            address,
        }
    }

    fn spawn_safety_timeout(&self) {
        let tracker = self.tracker.clone();
        // The deadline is anchored now, not at the task's first poll.
        let sleep = tokio::time::sleep(self.timings.safety_timeout);
        tokio::spawn(async move {
            sleep.await;
            if tracker.force_timeout() {
                warn!(
                    "Safety timeout fired; submission state now {}",
                    tracker.current()
                );
            }
        });
    }

    fn schedule_release(&self, payment_id: &str) {
        let store = self.payments_in_progress.clone();
        let tracker = self.tracker.clone();
        let payment_id = payment_id.to_string();
        // The deadline is anchored now, not at the task's first poll.
        let sleep = tokio::time::sleep(self.timings.release_delay);
        tokio::spawn(async move {
            sleep.await;
            store.release(&payment_id);
            tracker.dispatch(SubmissionEvent::Reset);
        });
    }
}
