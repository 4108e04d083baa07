pub mod entities;
pub mod errors;
pub mod submission;
pub mod value_objects;

pub use entities::{Address, Customer, Order, OrderDraft, Product};
pub use errors::{DomainError, DomainResult};
pub use submission::{SubmissionEvent, SubmissionState, SubmissionTracker};
pub use value_objects::{
    BaseStatus, CardDetails, DeviceType, Money, PaymentMethod, PaymentStatus, PixDetails,
};
