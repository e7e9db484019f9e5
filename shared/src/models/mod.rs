//! Domain models
//!
//! All entities are owned and persisted by the API; the client only holds
//! transient copies decoded through [`crate::response::Envelope`].

pub mod chat;
pub mod complaint;
pub mod inspection;
pub mod knowledge;
pub mod lab;
pub mod notification;
pub mod plant;
pub mod user;

pub use chat::{ChatContext, ChatHistoryEntry, ChatQuery, ChatReply, ChatSpeaker};
pub use complaint::{
    BadgeStyle, Complaint, ComplaintCategory, ComplaintPriority, ComplaintReceipt,
    ComplaintStatus, StatusBadge, StatusChange,
};
pub use inspection::{Inspection, InspectionStatus};
pub use knowledge::Article;
pub use lab::{BookingStatus, LabBooking, LabBookingCreate, LabTestType};
pub use notification::{NotificationTemplate, SendNotificationRequest};
pub use plant::{
    Address, EntityRef, Plant, PlantCreate, PlantLocation, PlantOperations, PlantStatus,
};
pub use user::{Role, SubscriptionTier, User};
