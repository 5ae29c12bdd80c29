//! Outbound email notifications
//!
//! Fire-and-forget boundary: sends never block or fail a request. The
//! functions spawn a task, emit a structured record, and return
//! immediately; a real provider integration slots into `deliver`.

use tracing::info;

use crate::models::{Booking, ContactMessage};

/// Queue a booking confirmation email. Never blocks the caller.
pub fn send_booking_confirmation(booking: &Booking) {
    let booking_number = booking.booking_number.clone();
    let recipient = booking.customer_email.clone();
    let total_price = booking.total_price;
    tokio::spawn(async move {
        deliver(
            &recipient,
            &format!("Booking confirmation {}", booking_number),
            &format!("total_price={}", total_price),
        )
        .await;
    });
}

/// Queue a contact form acknowledgement email. Never blocks the caller.
pub fn send_contact_confirmation(message: &ContactMessage) {
    let recipient = message.email.clone();
    let message_id = message.id;
    tokio::spawn(async move {
        deliver(
            &recipient,
            "We received your message",
            &format!("contact_message_id={}", message_id),
        )
        .await;
    });
}

async fn deliver(recipient: &str, subject: &str, detail: &str) {
    // Provider integration point. Until one is wired up, record the send.
    info!(recipient, subject, detail, "email queued");
}
