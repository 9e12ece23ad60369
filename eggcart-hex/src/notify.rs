//! Operator notification message and WhatsApp deep link.
//!
//! Nothing is sent from here: the link is handed back to the client,
//! which opens it to notify the operator.

use eggcart_types::VerifyPaymentRequest;

/// Builds the order summary the operator receives.
pub fn order_notification(req: &VerifyPaymentRequest) -> String {
    let mut lines = vec![
        "New Eggcart order!".to_string(),
        String::new(),
        format!("Order: {}", req.order_id),
        format!("Customer: {}", req.customer_name),
        format!("Community: {}", req.community),
        format!("Address: {}", req.address),
        format!("Phone: {}", req.phone),
    ];

    if !req.items.is_empty() {
        lines.push(String::new());
        lines.push("Items:".to_string());
        for item in &req.items {
            lines.push(format!("- {}x {}", item.quantity, item.name));
        }
    }

    lines.push(String::new());
    lines.push(format!("Total: ₹{:.2}", req.total_amount));

    if let Some(end_date) = &req.subscription_end_date {
        lines.push(format!("Subscription until: {}", end_date));
    }

    lines.join("\n")
}

/// Builds the `wa.me` deep link for a prefilled message.
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, percent_encode(text))
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => {
                out.push('%');
                out.push_str(&format!("{:02X}", other));
            }
        }
    }
    out
}
