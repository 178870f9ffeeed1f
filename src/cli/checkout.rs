use async_trait::async_trait;

use crate::models::PaymentResponse;
use crate::services::payment::{Checkout, CheckoutOptions, CheckoutOutcome};

use super::prompt;

/// Checkout driven from the terminal: the order is printed so it can be
/// paid out of band, then the gateway's payment id and signature are read
/// back. Leaving the payment id empty dismisses the checkout.
pub struct TerminalCheckout;

#[async_trait]
impl Checkout for TerminalCheckout {
    async fn open(&self, options: &CheckoutOptions) -> CheckoutOutcome {
        println!("── {} ──", options.name);
        println!("{}", options.description);
        println!(
            "order {}  amount {:.2} {}  key {}",
            options.order_id,
            options.amount as f64 / 100.0,
            options.currency,
            options.key
        );
        if !options.prefill.email.is_empty() {
            println!("payer {} <{}>", options.prefill.name, options.prefill.email);
        }

        let payment_id = match prompt("razorpay_payment_id (empty to cancel): ").await {
            Ok(id) if id.is_empty() => return CheckoutOutcome::Dismissed,
            Ok(id) => id,
            Err(e) => return CheckoutOutcome::Failed(e.to_string()),
        };
        let signature = match prompt("razorpay_signature: ").await {
            Ok(sig) if sig.is_empty() => return CheckoutOutcome::Dismissed,
            Ok(sig) => sig,
            Err(e) => return CheckoutOutcome::Failed(e.to_string()),
        };

        CheckoutOutcome::Completed(PaymentResponse {
            razorpay_payment_id: payment_id,
            razorpay_order_id: Some(options.order_id.clone()),
            razorpay_signature: signature,
        })
    }
}
