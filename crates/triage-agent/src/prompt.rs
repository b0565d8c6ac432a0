//! Prompt rendering
//!
//! The prompt is a pure function of the alert: same input, byte-identical
//! output. That keeps prompt changes auditable independent of model
//! behavior. No clocks, no randomness, no external calls.

use triage_core::TransactionAlert;

/// Render the analysis prompt for one alert.
///
/// Every field appears in a fixed, human-readable layout. Amounts carry
/// two decimal places; the chargeback rate is rendered as a percentage.
pub fn render_prompt(alert: &TransactionAlert) -> String {
    let flags = if alert.rule_engine_flags.is_empty() {
        "None".to_string()
    } else {
        alert.rule_engine_flags.join(", ")
    };

    format!(
        "Analyze the following transaction for fraud and provide your decision:\n\
         \n\
         ALERT ID: {alert_id}\n\
         INGESTED: {ingest_ts}\n\
         \n\
         TRANSACTION DETAILS:\n\
         - Transaction ID: {tx_id}\n\
         - Amount: {currency} {amount:.2}\n\
         - Timestamp: {tx_timestamp}\n\
         - Payment Method: {payment_method}\n\
         - Card Last 4: {card_last4}\n\
         \n\
         MERCHANT:\n\
         - Merchant ID: {merchant_id}\n\
         - Name: {merchant_name}\n\
         - Risk Level: {merchant_risk}\n\
         - Country: {merchant_country}\n\
         \n\
         CUSTOMER:\n\
         - Customer ID: {customer_id}\n\
         - Account Age: {account_age_days} days\n\
         - KYC Status: {kyc_status}\n\
         - Chargeback Rate: {chargeback_pct:.2}%\n\
         \n\
         FRAUD SIGNALS:\n\
         - IP Country: {ip_country}\n\
         - Device Fingerprint: {device_fingerprint}\n\
         - Transactions (last 1h): {tx_last_1h}\n\
         - Transactions (last 24h): {tx_last_24h}\n\
         - Amount (last 24h): {currency} {amount_last_24h:.2}\n\
         - Third-party Fraud Score: {fraud_score}\n\
         \n\
         RULE ENGINE FLAGS: {flags}\n\
         \n\
         SUPPORTING CONTEXT:\n\
         - Recent Events: {recent_events}\n\
         - Prior Disputes: {prior_disputes}\n\
         - Notes: {notes}\n\
         \n\
         Please analyze this transaction and respond with your decision in the specified JSON format.",
        alert_id = alert.alert_id,
        ingest_ts = alert.ingest_ts,
        tx_id = alert.transaction.tx_id,
        currency = alert.transaction.currency,
        amount = alert.transaction.amount,
        tx_timestamp = alert.transaction.timestamp,
        payment_method = alert.transaction.payment_method,
        card_last4 = alert.transaction.card_last4,
        merchant_id = alert.merchant.merchant_id,
        merchant_name = alert.merchant.name,
        merchant_risk = alert.merchant.merchant_risk,
        merchant_country = alert.merchant.country,
        customer_id = alert.customer.customer_id,
        account_age_days = alert.customer.account_age_days,
        kyc_status = alert.customer.kyc_status,
        chargeback_pct = alert.customer.chargeback_rate * 100.0,
        ip_country = alert.signals.ip_country,
        device_fingerprint = alert.signals.device_fingerprint,
        tx_last_1h = alert.signals.velocity.tx_last_1h,
        tx_last_24h = alert.signals.velocity.tx_last_24h,
        amount_last_24h = alert.signals.velocity.amount_last_24h,
        fraud_score = alert.signals.fraud_score_third_party,
        flags = flags,
        recent_events = alert.supporting_context.recent_events.join(", "),
        prior_disputes = alert.supporting_context.prior_disputes,
        notes = alert.supporting_context.notes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{
        Customer, KycStatus, Merchant, MerchantRisk, Signals, SupportingContext, Transaction,
        Velocity,
    };

    fn sample_alert() -> TransactionAlert {
        TransactionAlert {
            alert_id: "alert-001".to_string(),
            ingest_ts: "2025-01-15T10:30:00.000Z".to_string(),
            transaction: Transaction {
                tx_id: "tx-9001".to_string(),
                amount: 49.9,
                currency: "USD".to_string(),
                timestamp: "2025-01-15T10:29:55.000Z".to_string(),
                payment_method: "credit_card".to_string(),
                card_last4: "4242".to_string(),
            },
            merchant: Merchant {
                merchant_id: "m-100".to_string(),
                name: "Acme Books".to_string(),
                merchant_risk: MerchantRisk::Low,
                country: "US".to_string(),
            },
            customer: Customer {
                customer_id: "c-200".to_string(),
                account_age_days: 180,
                kyc_status: KycStatus::Verified,
                chargeback_rate: 0.0123,
            },
            signals: Signals {
                ip_country: "US".to_string(),
                device_fingerprint: "fp-abc123".to_string(),
                velocity: Velocity {
                    tx_last_1h: 1,
                    tx_last_24h: 2,
                    amount_last_24h: 75.5,
                },
                fraud_score_third_party: 0.15,
            },
            rule_engine_flags: vec![],
            supporting_context: SupportingContext {
                recent_events: vec!["password_reset".to_string()],
                prior_disputes: 0,
                notes: "Regular customer".to_string(),
            },
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let alert = sample_alert();
        assert_eq!(render_prompt(&alert), render_prompt(&alert));
    }

    #[test]
    fn test_render_formats_amounts_two_decimals() {
        let prompt = render_prompt(&sample_alert());
        assert!(prompt.contains("Amount: USD 49.90"));
        assert!(prompt.contains("Amount (last 24h): USD 75.50"));
    }

    #[test]
    fn test_render_formats_chargeback_rate_as_percentage() {
        let prompt = render_prompt(&sample_alert());
        assert!(prompt.contains("Chargeback Rate: 1.23%"));
    }

    #[test]
    fn test_render_empty_flags_literal() {
        let prompt = render_prompt(&sample_alert());
        assert!(prompt.contains("RULE ENGINE FLAGS: None"));
    }

    #[test]
    fn test_render_joins_flags() {
        let mut alert = sample_alert();
        alert.rule_engine_flags =
            vec!["velocity_check".to_string(), "geo_mismatch".to_string()];

        let prompt = render_prompt(&alert);
        assert!(prompt.contains("RULE ENGINE FLAGS: velocity_check, geo_mismatch"));
    }

    #[test]
    fn test_render_includes_every_block() {
        let prompt = render_prompt(&sample_alert());
        for header in [
            "ALERT ID: alert-001",
            "TRANSACTION DETAILS:",
            "MERCHANT:",
            "CUSTOMER:",
            "FRAUD SIGNALS:",
            "SUPPORTING CONTEXT:",
            "KYC Status: verified",
            "Risk Level: low",
            "Third-party Fraud Score: 0.15",
            "Recent Events: password_reset",
        ] {
            assert!(prompt.contains(header), "missing: {header}");
        }
        assert!(prompt.ends_with("in the specified JSON format."));
    }
}
