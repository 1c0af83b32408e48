//! Form submissions
//!
//! Contact messages and distributor applications have no delivery backend.
//! Submissions go through a `FormSink`; the only sink logs them and hands
//! back a receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// A message from the contact page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// An application to become a distributor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributorApplication {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_in_business: Option<u32>,
    /// Services the applicant would offer (sales, service, training, spares)
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub message: String,
}

/// Which form produced a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Contact,
    DistributorApplication,
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contact => write!(f, "contact"),
            Self::DistributorApplication => write!(f, "distributor_application"),
        }
    }
}

/// Acknowledgement returned for an accepted submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub kind: FormKind,
    pub received_at: DateTime<Utc>,
}

impl Receipt {
    fn new(kind: FormKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            received_at: Utc::now(),
        }
    }
}

/// Destination for form submissions
pub trait FormSink: Send + Sync {
    fn submit_contact(&self, message: &ContactMessage) -> Receipt;

    fn submit_application(&self, application: &DistributorApplication) -> Receipt;
}

/// Sink that records submissions in the log and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl FormSink for LogSink {
    fn submit_contact(&self, message: &ContactMessage) -> Receipt {
        let receipt = Receipt::new(FormKind::Contact);
        info!(id = %receipt.id, kind = %receipt.kind, "Contact message received");
        debug!(
            id = %receipt.id,
            name = %message.name,
            email = %message.email,
            subject = %message.subject,
            "Contact message details"
        );
        receipt
    }

    fn submit_application(&self, application: &DistributorApplication) -> Receipt {
        let receipt = Receipt::new(FormKind::DistributorApplication);
        info!(id = %receipt.id, kind = %receipt.kind, "Distributor application received");
        debug!(
            id = %receipt.id,
            company = %application.company_name,
            contact = %application.contact_name,
            email = %application.email,
            country = %application.country,
            city = %application.city,
            services = ?application.services,
            "Distributor application details"
        );
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_contact_receipt() {
        let message: ContactMessage = serde_json::from_value(serde_json::json!({
            "name": "Ama Mensah",
            "email": "ama@example.com",
            "message": "Do you stock Boda 125 spares in Tema?"
        }))
        .unwrap();

        let receipt = LogSink.submit_contact(&message);
        assert_eq!(receipt.kind, FormKind::Contact);
    }

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_info_log_omits_personal_fields() {
        let message = ContactMessage {
            name: "Ama Mensah".to_string(),
            email: "ama@example.com".to_string(),
            phone: None,
            country: Some("Ghana".to_string()),
            subject: "Spares".to_string(),
            message: "Do you stock Boda 125 spares in Tema?".to_string(),
        };

        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(capture.clone())
            .finish();
        let receipt =
            tracing::subscriber::with_default(subscriber, || LogSink.submit_contact(&message));

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains(&receipt.id.to_string()));
        assert!(!logged.contains("ama@example.com"));
        assert!(!logged.contains("Ama Mensah"));
    }

    #[test]
    fn test_application_receipts_are_unique() {
        let application = DistributorApplication {
            company_name: "Lake Zone Motors".to_string(),
            contact_name: "Neema Joseph".to_string(),
            email: "neema@example.com".to_string(),
            phone: "+255 700 000 000".to_string(),
            country: "Tanzania".to_string(),
            city: "Mwanza".to_string(),
            years_in_business: Some(6),
            services: vec!["sales".to_string(), "spares".to_string()],
            message: String::new(),
        };

        let a = LogSink.submit_application(&application);
        let b = LogSink.submit_application(&application);
        assert_eq!(a.kind, FormKind::DistributorApplication);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_receipt_serialization() {
        let receipt = Receipt::new(FormKind::DistributorApplication);
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["kind"], "distributor_application");
        assert!(json["received_at"].is_string());
    }
}
