//! Outbound lead notification.

use crate::dto::ContactRequest;

/// Posts captured leads to a configured webhook endpoint.
///
/// Delivery is best-effort: the submission has already been captured in
/// the logs by the time this runs, so callers log a failure and move on
/// rather than failing the request.
pub struct LeadNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl LeadNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Sends the lead payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status from
    /// the webhook.
    pub async fn send_lead(
        &self,
        submission_id: &str,
        contact: &ContactRequest,
    ) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "submissionId": submission_id,
            "name": contact.name,
            "email": contact.email,
            "phone": contact.phone.as_deref().unwrap_or("Not provided"),
            "interest": contact.interest,
            "budget": contact.budget,
            "timeline": contact.timeline,
            "message": contact.message,
        });

        let response = self.client.post(&self.webhook_url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "lead webhook failed: {}",
                response.status()
            ));
        }

        Ok(())
    }
}
