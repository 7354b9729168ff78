//! Outbound push notifications.

use std::time::Duration;

const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// A one-way, best-effort notification channel.
///
/// Delivery must not block the caller and must not raise into it:
/// failures are logged by the implementation and then discarded. Tool
/// results never depend on whether a notification went through.
pub trait Notifier: Send + Sync + 'static {
    /// Delivers a message, fire-and-forget.
    fn notify(&self, message: &str);
}

/// Delivers notifications through the Pushover message API.
pub struct Pushover {
    client: reqwest::Client,
    user: String,
    token: String,
}

impl Pushover {
    /// Creates a notifier with the given credentials.
    pub fn new<S1: Into<String>, S2: Into<String>>(
        user: S1,
        token: S2,
    ) -> Self {
        // Delivery is capped so an unreachable endpoint cannot stall
        // the conversation.
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .expect("failed to build the HTTP client");
        Self {
            client,
            user: user.into(),
            token: token.into(),
        }
    }
}

impl Notifier for Pushover {
    fn notify(&self, message: &str) {
        info!("push: {message}");
        let resp_fut = self
            .client
            .post(PUSHOVER_URL)
            .form(&[
                ("user", self.user.as_str()),
                ("token", self.token.as_str()),
                ("message", message),
            ])
            .send();
        tokio::spawn(async move {
            match resp_fut
                .await
                .and_then(reqwest::Response::error_for_status)
            {
                Ok(_) => {}
                Err(err) => warn!("failed to deliver notification: {err}"),
            }
        });
    }
}

/// A fallback notifier used when Pushover credentials are missing.
///
/// Records still show up in the logs for operator visibility.
pub struct LogOnly;

impl Notifier for LogOnly {
    fn notify(&self, message: &str) {
        info!("push (not delivered): {message}");
    }
}
