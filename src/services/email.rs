use lettre::{
    Message, SmtpTransport, Transport,
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
};
use log::{info, error, warn};

use crate::models::Contact;

pub struct EmailService;

impl EmailService {
    /// Forwards a contact-form submission to the site inbox. Best effort:
    /// the submission is already persisted, so failures are only logged.
    pub async fn send_contact_notification(contact: &Contact) -> bool {
        match Self::try_send_contact(contact).await {
            Ok(_) => {
                info!("Contact notification forwarded for {}", contact.email);
                true
            }
            Err(e) => {
                error!("Failed to forward contact notification: {}", e);
                false
            }
        }
    }

    async fn try_send_contact(contact: &Contact) -> Result<(), Box<dyn std::error::Error>> {
        let mail_user = crate::config::Config::mail_user();
        let mail_password = crate::config::Config::mail_password();

        if mail_user.is_empty() || mail_password.is_empty() {
            warn!("Email credentials not configured. Skipping email send.");
            return Err("Email not configured".into());
        }

        let from_mailbox: Mailbox = crate::config::Config::mail_from().parse()?;
        let to_mailbox: Mailbox = crate::config::Config::contact_inbox().parse()?;

        let email_body = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <body>
                <h2>New contact form submission</h2>
                <p><strong>From:</strong> {} &lt;{}&gt;</p>
                <p><strong>Subject:</strong> {}</p>
                <hr>
                <p>{}</p>
            </body>
            </html>
            "#,
            contact.name, contact.email, contact.subject, contact.message
        );

        let email_message = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .reply_to(contact.email.parse()?)
            .subject(format!("[Rate My Locum] {}", contact.subject))
            .header(ContentType::TEXT_HTML)
            .body(email_body)?;

        let creds = Credentials::new(mail_user, mail_password);
        let mailer = SmtpTransport::relay(&crate::config::Config::mail_host())?
            .credentials(creds)
            .build();

        mailer.send(&email_message)?;
        Ok(())
    }
}
