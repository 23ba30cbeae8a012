//! Email background job.
//!
//! Registration enqueues a welcome email; the worker delivers it over
//! SMTP via lettre. When SMTP is not configured the email is logged
//! instead, so development setups need no mail server.

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};

use crate::config::SmtpSettings;
use crate::errors::{AppError, AppResult};

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Welcome email sent right after registration. The body repeats the
    /// generated username since it is not user-chosen.
    pub fn welcome(to: impl Into<String>, username: &str, display_name: &str) -> Self {
        let body = format!(
            "Hola {},\n\n\
             Tu cuenta fue creada exitosamente.\n\
             Tu nombre de usuario es: {}\n\n\
             Puedes iniciar sesión con tu correo o con tu nombre de usuario.",
            display_name, username
        );
        Self::new(to, "Bienvenido a la plataforma", body)
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> AppResult<()> {
    let smtp = SmtpSettings::from_env();

    tracing::info!(to = %job.to, subject = %job.subject, "Processing email job");

    if !smtp.is_configured() {
        // Development mode: log the email instead of sending
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            smtp.from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    let email = Message::builder()
        .from(
            smtp.from
                .parse()
                .map_err(|e| AppError::internal(format!("Invalid sender address: {}", e)))?,
        )
        .to(job
            .to
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid recipient address: {}", e)))?)
        .subject(&job.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(job.body.clone())
        .map_err(|e| AppError::internal(format!("Failed to build email: {}", e)))?;

    let creds = Credentials::new(
        smtp.username.clone().unwrap_or_default(),
        smtp.password.clone().unwrap_or_default(),
    );

    let host = smtp.host.as_deref().unwrap_or_default();
    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        .map_err(|e| AppError::internal(format!("SMTP relay setup failed: {}", e)))?
        .port(smtp.port)
        .credentials(creds)
        .build();

    mailer
        .send(email)
        .await
        .map_err(|e| AppError::internal(format!("SMTP send failed: {}", e)))?;

    tracing::info!(to = %job.to, "Email sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_email_includes_username() {
        let job = EmailJob::welcome("maria@example.com", "p-maria-9f86d081", "Maria");
        assert_eq!(job.to, "maria@example.com");
        assert!(job.body.contains("p-maria-9f86d081"));
        assert!(job.body.contains("Hola Maria"));
    }
}
