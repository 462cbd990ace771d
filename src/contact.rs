//! Contact form submission and the store's contact directory.
//!
//! A submission is accepted only when every field is filled in. Accepted
//! messages are handed to a [`ContactSink`]; the default sink only logs them.

use crate::error::ContactError;

/// A message entered in the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactMessage {
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactMessage {
    /// Check that every field holds more than whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingField` naming the first blank field in
    /// form order.
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some(&(field, _)) => Err(ContactError::MissingField { field }),
            None => Ok(()),
        }
    }
}

/// Receives accepted contact messages.
pub trait ContactSink {
    /// Deliver one validated message.
    fn deliver(&self, message: &ContactMessage);
}

/// [`ContactSink`] that records submissions in the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingContactSink;

impl ContactSink for LoggingContactSink {
    fn deliver(&self, message: &ContactMessage) {
        tracing::info!(
            name = %message.name,
            email = %message.email,
            subject = %message.subject,
            message = %message.message,
            "contact form submitted"
        );
    }
}

/// Validate `message` and pass it to `sink`.
///
/// # Errors
///
/// Returns `ContactError::MissingField` when a field is blank; the sink is
/// not called in that case.
pub fn submit<S: ContactSink + ?Sized>(
    sink: &S,
    message: &ContactMessage,
) -> Result<(), ContactError> {
    message.validate()?;
    sink.deliver(message);
    Ok(())
}

/// One block of the contact directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSection {
    /// Block heading.
    pub title: &'static str,
    /// Lines shown under the heading.
    pub lines: &'static [&'static str],
}

/// Where and how to reach the store.
pub static CONTACT_DIRECTORY: &[ContactSection] = &[
    ContactSection {
        title: "Visit Us",
        lines: &[
            "2000 W University Ave",
            "Muncie, IN 47306",
            "Student Center, First Floor",
        ],
    },
    ContactSection {
        title: "Call Us",
        lines: &[
            "Main: (765) 285-8000",
            "Textbook Orders: (765) 285-8001",
            "Apparel: (765) 285-8002",
        ],
    },
    ContactSection {
        title: "Email Us",
        lines: &[
            "info@cardinalbooks.com",
            "textbooks@cardinalbooks.com",
            "support@cardinalbooks.com",
        ],
    },
    ContactSection {
        title: "Store Hours",
        lines: &[
            "Mon-Fri: 8:00 AM - 6:00 PM",
            "Saturday: 10:00 AM - 4:00 PM",
            "Sunday: 12:00 PM - 4:00 PM",
        ],
    },
];
