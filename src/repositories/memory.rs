//! In-memory repositories for handler and service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Admin, Event, NewAdmin, NewEvent, UserInquiry};
use crate::repositories::{AdminRepository, EventRepository, UserInquiryRepository};

fn now() -> jiff_diesel::DateTime {
    jiff_diesel::DateTime::from(
        jiff::Timestamp::now()
            .to_zoned(jiff::tz::TimeZone::UTC)
            .datetime(),
    )
}

#[derive(Clone)]
enum Failure {
    Unexpected(String),
    Database { operation: String, reason: String },
}

impl Failure {
    fn to_error(&self) -> AppError {
        match self {
            Failure::Unexpected(message) => AppError::unexpected(message.clone()),
            Failure::Database { operation, reason } => AppError::Database {
                operation: operation.clone(),
                source: anyhow::anyhow!("{}", reason),
            },
        }
    }
}

/// Shared failure switch: when set, every call fails.
#[derive(Default)]
struct FailSwitch(Mutex<Option<Failure>>);

impl FailSwitch {
    fn check(&self) -> Result<(), AppError> {
        match self.0.lock().unwrap().as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn set(&self, message: &str) {
        *self.0.lock().unwrap() = Some(Failure::Unexpected(message.to_string()));
    }

    fn set_database(&self, operation: &str, reason: &str) {
        *self.0.lock().unwrap() = Some(Failure::Database {
            operation: operation.to_string(),
            reason: reason.to_string(),
        });
    }
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    rows: Mutex<Vec<Admin>>,
    fail: FailSwitch,
}

impl InMemoryAdminRepository {
    pub fn fail_with(&self, message: &str) {
        self.fail.set(message);
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, new_admin: NewAdmin) -> Result<Admin, AppError> {
        self.fail.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.email == new_admin.email) {
            return Err(AppError::Duplicate {
                entity: "admins".to_string(),
                field: "email".to_string(),
                value: new_admin.email,
            });
        }
        let admin = Admin {
            id: rows.len() as i32 + 1,
            name: new_admin.name,
            email: new_admin.email,
            password: new_admin.password,
            created_at: now(),
            updated_at: now(),
        };
        rows.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_id(&self, admin_id: i32) -> Result<Option<Admin>, AppError> {
        self.fail.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|a| a.id == admin_id).cloned())
    }

    async fn find_by_email(&self, admin_email: &str) -> Result<Option<Admin>, AppError> {
        self.fail.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|a| a.email == admin_email).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUserInquiryRepository {
    rows: Mutex<Vec<UserInquiry>>,
    fail: FailSwitch,
}

impl InMemoryUserInquiryRepository {
    pub fn fail_with(&self, message: &str) {
        self.fail.set(message);
    }

    pub fn fail_with_database(&self, operation: &str, reason: &str) {
        self.fail.set_database(operation, reason);
    }

    /// Inquiries arrive through the public site, never through this API.
    pub fn seed(&self, subject: &str, message: &str) -> UserInquiry {
        let mut rows = self.rows.lock().unwrap();
        let inquiry = UserInquiry {
            id: rows.len() as i32 + 1,
            name: "Visitor".to_string(),
            email: "visitor@example.com".to_string(),
            phone: None,
            subject: Some(subject.to_string()),
            message: message.to_string(),
            created_at: now(),
        };
        rows.push(inquiry.clone());
        inquiry
    }
}

#[async_trait]
impl UserInquiryRepository for InMemoryUserInquiryRepository {
    async fn list_all(&self) -> Result<Vec<UserInquiry>, AppError> {
        self.fail.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryEventRepository {
    rows: Mutex<Vec<Event>>,
    fail: FailSwitch,
}

impl InMemoryEventRepository {
    pub fn fail_with(&self, message: &str) {
        self.fail.set(message);
    }

    pub fn all(&self) -> Vec<Event> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        self.fail.check()?;
        let mut rows = self.rows.lock().unwrap();
        let event = Event {
            id: rows.len() as i32 + 1,
            title: new_event.title,
            description: new_event.description,
            location: new_event.location,
            starts_at: new_event.starts_at,
            image_url: new_event.image_url,
            image_public_id: new_event.image_public_id,
            created_by: new_event.created_by,
            created_at: now(),
            updated_at: now(),
        };
        rows.push(event.clone());
        Ok(event)
    }
}
