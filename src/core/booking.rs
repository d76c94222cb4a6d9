use crate::core::api_client::ApiClient;
use crate::core::fallback::unwrap_payload;
use crate::core::session::Session;
use crate::domain::model::{BookingConfirmation, BookingPayload, BookingRequest};
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::{parse_date, parse_time, validate_non_empty_string, Validate};
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Reads `date` and `time` as local wall-clock time and renders the instant in UTC,
/// e.g. `2025-01-10T08:30:00.000Z` for `2025-01-10` `14:00` at UTC+05:30.
pub fn combine_date_time(date: &str, time: &str) -> Result<String> {
    combine_date_time_in(&Local, date, time)
}

pub fn combine_date_time_in<Tz: TimeZone>(tz: &Tz, date: &str, time: &str) -> Result<String> {
    let naive = NaiveDateTime::new(parse_date(date)?, parse_time(time)?);
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| PortalError::DateTimeError {
            value: format!("{}T{}", date, time),
            reason: "time does not exist in the local timezone".to_string(),
        })?;

    Ok(local
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<()> {
        if self.service_id == 0 {
            return Err(PortalError::ValidationError {
                message: "Please select a service".to_string(),
            });
        }
        validate_non_empty_string("Booking date", &self.booking_date)?;
        validate_non_empty_string("Booking time", &self.booking_time)?;
        validate_non_empty_string("Name", &self.customer_name)?;
        validate_non_empty_string("Email", &self.customer_email)?;
        validate_non_empty_string("Phone", &self.customer_phone)?;
        if !self.customer_email.contains('@') {
            return Err(PortalError::ValidationError {
                message: format!("'{}' is not an email address", self.customer_email),
            });
        }
        Ok(())
    }
}

impl BookingRequest {
    pub fn to_payload(&self) -> Result<BookingPayload> {
        self.validate()?;

        let birth_date = match (non_blank(&self.birth_date), non_blank(&self.birth_time)) {
            (Some(date), Some(time)) => Some(combine_date_time(date, time)?),
            _ => None,
        };

        Ok(BookingPayload {
            service_id: self.service_id,
            booking_date: combine_date_time(&self.booking_date, &self.booking_time)?,
            booking_time: self.booking_time.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            notes: non_blank(&self.notes).map(str::to_string),
            birth_date,
            birth_time: non_blank(&self.birth_time).map(str::to_string),
            birth_place: non_blank(&self.birth_place).map(str::to_string),
        })
    }
}

pub struct BookingController<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingController<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Submits the appointment. The form is reset only when the booking succeeds.
    pub async fn submit(
        &self,
        session: &Session,
        form: &mut BookingRequest,
    ) -> Result<BookingConfirmation> {
        let token = session.require_token()?;
        let payload = form.to_payload()?;

        tracing::info!(
            "Submitting booking for service {} at {}",
            payload.service_id,
            payload.booking_date
        );

        let data = self
            .client
            .create_booking(token, &payload)
            .await
            .into_result()
            .map_err(|message| PortalError::BookingError { message })?;

        let booking = unwrap_payload(data);
        let id = booking.get("id").cloned().unwrap_or(Value::Null);
        let id_text = match &id {
            Value::String(s) => s.clone(),
            Value::Null => "pending".to_string(),
            other => other.to_string(),
        };

        *form = BookingRequest::default();

        Ok(BookingConfirmation {
            id,
            message: format!(
                "Booking successful! Your booking ID is {}. You will receive a confirmation email shortly.",
                id_text
            ),
        })
    }
}
