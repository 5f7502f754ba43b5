use super::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One customer's data. Immutable once built; an edit produces a new record.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    id: i32,
    name: String,
    phone: String,
    email: String,
    postal_code: String,
}

/// The editable part of a record: everything except the id.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub postal_code: String,
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn name_req() -> String {
        "Name must not be empty".to_string()
    }

    pub fn phone_req() -> String {
        "Phone must not be empty and must not contain letters".to_string()
    }

    pub fn email_req() -> String {
        "Email must not be empty".to_string()
    }

    pub fn postal_code_req() -> String {
        "Postal code must not be empty".to_string()
    }
}

impl CustomerRecord {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        CustomerRecord {
            id,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            postal_code: postal_code.into(),
        }
    }

    pub fn from_fields(id: i32, fields: CustomerFields) -> Self {
        CustomerRecord {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            postal_code: fields.postal_code,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn fields(&self) -> CustomerFields {
        CustomerFields {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            postal_code: self.postal_code.clone(),
        }
    }
}

impl CustomerFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        CustomerFields {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            postal_code: postal_code.into(),
        }
    }

    pub fn validate_name(&self) -> Result<bool, AppError> {
        Ok(!self.name.trim().is_empty())
    }

    pub fn validate_phone(&self) -> Result<bool, AppError> {
        // Digits, spaces, dashes, brackets and a leading + are all fine.
        // Any letter makes it invalid.
        let re = Regex::new(r"^[^A-Za-z]+$")?;
        Ok(!self.phone.trim().is_empty() && re.is_match(&self.phone))
    }

    pub fn validate_email(&self) -> Result<bool, AppError> {
        Ok(!self.email.trim().is_empty())
    }

    pub fn validate_postal_code(&self) -> Result<bool, AppError> {
        Ok(!self.postal_code.trim().is_empty())
    }

    /// Runs every field check and reports the first failing requirement.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.validate_name()? {
            return Err(AppError::Validation(ValidationReq::name_req()));
        }

        if !self.validate_phone()? {
            return Err(AppError::Validation(ValidationReq::phone_req()));
        }

        if !self.validate_email()? {
            return Err(AppError::Validation(ValidationReq::email_req()));
        }

        if !self.validate_postal_code()? {
            return Err(AppError::Validation(ValidationReq::postal_code_req()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(phone: &str, email: &str, postal_code: &str) -> CustomerFields {
        CustomerFields::new("Ankit", phone, email, postal_code)
    }

    #[test]
    fn accepts_typical_customer() -> Result<(), AppError> {
        let valid = fields("647-967 8119", "ankit@gmail.com", "m9a4y1");

        valid.validate()?;
        Ok(())
    }

    #[test]
    fn phone_with_letters_is_rejected() -> Result<(), AppError> {
        assert!(!fields("647-CALL-NOW", "a@x.com", "11111").validate_phone()?);
        assert!(!fields("", "a@x.com", "11111").validate_phone()?);
        assert!(fields("+1 (647) 967-8119", "a@x.com", "11111").validate_phone()?);
        Ok(())
    }

    #[test]
    fn email_and_postal_code_only_need_a_value() -> Result<(), AppError> {
        assert!(fields("5550001", "a@b", "M9A 4Y1").validate_email()?);
        assert!(!fields("5550001", "  ", "11111").validate_email()?);
        assert!(fields("5550001", "a@x.com", "M9A  4Y1").validate_postal_code()?);
        assert!(!fields("5550001", "a@x.com", "").validate_postal_code()?);
        Ok(())
    }

    #[test]
    fn empty_name_reports_name_requirement() {
        let invalid = CustomerFields::new("   ", "5550001", "a@x.com", "11111");

        match invalid.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, ValidationReq::name_req()),
            other => panic!("expected name validation error, got {:?}", other),
        }
    }

    #[test]
    fn from_fields_keeps_id_and_values() {
        let record = CustomerRecord::from_fields(7, fields("5550001", "a@x.com", "11111"));

        assert_eq!(record.id(), 7);
        assert_eq!(record.name(), "Ankit");
        assert_eq!(record.fields(), fields("5550001", "a@x.com", "11111"));
    }
}
