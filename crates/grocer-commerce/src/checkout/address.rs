//! Customer and address types.

use serde::{Deserialize, Serialize};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Who placed the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Customer {
    /// Full name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Email, if given.
    pub email: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name of the first missing required field.
    pub fn missing_field(&self) -> Option<&'static str> {
        if is_blank(&self.name) {
            Some("customer name")
        } else if is_blank(&self.phone) {
            Some("customer phone")
        } else {
            None
        }
    }
}

/// A street address for home delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeliveryAddress {
    /// City.
    pub city: String,
    /// Street name.
    pub street: String,
    /// House or building number.
    pub house_number: String,
    /// Apartment number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    /// Floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
}

impl DeliveryAddress {
    /// Create a new address.
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        house_number: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            house_number: house_number.into(),
            apartment: None,
            floor: None,
        }
    }

    pub fn with_apartment(mut self, apartment: impl Into<String>) -> Self {
        self.apartment = Some(apartment.into());
        self
    }

    pub fn with_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor = Some(floor.into());
        self
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![format!("{} {}", self.street, self.house_number)];
        if let Some(ref apartment) = self.apartment {
            parts.push(format!("apt. {}", apartment));
        }
        if let Some(ref floor) = self.floor {
            parts.push(format!("floor {}", floor));
        }
        parts.push(self.city.clone());
        parts.join(", ")
    }

    /// Check if address is complete.
    pub fn is_complete(&self) -> bool {
        !is_blank(&self.city) && !is_blank(&self.street) && !is_blank(&self.house_number)
    }
}
