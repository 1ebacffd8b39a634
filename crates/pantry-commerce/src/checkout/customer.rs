//! Customer contact details.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Who the order is for and where it goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer name.
    #[serde(default)]
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Delivery address.
    #[serde(default)]
    pub address: String,
}

impl CustomerDetails {
    /// Create customer details.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.phone.trim(), self.address.trim())
    }

    /// Names of the fields that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Trimmed copy, or `IncompleteCustomerInfo` naming the blank fields.
    pub fn validated(&self) -> Result<Self, CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(self.trimmed())
        } else {
            Err(CommerceError::IncompleteCustomerInfo(missing))
        }
    }
}
