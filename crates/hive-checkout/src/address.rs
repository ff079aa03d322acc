//! Shipping address types.

use hive_commerce::ids::AddressId;
use serde::{Deserialize, Serialize};

/// A shipping/billing address.
///
/// Saved addresses come back from the backend with an id; inline
/// addresses entered at checkout have none. The cart engine never
/// mutates addresses; they are read-only input to order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    /// Backend id for saved addresses, absent for inline entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AddressId>,
    /// Recipient name.
    pub full_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Address line 1.
    pub address_line1: String,
    /// Address line 2 (apartment, landmark). Optional.
    #[serde(default)]
    pub address_line2: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub pincode: String,
}

impl Address {
    /// Create an inline address from its required fields.
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        address_line1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            phone: phone.into(),
            address_line1: address_line1.into(),
            address_line2: String::new(),
            city: city.into(),
            state: state.into(),
            pincode: pincode.into(),
        }
    }

    /// Check that every required textual field is non-empty.
    ///
    /// `address_line2` is the only optional field.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty()
            && !self.phone.is_empty()
            && !self.address_line1.is_empty()
            && !self.city.is_empty()
            && !self.state.is_empty()
            && !self.pincode.is_empty()
    }

    /// Format as a single display line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.full_name.clone(), self.address_line1.clone()];
        if !self.address_line2.is_empty() {
            parts.push(self.address_line2.clone());
        }
        parts.push(self.city.clone());
        parts.push(self.pincode.clone());
        parts.join(", ")
    }
}
