//! Entity Form
//!
//! Editable text fields shared by the client and item panels.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::{Client, Item, Located};

/// Signed decimal as accepted by the coordinate inputs
static COORDINATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("valid coordinate pattern"));

/// Flag stamped on records created or edited from the page
const ACTIVE_ON_SAVE: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(FormField),
    #[error("{0} must be a decimal number")]
    NotNumeric(FormField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Latitude,
    Longitude,
    Icon,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FormField::Name => "Name",
            FormField::Latitude => "Latitude",
            FormField::Longitude => "Longitude",
            FormField::Icon => "Icon",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityForm {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub url_icon: String,
}

impl EntityForm {
    /// Pre-fill from an existing record
    pub fn from_record(record: &impl Located) -> Self {
        let owned = |v: Option<&str>| v.unwrap_or_default().to_string();
        Self {
            name: owned(record.name()),
            latitude: owned(record.latitude()),
            longitude: owned(record.longitude()),
            url_icon: owned(record.url_icon()),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::Icon => &self.url_icon,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Latitude => &mut self.latitude,
            FormField::Longitude => &mut self.longitude,
            FormField::Icon => &mut self.url_icon,
        }
    }

    /// First failing rule, in field order
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Required(FormField::Name));
        }
        for (field, value) in [
            (FormField::Latitude, &self.latitude),
            (FormField::Longitude, &self.longitude),
        ] {
            if value.trim().is_empty() {
                return Err(FormError::Required(field));
            }
            if !COORDINATE.is_match(value.trim()) {
                return Err(FormError::NotNumeric(field));
            }
        }
        if self.url_icon.trim().is_empty() {
            return Err(FormError::Required(FormField::Icon));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn to_client(&self) -> Client {
        Client {
            id: None,
            name: Some(self.name.trim().to_string()),
            latitude: Some(self.latitude.trim().to_string()),
            longitude: Some(self.longitude.trim().to_string()),
            url_icon: Some(self.url_icon.trim().to_string()),
            active: Some(ACTIVE_ON_SAVE),
        }
    }

    pub fn to_item(&self) -> Item {
        Item {
            id: None,
            name: Some(self.name.trim().to_string()),
            latitude: Some(self.latitude.trim().to_string()),
            longitude: Some(self.longitude.trim().to_string()),
            url_icon: Some(self.url_icon.trim().to_string()),
            active: Some(ACTIVE_ON_SAVE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EntityForm {
        EntityForm {
            name: "Depot".into(),
            latitude: "-15.79".into(),
            longitude: "-47.88".into(),
            url_icon: "truck.png".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled();
        form.name = "  ".into();
        assert_eq!(form.validate(), Err(FormError::Required(FormField::Name)));

        let mut form = filled();
        form.url_icon.clear();
        assert_eq!(form.validate(), Err(FormError::Required(FormField::Icon)));
    }

    #[test]
    fn test_coordinate_pattern() {
        for ok in ["1", "+1.5", "-.5", "10.25"] {
            let mut form = filled();
            form.latitude = ok.into();
            assert!(form.is_valid(), "{ok} should be accepted");
        }
        for bad in ["1.", "1,5", "abc", "1e3", "--1"] {
            let mut form = filled();
            form.longitude = bad.into();
            assert_eq!(
                form.validate(),
                Err(FormError::NotNumeric(FormField::Longitude)),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_prefill_keeps_longitude() {
        let client = Client {
            latitude: Some("-15.0".into()),
            longitude: Some("-47.0".into()),
            ..Default::default()
        };
        let form = EntityForm::from_record(&client);
        assert_eq!(form.latitude, "-15.0");
        assert_eq!(form.longitude, "-47.0");
    }

    #[test]
    fn test_conversion_marks_record() {
        let item = filled().to_item();
        assert_eq!(item.id, None);
        assert_eq!(item.active, Some(0));
        assert_eq!(item.name.as_deref(), Some("Depot"));
    }
}
