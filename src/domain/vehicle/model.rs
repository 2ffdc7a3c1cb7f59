//! Vehicle domain entity

use chrono::{DateTime, Utc};

use super::VehiclePatch;

/// Vehicle category as far as regulated pricing is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleCategory {
    Motorcycle,
    Car,
    /// Any category without a regulated rate (trucks, buses, ...)
    Other(String),
}

impl VehicleCategory {
    /// Lenient parse: known spellings map to a rated category,
    /// anything else is kept verbatim as `Other`.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "motorcycle" | "moto" | "motocicleta" => Self::Motorcycle,
            "car" | "carro" | "automovil" | "automóvil" => Self::Car,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Motorcycle => "Motorcycle",
            Self::Car => "Car",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i32,
    /// Uppercase alphanumeric licence plate, unique
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub category: VehicleCategory,
    /// Engine displacement in cubic centimeters
    pub engine_displacement_cc: i32,
    /// Soft-delete flag; inactive vehicles do not resolve for payments
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn apply(&mut self, patch: VehiclePatch) {
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(cc) = patch.engine_displacement_cc {
            self.engine_displacement_cc = cc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(VehicleCategory::parse("Motorcycle"), VehicleCategory::Motorcycle);
        assert_eq!(VehicleCategory::parse("MOTO"), VehicleCategory::Motorcycle);
        assert_eq!(VehicleCategory::parse("car"), VehicleCategory::Car);
        assert_eq!(VehicleCategory::parse(" Carro "), VehicleCategory::Car);
    }

    #[test]
    fn unknown_category_is_kept_verbatim() {
        assert_eq!(
            VehicleCategory::parse("Truck"),
            VehicleCategory::Other("Truck".to_string())
        );
        assert_eq!(VehicleCategory::parse("Truck").to_string(), "Truck");
    }

    #[test]
    fn apply_patch_only_touches_supplied_fields() {
        let now = Utc::now();
        let mut v = Vehicle {
            id: 1,
            plate: "ABC123".into(),
            brand: "Yamaha".into(),
            model: "XTZ".into(),
            category: VehicleCategory::Motorcycle,
            engine_displacement_cc: 125,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        v.apply(VehiclePatch {
            engine_displacement_cc: Some(250),
            ..Default::default()
        });
        assert_eq!(v.engine_displacement_cc, 250);
        assert_eq!(v.brand, "Yamaha");
        assert_eq!(v.category, VehicleCategory::Motorcycle);
    }
}
