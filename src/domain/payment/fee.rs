//! SOAT fee table and amount calculation
//!
//! SOAT is priced by a fixed table keyed on vehicle category and engine
//! displacement. Every other service type charges what the caller asked for.

use rust_decimal::Decimal;
use tracing::warn;

use super::{PaymentRequest, ServiceType};
use crate::domain::vehicle::{Vehicle, VehicleCategory, VehicleRepository};
use crate::domain::{DomainError, DomainResult};

/// Displacement range a rate applies to. Bounds of `Between` are inclusive.
#[derive(Debug, Clone, Copy)]
enum Bracket {
    Below(i32),
    Between(i32, i32),
    Above(i32),
}

impl Bracket {
    fn contains(self, cc: i32) -> bool {
        match self {
            Self::Below(limit) => cc < limit,
            Self::Between(low, high) => (low..=high).contains(&cc),
            Self::Above(limit) => cc > limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatedCategory {
    Motorcycle,
    Car,
}

struct SoatRate {
    category: RatedCategory,
    bracket: Bracket,
    amount: i64,
}

/// Evaluated top to bottom, first match wins.
const SOAT_RATES: &[SoatRate] = &[
    SoatRate { category: RatedCategory::Motorcycle, bracket: Bracket::Below(100), amount: 243_700 },
    SoatRate { category: RatedCategory::Motorcycle, bracket: Bracket::Between(100, 200), amount: 326_600 },
    SoatRate { category: RatedCategory::Motorcycle, bracket: Bracket::Above(200), amount: 758_600 },
    SoatRate { category: RatedCategory::Car, bracket: Bracket::Below(1500), amount: 590_400 },
    SoatRate { category: RatedCategory::Car, bracket: Bracket::Between(1500, 2500), amount: 674_700 },
    SoatRate { category: RatedCategory::Car, bracket: Bracket::Above(2500), amount: 751_300 },
];

/// Regulated SOAT price for a vehicle, `None` when no row matches.
pub fn soat_rate(category: &VehicleCategory, engine_displacement_cc: i32) -> Option<Decimal> {
    let rated = match category {
        VehicleCategory::Motorcycle => RatedCategory::Motorcycle,
        VehicleCategory::Car => RatedCategory::Car,
        VehicleCategory::Other(_) => return None,
    };

    SOAT_RATES
        .iter()
        .find(|row| row.category == rated && row.bracket.contains(engine_displacement_cc))
        .map(|row| Decimal::from(row.amount))
}

/// Amount to charge for a payment.
///
/// For SOAT the vehicle is required and `requested_amount` is ignored; a
/// category without a rate yields zero. For any other service the requested
/// amount is returned unchanged.
pub fn compute_amount(
    service_type: ServiceType,
    requested_amount: Option<Decimal>,
    vehicle: Option<&Vehicle>,
) -> DomainResult<Decimal> {
    match service_type {
        ServiceType::Soat => {
            let vehicle = vehicle.ok_or(DomainError::MissingVehicleReference)?;
            Ok(soat_rate(&vehicle.category, vehicle.engine_displacement_cc)
                .unwrap_or(Decimal::ZERO))
        }
        ServiceType::Inspection => {
            let amount = requested_amount
                .ok_or_else(|| DomainError::MissingAmount(service_type.to_string()))?;
            if amount < Decimal::ZERO {
                return Err(DomainError::NegativeAmount);
            }
            Ok(amount)
        }
    }
}

/// Resolves the vehicle a request refers to and prices it.
///
/// Holds only a vehicle lookup; it never writes.
pub struct FeeCalculator<'a> {
    vehicles: &'a dyn VehicleRepository,
}

impl<'a> FeeCalculator<'a> {
    pub fn new(vehicles: &'a dyn VehicleRepository) -> Self {
        Self { vehicles }
    }

    pub async fn compute(&self, request: &PaymentRequest) -> DomainResult<Decimal> {
        let vehicle = match request.service_type {
            ServiceType::Soat => Some(self.resolve_vehicle(request.vehicle_id).await?),
            ServiceType::Inspection => None,
        };

        let amount = compute_amount(
            request.service_type,
            request.requested_amount,
            vehicle.as_ref(),
        )?;

        if let Some(vehicle) = vehicle.as_ref().filter(|_| amount.is_zero()) {
            warn!(
                vehicle_id = vehicle.id,
                category = %vehicle.category,
                "No SOAT rate defined for vehicle category, charging 0"
            );
        }

        Ok(amount)
    }

    /// Only active vehicles resolve.
    async fn resolve_vehicle(&self, vehicle_id: Option<i32>) -> DomainResult<Vehicle> {
        let id = vehicle_id.ok_or(DomainError::MissingVehicleReference)?;
        match self.vehicles.find_by_id(id).await? {
            Some(vehicle) if vehicle.is_active => Ok(vehicle),
            _ => Err(DomainError::VehicleNotFound(id)),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::NewVehicle;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Utc;

    fn vehicle(category: VehicleCategory, cc: i32) -> Vehicle {
        Vehicle {
            id: 1,
            plate: "ABC123".into(),
            brand: "Test".into(),
            model: "T1".into(),
            category,
            engine_displacement_cc: cc,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn soat(category: VehicleCategory, cc: i32) -> Decimal {
        let v = vehicle(category, cc);
        compute_amount(ServiceType::Soat, None, Some(&v)).unwrap()
    }

    #[test]
    fn motorcycle_tiers() {
        for cc in [1, 50, 90, 99] {
            assert_eq!(soat(VehicleCategory::Motorcycle, cc), Decimal::from(243_700));
        }
        for cc in [100, 150, 200] {
            assert_eq!(soat(VehicleCategory::Motorcycle, cc), Decimal::from(326_600));
        }
        for cc in [201, 650, 1200] {
            assert_eq!(soat(VehicleCategory::Motorcycle, cc), Decimal::from(758_600));
        }
    }

    #[test]
    fn car_tiers() {
        for cc in [800, 1000, 1499] {
            assert_eq!(soat(VehicleCategory::Car, cc), Decimal::from(590_400));
        }
        for cc in [1500, 2000, 2500] {
            assert_eq!(soat(VehicleCategory::Car, cc), Decimal::from(674_700));
        }
        for cc in [2501, 3000, 5000] {
            assert_eq!(soat(VehicleCategory::Car, cc), Decimal::from(751_300));
        }
    }

    #[test]
    fn lower_boundaries_belong_to_the_middle_tier() {
        assert_eq!(soat(VehicleCategory::Motorcycle, 100), Decimal::from(326_600));
        assert_eq!(soat(VehicleCategory::Car, 1500), Decimal::from(674_700));
    }

    #[test]
    fn unknown_category_has_no_rate() {
        let truck = VehicleCategory::Other("Truck".into());
        assert_eq!(soat_rate(&truck, 6000), None);
        assert_eq!(soat(truck, 6000), Decimal::ZERO);
    }

    #[test]
    fn soat_ignores_requested_amount() {
        let v = vehicle(VehicleCategory::Car, 2000);
        let amount =
            compute_amount(ServiceType::Soat, Some(Decimal::from(1)), Some(&v)).unwrap();
        assert_eq!(amount, Decimal::from(674_700));
    }

    #[test]
    fn soat_without_vehicle_is_rejected() {
        let err = compute_amount(ServiceType::Soat, Some(Decimal::from(10)), None).unwrap_err();
        assert!(matches!(err, DomainError::MissingVehicleReference));
    }

    #[test]
    fn inspection_passes_amount_through() {
        for raw in [0_i64, 1, 75_000, 1_250_000] {
            let amount = Decimal::from(raw);
            assert_eq!(
                compute_amount(ServiceType::Inspection, Some(amount), None).unwrap(),
                amount
            );
        }
        let cents = Decimal::new(15075, 2);
        assert_eq!(
            compute_amount(ServiceType::Inspection, Some(cents), None).unwrap(),
            cents
        );
    }

    #[test]
    fn inspection_ignores_vehicle() {
        let v = vehicle(VehicleCategory::Motorcycle, 90);
        let amount =
            compute_amount(ServiceType::Inspection, Some(Decimal::from(75_000)), Some(&v))
                .unwrap();
        assert_eq!(amount, Decimal::from(75_000));
    }

    #[test]
    fn inspection_requires_non_negative_amount() {
        assert!(matches!(
            compute_amount(ServiceType::Inspection, None, None),
            Err(DomainError::MissingAmount(_))
        ));
        assert!(matches!(
            compute_amount(ServiceType::Inspection, Some(Decimal::from(-5)), None),
            Err(DomainError::NegativeAmount)
        ));
    }

    #[test]
    fn calculation_is_deterministic() {
        let v = vehicle(VehicleCategory::Motorcycle, 150);
        let first = compute_amount(ServiceType::Soat, None, Some(&v)).unwrap();
        for _ in 0..10 {
            assert_eq!(compute_amount(ServiceType::Soat, None, Some(&v)).unwrap(), first);
        }
    }

    async fn register(repos: &InMemoryRepositoryProvider, category: VehicleCategory, cc: i32) -> Vehicle {
        repos
            .vehicles()
            .save(NewVehicle {
                plate: format!("T{}", cc),
                brand: "Test".into(),
                model: "T1".into(),
                category,
                engine_displacement_cc: cc,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn calculator_resolves_vehicle() {
        let repos = InMemoryRepositoryProvider::new();
        let moto = register(&repos, VehicleCategory::Motorcycle, 90).await;
        let car = register(&repos, VehicleCategory::Car, 2000).await;
        let calc = FeeCalculator::new(repos.vehicles());

        let request = |id| PaymentRequest {
            service_type: ServiceType::Soat,
            requested_amount: None,
            vehicle_id: Some(id),
        };
        assert_eq!(calc.compute(&request(moto.id)).await.unwrap(), Decimal::from(243_700));
        assert_eq!(calc.compute(&request(car.id)).await.unwrap(), Decimal::from(674_700));
    }

    #[tokio::test]
    async fn calculator_reports_unknown_vehicle() {
        let repos = InMemoryRepositoryProvider::new();
        let calc = FeeCalculator::new(repos.vehicles());

        let err = calc
            .compute(&PaymentRequest {
                service_type: ServiceType::Soat,
                requested_amount: None,
                vehicle_id: Some(999),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::VehicleNotFound(999)));

        let err = calc
            .compute(&PaymentRequest {
                service_type: ServiceType::Soat,
                requested_amount: None,
                vehicle_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingVehicleReference));
    }

    #[tokio::test]
    async fn calculator_skips_inactive_vehicles() {
        let repos = InMemoryRepositoryProvider::new();
        let mut car = register(&repos, VehicleCategory::Car, 1800).await;
        car.is_active = false;
        repos.vehicles().update(car.clone()).await.unwrap();

        let err = FeeCalculator::new(repos.vehicles())
            .compute(&PaymentRequest {
                service_type: ServiceType::Soat,
                requested_amount: None,
                vehicle_id: Some(car.id),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::VehicleNotFound(id) if id == car.id));
    }

    #[tokio::test]
    async fn calculator_passes_inspection_through_without_lookup() {
        let repos = InMemoryRepositoryProvider::new();
        let amount = FeeCalculator::new(repos.vehicles())
            .compute(&PaymentRequest {
                service_type: ServiceType::Inspection,
                requested_amount: Some(Decimal::from(75_000)),
                vehicle_id: Some(999),
            })
            .await
            .unwrap();
        assert_eq!(amount, Decimal::from(75_000));
    }
}
