//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::vehicle::{NewVehicle, Vehicle, VehicleCategory, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: vehicle::Model) -> Vehicle {
    Vehicle {
        id: model.id,
        plate: model.plate,
        brand: model.brand,
        model: model.model,
        category: VehicleCategory::parse(&model.category),
        engine_displacement_cc: model.engine_displacement_cc,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find()
            .filter(vehicle::Column::Plate.eq(plate))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_active(&self) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::IsActive.eq(true))
            .order_by_asc(vehicle::Column::Plate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, v: NewVehicle) -> DomainResult<Vehicle> {
        let now = Utc::now();
        let plate = v.plate.clone();
        let model = vehicle::ActiveModel {
            id: NotSet,
            plate: Set(v.plate),
            brand: Set(v.brand),
            model: Set(v.model),
            category: Set(v.category.to_string()),
            engine_displacement_cc: Set(v.engine_displacement_cc),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict(format!("Vehicle with plate {} already exists", plate))
            } else {
                db_err(e)
            }
        })?;
        info!(vehicle_id = result.id, plate = %result.plate, "Vehicle saved");
        Ok(model_to_domain(result))
    }

    async fn update(&self, v: Vehicle) -> DomainResult<Vehicle> {
        let existing = vehicle::Entity::find_by_id(v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: v.id.to_string(),
            });
        };

        let model = vehicle::ActiveModel {
            id: Set(v.id),
            plate: Set(v.plate),
            brand: Set(v.brand),
            model: Set(v.model),
            category: Set(v.category.to_string()),
            engine_displacement_cc: Set(v.engine_displacement_cc),
            is_active: Set(v.is_active),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_db;

    fn new_vehicle(plate: &str, category: VehicleCategory, cc: i32) -> NewVehicle {
        NewVehicle {
            plate: plate.into(),
            brand: "Yamaha".into(),
            model: "XTZ".into(),
            category,
            engine_displacement_cc: cc,
        }
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = SeaOrmVehicleRepository::new(test_db().await);
        let saved = repo
            .save(new_vehicle("ABC12D", VehicleCategory::Motorcycle, 150))
            .await
            .unwrap();
        assert!(saved.is_active);

        let by_id = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(by_id.plate, "ABC12D");
        assert_eq!(by_id.category, VehicleCategory::Motorcycle);

        let by_plate = repo.find_by_plate("ABC12D").await.unwrap().unwrap();
        assert_eq!(by_plate.id, saved.id);
        assert!(repo.find_by_plate("ZZZ999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_plate_is_a_conflict() {
        let repo = SeaOrmVehicleRepository::new(test_db().await);
        repo.save(new_vehicle("XYZ789", VehicleCategory::Car, 1600))
            .await
            .unwrap();
        let err = repo
            .save(new_vehicle("XYZ789", VehicleCategory::Car, 2000))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn other_category_round_trips_verbatim() {
        let repo = SeaOrmVehicleRepository::new(test_db().await);
        let saved = repo
            .save(new_vehicle("TRK001", VehicleCategory::Other("Truck".into()), 6000))
            .await
            .unwrap();
        let loaded = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.category, VehicleCategory::Other("Truck".into()));
    }

    #[tokio::test]
    async fn inactive_vehicles_are_not_listed() {
        let repo = SeaOrmVehicleRepository::new(test_db().await);
        let mut a = repo
            .save(new_vehicle("AAA111", VehicleCategory::Car, 1200))
            .await
            .unwrap();
        repo.save(new_vehicle("BBB222", VehicleCategory::Car, 1200))
            .await
            .unwrap();

        a.is_active = false;
        repo.update(a).await.unwrap();

        let active = repo.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].plate, "BBB222");
    }

    #[tokio::test]
    async fn update_missing_vehicle_is_not_found() {
        let repo = SeaOrmVehicleRepository::new(test_db().await);
        let mut v = repo
            .save(new_vehicle("CCC333", VehicleCategory::Car, 1200))
            .await
            .unwrap();
        v.id = 999;
        let err = repo.update(v).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Vehicle", .. }));
    }
}
