use super::VehicleCategory;

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub category: VehicleCategory,
    pub engine_displacement_cc: i32,
}

#[derive(Debug, Clone, Default)]
pub struct VehiclePatch {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<VehicleCategory>,
    pub engine_displacement_cc: Option<i32>,
}
