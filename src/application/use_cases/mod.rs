/// Use cases - Application business logic orchestration
mod crop_inventory;
mod export_crops;

pub use crop_inventory::CropInventoryUseCase;
pub use export_crops::ExportCropsUseCase;
