/// Use cases module containing application business logic orchestration
mod run_pipeline;
mod upload_sbom;

pub use run_pipeline::RunPipelineUseCase;
pub use upload_sbom::UploadSbomUseCase;
