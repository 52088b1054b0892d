/// External process adapters
mod command_sbom_generator;

pub use command_sbom_generator::{
    detect_toolchain, CommandSbomGenerator, OutputConvention, SbomCommand,
};
