// Mappers module - NROM and CNROM board implementations
//
// This module contains the mapper factory and the two boards this core
// supports. Each mapper handles PRG/CHR address mapping for its board.

mod mapper0;
mod mapper3;

use super::{Cartridge, Mapper};
use mapper0::Mapper0;
use mapper3::Mapper3;

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The requested mapper number is not supported
    UnsupportedMapper(u8),
    /// Invalid cartridge configuration for the mapper
    InvalidConfiguration(String),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "Mapper {} is not supported", num)
            }
            MapperError::InvalidConfiguration(msg) => {
                write!(f, "Invalid mapper configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Create a mapper instance based on the mapper number in the cartridge
///
/// The mapper number is determined from the iNES header. Both supported
/// boards validate their PRG/CHR geometry and fail with
/// `InvalidConfiguration` rather than panic on a malformed image.
///
/// # Errors
/// Returns `MapperError::UnsupportedMapper` if the mapper number is not
/// implemented, or `InvalidConfiguration` for impossible ROM geometry.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge)?)),
        3 => Ok(Box::new(Mapper3::new(cartridge)?)),
        mapper_num => Err(MapperError::UnsupportedMapper(mapper_num)),
    }
}
