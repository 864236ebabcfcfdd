//! Structural conversion between transfer objects and records.

use super::{Contract, ContractDto, NewContract};

/// Converts between [`ContractDto`] and the record shapes.
///
/// Implementations copy fields only; callers validate beforehand.
#[cfg_attr(test, mockall::automock)]
pub trait ContractMapper: Send + Sync {
    /// Build the pre-insert record from a validated transfer object.
    fn to_record(&self, dto: ContractDto) -> NewContract;

    /// Project a stored record back to its transfer shape, dropping the id.
    fn to_transfer(&self, contract: &Contract) -> ContractDto;
}

/// Field-for-field mapper.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContractShapeMapper;

impl ContractMapper for ContractShapeMapper {
    fn to_record(&self, dto: ContractDto) -> NewContract {
        NewContract {
            name: dto.name,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }

    fn to_transfer(&self, contract: &Contract) -> ContractDto {
        ContractDto {
            name: contract.name.clone(),
            start_date: contract.start_date,
            end_date: contract.end_date,
        }
    }
}
