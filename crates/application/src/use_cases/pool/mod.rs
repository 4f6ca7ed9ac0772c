pub mod build_address_pool;

pub use build_address_pool::BuildAddressPoolUseCase;
