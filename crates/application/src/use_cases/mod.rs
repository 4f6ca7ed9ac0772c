pub mod pool;

pub use pool::BuildAddressPoolUseCase;
